use tracing::info;

use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::pool::{Database, DatabaseKind};

#[cfg(feature = "postgres")]
const POSTGRES_SCHEMA: &str = include_str!("../sql/postgres/schema.sql");
#[cfg(feature = "sqlite")]
const SQLITE_SCHEMA: &str = include_str!("../sql/sqlite/schema.sql");

/// The embedded DDL for one backend. Idempotent: every statement is
/// `CREATE TABLE IF NOT EXISTS`.
#[must_use]
pub fn schema_for(kind: DatabaseKind) -> &'static str {
    match kind {
        #[cfg(feature = "postgres")]
        DatabaseKind::Postgres => POSTGRES_SCHEMA,
        #[cfg(feature = "sqlite")]
        DatabaseKind::Sqlite => SQLITE_SCHEMA,
    }
}

/// Apply the schema for the database's own dialect.
///
/// # Errors
/// Returns `DbError` if the DDL batch fails.
pub async fn apply_schema(db: &Database) -> Result<(), DbError> {
    let mut conn = db.acquire().await?;
    conn.execute_batch(schema_for(db.kind())).await?;
    info!(kind = ?db.kind(), "schema applied");
    Ok(())
}
