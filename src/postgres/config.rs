use deadpool_postgres::Config as PgConfig;
use tokio_postgres::NoTls;
use tracing::info;

use crate::error::DbError;
use crate::pool::{Database, DatabaseKind, DbPool};

impl Database {
    /// Build a pooled Postgres database handle.
    ///
    /// # Errors
    /// Returns `DbError::Config` if a required field is missing,
    /// `DbError::Connection` if the pool cannot be created.
    pub async fn connect_postgres(pg_config: PgConfig) -> Result<Self, DbError> {
        for (field, present) in [
            ("dbname", pg_config.dbname.is_some()),
            ("host", pg_config.host.is_some()),
            ("port", pg_config.port.is_some()),
            ("user", pg_config.user.is_some()),
            ("password", pg_config.password.is_some()),
        ] {
            if !present {
                return Err(DbError::Config(format!("{field} is required")));
            }
        }

        let pool = pg_config
            .create_pool(Some(deadpool_postgres::Runtime::Tokio1), NoTls)
            .map_err(|e| DbError::Connection(format!("failed to create postgres pool: {e}")))?;

        info!(
            dbname = pg_config.dbname.as_deref(),
            host = pg_config.host.as_deref(),
            "postgres pool ready"
        );
        Ok(Database {
            pool: DbPool::Postgres(pool),
            kind: DatabaseKind::Postgres,
        })
    }
}
