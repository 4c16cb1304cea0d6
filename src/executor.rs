use async_trait::async_trait;
use tracing::debug;

#[cfg(feature = "postgres")]
use crate::postgres;
#[cfg(feature = "sqlite")]
use crate::sqlite;

use crate::error::DbError;
use crate::pool::DbConnection;
use crate::rows::RowSet;
use crate::values::DbValue;

/// The execution seam between the query layer and the backends.
///
/// Queries are written once in Postgres `$N` placeholder style; the
/// SQLite implementation rewrites them before preparation.
#[async_trait]
pub trait QueryExecutor {
    /// Execute a batch of statements with no parameters (schema DDL).
    async fn execute_batch(&mut self, sql: &str) -> Result<(), DbError>;

    /// Execute one query and collect its row set. DML with `RETURNING`
    /// goes through here too.
    async fn fetch(&mut self, sql: &str, params: &[DbValue]) -> Result<RowSet, DbError>;

    /// Execute one DML statement and return the affected row count.
    async fn execute(&mut self, sql: &str, params: &[DbValue]) -> Result<u64, DbError>;
}

impl DbConnection {
    fn backend(&self) -> &'static str {
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(_) => "postgres",
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl QueryExecutor for DbConnection {
    async fn execute_batch(&mut self, sql: &str) -> Result<(), DbError> {
        debug!(backend = self.backend(), "execute_batch");
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => postgres::execute_batch(conn, sql).await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => sqlite::execute_batch(conn, sql).await,
        }
    }

    async fn fetch(&mut self, sql: &str, params: &[DbValue]) -> Result<RowSet, DbError> {
        debug!(
            backend = self.backend(),
            statement = sql,
            params = params.len(),
            "fetch"
        );
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => postgres::execute_select(conn, sql, params).await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => sqlite::execute_select(conn, sql, params).await,
        }
    }

    async fn execute(&mut self, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
        debug!(
            backend = self.backend(),
            statement = sql,
            params = params.len(),
            "execute"
        );
        match self {
            #[cfg(feature = "postgres")]
            DbConnection::Postgres(conn) => postgres::execute_dml(conn, sql, params).await,
            #[cfg(feature = "sqlite")]
            DbConnection::Sqlite(conn) => sqlite::execute_dml(conn, sql, params).await,
        }
    }
}
