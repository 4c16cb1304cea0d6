#[cfg(feature = "postgres")]
use deadpool_postgres::{Object as PostgresObject, Pool as PostgresPool};

#[cfg(feature = "sqlite")]
use crate::sqlite::config::{SqliteObject, SqlitePool};

use crate::error::DbError;

/// Which backend a [`Database`] talks to.
///
/// Derives `ValueEnum` so a hosting binary can take `--database
/// postgres|sqlite` straight from clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatabaseKind {
    #[cfg(feature = "postgres")]
    Postgres,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

/// Connection pool, one variant per enabled backend.
#[derive(Clone)]
pub enum DbPool {
    #[cfg(feature = "postgres")]
    Postgres(PostgresPool),
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
}

impl std::fmt::Debug for DbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => f.debug_tuple("Postgres").finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => f.debug_tuple("Sqlite").finish(),
        }
    }
}

/// A database handle: the pool plus which backend it is.
///
/// Cheap to clone; every operation checks a connection out of the pool
/// and returns it on drop, on every exit path including errors.
#[derive(Debug, Clone)]
pub struct Database {
    pub(crate) pool: DbPool,
    pub(crate) kind: DatabaseKind,
}

impl Database {
    #[must_use]
    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Check one connection out of the pool.
    ///
    /// # Errors
    /// Returns `DbError::PoolPostgres` / `DbError::Connection` if the pool
    /// cannot supply a connection.
    pub async fn acquire(&self) -> Result<DbConnection, DbError> {
        match &self.pool {
            #[cfg(feature = "postgres")]
            DbPool::Postgres(pool) => {
                let conn: PostgresObject = pool.get().await.map_err(DbError::PoolPostgres)?;
                Ok(DbConnection::Postgres(conn))
            }
            #[cfg(feature = "sqlite")]
            DbPool::Sqlite(pool) => {
                let conn: SqliteObject = pool
                    .get()
                    .await
                    .map_err(|e| DbError::Connection(format!("sqlite pool error: {e}")))?;
                Ok(DbConnection::Sqlite(conn))
            }
        }
    }
}

/// One checked-out pooled connection.
pub enum DbConnection {
    #[cfg(feature = "postgres")]
    Postgres(PostgresObject),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteObject),
}

impl std::fmt::Debug for DbConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => f.debug_tuple("Postgres").finish(),
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => f.debug_tuple("Sqlite").finish(),
        }
    }
}
