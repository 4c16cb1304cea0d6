use std::sync::Arc;

use deadpool::managed::{Manager, Metrics, Object, Pool, RecycleResult};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::DbError;
use crate::pool::{Database, DatabaseKind, DbPool};
use crate::sqlite::run_blocking;

/// `rusqlite::Connection` is not `Sync`, so the pooled object is a shared
/// handle and all access runs through a closure on a blocking task.
pub type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;
pub type SqlitePool = Pool<SqliteManager>;
pub type SqliteObject = Object<SqliteManager>;

/// Options for the `SQLite` pool.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    pub max_connections: usize,
    pub busy_timeout_ms: u32,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            max_connections: 8,
            busy_timeout_ms: 5_000,
        }
    }

    #[must_use]
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub fn with_busy_timeout_ms(mut self, busy_timeout_ms: u32) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }
}

/// Pool manager that opens `SQLite` connections on a blocking task and
/// applies the standard pragmas before handing them out.
#[derive(Debug)]
pub struct SqliteManager {
    opts: SqliteOptions,
}

impl Manager for SqliteManager {
    type Type = SharedSqliteConnection;
    type Error = DbError;

    async fn create(&self) -> Result<SharedSqliteConnection, DbError> {
        let opts = self.opts.clone();
        let conn = tokio::task::spawn_blocking(move || -> Result<rusqlite::Connection, DbError> {
            let conn = rusqlite::Connection::open(&opts.db_path)?;
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = WAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = {};",
                opts.busy_timeout_ms
            ))?;
            Ok(conn)
        })
        .await
        .map_err(|e| DbError::Connection(format!("sqlite open join error: {e}")))??;
        Ok(Arc::new(Mutex::new(conn)))
    }

    async fn recycle(
        &self,
        _conn: &mut SharedSqliteConnection,
        _metrics: &Metrics,
    ) -> RecycleResult<DbError> {
        Ok(())
    }
}

impl Database {
    /// Build a pooled `SQLite` database handle.
    ///
    /// # Errors
    /// Returns `DbError::Connection` if the pool cannot be built or the
    /// initial smoke-test checkout fails.
    pub async fn connect_sqlite(opts: SqliteOptions) -> Result<Self, DbError> {
        let max_connections = opts.max_connections;
        let db_path = opts.db_path.clone();
        let manager = SqliteManager { opts };
        let pool = Pool::builder(manager)
            .max_size(max_connections)
            .build()
            .map_err(|e| DbError::Connection(format!("failed to build sqlite pool: {e}")))?;

        // Smoke test: open one connection now so a bad path fails here,
        // not on the first query.
        {
            let conn: SqliteObject = pool
                .get()
                .await
                .map_err(|e| DbError::Connection(format!("sqlite pool error: {e}")))?;
            run_blocking(Arc::clone(&*conn), |c| {
                c.query_row("SELECT 1", [], |_| Ok(()))
                    .map_err(DbError::Sqlite)
            })
            .await?;
        }

        info!(path = %db_path, max_connections, "sqlite pool ready");
        Ok(Database {
            pool: DbPool::Sqlite(pool),
            kind: DatabaseKind::Sqlite,
        })
    }
}
