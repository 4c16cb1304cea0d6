use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;
#[cfg(feature = "postgres")]
use tokio_postgres;

/// Unified error type for every operation in this crate.
///
/// Failures always surface as `Err`; "no rows matched" is a successful
/// empty result, never an error.
#[derive(Debug, Error)]
pub enum DbError {
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Postgres(#[from] tokio_postgres::Error),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error(transparent)]
    PoolPostgres(#[from] deadpool::managed::PoolError<tokio_postgres::Error>),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("parameter error: {0}")]
    Parameter(String),

    #[error("SQL execution error: {0}")]
    Execution(String),

    #[error("row decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DbError {
    /// Whether this error was caused by a database constraint (unique
    /// email, missing foreign key, ...), so the web layer can map it to
    /// a user-facing response instead of a 500.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            // SQLSTATE class 23 is "integrity constraint violation".
            DbError::Postgres(e) => e
                .as_db_error()
                .is_some_and(|db| db.code().code().starts_with("23")),
            #[cfg(feature = "sqlite")]
            DbError::Sqlite(e) => matches!(
                e.sqlite_error_code(),
                Some(rusqlite::ErrorCode::ConstraintViolation)
            ),
            _ => false,
        }
    }
}
