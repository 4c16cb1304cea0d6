//! `SQLite` backend: a hand-rolled deadpool manager over `rusqlite`
//! connections, with all access funneled through blocking tasks.

pub mod config;
pub mod params;
pub mod query;

use std::sync::Arc;

use crate::error::DbError;
use crate::rows::RowSet;
use crate::translation::to_sqlite_placeholders;
use crate::values::DbValue;

use self::config::{SharedSqliteConnection, SqliteObject};

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, DbError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, DbError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| DbError::Execution(format!("sqlite spawn_blocking join error: {e}")))?
}

/// Execute a statement batch (schema DDL).
///
/// # Errors
/// Returns `DbError::Sqlite` on execution failure.
pub async fn execute_batch(conn: &SqliteObject, sql: &str) -> Result<(), DbError> {
    let sql = sql.to_string();
    run_blocking(Arc::clone(&**conn), move |c| {
        c.execute_batch(&sql).map_err(DbError::Sqlite)
    })
    .await
}

/// Execute a query and collect its rows. Placeholders are rewritten from
/// `$N` to `?N` before preparation.
///
/// # Errors
/// Returns `DbError::Sqlite` on execution failure, `DbError::Decode` on
/// unreadable cells.
pub async fn execute_select(
    conn: &SqliteObject,
    sql: &str,
    params: &[DbValue],
) -> Result<RowSet, DbError> {
    let sql = to_sqlite_placeholders(sql).into_owned();
    let values = params::to_sqlite_values(params);
    run_blocking(Arc::clone(&**conn), move |c| {
        let mut stmt = c.prepare(&sql)?;
        query::build_result_set(&mut stmt, &values)
    })
    .await
}

/// Execute a DML statement and return the affected row count.
///
/// # Errors
/// Returns `DbError::Sqlite` on execution failure.
pub async fn execute_dml(
    conn: &SqliteObject,
    sql: &str,
    params: &[DbValue],
) -> Result<u64, DbError> {
    let sql = to_sqlite_placeholders(sql).into_owned();
    let values = params::to_sqlite_values(params);
    run_blocking(Arc::clone(&**conn), move |c| {
        let mut stmt = c.prepare(&sql)?;
        let param_refs: Vec<&dyn rusqlite::ToSql> =
            values.iter().map(|v| v as &dyn rusqlite::ToSql).collect();
        let affected = stmt.execute(&param_refs[..])?;
        Ok(affected as u64)
    })
    .await
}
