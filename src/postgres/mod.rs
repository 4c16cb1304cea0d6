//! Postgres backend over `tokio-postgres` with a `deadpool-postgres` pool.

pub mod config;
pub mod params;
pub mod query;

use tokio_postgres::Client;

use crate::error::DbError;
use crate::rows::RowSet;
use crate::values::DbValue;

use self::params::Params;

/// Execute a statement batch (schema DDL) in one round trip.
///
/// # Errors
/// Returns `DbError::Postgres` on execution failure.
pub async fn execute_batch(client: &Client, sql: &str) -> Result<(), DbError> {
    client.batch_execute(sql).await.map_err(DbError::Postgres)
}

/// Execute a query and collect its rows.
///
/// # Errors
/// Returns `DbError::Postgres` on execution failure, decode errors from
/// result processing.
pub async fn execute_select(
    client: &Client,
    sql: &str,
    params: &[DbValue],
) -> Result<RowSet, DbError> {
    let converted = Params::convert(params);
    let rows = client.query(sql, converted.as_refs()).await?;
    query::build_result_set(&rows)
}

/// Execute a DML statement and return the affected row count.
///
/// # Errors
/// Returns `DbError::Postgres` on execution failure.
pub async fn execute_dml(client: &Client, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
    let converted = Params::convert(params);
    let affected = client.execute(sql, converted.as_refs()).await?;
    Ok(affected)
}
