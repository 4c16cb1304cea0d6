use std::sync::Arc;

use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::error::DbError;
use crate::rows::{ColumnSet, DbRow, RowSet};
use crate::values::DbValue;

/// Extract one cell from a `SQLite` row.
///
/// # Errors
/// Returns `DbError::Sqlite` if the cell cannot be read.
pub fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<DbValue, DbError> {
    let value: Value = row.get(idx).map_err(DbError::Sqlite)?;
    Ok(match value {
        Value::Null => DbValue::Null,
        Value::Integer(i) => DbValue::Int(i),
        Value::Real(f) => DbValue::Float(f),
        Value::Text(s) => DbValue::Text(s),
        Value::Blob(_) => {
            return Err(DbError::Decode(format!(
                "unexpected blob value in column {idx}"
            )));
        }
    })
}

/// Run a prepared statement and collect its rows.
///
/// Also used for DML with `RETURNING`, which surfaces rows through the
/// same query path.
///
/// # Errors
/// Returns `DbError::Sqlite` on execution failure, `DbError::Decode` on
/// unreadable cells.
pub fn build_result_set(
    stmt: &mut rusqlite::Statement,
    params: &[Value],
) -> Result<RowSet, DbError> {
    let names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(ToString::to_string)
        .collect();
    let columns = ColumnSet::new(names);

    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let mut rows_iter = stmt.query(&param_refs[..])?;

    let mut set = RowSet::with_capacity(10);
    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            values.push(extract_value(row, idx)?);
        }
        set.push(DbRow::new(Arc::clone(&columns), values));
    }
    Ok(set)
}
