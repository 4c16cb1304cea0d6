use chrono::NaiveDate;

use crate::error::DbError;
use crate::rows::{ColumnSet, DbRow, RowSet};
use crate::values::DbValue;

/// Extract one cell from a `tokio-postgres` row, by the column's declared
/// type.
///
/// # Errors
/// Returns `DbError::Postgres` if the cell cannot be read, `DbError::Decode`
/// for types this layer does not handle.
pub fn extract_value(row: &tokio_postgres::Row, idx: usize) -> Result<DbValue, DbError> {
    let type_name = row.columns()[idx].type_().name();
    match type_name {
        "int2" => {
            let val: Option<i16> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, |v| DbValue::Int(i64::from(v))))
        }
        "int4" => {
            let val: Option<i32> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, |v| DbValue::Int(i64::from(v))))
        }
        "int8" => {
            let val: Option<i64> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, DbValue::Int))
        }
        "float4" | "float8" => {
            let val: Option<f64> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, DbValue::Float))
        }
        "bool" => {
            let val: Option<bool> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, DbValue::Bool))
        }
        "date" => {
            let val: Option<NaiveDate> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, DbValue::Date))
        }
        "text" | "varchar" | "char" | "bpchar" | "name" => {
            let val: Option<String> = row.try_get(idx)?;
            Ok(val.map_or(DbValue::Null, DbValue::Text))
        }
        other => Err(DbError::Decode(format!(
            "unhandled postgres column type `{other}`"
        ))),
    }
}

/// Collect raw rows into a [`RowSet`], storing column names once.
///
/// # Errors
/// Returns errors from cell extraction.
pub fn build_result_set(rows: &[tokio_postgres::Row]) -> Result<RowSet, DbError> {
    let mut set = RowSet::with_capacity(rows.len());
    let Some(first) = rows.first() else {
        return Ok(set);
    };
    let names: Vec<String> = first.columns().iter().map(|c| c.name().to_string()).collect();
    let columns = ColumnSet::new(names);

    for row in rows {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            values.push(extract_value(row, idx)?);
        }
        set.push(DbRow::new(std::sync::Arc::clone(&columns), values));
    }
    Ok(set)
}
