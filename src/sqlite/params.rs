use rusqlite::types::Value;

use crate::values::DbValue;

/// Convert one bound parameter to a rusqlite `Value`.
///
/// Booleans become 0/1 integers and dates ISO-8601 text; the lenient
/// accessors on [`DbValue`] read them back symmetrically.
#[must_use]
pub fn to_sqlite_value(value: &DbValue) -> Value {
    match value {
        DbValue::Int(i) => Value::Integer(*i),
        DbValue::Float(f) => Value::Real(*f),
        DbValue::Text(s) => Value::Text(s.clone()),
        DbValue::Bool(b) => Value::Integer(i64::from(*b)),
        DbValue::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
        DbValue::Null => Value::Null,
    }
}

#[must_use]
pub fn to_sqlite_values(params: &[DbValue]) -> Vec<Value> {
    params.iter().map(to_sqlite_value).collect()
}
