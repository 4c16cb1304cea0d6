use chrono::NaiveDate;

/// One SQL value, used both for bound parameters and for result cells.
///
/// The accessors are deliberately lenient across the degenerate storage
/// classes SQLite gives us: booleans come back as 0/1 integers and dates
/// as ISO-8601 text, and callers should not have to care which backend
/// produced the row.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl DbValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DbValue::Int(v) => Some(*v),
            DbValue::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DbValue::Float(v) => Some(*v),
            #[allow(clippy::cast_precision_loss)]
            DbValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let DbValue::Text(v) = self { Some(v) } else { None }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DbValue::Bool(v) => Some(*v),
            DbValue::Int(0) => Some(false),
            DbValue::Int(1) => Some(true),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            DbValue::Date(v) => Some(*v),
            DbValue::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        DbValue::Text(v.to_string())
    }
}

impl From<String> for DbValue {
    fn from(v: String) -> Self {
        DbValue::Text(v)
    }
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        DbValue::Int(v)
    }
}

impl From<f64> for DbValue {
    fn from(v: f64) -> Self {
        DbValue::Float(v)
    }
}

impl From<bool> for DbValue {
    fn from(v: bool) -> Self {
        DbValue::Bool(v)
    }
}

impl From<NaiveDate> for DbValue {
    fn from(v: NaiveDate) -> Self {
        DbValue::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_bool_from_integer() {
        assert_eq!(DbValue::Int(1).as_bool(), Some(true));
        assert_eq!(DbValue::Int(0).as_bool(), Some(false));
        assert_eq!(DbValue::Int(7).as_bool(), None);
        assert_eq!(DbValue::Bool(true).as_int(), Some(1));
    }

    #[test]
    fn lenient_date_from_text() {
        let date = NaiveDate::from_ymd_opt(2018, 9, 11).unwrap();
        assert_eq!(DbValue::Text("2018-09-11".into()).as_date(), Some(date));
        assert_eq!(DbValue::Date(date).as_date(), Some(date));
        assert_eq!(DbValue::Text("not a date".into()).as_date(), None);
    }

    #[test]
    fn float_reads_widen_integers() {
        assert_eq!(DbValue::Int(3).as_float(), Some(3.0));
        assert_eq!(DbValue::Float(4.5).as_float(), Some(4.5));
        assert_eq!(DbValue::Text("4.5".into()).as_float(), None);
    }

    #[test]
    fn null_checks() {
        assert!(DbValue::Null.is_null());
        assert!(!DbValue::Int(0).is_null());
        assert_eq!(DbValue::Null.as_int(), None);
    }
}
