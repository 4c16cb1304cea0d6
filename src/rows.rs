use std::collections::HashMap;
use std::sync::Arc;

use crate::error::DbError;
use crate::values::DbValue;

/// Column metadata shared by every row of one result set.
///
/// Names and the name-to-index map are built once per query and handed
/// to each row behind an `Arc`, so column lookup is a hash probe rather
/// than a per-row linear scan.
#[derive(Debug)]
pub struct ColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    #[must_use]
    pub fn new(names: Vec<String>) -> Arc<Self> {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Arc::new(Self { names, index })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// One row of a result set, with column-name access.
#[derive(Debug, Clone)]
pub struct DbRow {
    columns: Arc<ColumnSet>,
    values: Vec<DbValue>,
}

impl DbRow {
    #[must_use]
    pub fn new(columns: Arc<ColumnSet>, values: Vec<DbValue>) -> Self {
        Self { columns, values }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&DbValue> {
        self.columns
            .position(column)
            .and_then(|idx| self.values.get(idx))
    }

    /// Like [`get`](Self::get), but a missing column is a decode error.
    ///
    /// # Errors
    /// Returns `DbError::Decode` if the column is absent from this result set.
    pub fn require(&self, column: &str) -> Result<&DbValue, DbError> {
        self.get(column)
            .ok_or_else(|| DbError::Decode(format!("missing column `{column}`")))
    }

    /// # Errors
    /// Returns `DbError::Decode` if the column is absent or not readable as an integer.
    pub fn int(&self, column: &str) -> Result<i64, DbError> {
        self.require(column)?
            .as_int()
            .ok_or_else(|| DbError::Decode(format!("column `{column}` is not an integer")))
    }

    /// # Errors
    /// Returns `DbError::Decode` if the column is absent or not readable as a float.
    pub fn float(&self, column: &str) -> Result<f64, DbError> {
        self.require(column)?
            .as_float()
            .ok_or_else(|| DbError::Decode(format!("column `{column}` is not a float")))
    }

    /// # Errors
    /// Returns `DbError::Decode` if the column is absent or not text.
    pub fn text(&self, column: &str) -> Result<String, DbError> {
        self.require(column)?
            .as_text()
            .map(ToString::to_string)
            .ok_or_else(|| DbError::Decode(format!("column `{column}` is not text")))
    }

    /// Text column that may be NULL.
    ///
    /// # Errors
    /// Returns `DbError::Decode` if the column is absent or non-NULL but not text.
    pub fn opt_text(&self, column: &str) -> Result<Option<String>, DbError> {
        let value = self.require(column)?;
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_text()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| DbError::Decode(format!("column `{column}` is not text")))
    }

    /// # Errors
    /// Returns `DbError::Decode` if the column is absent or not readable as a boolean.
    pub fn bool(&self, column: &str) -> Result<bool, DbError> {
        self.require(column)?
            .as_bool()
            .ok_or_else(|| DbError::Decode(format!("column `{column}` is not a boolean")))
    }

    /// # Errors
    /// Returns `DbError::Decode` if the column is absent or not readable as a date.
    pub fn date(&self, column: &str) -> Result<chrono::NaiveDate, DbError> {
        self.require(column)?
            .as_date()
            .ok_or_else(|| DbError::Decode(format!("column `{column}` is not a date")))
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    #[must_use]
    pub fn values(&self) -> &[DbValue] {
        &self.values
    }
}

/// The ordered collection of rows returned by one query execution.
#[derive(Debug, Default)]
pub struct RowSet {
    pub rows: Vec<DbRow>,
}

impl RowSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, row: DbRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decode every row into `T`.
    ///
    /// # Errors
    /// Returns the first decode failure.
    pub fn decode<T: FromRow>(self) -> Result<Vec<T>, DbError> {
        self.rows.iter().map(T::from_row).collect()
    }

    /// Decode a result set expected to contain exactly one row (an
    /// `INSERT ... RETURNING *`).
    ///
    /// # Errors
    /// Returns `DbError::Decode` if the set is empty, or the row's decode failure.
    pub fn decode_one<T: FromRow>(self) -> Result<T, DbError> {
        let row = self
            .rows
            .first()
            .ok_or_else(|| DbError::Decode("expected one row, got none".into()))?;
        T::from_row(row)
    }
}

/// Explicit row-to-record mapping, one impl per entity type.
pub trait FromRow: Sized {
    /// # Errors
    /// Returns `DbError::Decode` when a column is missing or of the wrong type.
    fn from_row(row: &DbRow) -> Result<Self, DbError>;
}
