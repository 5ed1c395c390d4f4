//! In-memory tabular data model.
//!
//! A [`Table`] is an ordered sequence of named [`Column`]s. Every column has a
//! declared [`ColumnType`] and holds one [`Value`] per row, where a missing
//! value is represented as `None`. All columns share the same row count and
//! row order is meaningful: transformers preserve it unless they explicitly
//! remove or partition rows.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// A single cell value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Real value.
    Float(f64),
    /// Categorical / string value.
    Str(String),
}

impl Value {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Str(_) => None,
        }
    }

    /// String view of the value, if it is categorical.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:.4}", v),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Declared semantic type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Integer column.
    Int,
    /// Real column.
    Float,
    /// Categorical (string) column.
    Categorical,
}

impl ColumnType {
    /// Whether values of this type have a numeric view.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

/// A named, typed sequence of optional values.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    dtype: ColumnType,
    values: Vec<Option<Value>>,
}

impl Column {
    /// Create a column from its parts.
    pub fn new(name: impl Into<String>, dtype: ColumnType, values: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Convenience constructor for a fully-present integer column.
    pub fn from_ints(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(
            name,
            ColumnType::Int,
            values.into_iter().map(|v| Some(Value::Int(v))).collect(),
        )
    }

    /// Convenience constructor for a fully-present real column.
    pub fn from_floats(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(
            name,
            ColumnType::Float,
            values.into_iter().map(|v| Some(Value::Float(v))).collect(),
        )
    }

    /// Convenience constructor for a fully-present categorical column.
    pub fn from_strs(name: impl Into<String>, values: Vec<&str>) -> Self {
        Self::new(
            name,
            ColumnType::Categorical,
            values
                .into_iter()
                .map(|v| Some(Value::Str(v.to_string())))
                .collect(),
        )
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn dtype(&self) -> ColumnType {
        self.dtype
    }

    /// All values, missing included.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `row`, if present.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row).and_then(|v| v.as_ref())
    }

    /// Non-missing values viewed as `f64`, in row order.
    ///
    /// Only meaningful for numeric columns; string values are skipped.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|v| v.as_ref().and_then(Value::as_f64))
            .collect()
    }

    /// Rewrite an integer column as a real column. No-op for other types.
    pub fn into_float(self) -> Self {
        if self.dtype != ColumnType::Int {
            return self;
        }
        let values = self
            .values
            .into_iter()
            .map(|v| {
                v.map(|v| match v {
                    Value::Int(i) => Value::Float(i as f64),
                    other => other,
                })
            })
            .collect();
        Self {
            name: self.name,
            dtype: ColumnType::Float,
            values,
        }
    }
}

/// An ordered collection of equally-sized, uniquely-named columns.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, validating that all columns share one row count and
    /// that no two columns share a name.
    pub fn new(columns: Vec<Column>) -> Result<Self, PipelineError> {
        if let Some(first) = columns.first() {
            let n = first.len();
            for col in &columns {
                if col.len() != n {
                    return Err(PipelineError::config(
                        "table",
                        format!(
                            "column '{}' has {} rows, expected {}",
                            col.name(),
                            col.len(),
                            n
                        ),
                    ));
                }
            }
        }
        let mut seen = std::collections::HashSet::new();
        for col in &columns {
            if !seen.insert(col.name().to_string()) {
                return Err(PipelineError::config(
                    "table",
                    format!("duplicate column name '{}'", col.name()),
                ));
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Look up a column, failing with a configuration error that names the
    /// requesting stage.
    pub fn require_column(&self, name: &str, stage: &'static str) -> Result<&Column, PipelineError> {
        self.column(name)
            .ok_or_else(|| PipelineError::config(stage, format!("no column named '{}'", name)))
    }

    /// Replace the column at `index`, keeping table order.
    pub fn with_column_replaced(mut self, index: usize, column: Column) -> Self {
        self.columns[index] = column;
        self
    }

    /// Append a column to the end of the table.
    pub fn with_column_appended(mut self, column: Column) -> Result<Self, PipelineError> {
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(PipelineError::config(
                "table",
                format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    self.n_rows()
                ),
            ));
        }
        if self.column(column.name()).is_some() {
            return Err(PipelineError::config(
                "table",
                format!("duplicate column name '{}'", column.name()),
            ));
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Drop the named columns, keeping the order of the rest.
    pub fn drop_columns(&self, names: &[&str], stage: &'static str) -> Result<Self, PipelineError> {
        for name in names {
            self.require_column(name, stage)?;
        }
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.contains(&c.name()))
            .cloned()
            .collect();
        Ok(Self { columns })
    }

    /// New table containing only the named columns, in the given order.
    pub fn select(&self, names: &[&str], stage: &'static str) -> Result<Self, PipelineError> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push(self.require_column(name, stage)?.clone());
        }
        Ok(Self { columns })
    }

    /// New table containing the given rows of every column, in index order.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = indices.iter().map(|&i| c.values()[i].clone()).collect();
                Column::new(c.name(), c.dtype(), values)
            })
            .collect();
        Self { columns }
    }

    /// One row as a slice of optional cell references.
    pub fn row(&self, index: usize) -> Vec<Option<&Value>> {
        self.columns.iter().map(|c| c.get(index)).collect()
    }

    /// Exact cell-wise equality of two rows, with missing equal to missing.
    pub fn rows_equal(&self, a: usize, b: usize) -> bool {
        self.columns
            .iter()
            .all(|c| c.values()[a] == c.values()[b])
    }

    /// Multi-line preview of the first `n` rows, for diagnostics only.
    pub fn preview(&self, n: usize) -> String {
        let mut out = String::new();
        out.push_str(&self.column_names().join(", "));
        out.push('\n');
        for row in 0..self.n_rows().min(n) {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| match c.get(row) {
                    Some(v) => v.to_string(),
                    None => "NaN".to_string(),
                })
                .collect();
            out.push_str(&cells.join(", "));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::from_ints("a", vec![1, 2, 3]),
            Column::from_strs("b", vec!["x", "y", "z"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let t = sample();
        assert_eq!(t.n_rows(), 3);
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::from_ints("a", vec![1, 2, 3]),
            Column::from_ints("b", vec![1]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_table_rejects_duplicate_names() {
        let result = Table::new(vec![
            Column::from_ints("a", vec![1]),
            Column::from_ints("a", vec![2]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_require_column_unknown() {
        let t = sample();
        let err = t.require_column("nope", "test").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_take_rows_preserves_order() {
        let t = sample();
        let sub = t.take_rows(&[2, 0]);
        assert_eq!(sub.n_rows(), 2);
        assert_eq!(sub.column("a").unwrap().get(0), Some(&Value::Int(3)));
        assert_eq!(sub.column("a").unwrap().get(1), Some(&Value::Int(1)));
    }

    #[test]
    fn test_drop_columns() {
        let t = sample();
        let dropped = t.drop_columns(&["a"], "test").unwrap();
        assert_eq!(dropped.column_names(), vec!["b"]);
        assert!(t.drop_columns(&["missing"], "test").is_err());
    }

    #[test]
    fn test_rows_equal_with_missing() {
        let t = Table::new(vec![Column::new(
            "a",
            ColumnType::Int,
            vec![None, None, Some(Value::Int(1))],
        )])
        .unwrap();
        assert!(t.rows_equal(0, 1));
        assert!(!t.rows_equal(0, 2));
    }

    #[test]
    fn test_into_float_promotion() {
        let col = Column::from_ints("a", vec![1, 2]).into_float();
        assert_eq!(col.dtype(), ColumnType::Float);
        assert_eq!(col.get(0), Some(&Value::Float(1.0)));
    }
}
