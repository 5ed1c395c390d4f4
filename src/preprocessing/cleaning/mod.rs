//! Value repair and duplicate removal.
//!
//! The [`Cleaner`] is configured with one repair rule per column:
//!
//! - [`RepairRule::Bound`] — numeric column; values outside `[min, max]` are
//!   replaced by the column's median. The median is computed over all
//!   non-missing values, out-of-range ones included, so the repair target is
//!   a statistic of the raw column.
//! - [`RepairRule::FillMedian`] — numeric column; missing values are replaced
//!   by the median of the non-missing values.
//! - [`RepairRule::FillMode`] — categorical column; missing values are
//!   replaced by the mode, ties broken by the lexicographically smallest label.
//!
//! After value repair the transform removes exact-duplicate rows, keeping the
//! first occurrence in original row order. The column set is never changed.

use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Column, ColumnType, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const STAGE: &str = "cleaner";

/// Per-column repair rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RepairRule {
    /// Replace values outside `[min, max]` with the column median.
    Bound {
        /// Lower bound of the plausible range.
        min: f64,
        /// Upper bound of the plausible range.
        max: f64,
    },
    /// Replace missing values with the column median.
    FillMedian,
    /// Replace missing values with the column mode.
    FillMode,
}

/// Cleaner transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct Cleaner {
    rules: Vec<(String, RepairRule)>,
}

impl Cleaner {
    /// Create a cleaner with no rules. Duplicate removal always applies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound a numeric column to a plausible range.
    pub fn bound(mut self, column: impl Into<String>, min: f64, max: f64) -> Self {
        self.rules.push((column.into(), RepairRule::Bound { min, max }));
        self
    }

    /// Fill missing values of a numeric column with its median.
    pub fn fill_median(mut self, column: impl Into<String>) -> Self {
        self.rules.push((column.into(), RepairRule::FillMedian));
        self
    }

    /// Fill missing values of a categorical column with its mode.
    pub fn fill_mode(mut self, column: impl Into<String>) -> Self {
        self.rules.push((column.into(), RepairRule::FillMode));
        self
    }
}

/// Median of a sorted-on-demand sample.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Most frequent label; ties broken by the lexicographically smallest.
fn mode(values: &[&str]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (label, count) in counts {
        best = match best {
            None => Some((label, count)),
            Some((b_label, b_count)) => {
                if count > b_count || (count == b_count && label < b_label) {
                    Some((label, count))
                } else {
                    Some((b_label, b_count))
                }
            }
        };
    }
    best.map(|(label, _)| label.to_string()).unwrap_or_default()
}

/// One resolved repair: the rule plus the fill value learned at fit time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repair {
    /// Column the repair applies to.
    pub column: String,
    /// Rule that produced the fill value.
    pub rule: RepairRule,
    /// Learned replacement value.
    pub fill: Value,
}

/// Serializable parameters for a fitted [`Cleaner`].
#[derive(Clone, Serialize, Deserialize)]
pub struct CleanerParams {
    /// Resolved repairs in configuration order.
    pub repairs: Vec<Repair>,
}

/// Fitted cleaner holding resolved fill values.
#[derive(Clone, Debug)]
pub struct FittedCleaner {
    repairs: Vec<Repair>,
}

impl FittedCleaner {
    /// Resolved repairs in configuration order.
    pub fn repairs(&self) -> &[Repair] {
        &self.repairs
    }
}

impl Transformer for Cleaner {
    type Fitted = FittedCleaner;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, PipelineError> {
        let mut repairs = Vec::with_capacity(self.rules.len());
        for (name, rule) in &self.rules {
            let col = table.require_column(name, STAGE)?;
            let fill = match rule {
                RepairRule::Bound { .. } | RepairRule::FillMedian => {
                    if !col.dtype().is_numeric() {
                        return Err(PipelineError::config(
                            STAGE,
                            format!("column '{}' is not numeric", name),
                        ));
                    }
                    let values = col.numeric_values();
                    if values.is_empty() {
                        return Err(PipelineError::insufficient(STAGE, name.clone()));
                    }
                    Value::Float(median(&values))
                }
                RepairRule::FillMode => {
                    if col.dtype() != ColumnType::Categorical {
                        return Err(PipelineError::config(
                            STAGE,
                            format!("column '{}' is not categorical", name),
                        ));
                    }
                    let values: Vec<&str> = col
                        .values()
                        .iter()
                        .filter_map(|v| v.as_ref().and_then(Value::as_str))
                        .collect();
                    if values.is_empty() {
                        return Err(PipelineError::insufficient(STAGE, name.clone()));
                    }
                    Value::Str(mode(&values))
                }
            };
            repairs.push(Repair {
                column: name.clone(),
                rule: rule.clone(),
                fill,
            });
        }
        Ok(FittedCleaner { repairs })
    }
}

/// Fill value adjusted to the column's type: an integral median stays an
/// integer in an `Int` column, a fractional one promotes the column to
/// `Float`.
fn numeric_fill(fill: &Value, dtype: ColumnType) -> (Value, bool) {
    match (fill, dtype) {
        (Value::Float(f), ColumnType::Int) => {
            if f.fract() == 0.0 {
                (Value::Int(*f as i64), false)
            } else {
                (Value::Float(*f), true)
            }
        }
        (other, _) => (other.clone(), false),
    }
}

impl FittedTransformer for FittedCleaner {
    type Params = CleanerParams;

    fn transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let mut table = table.clone();

        for repair in &self.repairs {
            let idx = table
                .column_index(&repair.column)
                .ok_or_else(|| {
                    PipelineError::config(
                        STAGE,
                        format!("no column named '{}'", repair.column),
                    )
                })?;
            let col = &table.columns()[idx];
            let (fill, promote) = numeric_fill(&repair.fill, col.dtype());

            let values: Vec<Option<Value>> = col
                .values()
                .iter()
                .map(|v| match (&repair.rule, v) {
                    (RepairRule::Bound { min, max }, Some(val)) => {
                        match val.as_f64() {
                            Some(num) if num < *min || num > *max => Some(fill.clone()),
                            _ => Some(val.clone()),
                        }
                    }
                    (RepairRule::Bound { .. }, None) => None,
                    (RepairRule::FillMedian | RepairRule::FillMode, None) => Some(fill.clone()),
                    (_, Some(val)) => Some(val.clone()),
                })
                .collect();

            let mut new_col = Column::new(col.name(), col.dtype(), values);
            if promote {
                new_col = new_col.into_float();
            }
            table = table.with_column_replaced(idx, new_col);
        }

        // Keep the first occurrence of each distinct row, in original order.
        let mut kept: Vec<usize> = Vec::with_capacity(table.n_rows());
        for row in 0..table.n_rows() {
            if !kept.iter().any(|&k| table.rows_equal(k, row)) {
                kept.push(row);
            }
        }
        Ok(table.take_rows(&kept))
    }

    fn inverse_transform(&self, _table: &Table) -> Result<Table, PipelineError> {
        Err(PipelineError::config(
            STAGE,
            "cleaning is not invertible".to_string(),
        ))
    }

    fn extract_params(&self) -> Self::Params {
        CleanerParams {
            repairs: self.repairs.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PipelineError> {
        Ok(Self {
            repairs: params.repairs,
        })
    }
}
