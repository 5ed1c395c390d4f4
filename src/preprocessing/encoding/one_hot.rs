//! One-hot encoding for categorical columns.
//!
//! Each input column is replaced by one 0/1 indicator column per distinct
//! category observed at fit time, named `<column>_<category>`. The original
//! columns are dropped and the indicator columns are appended to the table,
//! preserving row order, so the resulting column count is
//! `original − n_encoded + Σ distinct(c)`.

use crate::error::PipelineError;
use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Column, ColumnType, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

const STAGE: &str = "one-hot encoder";

/// One-hot encoder (unfitted).
#[derive(Clone, Debug)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create an encoder for the named columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            handle_unknown: HandleUnknown::default(),
        }
    }

    /// Set the strategy for categories not seen during fitting.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

/// Serializable parameters for a fitted [`OneHotEncoder`].
#[derive(Clone, Serialize, Deserialize)]
pub struct OneHotEncoderParams {
    /// Encoded column names, in configuration order.
    pub columns: Vec<String>,
    /// Sorted distinct categories per encoded column.
    pub categories: Vec<Vec<String>>,
    /// Strategy for unseen categories.
    pub handle_unknown: HandleUnknown,
}

/// Fitted one-hot encoder holding the per-column category sets.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Sorted distinct categories per encoded column.
    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Indicator column names the transform will produce, in output order.
    pub fn output_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.categories)
            .flat_map(|(col, cats)| cats.iter().map(move |c| format!("{}_{}", col, c)))
            .collect()
    }
}

impl Transformer for OneHotEncoder {
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, PipelineError> {
        if self.columns.is_empty() {
            return Err(PipelineError::config(STAGE, "no columns configured"));
        }

        let mut categories = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let col = table.require_column(name, STAGE)?;
            if col.dtype() != ColumnType::Categorical {
                return Err(PipelineError::config(
                    STAGE,
                    format!("column '{}' is not categorical", name),
                ));
            }
            let distinct: BTreeSet<&str> = col
                .values()
                .iter()
                .filter_map(|v| v.as_ref().and_then(Value::as_str))
                .collect();
            if distinct.is_empty() {
                return Err(PipelineError::insufficient(STAGE, name.clone()));
            }
            categories.push(distinct.into_iter().map(str::to_string).collect());
        }

        let fitted = FittedOneHotEncoder {
            columns: self.columns.clone(),
            categories,
            handle_unknown: self.handle_unknown,
        };

        // Indicator names must not collide with each other or with the
        // columns that survive the encoding.
        let survivors: HashSet<&str> = table
            .column_names()
            .into_iter()
            .filter(|n| !self.columns.iter().any(|c| c == n))
            .collect();
        let mut seen: HashSet<String> = HashSet::new();
        for name in fitted.output_names() {
            if survivors.contains(name.as_str()) || !seen.insert(name.clone()) {
                return Err(PipelineError::config(
                    STAGE,
                    format!("indicator column name '{}' collides", name),
                ));
            }
        }

        Ok(fitted)
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Params = OneHotEncoderParams;

    fn transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let column_refs: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        let mut result = table.drop_columns(&column_refs, STAGE)?;

        for (name, cats) in self.columns.iter().zip(&self.categories) {
            let col = table.require_column(name, STAGE)?;

            // Per-row category position, or None for unseen with Ignore.
            let mut positions = Vec::with_capacity(col.len());
            for value in col.values() {
                let label = value.as_ref().and_then(Value::as_str).ok_or_else(|| {
                    PipelineError::config(
                        STAGE,
                        format!("missing or non-string value in column '{}'", name),
                    )
                })?;
                match cats.iter().position(|c| c == label) {
                    Some(pos) => positions.push(Some(pos)),
                    None => match self.handle_unknown {
                        HandleUnknown::Ignore => positions.push(None),
                        HandleUnknown::Error => {
                            return Err(PipelineError::config(
                                STAGE,
                                format!("unknown category '{}' in column '{}'", label, name),
                            ));
                        }
                    },
                }
            }

            for (cat_idx, cat) in cats.iter().enumerate() {
                let values = positions
                    .iter()
                    .map(|pos| Some(Value::Int(i64::from(*pos == Some(cat_idx)))))
                    .collect();
                let indicator =
                    Column::new(format!("{}_{}", name, cat), ColumnType::Int, values);
                result = result.with_column_appended(indicator)?;
            }
        }

        Ok(result)
    }

    /// Reconstruct the categorical columns by argmax over each indicator
    /// group, dropping the indicators.
    fn inverse_transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let output_names = self.output_names();
        let name_refs: Vec<&str> = output_names.iter().map(String::as_str).collect();
        let mut result = table.drop_columns(&name_refs, STAGE)?;

        for (name, cats) in self.columns.iter().zip(&self.categories) {
            let indicators: Vec<&Column> = cats
                .iter()
                .map(|cat| table.require_column(&format!("{}_{}", name, cat), STAGE))
                .collect::<Result<_, _>>()?;

            let n_rows = table.n_rows();
            let mut values = Vec::with_capacity(n_rows);
            for row in 0..n_rows {
                let mut best: Option<(usize, f64)> = None;
                for (cat_idx, col) in indicators.iter().enumerate() {
                    let v = col
                        .get(row)
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0);
                    if best.map_or(true, |(_, b)| v > b) {
                        best = Some((cat_idx, v));
                    }
                }
                let (cat_idx, _) = best.ok_or_else(|| {
                    PipelineError::insufficient(STAGE, name.clone())
                })?;
                values.push(Some(Value::Str(cats[cat_idx].clone())));
            }
            result = result
                .with_column_appended(Column::new(name, ColumnType::Categorical, values))?;
        }

        Ok(result)
    }

    fn extract_params(&self) -> Self::Params {
        OneHotEncoderParams {
            columns: self.columns.clone(),
            categories: self.categories.clone(),
            handle_unknown: self.handle_unknown,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PipelineError> {
        Ok(Self {
            columns: params.columns,
            categories: params.categories,
            handle_unknown: params.handle_unknown,
        })
    }
}
