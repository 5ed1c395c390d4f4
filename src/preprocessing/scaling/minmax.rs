//! Min-max scaling of named numeric columns.
//!
//! Each configured column is rescaled to `[0, 1]`:
//! ```text
//! v_scaled = (v - min) / (max - min)
//! ```
//! A constant column (`max == min`) maps every value to `0.0` — defined
//! output rather than a division by zero.
//!
//! Fitting parameters are computed over the full table passed in. When
//! scaling runs before a train/test split the scaler sees test rows during
//! fitting; fit on the training partition instead when that leakage matters.

use crate::error::PipelineError;
use crate::preprocessing::scaling::{scaled_column, ColumnRange};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Table, Value};
use serde::{Deserialize, Serialize};

const STAGE: &str = "min-max scaler";

/// Min-max scaler (unfitted).
#[derive(Clone, Debug)]
pub struct MinMaxScaler {
    columns: Vec<String>,
}

impl MinMaxScaler {
    /// Create a scaler for the named numeric columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// Serializable parameters for a fitted [`MinMaxScaler`].
#[derive(Clone, Serialize, Deserialize)]
pub struct MinMaxScalerParams {
    /// Per-column observed range.
    pub stats: Vec<ColumnRange>,
}

/// Fitted min-max scaler holding per-column observed ranges.
#[derive(Clone, Debug)]
pub struct FittedMinMaxScaler {
    stats: Vec<ColumnRange>,
}

impl FittedMinMaxScaler {
    /// Per-column observed `(min, max)` captured at fit time.
    pub fn stats(&self) -> &[ColumnRange] {
        &self.stats
    }
}

impl Transformer for MinMaxScaler {
    type Fitted = FittedMinMaxScaler;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, PipelineError> {
        let mut stats = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let col = table.require_column(name, STAGE)?;
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
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            stats.push(ColumnRange {
                column: name.clone(),
                min,
                max,
            });
        }
        Ok(FittedMinMaxScaler { stats })
    }
}

impl FittedTransformer for FittedMinMaxScaler {
    type Params = MinMaxScalerParams;

    fn transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let mut table = table.clone();
        for stat in &self.stats {
            let (min, max) = (stat.min, stat.max);
            table = scaled_column(table, &stat.column, STAGE, |v| {
                if max == min {
                    0.0
                } else {
                    (v - min) / (max - min)
                }
            })?;
        }
        Ok(table)
    }

    fn inverse_transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let mut table = table.clone();
        for stat in &self.stats {
            let (min, max) = (stat.min, stat.max);
            table = scaled_column(table, &stat.column, STAGE, |v| {
                if max == min {
                    min
                } else {
                    v * (max - min) + min
                }
            })?;
        }
        Ok(table)
    }

    fn extract_params(&self) -> Self::Params {
        MinMaxScalerParams {
            stats: self.stats.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PipelineError> {
        Ok(Self {
            stats: params.stats,
        })
    }
}
