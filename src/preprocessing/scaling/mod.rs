//! Feature scaling transformers.
//!
//! - [`MinMaxScaler`]: rescale named numeric columns to `[0, 1]`.
//! - [`StandardScaler`]: center and rescale by mean / population stddev.
//!
//! Degenerate columns (zero range or zero deviation) map every value to
//! `0.0` instead of dividing by zero.

use crate::error::PipelineError;
use crate::preprocessing::traits::Transformer as _;
use crate::table::{Column, ColumnType, Table, Value};
use serde::{Deserialize, Serialize};

pub mod minmax;
pub mod standard;

pub use minmax::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerParams};
pub use standard::{FittedStandardScaler, StandardScaler, StandardScalerParams};

/// Observed `[min, max]` of one column at fit time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnRange {
    /// Column the range belongs to.
    pub column: String,
    /// Observed minimum.
    pub min: f64,
    /// Observed maximum.
    pub max: f64,
}

/// Observed mean and population standard deviation of one column at fit time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnMoments {
    /// Column the moments belong to.
    pub column: String,
    /// Observed mean.
    pub mean: f64,
    /// Observed population standard deviation.
    pub stddev: f64,
}

/// Scaling mode for [`scale_columns`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleMethod {
    /// Linearly map the observed range to `[0, 1]`.
    MinMax,
    /// Center by mean and rescale by population stddev.
    Standard,
}

/// Fit and apply the chosen scaler to the named columns in one call.
pub fn scale_columns(
    table: &Table,
    columns: &[&str],
    method: ScaleMethod,
) -> Result<Table, PipelineError> {
    match method {
        ScaleMethod::MinMax => {
            let (scaled, _) = MinMaxScaler::new(columns.iter().copied()).fit_transform(table)?;
            Ok(scaled)
        }
        ScaleMethod::Standard => {
            let (scaled, _) = StandardScaler::new(columns.iter().copied()).fit_transform(table)?;
            Ok(scaled)
        }
    }
}

/// Rewrite a numeric column as `Float` by mapping each present value,
/// leaving missing values untouched.
pub(crate) fn scaled_column(
    table: Table,
    name: &str,
    stage: &'static str,
    f: impl Fn(f64) -> f64,
) -> Result<Table, PipelineError> {
    let idx = table
        .column_index(name)
        .ok_or_else(|| PipelineError::config(stage, format!("no column named '{}'", name)))?;
    let col = &table.columns()[idx];
    if !col.dtype().is_numeric() {
        return Err(PipelineError::config(
            stage,
            format!("column '{}' is not numeric", name),
        ));
    }

    let values = col
        .values()
        .iter()
        .map(|v| {
            v.as_ref()
                .and_then(Value::as_f64)
                .map(|num| Value::Float(f(num)))
        })
        .collect();
    let scaled = Column::new(col.name(), ColumnType::Float, values);
    Ok(table.with_column_replaced(idx, scaled))
}
