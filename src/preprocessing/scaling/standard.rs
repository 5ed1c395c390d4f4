//! Standard (z-score) scaling of named numeric columns.
//!
//! Each configured column is centered and rescaled:
//! ```text
//! z = (v - mean) / stddev
//! ```
//! The standard deviation is the population deviation (ddof = 0). A constant
//! column (`stddev == 0`) maps every value to `0.0` — defined output rather
//! than a division by zero.

use crate::error::PipelineError;
use crate::preprocessing::scaling::{scaled_column, ColumnMoments};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::Table;
use serde::{Deserialize, Serialize};

const STAGE: &str = "standard scaler";

/// Standard scaler (unfitted).
#[derive(Clone, Debug)]
pub struct StandardScaler {
    columns: Vec<String>,
}

impl StandardScaler {
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

/// Serializable parameters for a fitted [`StandardScaler`].
#[derive(Clone, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Per-column mean and population standard deviation.
    pub stats: Vec<ColumnMoments>,
}

/// Fitted standard scaler holding per-column moments.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler {
    stats: Vec<ColumnMoments>,
}

impl FittedStandardScaler {
    /// Per-column `(mean, stddev)` captured at fit time.
    pub fn stats(&self) -> &[ColumnMoments] {
        &self.stats
    }
}

impl Transformer for StandardScaler {
    type Fitted = FittedStandardScaler;

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
            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            stats.push(ColumnMoments {
                column: name.clone(),
                mean,
                stddev: variance.sqrt(),
            });
        }
        Ok(FittedStandardScaler { stats })
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Params = StandardScalerParams;

    fn transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let mut table = table.clone();
        for stat in &self.stats {
            let (mean, stddev) = (stat.mean, stat.stddev);
            table = scaled_column(table, &stat.column, STAGE, |v| {
                if stddev == 0.0 {
                    0.0
                } else {
                    (v - mean) / stddev
                }
            })?;
        }
        Ok(table)
    }

    fn inverse_transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let mut table = table.clone();
        for stat in &self.stats {
            let (mean, stddev) = (stat.mean, stat.stddev);
            table = scaled_column(table, &stat.column, STAGE, |v| {
                if stddev == 0.0 {
                    mean
                } else {
                    v * stddev + mean
                }
            })?;
        }
        Ok(table)
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
            stats: self.stats.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PipelineError> {
        Ok(Self {
            stats: params.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn sample() -> Table {
        Table::new(vec![Column::from_floats(
            "x",
            vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0],
        )])
        .unwrap()
    }

    #[test]
    fn test_standardized_moments() {
        // Classic sample: mean 5, population stddev 2.
        let (scaled, fitted) = StandardScaler::new(["x"]).fit_transform(&sample()).unwrap();
        assert!((fitted.stats()[0].mean - 5.0).abs() < 1e-12);
        assert!((fitted.stats()[0].stddev - 2.0).abs() < 1e-12);

        let values = scaled.column("x").unwrap().numeric_values();
        assert!((values[0] + 1.5).abs() < 1e-12); // (2-5)/2
        assert!((values[7] - 2.0).abs() < 1e-12); // (9-5)/2
        let sum: f64 = values.iter().sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let table = Table::new(vec![Column::from_floats("x", vec![3.0, 3.0])]).unwrap();
        let (scaled, _) = StandardScaler::new(["x"]).fit_transform(&table).unwrap();
        for v in scaled.column("x").unwrap().numeric_values() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_inverse_recovers_original() {
        let table = sample();
        let (scaled, fitted) = StandardScaler::new(["x"]).fit_transform(&table).unwrap();
        let recovered = fitted.inverse_transform(&scaled).unwrap();
        let orig = table.column("x").unwrap().numeric_values();
        let back = recovered.column("x").unwrap().numeric_values();
        for (a, b) in orig.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_column_fails() {
        let result = StandardScaler::new(["nope"]).fit(&sample());
        assert!(matches!(result, Err(PipelineError::Configuration { .. })));
    }
}
