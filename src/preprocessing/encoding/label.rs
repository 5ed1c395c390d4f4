//! Label (ordinal) encoding for a single categorical column.
//!
//! Maps the distinct observed labels, sorted lexicographically, to integer
//! codes `0..n` and replaces the column in place with those codes.

use crate::error::PipelineError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::{Column, ColumnType, Table, Value};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

const STAGE: &str = "label encoder";

/// Label encoder (unfitted).
///
/// # Example
/// ```ignore
/// let encoder = LabelEncoder::new("Gender");
/// let (encoded, fitted) = encoder.fit_transform(&table)?;
/// assert_eq!(fitted.classes(), &["Female", "Male"]); // Female=0, Male=1
/// ```
#[derive(Clone, Debug)]
pub struct LabelEncoder {
    column: String,
}

impl LabelEncoder {
    /// Create a label encoder for the named column.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// Serializable parameters for a fitted [`LabelEncoder`].
#[derive(Clone, Serialize, Deserialize)]
pub struct LabelEncoderParams {
    /// Encoded column name.
    pub column: String,
    /// Distinct labels in sorted order; index is the code.
    pub classes: Vec<String>,
}

/// Fitted label encoder holding the category → code map.
#[derive(Clone, Debug)]
pub struct FittedLabelEncoder {
    column: String,
    classes: Vec<String>,
    class_to_code: HashMap<String, i64>,
}

impl FittedLabelEncoder {
    /// Distinct labels in sorted order; index is the code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct labels.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

impl Transformer for LabelEncoder {
    type Fitted = FittedLabelEncoder;

    fn fit(&self, table: &Table) -> Result<Self::Fitted, PipelineError> {
        let col = table.require_column(&self.column, STAGE)?;
        if col.dtype() != ColumnType::Categorical {
            return Err(PipelineError::config(
                STAGE,
                format!("column '{}' is not categorical", self.column),
            ));
        }

        let classes: BTreeSet<&str> = col
            .values()
            .iter()
            .filter_map(|v| v.as_ref().and_then(Value::as_str))
            .collect();
        if classes.is_empty() {
            return Err(PipelineError::insufficient(STAGE, self.column.clone()));
        }

        let classes: Vec<String> = classes.into_iter().map(str::to_string).collect();
        let class_to_code = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as i64))
            .collect();

        Ok(FittedLabelEncoder {
            column: self.column.clone(),
            classes,
            class_to_code,
        })
    }
}

impl FittedTransformer for FittedLabelEncoder {
    type Params = LabelEncoderParams;

    fn transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let idx = table.column_index(&self.column).ok_or_else(|| {
            PipelineError::config(STAGE, format!("no column named '{}'", self.column))
        })?;
        let col = &table.columns()[idx];

        let mut values = Vec::with_capacity(col.len());
        for value in col.values() {
            let label = value.as_ref().and_then(Value::as_str).ok_or_else(|| {
                PipelineError::config(
                    STAGE,
                    format!("missing or non-string value in column '{}'", self.column),
                )
            })?;
            let code = self.class_to_code.get(label).ok_or_else(|| {
                PipelineError::config(
                    STAGE,
                    format!("unknown category '{}' in column '{}'", label, self.column),
                )
            })?;
            values.push(Some(Value::Int(*code)));
        }

        let encoded = Column::new(col.name(), ColumnType::Int, values);
        Ok(table.clone().with_column_replaced(idx, encoded))
    }

    fn inverse_transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let idx = table.column_index(&self.column).ok_or_else(|| {
            PipelineError::config(STAGE, format!("no column named '{}'", self.column))
        })?;
        let col = &table.columns()[idx];

        let mut values = Vec::with_capacity(col.len());
        for value in col.values() {
            let code = value
                .as_ref()
                .and_then(Value::as_f64)
                .map(|v| v as usize)
                .ok_or_else(|| {
                    PipelineError::config(
                        STAGE,
                        format!("missing or non-numeric code in column '{}'", self.column),
                    )
                })?;
            let label = self.classes.get(code).ok_or_else(|| {
                PipelineError::config(
                    STAGE,
                    format!("code {} out of range for column '{}'", code, self.column),
                )
            })?;
            values.push(Some(Value::Str(label.clone())));
        }

        let decoded = Column::new(col.name(), ColumnType::Categorical, values);
        Ok(table.clone().with_column_replaced(idx, decoded))
    }

    fn extract_params(&self) -> Self::Params {
        LabelEncoderParams {
            column: self.column.clone(),
            classes: self.classes.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PipelineError> {
        let class_to_code = params
            .classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as i64))
            .collect();
        Ok(Self {
            column: params.column,
            classes: params.classes,
            class_to_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::from_strs("Gender", vec!["Male", "Female", "Male", "Female"]),
            Column::from_ints("Age", vec![25, 30, 35, 40]),
        ])
        .unwrap()
    }

    #[test]
    fn test_codes_follow_sorted_order() {
        let (encoded, fitted) = LabelEncoder::new("Gender").fit_transform(&sample()).unwrap();
        assert_eq!(fitted.classes(), &["Female".to_string(), "Male".to_string()]);
        let col = encoded.column("Gender").unwrap();
        assert_eq!(col.dtype(), ColumnType::Int);
        assert_eq!(col.get(0), Some(&Value::Int(1))); // Male
        assert_eq!(col.get(1), Some(&Value::Int(0))); // Female
    }

    #[test]
    fn test_column_position_and_row_order_preserved() {
        let (encoded, _) = LabelEncoder::new("Gender").fit_transform(&sample()).unwrap();
        assert_eq!(encoded.column_names(), vec!["Gender", "Age"]);
        assert_eq!(encoded.n_rows(), 4);
    }

    #[test]
    fn test_inverse_round_trip() {
        let table = sample();
        let (encoded, fitted) = LabelEncoder::new("Gender").fit_transform(&table).unwrap();
        let decoded = fitted.inverse_transform(&encoded).unwrap();
        assert_eq!(decoded.column("Gender"), table.column("Gender"));
    }

    #[test]
    fn test_unknown_category_fails() {
        let fitted = LabelEncoder::new("Gender").fit(&sample()).unwrap();
        let other = Table::new(vec![
            Column::from_strs("Gender", vec!["Other"]),
            Column::from_ints("Age", vec![1]),
        ])
        .unwrap();
        assert!(fitted.transform(&other).is_err());
    }

    #[test]
    fn test_empty_column_is_insufficient_data() {
        let table = Table::new(vec![Column::new(
            "Gender",
            ColumnType::Categorical,
            vec![None, None],
        )])
        .unwrap();
        let result = LabelEncoder::new("Gender").fit(&table);
        assert!(matches!(
            result,
            Err(PipelineError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_missing_column_is_configuration_error() {
        let result = LabelEncoder::new("nope").fit(&sample());
        assert!(matches!(result, Err(PipelineError::Configuration { .. })));
    }

    #[test]
    fn test_params_round_trip() {
        let fitted = LabelEncoder::new("Gender").fit(&sample()).unwrap();
        let restored = FittedLabelEncoder::from_params(fitted.extract_params()).unwrap();
        assert_eq!(restored.classes(), fitted.classes());
        let encoded = restored.transform(&sample()).unwrap();
        assert_eq!(encoded.column("Gender").unwrap().get(0), Some(&Value::Int(1)));
    }
}
