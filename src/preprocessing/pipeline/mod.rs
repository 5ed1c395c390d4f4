//! Chaining of preprocessing steps.
//!
//! A [`Pipeline`] composes cleaner, encoder and scaler steps so that each
//! step's output table feeds the next step's fit. This replaces ad-hoc
//! stage-by-stage scripting with an explicit table-in, table-out composition.
//!
//! # Example
//! ```ignore
//! let pipeline = Pipeline::new()
//!     .add(Cleaner::new().bound("Age", 0.0, 100.0))
//!     .add(LabelEncoder::new("Gender"))
//!     .add(OneHotEncoder::new(["Education", "City"]))
//!     .add(MinMaxScaler::new(["Age", "Income"]));
//!
//! let (prepared, fitted) = pipeline.fit_transform(&table)?;
//! ```

use crate::error::PipelineError;
use crate::preprocessing::cleaning::{Cleaner, FittedCleaner};
use crate::preprocessing::encoding::{
    FittedLabelEncoder, FittedOneHotEncoder, LabelEncoder, OneHotEncoder,
};
use crate::preprocessing::scaling::{
    FittedMinMaxScaler, FittedStandardScaler, MinMaxScaler, StandardScaler,
};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::table::Table;

/// An unfitted step in the pipeline.
#[derive(Clone)]
pub enum PipelineStep {
    /// Value repair and duplicate removal.
    Cleaner(Cleaner),
    /// Ordinal encoding of one categorical column.
    LabelEncoder(LabelEncoder),
    /// One-hot expansion of categorical columns.
    OneHotEncoder(OneHotEncoder),
    /// Min-max scaling of numeric columns.
    MinMaxScaler(MinMaxScaler),
    /// Z-score scaling of numeric columns.
    StandardScaler(StandardScaler),
}

impl PipelineStep {
    fn fit_transform_step(&self, table: &Table) -> Result<(Table, FittedPipelineStep), PipelineError> {
        Ok(match self {
            PipelineStep::Cleaner(t) => {
                let (out, fitted) = t.fit_transform(table)?;
                (out, FittedPipelineStep::Cleaner(fitted))
            }
            PipelineStep::LabelEncoder(t) => {
                let (out, fitted) = t.fit_transform(table)?;
                (out, FittedPipelineStep::LabelEncoder(fitted))
            }
            PipelineStep::OneHotEncoder(t) => {
                let (out, fitted) = t.fit_transform(table)?;
                (out, FittedPipelineStep::OneHotEncoder(fitted))
            }
            PipelineStep::MinMaxScaler(t) => {
                let (out, fitted) = t.fit_transform(table)?;
                (out, FittedPipelineStep::MinMaxScaler(fitted))
            }
            PipelineStep::StandardScaler(t) => {
                let (out, fitted) = t.fit_transform(table)?;
                (out, FittedPipelineStep::StandardScaler(fitted))
            }
        })
    }
}

impl From<Cleaner> for PipelineStep {
    fn from(t: Cleaner) -> Self {
        PipelineStep::Cleaner(t)
    }
}

impl From<LabelEncoder> for PipelineStep {
    fn from(t: LabelEncoder) -> Self {
        PipelineStep::LabelEncoder(t)
    }
}

impl From<OneHotEncoder> for PipelineStep {
    fn from(t: OneHotEncoder) -> Self {
        PipelineStep::OneHotEncoder(t)
    }
}

impl From<MinMaxScaler> for PipelineStep {
    fn from(t: MinMaxScaler) -> Self {
        PipelineStep::MinMaxScaler(t)
    }
}

impl From<StandardScaler> for PipelineStep {
    fn from(t: StandardScaler) -> Self {
        PipelineStep::StandardScaler(t)
    }
}

/// A fitted step, ready to transform further tables.
#[derive(Clone)]
pub enum FittedPipelineStep {
    /// Fitted cleaner.
    Cleaner(FittedCleaner),
    /// Fitted label encoder.
    LabelEncoder(FittedLabelEncoder),
    /// Fitted one-hot encoder.
    OneHotEncoder(FittedOneHotEncoder),
    /// Fitted min-max scaler.
    MinMaxScaler(FittedMinMaxScaler),
    /// Fitted standard scaler.
    StandardScaler(FittedStandardScaler),
}

impl FittedPipelineStep {
    /// Apply this step to a table.
    pub fn transform_step(&self, table: &Table) -> Result<Table, PipelineError> {
        match self {
            FittedPipelineStep::Cleaner(t) => t.transform(table),
            FittedPipelineStep::LabelEncoder(t) => t.transform(table),
            FittedPipelineStep::OneHotEncoder(t) => t.transform(table),
            FittedPipelineStep::MinMaxScaler(t) => t.transform(table),
            FittedPipelineStep::StandardScaler(t) => t.transform(table),
        }
    }

    /// Step name for diagnostics.
    pub fn step_name(&self) -> &'static str {
        match self {
            FittedPipelineStep::Cleaner(_) => "Cleaner",
            FittedPipelineStep::LabelEncoder(_) => "LabelEncoder",
            FittedPipelineStep::OneHotEncoder(_) => "OneHotEncoder",
            FittedPipelineStep::MinMaxScaler(_) => "MinMaxScaler",
            FittedPipelineStep::StandardScaler(_) => "StandardScaler",
        }
    }
}

/// A sequence of preprocessing steps fitted and applied in order.
#[derive(Clone, Default)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the end of the pipeline.
    pub fn add(mut self, step: impl Into<PipelineStep>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fit every step in order, feeding each step's output into the next.
    pub fn fit(&self, table: &Table) -> Result<FittedPipeline, PipelineError> {
        Ok(self.fit_transform(table)?.1)
    }

    /// Fit every step in order and return the final table with the fitted
    /// pipeline.
    pub fn fit_transform(&self, table: &Table) -> Result<(Table, FittedPipeline), PipelineError> {
        let mut current = table.clone();
        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let (next, fitted) = step.fit_transform_step(&current)?;
            fitted_steps.push(fitted);
            current = next;
        }
        Ok((current, FittedPipeline { steps: fitted_steps }))
    }
}

/// A fitted pipeline replaying its steps in order.
#[derive(Clone)]
pub struct FittedPipeline {
    steps: Vec<FittedPipelineStep>,
}

impl FittedPipeline {
    /// Fitted steps in application order.
    pub fn steps(&self) -> &[FittedPipelineStep] {
        &self.steps
    }

    /// Apply every fitted step in order.
    pub fn transform(&self, table: &Table) -> Result<Table, PipelineError> {
        let mut current = table.clone();
        for step in &self.steps {
            current = step.transform_step(&current)?;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnType, Value};

    fn sample() -> Table {
        Table::new(vec![
            Column::new(
                "Age",
                ColumnType::Int,
                vec![
                    Some(Value::Int(25)),
                    Some(Value::Int(150)),
                    Some(Value::Int(35)),
                    Some(Value::Int(25)),
                ],
            ),
            Column::new(
                "Gender",
                ColumnType::Categorical,
                vec![
                    Some(Value::Str("Male".into())),
                    None,
                    Some(Value::Str("Female".into())),
                    Some(Value::Str("Male".into())),
                ],
            ),
            Column::from_strs("City", vec!["Oslo", "Bergen", "Oslo", "Oslo"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_pipeline_chains_stages() {
        let pipeline = Pipeline::new()
            .add(Cleaner::new().bound("Age", 0.0, 100.0).fill_mode("Gender"))
            .add(LabelEncoder::new("Gender"))
            .add(OneHotEncoder::new(["City"]))
            .add(MinMaxScaler::new(["Age"]));
        assert_eq!(pipeline.len(), 4);

        let (prepared, fitted) = pipeline.fit_transform(&sample()).unwrap();

        // Row 3 is an exact duplicate of row 0 and is removed by cleaning.
        assert_eq!(prepared.n_rows(), 3);
        assert_eq!(
            prepared.column_names(),
            vec!["Age", "Gender", "City_Bergen", "City_Oslo"]
        );
        for v in prepared.column("Age").unwrap().numeric_values() {
            assert!((0.0..=1.0).contains(&v));
        }
        assert_eq!(
            fitted
                .steps()
                .iter()
                .map(FittedPipelineStep::step_name)
                .collect::<Vec<_>>(),
            vec!["Cleaner", "LabelEncoder", "OneHotEncoder", "MinMaxScaler"]
        );
    }

    #[test]
    fn test_fitted_pipeline_replays_on_new_table() {
        let pipeline = Pipeline::new()
            .add(LabelEncoder::new("Gender"))
            .add(OneHotEncoder::new(["City"]));
        let base = Table::new(vec![
            Column::from_strs("Gender", vec!["Male", "Female"]),
            Column::from_strs("City", vec!["Oslo", "Bergen"]),
        ])
        .unwrap();
        let (_, fitted) = pipeline.fit_transform(&base).unwrap();

        let fresh = Table::new(vec![
            Column::from_strs("Gender", vec!["Female"]),
            Column::from_strs("City", vec!["Bergen"]),
        ])
        .unwrap();
        let out = fitted.transform(&fresh).unwrap();
        assert_eq!(out.column("Gender").unwrap().get(0), Some(&Value::Int(0)));
        assert_eq!(out.column("City_Bergen").unwrap().get(0), Some(&Value::Int(1)));
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let table = sample();
        let (out, fitted) = Pipeline::new().fit_transform(&table).unwrap();
        assert_eq!(out, table);
        assert!(fitted.steps().is_empty());
    }

    #[test]
    fn test_step_error_propagates() {
        let pipeline = Pipeline::new().add(LabelEncoder::new("nope"));
        assert!(pipeline.fit(&sample()).is_err());
    }
}
