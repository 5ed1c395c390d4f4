//! Core traits for table transformers.
//!
//! Two central traits:
//! - [`Transformer`]: unfitted, carries configuration and can learn from a table.
//! - [`FittedTransformer`]: holds learned parameters, ready to transform tables
//!   and to be persisted.

use crate::error::PipelineError;
use crate::serialization::SerializableParams;
use crate::table::Table;

/// An unfitted transformer with configuration.
///
/// A transformer learns parameters (medians, category maps, column ranges)
/// from a table and can then apply them to that table or any other table with
/// compatible columns.
pub trait Transformer: Clone {
    /// The corresponding fitted transformer type.
    type Fitted: FittedTransformer;

    /// Learn parameters from the table.
    ///
    /// # Errors
    /// Returns [`PipelineError::Configuration`] when a configured column does
    /// not exist or has an incompatible type, and
    /// [`PipelineError::InsufficientData`] when a required aggregate is
    /// undefined because a column has no valid values.
    fn fit(&self, table: &Table) -> Result<Self::Fitted, PipelineError>;

    /// Fit and transform in one step, returning the transformed table along
    /// with the fitted transformer.
    fn fit_transform(&self, table: &Table) -> Result<(Table, Self::Fitted), PipelineError> {
        let fitted = self.fit(table)?;
        let transformed = fitted.transform(table)?;
        Ok((transformed, fitted))
    }
}

/// A fitted transformer with learned parameters.
pub trait FittedTransformer: Clone + Sized {
    /// Serializable representation of the learned parameters.
    type Params: SerializableParams;

    /// Apply the learned parameters, producing a new table.
    ///
    /// Row order is preserved unless the transformer's contract says
    /// otherwise (duplicate removal shrinks the row count).
    fn transform(&self, table: &Table) -> Result<Table, PipelineError>;

    /// Reverse the transformation, if supported.
    ///
    /// # Errors
    /// Returns [`PipelineError::Configuration`] for transformers that are not
    /// invertible (e.g. cleaning).
    fn inverse_transform(&self, table: &Table) -> Result<Table, PipelineError>;

    /// Extract learned parameters as plain data.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PipelineError>;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let params = self.extract_params();
        let bytes = params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PipelineError> {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PipelineError::Serialization(e.to_string()))?;
        Self::from_params(params)
    }
}
