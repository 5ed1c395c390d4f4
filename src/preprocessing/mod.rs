//! Table preprocessing transformers.
//!
//! Every transformer follows the same two-state pattern: an unfitted value
//! carries configuration, [`Transformer::fit`] learns parameters from a
//! table, and the resulting fitted value applies (and can persist) them.
//!
//! # Available transformers
//!
//! - [`Cleaner`]: outlier repair, missing-value fill, duplicate removal
//! - [`LabelEncoder`]: one categorical column → integer codes
//! - [`OneHotEncoder`]: categorical columns → 0/1 indicator columns
//! - [`MinMaxScaler`] / [`StandardScaler`]: numeric column rescaling
//! - [`Pipeline`]: chain transformers into one fit/transform unit
//!
//! The terminal [`train_test_split`] is not a transformer: it consumes a
//! table and produces the four train/test sub-tables.

pub mod cleaning;
pub mod encoding;
pub mod pipeline;
pub mod scaling;
pub mod split;
pub mod traits;

pub use cleaning::{Cleaner, CleanerParams, FittedCleaner, Repair, RepairRule};
pub use encoding::{
    FittedLabelEncoder, FittedOneHotEncoder, HandleUnknown, LabelEncoder, LabelEncoderParams,
    OneHotEncoder, OneHotEncoderParams,
};
pub use pipeline::{FittedPipeline, FittedPipelineStep, Pipeline, PipelineStep};
pub use scaling::{
    scale_columns, ColumnMoments, ColumnRange, FittedMinMaxScaler, FittedStandardScaler,
    MinMaxScaler, MinMaxScalerParams, ScaleMethod, StandardScaler, StandardScalerParams,
};
pub use split::{train_test_split, TrainTestSplit};
pub use traits::{FittedTransformer, Transformer};
