//! Categorical encoding transformers.
//!
//! - [`LabelEncoder`]: one categorical column → integer codes in place.
//! - [`OneHotEncoder`]: categorical columns → 0/1 indicator columns.
//!
//! Both derive their category maps at fit time from the distinct observed
//! labels, sorted lexicographically, so numeric codes are stable across runs.

use serde::{Deserialize, Serialize};

pub mod label;
pub mod one_hot;

pub use label::{FittedLabelEncoder, LabelEncoder, LabelEncoderParams};
pub use one_hot::{FittedOneHotEncoder, OneHotEncoder, OneHotEncoderParams};

/// Strategy for handling categories not seen during fitting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Fail the transform with a configuration error.
    #[default]
    Error,
    /// Emit all-zero indicators for the unknown category (one-hot only).
    Ignore,
}
