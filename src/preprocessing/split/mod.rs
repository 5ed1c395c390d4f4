//! Seeded train/test splitting.
//!
//! Row indices are shuffled with a Fisher-Yates shuffle driven by a seeded
//! RNG, so the same `(seed, input)` pair always yields the same partition.
//! The first `round(test_fraction × n)` shuffled indices become the test set,
//! the rest the training set.

use crate::error::PipelineError;
use crate::table::Table;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const STAGE: &str = "splitter";

/// The four terminal sub-tables produced by [`train_test_split`].
#[derive(Clone, Debug)]
pub struct TrainTestSplit {
    /// Training rows, all columns except the target.
    pub train_features: Table,
    /// Test rows, all columns except the target.
    pub test_features: Table,
    /// Training rows, target column only.
    pub train_target: Table,
    /// Test rows, target column only.
    pub test_target: Table,
}

/// Deterministically partition rows into train and test subsets.
///
/// Returns four sub-tables: features (all columns except `target_column`) and
/// target (`target_column` only) for each partition. Together the partitions
/// cover every original row exactly once.
///
/// # Errors
/// [`PipelineError::Configuration`] when `target_column` is absent or
/// `test_fraction` is not strictly inside `(0, 1)`.
pub fn train_test_split(
    table: &Table,
    target_column: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit, PipelineError> {
    table.require_column(target_column, STAGE)?;
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PipelineError::config(
            STAGE,
            format!("test_fraction {} not in (0, 1)", test_fraction),
        ));
    }

    let n = table.n_rows();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (test_fraction * n as f64).round() as usize;
    let (test_idx, train_idx) = indices.split_at(n_test.min(n));

    let features = table.drop_columns(&[target_column], STAGE)?;
    let target = table.select(&[target_column], STAGE)?;

    Ok(TrainTestSplit {
        train_features: features.take_rows(train_idx),
        test_features: features.take_rows(test_idx),
        train_target: target.take_rows(train_idx),
        test_target: target.take_rows(test_idx),
    })
}
