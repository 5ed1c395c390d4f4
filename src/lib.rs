//! # tabprep
//!
//! A small tabular data preparation library: load a CSV into an in-memory
//! table of named, typed columns, then clean, encode, scale and split it for
//! a downstream model.
//!
//! ## Core design principles
//!
//! - **Two-state transformers**: configuration lives in an unfitted value,
//!   learned parameters in a fitted one; fitting never mutates its input.
//! - **Explicit data flow**: every stage is a pure function from a table (and
//!   parameters) to a new table — no ambient mutable state between stages.
//! - **Deterministic**: category maps use a fixed ordering rule and the
//!   train/test split is seeded, so repeated runs produce identical output.
//! - **Persistable fits**: every fitted transformer serializes its learned
//!   parameters for later reuse.
//!
//! ## Quick start
//!
//! ```no_run
//! use tabprep::dataset::load_csv;
//! use tabprep::preprocessing::{
//!     train_test_split, Cleaner, LabelEncoder, MinMaxScaler, OneHotEncoder, Pipeline,
//! };
//!
//! # fn main() -> Result<(), tabprep::PipelineError> {
//! let table = load_csv("data/sample_data.csv")?;
//!
//! let pipeline = Pipeline::new()
//!     .add(Cleaner::new()
//!         .bound("Age", 0.0, 100.0)
//!         .fill_mode("Gender")
//!         .fill_median("Income"))
//!     .add(LabelEncoder::new("Gender"))
//!     .add(OneHotEncoder::new(["Education", "City"]))
//!     .add(MinMaxScaler::new(["Age", "Income"]));
//!
//! let (prepared, _fitted) = pipeline.fit_transform(&table)?;
//! let split = train_test_split(&prepared, "Income", 0.2, 42)?;
//! println!("{} train rows", split.train_features.n_rows());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module structure
//!
//! - `table` — `Table` / `Column` / `Value` data model
//! - `dataset` — CSV loading into a `Table`
//! - `preprocessing` — cleaning, encoding, scaling, pipeline and splitting
//! - `neighbors` — k-nearest-neighbors classifier
//! - `serialization` — byte-level encoding of fitted parameters

/// CSV loading into the table data model.
pub mod dataset;

/// Shared error type for all pipeline stages.
pub mod error;

/// k-nearest-neighbors classification.
pub mod neighbors;

/// Table preprocessing transformers and the train/test splitter.
pub mod preprocessing;

/// Persistence of fitted transformer parameters.
pub mod serialization;

/// In-memory tabular data model.
pub mod table;

pub use error::PipelineError;
pub use table::{Column, ColumnType, Table, Value};

#[cfg(test)]
mod tests {
    use crate::neighbors::KnnClassifier;
    use crate::preprocessing::{
        train_test_split, Cleaner, FittedTransformer, LabelEncoder, MinMaxScaler, OneHotEncoder,
        Pipeline, Transformer,
    };
    use crate::table::{Column, ColumnType, Table, Value};

    fn raw_table() -> Table {
        Table::new(vec![
            Column::new(
                "Age",
                ColumnType::Int,
                vec![
                    Some(Value::Int(25)),
                    Some(Value::Int(32)),
                    Some(Value::Int(150)),
                    Some(Value::Int(41)),
                    Some(Value::Int(25)),
                    Some(Value::Int(58)),
                ],
            ),
            Column::new(
                "Gender",
                ColumnType::Categorical,
                vec![
                    Some(Value::Str("Male".into())),
                    Some(Value::Str("Female".into())),
                    None,
                    Some(Value::Str("Female".into())),
                    Some(Value::Str("Male".into())),
                    Some(Value::Str("Female".into())),
                ],
            ),
            Column::new(
                "Income",
                ColumnType::Float,
                vec![
                    Some(Value::Float(48_000.0)),
                    Some(Value::Float(52_000.0)),
                    Some(Value::Float(61_000.0)),
                    None,
                    Some(Value::Float(48_000.0)),
                    Some(Value::Float(75_000.0)),
                ],
            ),
            Column::from_strs(
                "Education",
                vec!["BSc", "MSc", "PhD", "BSc", "BSc", "MSc"],
            ),
            Column::from_strs(
                "City",
                vec!["Oslo", "Bergen", "Oslo", "Tromso", "Oslo", "Bergen"],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_full_pipeline_end_to_end() {
        let pipeline = Pipeline::new()
            .add(
                Cleaner::new()
                    .bound("Age", 0.0, 100.0)
                    .fill_mode("Gender")
                    .fill_median("Income"),
            )
            .add(LabelEncoder::new("Gender"))
            .add(OneHotEncoder::new(["Education", "City"]))
            .add(MinMaxScaler::new(["Age", "Income"]));

        let (prepared, _) = pipeline.fit_transform(&raw_table()).unwrap();

        // Row 4 duplicates row 0 exactly and is dropped.
        assert_eq!(prepared.n_rows(), 5);
        // 5 - 2 encoded + (3 education + 3 city) = 9 columns.
        assert_eq!(prepared.n_cols(), 9);

        // Scaled numeric columns stay inside [0, 1].
        for name in ["Age", "Income"] {
            for v in prepared.column(name).unwrap().numeric_values() {
                assert!((0.0..=1.0).contains(&v));
            }
        }

        // Gender is now integer-coded, no value missing anywhere.
        assert_eq!(prepared.column("Gender").unwrap().dtype(), ColumnType::Int);
        for col in prepared.columns() {
            assert!(col.values().iter().all(Option::is_some));
        }

        let split = train_test_split(&prepared, "Income", 0.2, 42).unwrap();
        assert_eq!(
            split.train_features.n_rows() + split.test_features.n_rows(),
            prepared.n_rows()
        );
        assert_eq!(split.test_features.n_rows(), 1); // round(0.2 * 5)
        assert!(split.train_features.column("Income").is_none());
    }

    #[test]
    fn test_fitted_pipeline_round_trips_through_files() {
        let (cleaned, fitted) = Cleaner::new()
            .fill_median("Income")
            .fit_transform(&raw_table())
            .unwrap();

        let path = std::env::temp_dir().join("tabprep_cleaner.bin");
        fitted.save_to_file(&path).unwrap();
        let loaded =
            crate::preprocessing::FittedCleaner::load_from_file(&path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded.transform(&raw_table()).unwrap(), cleaned);
    }

    #[test]
    fn test_knn_demo_prediction() {
        let points = vec![
            vec![180.0, 7.0],
            vec![200.0, 7.5],
            vec![250.0, 8.0],
            vec![300.0, 8.5],
            vec![330.0, 9.0],
            vec![360.0, 9.5],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let fitted = KnnClassifier::new().fit(points, labels).unwrap();
        assert_eq!(fitted.predict(&[290.0, 10.0]).unwrap(), 1);
    }
}
