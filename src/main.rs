//! Demo pipeline over `data/sample_data.csv`.
//!
//! Runs the fixed preparation sequence (clean, label-encode Gender, one-hot
//! Education and City, min-max scale Age and Income, split with Income as the
//! target), logging a preview of the table after every stage, then runs the
//! six-point fruit k-NN demo.
//!
//! Note: scaling runs before the split, so scaler fitting sees the test rows.
//! Fit the scaler on the training partition instead when that leakage
//! matters.

use log::info;
use tabprep::dataset::load_csv;
use tabprep::neighbors::KnnClassifier;
use tabprep::preprocessing::{
    train_test_split, Cleaner, LabelEncoder, MinMaxScaler, OneHotEncoder, Transformer,
};
use tabprep::PipelineError;

const DATA_PATH: &str = "data/sample_data.csv";
const PREVIEW_ROWS: usize = 5;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("pipeline failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let table = load_csv(DATA_PATH)?;
    info!(
        "loaded {}: {} rows x {} columns",
        DATA_PATH,
        table.n_rows(),
        table.n_cols()
    );
    info!("raw table:\n{}", table.preview(PREVIEW_ROWS));

    // Step 1: repair values and drop duplicate rows.
    let (cleaned, _) = Cleaner::new()
        .bound("Age", 0.0, 100.0)
        .fill_mode("Gender")
        .fill_median("Income")
        .fit_transform(&table)?;
    info!(
        "after cleaning: {} rows ({} duplicates removed)",
        cleaned.n_rows(),
        table.n_rows() - cleaned.n_rows()
    );
    info!("cleaned table:\n{}", cleaned.preview(PREVIEW_ROWS));

    // Step 2: encode categoricals.
    let (encoded, gender_map) = LabelEncoder::new("Gender").fit_transform(&cleaned)?;
    info!("gender classes (code = index): {:?}", gender_map.classes());

    let (encoded, _) = OneHotEncoder::new(["Education", "City"]).fit_transform(&encoded)?;
    info!("after encoding: {} columns", encoded.n_cols());
    info!("encoded table:\n{}", encoded.preview(PREVIEW_ROWS));

    // Step 3: scale the numeric features to [0, 1].
    let (scaled, _) = MinMaxScaler::new(["Age", "Income"]).fit_transform(&encoded)?;
    info!("scaled table:\n{}", scaled.preview(PREVIEW_ROWS));

    // Step 4: deterministic train/test split, Income as the target.
    let split = train_test_split(&scaled, "Income", 0.2, 42)?;
    info!(
        "train features: {} rows x {} columns",
        split.train_features.n_rows(),
        split.train_features.n_cols()
    );
    info!(
        "test features:  {} rows x {} columns",
        split.test_features.n_rows(),
        split.test_features.n_cols()
    );
    info!("train target:   {} rows", split.train_target.n_rows());
    info!("test target:    {} rows", split.test_target.n_rows());
    info!("train features:\n{}", split.train_features.preview(PREVIEW_ROWS));

    // Independent demo: classify a fruit by weight and size.
    let points = vec![
        vec![180.0, 7.0],
        vec![200.0, 7.5],
        vec![250.0, 8.0],
        vec![300.0, 8.5],
        vec![330.0, 9.0],
        vec![360.0, 9.5],
    ];
    let labels = vec![0, 0, 0, 1, 1, 1]; // 0 = orange, 1 = apple
    let knn = KnnClassifier::new().fit(points, labels)?;
    let prediction = knn.predict(&[290.0, 10.0])?;
    info!("knn demo: predicted label {} for [290, 10]", prediction);

    Ok(())
}
