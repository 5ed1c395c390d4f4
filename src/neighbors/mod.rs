//! k-nearest-neighbors classification.
//!
//! A small brute-force classifier over a stored labeled point set. Prediction
//! takes the `k` nearest stored points under Euclidean distance and returns
//! the majority label; ties are broken by the smallest total distance among
//! the tied labels' neighbors, then by label first-appearance order in the
//! training data, so predictions are fully deterministic.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

const STAGE: &str = "knn classifier";

/// k-NN classifier (unfitted).
#[derive(Clone, Debug)]
pub struct KnnClassifier {
    k: usize,
}

impl Default for KnnClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KnnClassifier {
    /// Create a classifier with the default of 3 neighbors.
    pub fn new() -> Self {
        Self { k: 3 }
    }

    /// Set the number of neighbors consulted per prediction.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Store the labeled point set.
    ///
    /// # Errors
    /// [`PipelineError::Configuration`] when `points` and `labels` disagree
    /// in length, the points are ragged, `k` is zero, or `k` exceeds the
    /// number of stored points.
    pub fn fit(
        &self,
        points: Vec<Vec<f64>>,
        labels: Vec<i64>,
    ) -> Result<FittedKnnClassifier, PipelineError> {
        if points.len() != labels.len() {
            return Err(PipelineError::config(
                STAGE,
                format!("{} points but {} labels", points.len(), labels.len()),
            ));
        }
        if self.k == 0 {
            return Err(PipelineError::config(STAGE, "k must be at least 1"));
        }
        if self.k > points.len() {
            return Err(PipelineError::config(
                STAGE,
                format!("k = {} exceeds the {} stored points", self.k, points.len()),
            ));
        }
        let dim = points[0].len();
        if points.iter().any(|p| p.len() != dim) {
            return Err(PipelineError::config(
                STAGE,
                "stored points differ in dimension",
            ));
        }

        // Labels in first-appearance order, for the final tie-break.
        let mut label_order = Vec::new();
        for &label in &labels {
            if !label_order.contains(&label) {
                label_order.push(label);
            }
        }

        Ok(FittedKnnClassifier {
            k: self.k,
            dim,
            points,
            labels,
            label_order,
        })
    }
}

/// Serializable parameters for a fitted [`KnnClassifier`].
#[derive(Clone, Serialize, Deserialize)]
pub struct KnnClassifierParams {
    /// Number of neighbors consulted per prediction.
    pub k: usize,
    /// Stored points.
    pub points: Vec<Vec<f64>>,
    /// Stored labels, aligned with `points`.
    pub labels: Vec<i64>,
}

/// Fitted k-NN classifier holding the labeled point set.
#[derive(Clone, Debug)]
pub struct FittedKnnClassifier {
    k: usize,
    dim: usize,
    points: Vec<Vec<f64>>,
    labels: Vec<i64>,
    label_order: Vec<i64>,
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

impl FittedKnnClassifier {
    /// Number of stored points.
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Predict the label for one point.
    pub fn predict(&self, point: &[f64]) -> Result<i64, PipelineError> {
        if point.len() != self.dim {
            return Err(PipelineError::config(
                STAGE,
                format!(
                    "query point has {} dimensions, expected {}",
                    point.len(),
                    self.dim
                ),
            ));
        }

        // Stable order on equal distances keeps predictions deterministic.
        let mut ranked: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (euclidean(point, p), i))
            .collect();
        ranked.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        let neighbors = &ranked[..self.k];

        // Vote count and total distance per candidate label.
        let mut votes: Vec<(i64, usize, f64)> = Vec::new();
        for &(dist, idx) in neighbors {
            let label = self.labels[idx];
            match votes.iter_mut().find(|(l, _, _)| *l == label) {
                Some(entry) => {
                    entry.1 += 1;
                    entry.2 += dist;
                }
                None => votes.push((label, 1, dist)),
            }
        }

        let mut winner = votes[0];
        for &candidate in &votes[1..] {
            let better = candidate.1 > winner.1
                || (candidate.1 == winner.1 && candidate.2 < winner.2)
                || (candidate.1 == winner.1
                    && candidate.2 == winner.2
                    && self.appearance(candidate.0) < self.appearance(winner.0));
            if better {
                winner = candidate;
            }
        }
        Ok(winner.0)
    }

    fn appearance(&self, label: i64) -> usize {
        self.label_order
            .iter()
            .position(|&l| l == label)
            .unwrap_or(usize::MAX)
    }

    /// Extract parameters for persistence.
    pub fn extract_params(&self) -> KnnClassifierParams {
        KnnClassifierParams {
            k: self.k,
            points: self.points.clone(),
            labels: self.labels.clone(),
        }
    }

    /// Reconstruct from parameters.
    pub fn from_params(params: KnnClassifierParams) -> Result<Self, PipelineError> {
        KnnClassifier::new()
            .with_k(params.k)
            .fit(params.points, params.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_classifier() -> FittedKnnClassifier {
        // Weight/size points: 0 = orange, 1 = apple.
        let points = vec![
            vec![180.0, 7.0],
            vec![200.0, 7.5],
            vec![250.0, 8.0],
            vec![300.0, 8.5],
            vec![330.0, 9.0],
            vec![360.0, 9.5],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        KnnClassifier::new().fit(points, labels).unwrap()
    }

    #[test]
    fn test_reference_prediction() {
        // Nearest 3 to (290, 10) are (300, 8.5), (330, 9), (250, 8):
        // labels 1, 1, 0, so the majority is 1.
        let fitted = fruit_classifier();
        assert_eq!(fitted.predict(&[290.0, 10.0]).unwrap(), 1);
    }

    #[test]
    fn test_nearest_single_neighbor() {
        let points = vec![vec![0.0], vec![10.0]];
        let fitted = KnnClassifier::new()
            .with_k(1)
            .fit(points, vec![5, 7])
            .unwrap();
        assert_eq!(fitted.predict(&[1.0]).unwrap(), 5);
        assert_eq!(fitted.predict(&[9.0]).unwrap(), 7);
    }

    #[test]
    fn test_tie_broken_by_total_distance() {
        // k = 2, one neighbor per label; the closer one wins.
        let points = vec![vec![0.0], vec![3.0]];
        let fitted = KnnClassifier::new()
            .with_k(2)
            .fit(points, vec![10, 20])
            .unwrap();
        assert_eq!(fitted.predict(&[1.0]).unwrap(), 10);
        assert_eq!(fitted.predict(&[2.0]).unwrap(), 20);
    }

    #[test]
    fn test_tie_broken_by_label_insertion_order() {
        // Equidistant neighbors with equal vote counts and totals: the label
        // seen first in the training data wins.
        let points = vec![vec![-1.0], vec![1.0]];
        let fitted = KnnClassifier::new()
            .with_k(2)
            .fit(points, vec![20, 10])
            .unwrap();
        assert_eq!(fitted.predict(&[0.0]).unwrap(), 20);
    }

    #[test]
    fn test_k_exceeding_points_fails() {
        let result = KnnClassifier::new()
            .with_k(4)
            .fit(vec![vec![0.0], vec![1.0]], vec![0, 1]);
        assert!(matches!(result, Err(PipelineError::Configuration { .. })));
    }

    #[test]
    fn test_dimension_mismatch_fails() {
        let fitted = fruit_classifier();
        assert!(fitted.predict(&[1.0]).is_err());

        let ragged = KnnClassifier::new()
            .with_k(1)
            .fit(vec![vec![0.0], vec![1.0, 2.0]], vec![0, 1]);
        assert!(ragged.is_err());
    }

    #[test]
    fn test_params_round_trip() {
        let fitted = fruit_classifier();
        let restored = FittedKnnClassifier::from_params(fitted.extract_params()).unwrap();
        assert_eq!(restored.n_points(), 6);
        assert_eq!(restored.predict(&[290.0, 10.0]).unwrap(), 1);
    }
}
