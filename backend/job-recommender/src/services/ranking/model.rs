/// Relevance Model Module
///
/// A model is anything that turns a feature table into a positive-class
/// probability per row. Concrete families (ONNX graphs, logistic weights,
/// the similarity heuristic) sit behind [`Classifier`]; [`RankingModel`]
/// attaches the declared name and validates shapes around every call.
use crate::error::{RecommendError, Result};
use crate::models::FEATURE_COUNT;
use ndarray::{Array1, Array2};
use std::fmt;
use std::sync::Arc;

/// Probability-scoring capability of a trained classifier.
///
/// `features` is `(rows x FEATURE_COUNT)`; the result holds one probability
/// of the positive class per row, in row order.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, features: &Array2<f32>) -> anyhow::Result<Array1<f32>>;
}

/// A named classifier, as declared in configuration.
#[derive(Clone)]
pub struct RankingModel {
    name: String,
    classifier: Arc<dyn Classifier>,
}

impl fmt::Debug for RankingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankingModel")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl RankingModel {
    pub fn new(name: impl Into<String>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            name: name.into(),
            classifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Score a whole feature table in one call.
    pub fn predict_proba(&self, features: &Array2<f32>) -> Result<Array1<f32>> {
        let (rows, columns) = features.dim();

        if columns != FEATURE_COUNT {
            return Err(RecommendError::InvalidInput(format!(
                "Expected {} features, got {}",
                FEATURE_COUNT, columns
            )));
        }

        let scores = self
            .classifier
            .predict_proba(features)
            .map_err(|e| RecommendError::Inference {
                model: self.name.clone(),
                reason: format!("{:#}", e),
            })?;

        if scores.len() != rows {
            return Err(RecommendError::Inference {
                model: self.name.clone(),
                reason: format!("Expected {} probabilities, got {}", rows, scores.len()),
            });
        }

        Ok(scores)
    }
}

/// Hand-tuned baseline over the three similarity columns.
///
/// `score = 0.5 * skill + 0.3 * location + 0.2 * experience`, which stays in
/// [0, 1] and is monotonic in every similarity signal.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityHeuristic {
    pub skill_weight: f32,
    pub location_weight: f32,
    pub experience_weight: f32,
}

impl Default for SimilarityHeuristic {
    fn default() -> Self {
        Self {
            skill_weight: 0.5,
            location_weight: 0.3,
            experience_weight: 0.2,
        }
    }
}

impl Classifier for SimilarityHeuristic {
    fn predict_proba(&self, features: &Array2<f32>) -> anyhow::Result<Array1<f32>> {
        let total = self.skill_weight + self.location_weight + self.experience_weight;
        anyhow::ensure!(total > 0.0, "heuristic weights must sum to a positive value");

        Ok(features
            .rows()
            .into_iter()
            .map(|row| {
                let raw = row[0] * self.skill_weight
                    + row[1] * self.location_weight
                    + row[2] * self.experience_weight;
                (raw / total).clamp(0.0, 1.0)
            })
            .collect())
    }
}
