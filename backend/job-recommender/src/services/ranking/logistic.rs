/// Logistic-regression weights exported as JSON:
/// `{ "coefficients": [7 floats], "intercept": float }`.
use super::model::Classifier;
use crate::models::FEATURE_COUNT;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f32>,
    pub intercept: f32,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f32>, intercept: f32) -> anyhow::Result<Self> {
        anyhow::ensure!(
            coefficients.len() == FEATURE_COUNT,
            "Expected {} coefficients, got {}",
            FEATURE_COUNT,
            coefficients.len()
        );

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let model: LogisticModel = serde_json::from_str(&raw)?;

        Self::new(model.coefficients, model.intercept)
    }
}

impl Classifier for LogisticModel {
    fn predict_proba(&self, features: &Array2<f32>) -> anyhow::Result<Array1<f32>> {
        let weights = Array1::from_vec(self.coefficients.clone());
        let logits = features.dot(&weights) + self.intercept;

        Ok(logits.mapv(|z| 1.0 / (1.0 + (-z).exp())))
    }
}
