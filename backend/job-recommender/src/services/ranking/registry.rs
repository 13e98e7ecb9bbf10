/// Model Registry
///
/// Resolves declared model artifacts into [`RankingModel`]s. A model whose
/// artifact cannot be loaded is reported as `MissingModelArtifact` and the
/// remaining models are still loaded.
use super::logistic::LogisticModel;
use super::model::{Classifier, RankingModel, SimilarityHeuristic};
use super::onnx::OnnxClassifier;
use crate::error::RecommendError;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Onnx,
    Logistic,
    Heuristic,
}

impl ModelKind {
    /// `.onnx` -> ONNX graph, `.json` -> logistic weights.
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)?;

        match extension.as_str() {
            "onnx" => Some(ModelKind::Onnx),
            "json" => Some(ModelKind::Logistic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// Overrides the kind inferred from the file extension.
    #[serde(default)]
    pub kind: Option<ModelKind>,
}

impl ModelSpec {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: None,
        }
    }

    pub fn resolved_kind(&self) -> Option<ModelKind> {
        self.kind.or_else(|| ModelKind::from_path(&self.path))
    }
}

/// Load one declared model.
pub fn load_model(spec: &ModelSpec) -> Result<RankingModel, RecommendError> {
    let missing = |reason: String| RecommendError::MissingModelArtifact {
        model: spec.name.clone(),
        path: spec.path.clone(),
        reason,
    };

    let kind = spec
        .resolved_kind()
        .ok_or_else(|| missing("Unknown artifact type (expected .onnx or .json)".to_string()))?;

    let classifier: Arc<dyn Classifier> = match kind {
        ModelKind::Onnx => Arc::new(
            OnnxClassifier::load(&spec.path).map_err(|e| missing(format!("{:#}", e)))?,
        ),
        ModelKind::Logistic => {
            Arc::new(LogisticModel::load(&spec.path).map_err(|e| missing(format!("{:#}", e)))?)
        }
        ModelKind::Heuristic => Arc::new(SimilarityHeuristic::default()),
    };

    Ok(RankingModel::new(spec.name.clone(), classifier))
}

/// Load every declared model, keeping declaration order.
///
/// Returns the loaded models and one error per model that failed.
pub fn load_models(specs: &[ModelSpec]) -> (Vec<RankingModel>, Vec<RecommendError>) {
    let mut models = Vec::with_capacity(specs.len());
    let mut failures = Vec::new();

    for spec in specs {
        match load_model(spec) {
            Ok(model) => {
                info!(model = %spec.name, path = %spec.path, "Loaded model");
                models.push(model);
            }
            Err(e) => {
                warn!(model = %spec.name, error = %e, "Failed to load model");
                failures.push(e);
            }
        }
    }

    (models, failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ModelKind::from_path("models/xgboost.onnx"), Some(ModelKind::Onnx));
        assert_eq!(ModelKind::from_path("lr.JSON"), Some(ModelKind::Logistic));
        assert_eq!(ModelKind::from_path("random_forest.pkl"), None);
        assert_eq!(ModelKind::from_path(""), None);
    }

    #[test]
    fn test_missing_artifacts_are_reported_per_model() {
        let specs = vec![
            ModelSpec::new("Logistic Regression", "/nonexistent/logistic_regression.json"),
            ModelSpec {
                name: "Baseline".to_string(),
                path: String::new(),
                kind: Some(ModelKind::Heuristic),
            },
            ModelSpec::new("XGBoost", "/nonexistent/xgboost.onnx"),
            ModelSpec::new("Random Forest", "random_forest.pkl"),
        ];

        let (models, failures) = load_models(&specs);

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name(), "Baseline");

        let failed: Vec<&str> = failures
            .iter()
            .map(|e| match e {
                RecommendError::MissingModelArtifact { model, .. } => model.as_str(),
                other => panic!("unexpected error: {}", other),
            })
            .collect();
        assert_eq!(failed, vec!["Logistic Regression", "XGBoost", "Random Forest"]);
    }
}
