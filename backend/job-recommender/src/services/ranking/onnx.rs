/// ONNX Classifier Module
///
/// Runs classifiers exported to ONNX (logistic regression, random forest,
/// gradient boosting, XGBoost) with tract-onnx.
use super::model::Classifier;
use crate::models::FEATURE_COUNT;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::debug;

type OnnxPlan = TypedRunnableModel<TypedModel>;

pub struct OnnxClassifier {
    plan: OnnxPlan,
}

impl OnnxClassifier {
    /// Load and optimize an ONNX graph from disk.
    pub fn load<P: AsRef<Path>>(model_path: P) -> anyhow::Result<Self> {
        let path = model_path.as_ref();

        if !path.exists() {
            anyhow::bail!("Model file not found: {}", path.display());
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .into_optimized()?
            .into_runnable()?;

        debug!(path = %path.display(), "Loaded ONNX classifier");

        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(
        &self,
        features: &ndarray::Array2<f32>,
    ) -> anyhow::Result<ndarray::Array1<f32>> {
        let batch_size = features.nrows();

        // Convert to tract's own ndarray to stay independent of its version
        let input = tract_ndarray::Array2::from_shape_fn((batch_size, FEATURE_COUNT), |(i, j)| {
            features[[i, j]]
        });

        let outputs = self.plan.run(tvec!(Tensor::from(input).into()))?;

        positive_class_probabilities(&outputs, batch_size)
    }
}

/// Pick the positive-class column out of the graph outputs.
///
/// Converted classifiers usually emit `label` then `probabilities`
/// (`[n, 2]`); regressors and single-output graphs emit `[n]` or `[n, 1]`.
fn positive_class_probabilities(
    outputs: &[TValue],
    batch_size: usize,
) -> anyhow::Result<ndarray::Array1<f32>> {
    for output in outputs {
        let Ok(view) = output.to_array_view::<f32>() else {
            continue;
        };

        match view.shape() {
            [rows, 2] if *rows == batch_size => {
                return Ok(view.iter().skip(1).step_by(2).copied().collect());
            }
            [rows] | [rows, 1] if *rows == batch_size => {
                return Ok(view.iter().copied().collect());
            }
            _ => continue,
        }
    }

    anyhow::bail!(
        "No float output of shape [{0}, 2], [{0}, 1] or [{0}] in model outputs",
        batch_size
    )
}
