/// Ranking Module
///
/// Scores every job for a user with a trained classifier and keeps the top N.
///
/// # Architecture
/// - **Model Layer**: [`Classifier`] capability with ONNX, logistic and heuristic implementations
/// - **Registry**: resolves declared artifacts into named [`RankingModel`]s
/// - **Scoring Layer**: batch feature assembly from the feature store
/// - **Ranker**: stable descending sort and top-N cut
///
/// # Workflow
/// 1. Resolve the user to a row of the similarity matrices
/// 2. Build one feature row per job
/// 3. Run the classifier once over the feature table → probabilities
/// 4. Sort and keep the top N with job metadata
pub mod logistic;
pub mod model;
pub mod onnx;
pub mod ranker;
pub mod registry;
pub mod scorer;

pub use logistic::LogisticModel;
pub use model::{Classifier, RankingModel, SimilarityHeuristic};
pub use onnx::OnnxClassifier;
pub use ranker::rank;
pub use registry::{load_model, load_models, ModelKind, ModelSpec};
pub use scorer::JobScorer;
