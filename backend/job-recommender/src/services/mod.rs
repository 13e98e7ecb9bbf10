pub mod comparison;
pub mod evaluation;
pub mod features;
pub mod ranking;

pub use comparison::{sample_users, ComparisonReport, ModelComparator};
pub use evaluation::Evaluator;
pub use features::FeatureStore;
pub use ranking::{JobScorer, RankingModel};
