pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::{RecommendError, Result};
pub use services::{
    sample_users, ComparisonReport, Evaluator, FeatureStore, JobScorer, ModelComparator,
    RankingModel,
};
