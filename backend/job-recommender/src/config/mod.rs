use crate::services::ranking::{ModelKind, ModelSpec};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub evaluation: EvaluationConfig,
    #[serde(default = "default_models")]
    pub models: Vec<ModelSpec>,

    // Observability
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub users_path: String,
    pub jobs_path: String,
    pub interactions_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    pub sample_users: usize,
    pub top_n: usize,
    pub seed: u64,
    #[serde(default)]
    pub showcase_user: Option<String>,
    /// Print the report as JSON instead of a table.
    pub json_report: bool,
}

fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec::new("Logistic Regression", "logistic_regression.onnx"),
        ModelSpec::new("Random Forest", "random_forest.onnx"),
        ModelSpec::new("Gradient Boosting", "gradient_boosting.onnx"),
        ModelSpec::new("XGBoost", "xgboost.onnx"),
    ]
}

impl Config {
    /// Defaults, then `job-recommender.toml` (or `$JOB_RECOMMENDER_CONFIG`)
    /// if present, then `JOB_RECOMMENDER__SECTION__KEY` environment variables.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config_file =
            std::env::var("JOB_RECOMMENDER_CONFIG").unwrap_or_else(|_| "job-recommender".to_string());

        let config = config::Config::builder()
            .set_default("data.users_path", "users_synthetic.csv")?
            .set_default("data.jobs_path", "jobs_synthetic.csv")?
            .set_default("data.interactions_path", "interactions_synthetic.csv")?
            .set_default("evaluation.sample_users", 20)?
            .set_default("evaluation.top_n", 5)?
            .set_default("evaluation.seed", 42)?
            .set_default("evaluation.showcase_user", "user_1")?
            .set_default("evaluation.json_report", false)?
            .set_default("log_level", "info")?
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(
                config::Environment::with_prefix("JOB_RECOMMENDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if self.evaluation.top_n == 0 {
            return Err(anyhow!("top_n must be greater than 0"));
        }

        if self.evaluation.sample_users == 0 {
            return Err(anyhow!("sample_users must be greater than 0"));
        }

        for (name, path) in [
            ("users_path", &self.data.users_path),
            ("jobs_path", &self.data.jobs_path),
            ("interactions_path", &self.data.interactions_path),
        ] {
            if path.is_empty() {
                return Err(anyhow!("{} is required", name));
            }
        }

        if self.models.is_empty() {
            return Err(anyhow!("At least one model must be declared"));
        }

        let mut names = HashSet::new();
        for model in &self.models {
            if !names.insert(model.name.as_str()) {
                return Err(anyhow!("Model '{}' is declared twice", model.name));
            }
            if model.resolved_kind() != Some(ModelKind::Heuristic) && model.path.is_empty() {
                return Err(anyhow!("Model '{}' needs an artifact path", model.name));
            }
        }

        Ok(())
    }
}
