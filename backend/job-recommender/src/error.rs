use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Debug, Error)]
pub enum RecommendError {
    /// Recoverable: batch evaluation skips the user and keeps going.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Job table is empty")]
    EmptyJobSet,

    #[error("Model artifact for '{model}' could not be loaded from {path}: {reason}")]
    MissingModelArtifact {
        model: String,
        path: String,
        reason: String,
    },

    #[error("Model inference failed for '{model}': {reason}")]
    Inference { model: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),
}

impl RecommendError {
    /// Whether a batch run should skip the offending item instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RecommendError::UserNotFound(_))
    }
}

impl From<csv::Error> for RecommendError {
    fn from(err: csv::Error) -> Self {
        RecommendError::Data(err.to_string())
    }
}

impl From<std::io::Error> for RecommendError {
    fn from(err: std::io::Error) -> Self {
        RecommendError::Data(err.to_string())
    }
}

impl From<ndarray::ShapeError> for RecommendError {
    fn from(err: ndarray::ShapeError) -> Self {
        RecommendError::InvalidInput(format!("Failed to build feature matrix: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_user_not_found_is_recoverable() {
        assert!(RecommendError::UserNotFound("user_9".to_string()).is_recoverable());
        assert!(!RecommendError::EmptyJobSet.is_recoverable());
        assert!(!RecommendError::MissingModelArtifact {
            model: "XGBoost".to_string(),
            path: "xgboost.onnx".to_string(),
            reason: "not found".to_string(),
        }
        .is_recoverable());
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = RecommendError::Inference {
            model: "Random Forest".to_string(),
            reason: "bad shape".to_string(),
        };
        assert!(err.to_string().contains("Random Forest"));

        let err = RecommendError::UserNotFound("user_42".to_string());
        assert_eq!(err.to_string(), "User not found: user_42");
    }
}
