use serde::{Deserialize, Serialize};

/// Number of columns in a [`FeatureRow`] vector.
pub const FEATURE_COUNT: usize = 7;

/// Column names in the order the classifiers were trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "skill_similarity",
    "location_similarity",
    "experience_similarity",
    "user_rating",
    "user_jobsCompleted",
    "job_budget",
    "job_duration",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub skills: Vec<String>,
    pub location: String,
    pub rating: f64,
    pub jobs_completed: u32,
    pub jobs_completed_scaled: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub budget: f64,
    pub duration_days: f64,
    pub budget_scaled: f64,
    pub duration_scaled: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionType {
    Applied, // counts as relevant
    Saved,
    Other(String),
}

impl InteractionType {
    pub fn as_str(&self) -> &str {
        match self {
            InteractionType::Applied => "applied",
            InteractionType::Saved => "saved",
            InteractionType::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for InteractionType {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "applied" => InteractionType::Applied,
            "saved" => InteractionType::Saved,
            _ => InteractionType::Other(raw),
        }
    }
}

impl From<InteractionType> for String {
    fn from(kind: InteractionType) -> Self {
        kind.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub job_id: String,
    pub interaction_type: InteractionType,
    pub timestamp: String,
}

/// Features for one (user, job) pair, built at scoring time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    pub skill_similarity: f32,
    pub location_similarity: f32,
    pub experience_similarity: f32,
    pub user_rating: f32,
    pub user_jobs_completed_scaled: f32,
    pub job_budget_scaled: f32,
    pub job_duration_scaled: f32,
}

impl FeatureRow {
    /// Convert to feature vector for model inference
    ///
    /// Layout follows [`FEATURE_NAMES`].
    pub fn to_vector(&self) -> [f32; FEATURE_COUNT] {
        [
            self.skill_similarity,
            self.location_similarity,
            self.experience_similarity,
            self.user_rating,
            self.user_jobs_completed_scaled,
            self.job_budget_scaled,
            self.job_duration_scaled,
        ]
    }
}

/// One row of a recommendation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedJob {
    pub job_id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub required_skills: Vec<String>,
    pub score: f32,
}

/// Ranking-quality metrics for one user, or their mean over many users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSet {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub mrr: f64,
    pub ndcg: f64,
    pub binary_accuracy: f64,
}

impl MetricSet {
    /// Metric labels as printed in reports, e.g. `precision@5`.
    pub fn labelled(&self, top_n: usize) -> Vec<(String, f64)> {
        vec![
            (format!("precision@{}", top_n), self.precision),
            (format!("recall@{}", top_n), self.recall),
            (format!("f1_score@{}", top_n), self.f1),
            ("mrr".to_string(), self.mrr),
            (format!("ndcg@{}", top_n), self.ndcg),
            ("binary_accuracy".to_string(), self.binary_accuracy),
        ]
    }

    pub fn mean(sets: &[MetricSet]) -> MetricSet {
        if sets.is_empty() {
            return MetricSet::default();
        }

        let n = sets.len() as f64;
        let sum = sets.iter().fold(MetricSet::default(), |acc, m| MetricSet {
            precision: acc.precision + m.precision,
            recall: acc.recall + m.recall,
            f1: acc.f1 + m.f1,
            mrr: acc.mrr + m.mrr,
            ndcg: acc.ndcg + m.ndcg,
            binary_accuracy: acc.binary_accuracy + m.binary_accuracy,
        });

        MetricSet {
            precision: sum.precision / n,
            recall: sum.recall / n,
            f1: sum.f1 / n,
            mrr: sum.mrr / n,
            ndcg: sum.ndcg / n,
            binary_accuracy: sum.binary_accuracy / n,
        }
    }
}

/// Mean metrics of one model over the sampled users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelReport {
    pub model: String,
    pub evaluated_users: usize,
    pub skipped_users: Vec<String>,
    pub mean: MetricSet,
}

/// A declared model that never got evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFailure {
    pub model: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_layout() {
        let row = FeatureRow {
            skill_similarity: 0.9,
            location_similarity: 1.0,
            experience_similarity: 0.75,
            user_rating: 4.5,
            user_jobs_completed_scaled: 0.5,
            job_budget_scaled: 0.2,
            job_duration_scaled: 0.25,
        };

        let vector = row.to_vector();

        assert_eq!(vector.len(), FEATURE_COUNT);
        assert_eq!(vector[0], 0.9); // skill_similarity
        assert_eq!(vector[3], 4.5); // user_rating
        assert_eq!(vector[6], 0.25); // job_duration
    }

    #[test]
    fn test_interaction_type_parsing() {
        assert_eq!(InteractionType::from("applied".to_string()), InteractionType::Applied);
        assert_eq!(InteractionType::from("saved".to_string()), InteractionType::Saved);
        assert_eq!(
            InteractionType::from("viewed".to_string()),
            InteractionType::Other("viewed".to_string())
        );
        assert_eq!(String::from(InteractionType::Saved), "saved");
    }

    #[test]
    fn test_metric_mean() {
        let a = MetricSet {
            precision: 1.0,
            recall: 0.5,
            f1: 0.5,
            mrr: 1.0,
            ndcg: 1.0,
            binary_accuracy: 1.0,
        };
        let b = MetricSet::default();

        let mean = MetricSet::mean(&[a, b]);
        assert!((mean.precision - 0.5).abs() < 1e-12);
        assert!((mean.recall - 0.25).abs() < 1e-12);
        assert!((mean.binary_accuracy - 0.5).abs() < 1e-12);

        assert_eq!(MetricSet::mean(&[]), MetricSet::default());
    }

    #[test]
    fn test_metric_labels() {
        let labels = MetricSet::default().labelled(5);
        let names: Vec<&str> = labels.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec!["precision@5", "recall@5", "f1_score@5", "mrr", "ndcg@5", "binary_accuracy"]
        );
    }
}
