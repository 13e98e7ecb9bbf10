/// Offline Evaluation Module
///
/// Compares a ranked recommendation list with the jobs a user actually
/// applied to.
///
/// Every metric falls back to 0.0 instead of dividing by zero, so a
/// [`MetricSet`] never contains NaN.
///
/// nDCG uses a simplified ideal: IDCG assumes all top-K positions are
/// relevant, regardless of how many relevant jobs the user has.
use crate::data::InteractionLog;
use crate::models::{MetricSet, RecommendedJob};
use std::collections::HashSet;
use std::sync::Arc;

/// Discount for a 1-indexed rank.
fn discount(rank: usize) -> f64 {
    1.0 / ((rank + 1) as f64).log2()
}

pub fn ndcg_at_k(recommended: &[RecommendedJob], relevant: &HashSet<String>, k: usize) -> f64 {
    let dcg: f64 = recommended
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, job)| relevant.contains(&job.job_id))
        .map(|(i, _)| discount(i + 1))
        .sum();
    let idcg: f64 = (1..=k).map(discount).sum();

    if idcg > 0.0 {
        dcg / idcg
    } else {
        0.0
    }
}

/// `1 / rank` of the first relevant job, 0.0 if there is none.
pub fn reciprocal_rank(recommended: &[RecommendedJob], relevant: &HashSet<String>) -> f64 {
    recommended
        .iter()
        .position(|job| relevant.contains(&job.job_id))
        .map(|i| 1.0 / (i + 1) as f64)
        .unwrap_or(0.0)
}

/// Metrics for one ranked list against one relevance set.
pub fn evaluate(
    recommended: &[RecommendedJob],
    relevant: &HashSet<String>,
    top_n: usize,
) -> MetricSet {
    let recommended_ids: HashSet<&str> = recommended.iter().map(|r| r.job_id.as_str()).collect();
    let hits = recommended_ids
        .iter()
        .filter(|id| relevant.contains(**id))
        .count() as f64;

    let precision = if recommended_ids.is_empty() {
        0.0
    } else {
        hits / recommended_ids.len() as f64
    };
    let recall = if relevant.is_empty() {
        0.0
    } else {
        hits / relevant.len() as f64
    };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    MetricSet {
        precision,
        recall,
        f1,
        mrr: reciprocal_rank(recommended, relevant),
        ndcg: ndcg_at_k(recommended, relevant, top_n),
        binary_accuracy: if hits > 0.0 { 1.0 } else { 0.0 },
    }
}

/// Evaluates recommendations against the interaction log.
#[derive(Debug, Clone)]
pub struct Evaluator {
    interactions: Arc<InteractionLog>,
}

impl Evaluator {
    pub fn new(interactions: Arc<InteractionLog>) -> Self {
        Self { interactions }
    }

    pub fn relevant_jobs(&self, user_id: &str) -> HashSet<String> {
        self.interactions.relevant_jobs(user_id)
    }

    pub fn evaluate_user(
        &self,
        recommended: &[RecommendedJob],
        user_id: &str,
        top_n: usize,
    ) -> MetricSet {
        evaluate(recommended, &self.relevant_jobs(user_id), top_n)
    }
}
