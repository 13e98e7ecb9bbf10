/// Candidate Scoring Module
///
/// Assembles one feature row per job for a user and scores the whole table
/// with a single classifier call.
use super::model::RankingModel;
use super::ranker::rank;
use crate::error::{RecommendError, Result};
use crate::models::{FeatureRow, RecommendedJob, FEATURE_COUNT};
use crate::services::features::FeatureStore;
use ndarray::{Array1, Array2};
use std::sync::Arc;
use tracing::debug;

pub struct JobScorer {
    store: Arc<FeatureStore>,
}

impl JobScorer {
    pub fn new(store: Arc<FeatureStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    fn user_position(&self, user_id: &str) -> Result<usize> {
        self.store
            .users()
            .position(user_id)
            .ok_or_else(|| RecommendError::UserNotFound(user_id.to_string()))
    }

    /// Feature rows for every job, in job table order.
    pub fn feature_rows(&self, user_id: &str) -> Result<Vec<FeatureRow>> {
        let user_idx = self.user_position(user_id)?;
        let user = self
            .store
            .users()
            .get(user_idx)
            .ok_or_else(|| RecommendError::UserNotFound(user_id.to_string()))?;

        let skill = self.store.skill_row(user_idx);
        let location = self.store.location_row(user_idx);
        let experience = self.store.experience_row(user_idx);

        Ok(self
            .store
            .jobs()
            .jobs()
            .iter()
            .enumerate()
            .map(|(job_idx, job)| FeatureRow {
                skill_similarity: skill[job_idx] as f32,
                location_similarity: location[job_idx] as f32,
                experience_similarity: experience[job_idx] as f32,
                user_rating: user.rating as f32,
                user_jobs_completed_scaled: user.jobs_completed_scaled as f32,
                job_budget_scaled: job.budget_scaled as f32,
                job_duration_scaled: job.duration_scaled as f32,
            })
            .collect())
    }

    /// Probability per job, aligned 1:1 with job table order.
    pub fn score(&self, model: &RankingModel, user_id: &str) -> Result<Array1<f32>> {
        let rows = self.feature_rows(user_id)?;

        if rows.is_empty() {
            return Ok(Array1::zeros(0));
        }

        let feature_vectors: Vec<f32> = rows.iter().flat_map(|r| r.to_vector()).collect();
        let feature_matrix = Array2::from_shape_vec((rows.len(), FEATURE_COUNT), feature_vectors)?;

        let scores = model.predict_proba(&feature_matrix)?;

        debug!(
            user_id = %user_id,
            model = %model.name(),
            job_count = rows.len(),
            "Scoring complete"
        );

        Ok(scores)
    }

    /// Top `top_n` jobs for the user under `model`.
    pub fn recommend(
        &self,
        model: &RankingModel,
        user_id: &str,
        top_n: usize,
    ) -> Result<Vec<RecommendedJob>> {
        let scores = self.score(model, user_id)?;
        Ok(rank(&scores.to_vec(), self.store.jobs(), top_n))
    }
}
