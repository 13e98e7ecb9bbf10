/// Model Comparison Module
///
/// Runs score → rank → evaluate for every (model, sampled user) pair,
/// averages the metrics per model and picks the best model by precision@K.
///
/// Models are evaluated on scoped worker threads. Each worker only reads the
/// shared feature store and interaction log, and results are collected in
/// declaration order, so reports do not depend on thread scheduling.
use crate::data::UserTable;
use crate::error::RecommendError;
use crate::models::{MetricSet, ModelFailure, ModelReport};
use crate::services::evaluation::Evaluator;
use crate::services::ranking::{JobScorer, RankingModel};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::thread;
use tracing::{debug, info, warn};

/// Draw `n` distinct user ids (or all of them if fewer) with a seeded PRNG.
pub fn sample_users(users: &UserTable, n: usize, seed: u64) -> Vec<String> {
    let ids: Vec<&str> = users.ids().collect();
    let mut rng = StdRng::seed_from_u64(seed);

    ids.choose_multiple(&mut rng, n.min(ids.len()))
        .map(|id| id.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub top_n: usize,
    pub sampled_users: Vec<String>,
    /// One entry per evaluated model, in declaration order.
    pub reports: Vec<ModelReport>,
    pub failures: Vec<ModelFailure>,
    pub best_model: Option<String>,
}

impl ComparisonReport {
    pub fn report(&self, model: &str) -> Option<&ModelReport> {
        self.reports.iter().find(|r| r.model == model)
    }
}

/// Highest mean precision among models that evaluated at least one user.
/// The first declared model wins a tie.
pub fn select_best(reports: &[ModelReport]) -> Option<&ModelReport> {
    reports
        .iter()
        .filter(|r| r.evaluated_users > 0)
        .fold(None, |best: Option<&ModelReport>, candidate| match best {
            Some(current) if current.mean.precision >= candidate.mean.precision => Some(current),
            _ => Some(candidate),
        })
}

pub struct ModelComparator {
    scorer: JobScorer,
    evaluator: Evaluator,
    top_n: usize,
    showcase_user: Option<String>,
}

impl ModelComparator {
    pub fn new(scorer: JobScorer, evaluator: Evaluator, top_n: usize) -> Self {
        Self {
            scorer,
            evaluator,
            top_n,
            showcase_user: None,
        }
    }

    /// Log this user's recommendation list for every model.
    pub fn with_showcase_user(mut self, user_id: Option<String>) -> Self {
        self.showcase_user = user_id;
        self
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Mean metrics of one model over `user_ids`.
    ///
    /// Unknown users are skipped; any other error aborts this model only.
    pub fn evaluate_model(
        &self,
        model: &RankingModel,
        user_ids: &[String],
    ) -> Result<ModelReport, RecommendError> {
        info!(model = %model.name(), users = user_ids.len(), "Evaluating model");

        let mut metrics = Vec::with_capacity(user_ids.len());
        let mut skipped_users = Vec::new();

        for user_id in user_ids {
            let recommended = match self.scorer.recommend(model, user_id, self.top_n) {
                Ok(recommended) => recommended,
                Err(e) if e.is_recoverable() => {
                    warn!(model = %model.name(), user_id = %user_id, error = %e, "Skipping user");
                    skipped_users.push(user_id.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            if self.showcase_user.as_deref() == Some(user_id.as_str()) {
                for (rank, job) in recommended.iter().enumerate() {
                    info!(
                        model = %model.name(),
                        user_id = %user_id,
                        rank = rank + 1,
                        job_id = %job.job_id,
                        title = %job.title,
                        category = %job.category,
                        location = %job.location,
                        score = job.score,
                        "Showcase recommendation"
                    );
                }
            }

            let user_metrics = self.evaluator.evaluate_user(&recommended, user_id, self.top_n);
            debug!(
                model = %model.name(),
                user_id = %user_id,
                precision = user_metrics.precision,
                recall = user_metrics.recall,
                "User evaluated"
            );
            metrics.push(user_metrics);
        }

        Ok(ModelReport {
            model: model.name().to_string(),
            evaluated_users: metrics.len(),
            skipped_users,
            mean: MetricSet::mean(&metrics),
        })
    }

    /// Evaluate every model on the same user sample.
    ///
    /// `load_failures` are models that never loaded; they are carried into
    /// the report so they are visible next to the evaluated ones.
    pub fn compare(
        &self,
        models: &[RankingModel],
        user_ids: &[String],
        load_failures: Vec<RecommendError>,
    ) -> ComparisonReport {
        let outcomes: Vec<Result<ModelReport, RecommendError>> = thread::scope(|scope| {
            let workers: Vec<_> = models
                .iter()
                .map(|model| scope.spawn(move || self.evaluate_model(model, user_ids)))
                .collect();

            workers
                .into_iter()
                .zip(models)
                .map(|(worker, model)| {
                    worker.join().unwrap_or_else(|_| {
                        Err(RecommendError::Inference {
                            model: model.name().to_string(),
                            reason: "evaluation worker panicked".to_string(),
                        })
                    })
                })
                .collect()
        });

        let mut failures: Vec<ModelFailure> = load_failures.iter().map(failure_for).collect();
        let mut reports = Vec::with_capacity(models.len());

        for (model, outcome) in models.iter().zip(outcomes) {
            match outcome {
                Ok(report) => reports.push(report),
                Err(e) => {
                    warn!(model = %model.name(), error = %e, "Model evaluation failed");
                    failures.push(ModelFailure {
                        model: model.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let best_model = select_best(&reports).map(|r| r.model.clone());
        if let Some(best) = &best_model {
            info!(best_model = %best, top_n = self.top_n, "Model comparison complete");
        }

        ComparisonReport {
            top_n: self.top_n,
            sampled_users: user_ids.to_vec(),
            reports,
            failures,
            best_model,
        }
    }
}

fn failure_for(error: &RecommendError) -> ModelFailure {
    match error {
        RecommendError::MissingModelArtifact { model, .. }
        | RecommendError::Inference { model, .. } => ModelFailure {
            model: model.clone(),
            reason: error.to_string(),
        },
        other => ModelFailure {
            model: "<unknown>".to_string(),
            reason: other.to_string(),
        },
    }
}
