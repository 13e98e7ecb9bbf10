/// Data Preparation Module
///
/// Turns raw user/job/interaction records into the cleaned, read-only tables
/// the feature store and evaluator work on.
///
/// # Cleaning rules
/// - Skill lists are parsed from list literals; malformed cells become empty lists
/// - Missing ratings are imputed with the column mean, missing `jobsCompleted` with 0
/// - Locations are capitalized so that `"rabat"` and `"RABAT"` match
/// - Duplicate identifiers are dropped, keeping the first row
/// - `jobsCompleted`, `duration_days` and `budget` are min-max scaled once per table
pub mod loader;

pub use loader::{
    load_interactions, load_interactions_from_path, load_jobs, load_jobs_from_path, load_users,
    load_users_from_path, RawInteraction, RawJob, RawUser,
};

use crate::models::{Interaction, InteractionType, Job, User};
use crate::utils::{capitalize, min_max_scale, parse_skill_list};
use std::collections::{HashMap, HashSet};

/// Cleaned users, one row per unique id, in input order.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    users: Vec<User>,
    positions: HashMap<String, usize>,
}

impl UserTable {
    /// Build a table from already-cleaned users, dropping repeated ids.
    pub fn new(users: Vec<User>) -> Self {
        let mut positions = HashMap::with_capacity(users.len());
        let mut kept = Vec::with_capacity(users.len());

        for user in users {
            if positions.contains_key(&user.id) {
                continue;
            }
            positions.insert(user.id.clone(), kept.len());
            kept.push(user);
        }

        Self {
            users: kept,
            positions,
        }
    }

    /// Clean raw records: impute, normalize casing, de-duplicate, scale.
    pub fn from_raw(raw: Vec<RawUser>) -> Self {
        let known_ratings: Vec<f64> = raw.iter().filter_map(|r| r.rating).collect();
        let mean_rating = if known_ratings.is_empty() {
            0.0
        } else {
            known_ratings.iter().sum::<f64>() / known_ratings.len() as f64
        };

        let users = raw
            .into_iter()
            .map(|r| User {
                id: r.id,
                skills: r.skills.as_deref().map(parse_skill_list).unwrap_or_default(),
                location: capitalize(r.location.as_deref().unwrap_or_default().trim()),
                rating: r.rating.unwrap_or(mean_rating),
                jobs_completed: r.jobs_completed.unwrap_or(0.0).max(0.0).round() as u32,
                jobs_completed_scaled: 0.0,
            })
            .collect();

        let mut table = Self::new(users);

        let completed: Vec<f64> = table
            .users
            .iter()
            .map(|u| f64::from(u.jobs_completed))
            .collect();
        for (user, scaled) in table.users.iter_mut().zip(min_max_scale(&completed)) {
            user.jobs_completed_scaled = scaled;
        }

        table
    }

    pub fn position(&self, user_id: &str) -> Option<usize> {
        self.positions.get(user_id).copied()
    }

    pub fn get(&self, position: usize) -> Option<&User> {
        self.users.get(position)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|u| u.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Cleaned jobs, one row per unique job id, in input order.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new(jobs: Vec<Job>) -> Self {
        let mut seen = HashSet::with_capacity(jobs.len());
        let jobs = jobs
            .into_iter()
            .filter(|job| seen.insert(job.job_id.clone()))
            .collect();

        Self { jobs }
    }

    pub fn from_raw(raw: Vec<RawJob>) -> Self {
        let jobs = raw
            .into_iter()
            .map(|r| Job {
                job_id: r.job_id,
                title: r.title,
                category: r.category,
                location: capitalize(r.location.as_deref().unwrap_or_default().trim()),
                required_skills: r
                    .required_skills
                    .as_deref()
                    .map(parse_skill_list)
                    .unwrap_or_default(),
                budget: r.budget,
                duration_days: r.duration_days,
                budget_scaled: 0.0,
                duration_scaled: 0.0,
            })
            .collect();

        let mut table = Self::new(jobs);

        let durations: Vec<f64> = table.jobs.iter().map(|j| j.duration_days).collect();
        let budgets: Vec<f64> = table.jobs.iter().map(|j| j.budget).collect();
        let scaled = min_max_scale(&durations)
            .into_iter()
            .zip(min_max_scale(&budgets));
        for (job, (duration, budget)) in table.jobs.iter_mut().zip(scaled) {
            job.duration_scaled = duration;
            job.budget_scaled = budget;
        }

        table
    }

    pub fn get(&self, position: usize) -> Option<&Job> {
        self.jobs.get(position)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Raw interaction history. Not de-duplicated.
#[derive(Debug, Clone, Default)]
pub struct InteractionLog {
    interactions: Vec<Interaction>,
}

impl InteractionLog {
    pub fn new(interactions: Vec<Interaction>) -> Self {
        Self { interactions }
    }

    pub fn from_raw(raw: Vec<RawInteraction>) -> Self {
        Self::new(
            raw.into_iter()
                .map(|r| Interaction {
                    user_id: r.user_id,
                    job_id: r.job_id,
                    interaction_type: InteractionType::from(r.interaction_type),
                    timestamp: r.timestamp.unwrap_or_default(),
                })
                .collect(),
        )
    }

    /// Jobs the user applied to. Saved jobs are not ground truth.
    pub fn relevant_jobs(&self, user_id: &str) -> HashSet<String> {
        self.interactions
            .iter()
            .filter(|i| i.user_id == user_id && i.interaction_type == InteractionType::Applied)
            .map(|i| i.job_id.clone())
            .collect()
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}
