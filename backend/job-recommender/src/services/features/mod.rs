/// Feature Store Module
///
/// Precomputes the pairwise similarity signals between every user and every
/// job. All three matrices are `|users| x |jobs|` and read-only once built.
///
/// # Signals
/// - **Skill**: cosine similarity of TF-IDF vectors (vocabulary fit on user skills)
/// - **Location**: 1.0 on exact match, 0.5 otherwise (soft preference, never 0)
/// - **Experience**: `1 - |jobsCompleted_scaled - duration_scaled|`
pub mod tfidf;

pub use tfidf::TfidfVectorizer;

use crate::data::{JobTable, UserTable};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::sync::Arc;
use tracing::debug;

/// Location similarity when user and job are in different places.
pub const LOCATION_MISMATCH_SIMILARITY: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct SimilarityMatrices {
    pub skill: Array2<f64>,
    pub location: Array2<f64>,
    pub experience: Array2<f64>,
}

impl SimilarityMatrices {
    pub fn compute(users: &UserTable, jobs: &JobTable) -> Self {
        Self {
            skill: skill_similarity(users, jobs),
            location: location_similarity(users, jobs),
            experience: experience_similarity(users, jobs),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.skill.dim()
    }
}

/// Owns the cleaned tables and the similarity matrices derived from them.
///
/// Matrices are recomputed only by building a new store, so a store can be
/// shared across evaluation workers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FeatureStore {
    users: Arc<UserTable>,
    jobs: Arc<JobTable>,
    matrices: SimilarityMatrices,
}

impl FeatureStore {
    pub fn build(users: Arc<UserTable>, jobs: Arc<JobTable>) -> Self {
        let matrices = SimilarityMatrices::compute(&users, &jobs);

        debug!(
            users = users.len(),
            jobs = jobs.len(),
            "Similarity matrices built"
        );

        Self {
            users,
            jobs,
            matrices,
        }
    }

    pub fn users(&self) -> &UserTable {
        &self.users
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn matrices(&self) -> &SimilarityMatrices {
        &self.matrices
    }

    pub fn skill_row(&self, user_idx: usize) -> ArrayView1<'_, f64> {
        self.matrices.skill.row(user_idx)
    }

    pub fn location_row(&self, user_idx: usize) -> ArrayView1<'_, f64> {
        self.matrices.location.row(user_idx)
    }

    pub fn experience_row(&self, user_idx: usize) -> ArrayView1<'_, f64> {
        self.matrices.experience.row(user_idx)
    }
}

fn skill_documents<'a, I>(skill_sets: I) -> Vec<String>
where
    I: Iterator<Item = &'a Vec<String>>,
{
    skill_sets.map(|skills| skills.join(" ")).collect()
}

/// Cosine similarity between every user skill vector and every job skill vector.
pub fn skill_similarity(users: &UserTable, jobs: &JobTable) -> Array2<f64> {
    let user_docs = skill_documents(users.users().iter().map(|u| &u.skills));
    let job_docs = skill_documents(jobs.jobs().iter().map(|j| &j.required_skills));

    let vectorizer = TfidfVectorizer::fit(&user_docs);
    if vectorizer.vocabulary_len() == 0 {
        return Array2::zeros((users.len(), jobs.len()));
    }

    // rows are unit length, so the dot product is the cosine
    let user_vectors = vectorizer.transform(&user_docs);
    let job_vectors = vectorizer.transform(&job_docs);

    user_vectors
        .dot(&job_vectors.t())
        .mapv(|v| v.clamp(0.0, 1.0))
}

pub fn location_similarity(users: &UserTable, jobs: &JobTable) -> Array2<f64> {
    let users = users.users();
    let jobs = jobs.jobs();

    Array2::from_shape_fn((users.len(), jobs.len()), |(i, j)| {
        if users[i].location == jobs[j].location {
            1.0
        } else {
            LOCATION_MISMATCH_SIMILARITY
        }
    })
}

pub fn experience_similarity(users: &UserTable, jobs: &JobTable) -> Array2<f64> {
    let experience: Array1<f64> = users
        .users()
        .iter()
        .map(|u| u.jobs_completed_scaled)
        .collect();
    let duration: Array1<f64> = jobs.jobs().iter().map(|j| j.duration_scaled).collect();

    let experience = experience.insert_axis(Axis(1));
    let duration = duration.insert_axis(Axis(0));

    (&experience - &duration).mapv(|d| 1.0 - d.abs())
}
