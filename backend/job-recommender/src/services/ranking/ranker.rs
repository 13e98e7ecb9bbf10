use crate::data::JobTable;
use crate::models::RecommendedJob;
use std::cmp::Ordering;

/// Descending by score; NaN sorts after every number.
fn by_score_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Top `top_n` jobs by probability, highest first.
///
/// `probabilities` is aligned with the job table. Equal scores keep job
/// table order. `top_n == 0` or an empty table gives an empty result.
pub fn rank(probabilities: &[f32], jobs: &JobTable, top_n: usize) -> Vec<RecommendedJob> {
    let candidates = probabilities.len().min(jobs.len());
    if top_n == 0 || candidates == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..candidates).collect();
    // stable sort keeps job table order for ties
    order.sort_by(|&a, &b| by_score_desc(probabilities[a], probabilities[b]));

    order
        .into_iter()
        .take(top_n)
        .filter_map(|idx| {
            jobs.get(idx).map(|job| RecommendedJob {
                job_id: job.job_id.clone(),
                title: job.title.clone(),
                category: job.category.clone(),
                location: job.location.clone(),
                required_skills: job.required_skills.clone(),
                score: probabilities[idx],
            })
        })
        .collect()
}
