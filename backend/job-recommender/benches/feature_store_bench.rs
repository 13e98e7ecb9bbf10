use criterion::{black_box, criterion_group, criterion_main, Criterion};
use job_recommender::data::{JobTable, UserTable};
use job_recommender::models::{Job, User};
use job_recommender::services::ranking::SimilarityHeuristic;
use job_recommender::{FeatureStore, JobScorer, RankingModel};
use std::sync::Arc;

const SKILLS: [&str; 12] = [
    "Python", "SQL", "Django", "React", "Marketing", "SEO", "Figma", "Photoshop", "Java",
    "Kotlin", "Copywriting", "Excel",
];
const CITIES: [&str; 5] = ["Rabat", "Casablanca", "Fes", "Tanger", "Marrakech"];

fn users(count: usize) -> UserTable {
    UserTable::new(
        (0..count)
            .map(|i| User {
                id: format!("user_{}", i),
                skills: vec![
                    SKILLS[i % SKILLS.len()].to_string(),
                    SKILLS[(i * 7 + 3) % SKILLS.len()].to_string(),
                ],
                location: CITIES[i % CITIES.len()].to_string(),
                rating: 3.0 + (i % 20) as f64 / 10.0,
                jobs_completed: (i % 50) as u32,
                jobs_completed_scaled: (i % 50) as f64 / 49.0,
            })
            .collect(),
    )
}

fn jobs(count: usize) -> JobTable {
    JobTable::new(
        (0..count)
            .map(|i| Job {
                job_id: format!("job_{}", i),
                title: format!("Job {}", i),
                category: "Development".to_string(),
                location: CITIES[(i * 3) % CITIES.len()].to_string(),
                required_skills: vec![SKILLS[(i * 5) % SKILLS.len()].to_string()],
                budget: 100.0 + i as f64,
                duration_days: (i % 60) as f64,
                budget_scaled: (i % 100) as f64 / 99.0,
                duration_scaled: (i % 60) as f64 / 59.0,
            })
            .collect(),
    )
}

/// Benchmark similarity matrix construction for growing table sizes
fn bench_feature_store_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_store_build");

    for size in [100, 500, 1000].iter() {
        let user_table = Arc::new(users(*size));
        let job_table = Arc::new(jobs(*size));

        group.bench_function(format!("{}x{}", size, size), |b| {
            b.iter(|| FeatureStore::build(black_box(user_table.clone()), black_box(job_table.clone())));
        });
    }

    group.finish();
}

/// Benchmark scoring and ranking every job for one user
fn bench_recommend(c: &mut Criterion) {
    let store = Arc::new(FeatureStore::build(Arc::new(users(500)), Arc::new(jobs(2000))));
    let scorer = JobScorer::new(store);
    let model = RankingModel::new("Heuristic", Arc::new(SimilarityHeuristic::default()));

    c.bench_function("recommend_top_5_of_2000", |b| {
        b.iter(|| scorer.recommend(&model, black_box("user_42"), 5));
    });
}

criterion_group!(benches, bench_feature_store_build, bench_recommend);
criterion_main!(benches);
