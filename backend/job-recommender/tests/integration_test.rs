use job_recommender::{
    data::{load_interactions, load_jobs, load_users},
    models::FEATURE_COUNT,
    sample_users,
    services::ranking::{load_models, LogisticModel, ModelKind, ModelSpec, SimilarityHeuristic},
    Evaluator, FeatureStore, JobScorer, ModelComparator, RankingModel, RecommendError,
};
use std::sync::Arc;

const USERS: &str = "id,skills,location,rating,jobsCompleted
user_1,\"['Python', 'SQL']\",rabat,4.5,10
user_2,\"['Marketing', 'SEO']\",Casablanca,3.9,2
user_3,\"['Figma', 'Photoshop']\",fes,,0
user_4,\"['Python', 'Django']\",Rabat,4.8,20
user_5,not-a-list,Tanger,4.1,
";

const JOBS: &str = "job_id,title,category,location,required_skills,budget,duration_days
job_1,Data pipeline,Development,Rabat,\"['Python', 'SQL']\",800,14
job_2,Ad campaign,Marketing,casablanca,\"['Marketing']\",400,7
job_3,Logo redesign,Design,Fes,\"['Figma']\",300,5
job_4,Django API,Development,Rabat,\"['Python', 'Django']\",1200,30
job_5,SEO audit,Marketing,Tanger,\"['SEO']\",250,3
";

const INTERACTIONS: &str = "user_id,job_id,interaction_type,timestamp
user_1,job_1,applied,2024-03-01 09:00:00
user_1,job_4,saved,2024-03-02 09:00:00
user_2,job_2,applied,2024-03-01 10:00:00
user_2,job_5,applied,2024-03-03 10:00:00
user_3,job_3,saved,2024-03-04 11:00:00
user_4,job_4,applied,2024-03-05 12:00:00
";

struct Fixture {
    store: Arc<FeatureStore>,
    evaluator: Evaluator,
}

fn fixture() -> Fixture {
    let users = Arc::new(load_users(USERS.as_bytes()).unwrap());
    let jobs = Arc::new(load_jobs(JOBS.as_bytes()).unwrap());
    let interactions = Arc::new(load_interactions(INTERACTIONS.as_bytes()).unwrap());

    Fixture {
        store: Arc::new(FeatureStore::build(users, jobs)),
        evaluator: Evaluator::new(interactions),
    }
}

fn heuristic() -> RankingModel {
    RankingModel::new("Heuristic", Arc::new(SimilarityHeuristic::default()))
}

fn logistic() -> RankingModel {
    let coefficients = vec![3.0, 1.5, 0.5, 0.1, 0.0, 0.0, 0.0];
    assert_eq!(coefficients.len(), FEATURE_COUNT);
    RankingModel::new(
        "Logistic Regression",
        Arc::new(LogisticModel::new(coefficients, -3.0).unwrap()),
    )
}

#[test]
fn test_recommendations_prefer_matching_jobs() {
    let f = fixture();
    let scorer = JobScorer::new(f.store.clone());

    let recommended = scorer.recommend(&heuristic(), "user_1", 3).unwrap();

    assert_eq!(recommended.len(), 3);
    assert_eq!(recommended[0].job_id, "job_1");
    assert!(recommended.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(recommended[0].location, "Rabat");
}

#[test]
fn test_single_user_scenario() {
    let users = "id,skills,location,rating,jobsCompleted\nu1,\"['Python', 'SQL']\",Rabat,4.5,5\n";
    let jobs = "job_id,title,category,location,required_skills,budget,duration_days
j2,Campaign,Marketing,Casablanca,\"['Marketing']\",500,10
j1,Script,Development,Rabat,\"['Python']\",500,10
";
    let store = Arc::new(FeatureStore::build(
        Arc::new(load_users(users.as_bytes()).unwrap()),
        Arc::new(load_jobs(jobs.as_bytes()).unwrap()),
    ));
    let scorer = JobScorer::new(store);

    for model in [heuristic(), logistic()] {
        let recommended = scorer.recommend(&model, "u1", 2).unwrap();
        assert_eq!(recommended[0].job_id, "j1", "model {}", model.name());
        assert_eq!(recommended[1].job_id, "j2", "model {}", model.name());
    }
}

#[test]
fn test_unknown_users_are_skipped() {
    let f = fixture();
    let comparator = ModelComparator::new(JobScorer::new(f.store.clone()), f.evaluator.clone(), 2);

    let users = vec!["user_1".to_string(), "ghost".to_string(), "user_2".to_string()];
    let report = comparator.compare(&[heuristic()], &users, Vec::new());

    assert!(report.failures.is_empty());
    let heuristic_report = report.report("Heuristic").unwrap();
    assert_eq!(heuristic_report.evaluated_users, 2);
    assert_eq!(heuristic_report.skipped_users, vec!["ghost".to_string()]);
}

#[test]
fn test_comparison_is_deterministic() {
    let f = fixture();
    let run = || {
        let comparator =
            ModelComparator::new(JobScorer::new(f.store.clone()), f.evaluator.clone(), 2);
        let users = sample_users(f.store.users(), 3, 42);
        comparator.compare(&[heuristic(), logistic()], &users, Vec::new())
    };

    let first = run();
    let second = run();

    assert_eq!(first, second);
    assert_eq!(first.sampled_users.len(), 3);
    assert_eq!(first.reports.len(), 2);
    assert_eq!(first.reports[0].model, "Heuristic");
    assert_eq!(first.reports[1].model, "Logistic Regression");
    assert!(first.best_model.is_some());

    for report in &first.reports {
        let m = report.mean;
        for value in [m.precision, m.recall, m.f1, m.mrr, m.ndcg, m.binary_accuracy] {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}

#[test]
fn test_missing_artifacts_are_reported() {
    let f = fixture();
    let specs = vec![
        ModelSpec::new("XGBoost", "/nonexistent/xgboost.onnx"),
        ModelSpec {
            name: "Baseline".to_string(),
            path: String::new(),
            kind: Some(ModelKind::Heuristic),
        },
    ];

    let (models, load_failures) = load_models(&specs);
    assert_eq!(models.len(), 1);
    assert!(matches!(
        load_failures[0],
        RecommendError::MissingModelArtifact { .. }
    ));

    let comparator = ModelComparator::new(JobScorer::new(f.store.clone()), f.evaluator.clone(), 5);
    let users: Vec<String> = f.store.users().ids().map(str::to_string).collect();
    let report = comparator.compare(&models, &users, load_failures);

    assert_eq!(report.best_model.as_deref(), Some("Baseline"));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].model, "XGBoost");
    assert!(report.report("XGBoost").is_none());
}
