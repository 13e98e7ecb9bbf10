use anyhow::Context;
use job_recommender::{
    data::{load_interactions_from_path, load_jobs_from_path, load_users_from_path},
    sample_users,
    services::ranking::load_models,
    ComparisonReport, Config, Evaluator, FeatureStore, JobScorer, ModelComparator,
    RecommendError,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load config
    let config = Config::from_env().context("Failed to load config")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str())),
        )
        .init();

    config.validate()?;

    info!(
        users = %config.data.users_path,
        jobs = %config.data.jobs_path,
        interactions = %config.data.interactions_path,
        "Starting job-recommender evaluation"
    );

    let users = Arc::new(load_users_from_path(&config.data.users_path)?);
    let jobs = Arc::new(load_jobs_from_path(&config.data.jobs_path)?);
    let interactions = Arc::new(load_interactions_from_path(&config.data.interactions_path)?);

    if jobs.is_empty() {
        return Err(RecommendError::EmptyJobSet.into());
    }

    let store = Arc::new(FeatureStore::build(users.clone(), jobs));

    let (models, load_failures) = load_models(&config.models);
    if models.is_empty() {
        for failure in &load_failures {
            error!(error = %failure, "Model unavailable");
        }
        anyhow::bail!("None of the {} declared models could be loaded", config.models.len());
    }

    let sampled = sample_users(&users, config.evaluation.sample_users, config.evaluation.seed);

    let comparator = ModelComparator::new(
        JobScorer::new(store),
        Evaluator::new(interactions),
        config.evaluation.top_n,
    )
    .with_showcase_user(config.evaluation.showcase_user.clone());

    let report = comparator.compare(&models, &sampled, load_failures);

    if config.evaluation.json_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ComparisonReport) {
    println!("\nComparison of Models:");

    if let Some(first) = report.reports.first() {
        let header: Vec<String> = first
            .mean
            .labelled(report.top_n)
            .into_iter()
            .map(|(label, _)| format!("{:>16}", label))
            .collect();
        println!("{:<24}{}", "", header.join(""));
    }

    for model in &report.reports {
        let values: Vec<String> = model
            .mean
            .labelled(report.top_n)
            .into_iter()
            .map(|(_, value)| format!("{:>16.4}", value))
            .collect();
        println!("{:<24}{}", model.model, values.join(""));

        if !model.skipped_users.is_empty() {
            println!("{:<24}skipped users: {}", "", model.skipped_users.join(", "));
        }
    }

    for failure in &report.failures {
        println!("\n{} failed: {}", failure.model, failure.reason);
    }

    match &report.best_model {
        Some(best) => println!("\nBest Model: {}", best),
        None => println!("\nBest Model: none (no model evaluated any user)"),
    }
}
