/// CSV loaders for the user, job and interaction datasets.
use super::{InteractionLog, JobTable, UserTable};
use crate::error::{RecommendError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: String,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<f64>,
    #[serde(
        rename = "jobsCompleted",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub jobs_completed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawJob {
    pub job_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub required_skills: Option<String>,
    pub budget: f64,
    pub duration_days: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInteraction {
    pub user_id: String,
    pub job_id: String,
    pub interaction_type: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn read_records<R, T>(reader: R, dataset: &str) -> Result<Vec<T>>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    reader
        .deserialize()
        .enumerate()
        .map(|(row, record)| {
            record.map_err(|e| {
                RecommendError::Data(format!("{} row {}: {}", dataset, row + 1, e))
            })
        })
        .collect()
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path)
        .map_err(|e| RecommendError::Data(format!("Failed to open {}: {}", path.display(), e)))
}

pub fn load_users<R: Read>(reader: R) -> Result<UserTable> {
    let raw: Vec<RawUser> = read_records(reader, "users")?;
    let raw_count = raw.len();
    let table = UserTable::from_raw(raw);

    debug!(
        raw_count,
        unique_count = table.len(),
        "Users cleaned"
    );

    Ok(table)
}

pub fn load_jobs<R: Read>(reader: R) -> Result<JobTable> {
    let raw: Vec<RawJob> = read_records(reader, "jobs")?;
    let raw_count = raw.len();
    let table = JobTable::from_raw(raw);

    debug!(
        raw_count,
        unique_count = table.len(),
        "Jobs cleaned"
    );

    Ok(table)
}

pub fn load_interactions<R: Read>(reader: R) -> Result<InteractionLog> {
    let raw: Vec<RawInteraction> = read_records(reader, "interactions")?;
    Ok(InteractionLog::from_raw(raw))
}

pub fn load_users_from_path<P: AsRef<Path>>(path: P) -> Result<UserTable> {
    let path = path.as_ref();
    let table = load_users(open(path)?)?;
    info!(path = %path.display(), count = table.len(), "Loaded users");
    Ok(table)
}

pub fn load_jobs_from_path<P: AsRef<Path>>(path: P) -> Result<JobTable> {
    let path = path.as_ref();
    let table = load_jobs(open(path)?)?;
    info!(path = %path.display(), count = table.len(), "Loaded jobs");
    Ok(table)
}

pub fn load_interactions_from_path<P: AsRef<Path>>(path: P) -> Result<InteractionLog> {
    let path = path.as_ref();
    let log = load_interactions(open(path)?)?;
    info!(path = %path.display(), count = log.len(), "Loaded interactions");
    Ok(log)
}
