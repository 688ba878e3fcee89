//! Application execution logic.
//!
//! This module downloads both databases into a temporary directory, compares
//! a sample of IPv4 addresses and prints the report to stdout.

use std::num::NonZeroU64;
use std::path::Path;

use thiserror::Error;

use mmdb_compare::compare::{
    ComparisonCounters, ComparisonEngine, ReportFormatter, TracingProgress,
};
use mmdb_compare::config::ValidatedConfig;
use mmdb_compare::fetch::{
    FetchError, GcsBaseline, HttpClient, HttpError, MaxMindSource, ReqwestClient,
};
use mmdb_compare::lookup::{GeoLookup, LookupError, MmdbLookup};
use mmdb_compare::sampling::{self, Samples, SamplingMode};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Prefix of the per-run temporary directory.
const TEMP_DIR_PREFIX: &str = "compare_mmdb";

const BASELINE_FILE: &str = "old.mmdb";
const CANDIDATE_FILE: &str = "new.mmdb";

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the temporary working directory.
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] HttpError),

    /// Failed to acquire the baseline database.
    #[error("Failed to download baseline file from GCS: {0}")]
    Baseline(#[source] FetchError),

    /// Failed to acquire the candidate database.
    #[error("Failed to download MaxMind file: {0}")]
    Candidate(#[source] FetchError),

    /// A downloaded file could not be opened as a database.
    #[error(transparent)]
    Open(#[from] LookupError),

    /// The comparison task panicked.
    #[error("Comparison task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The report could not be serialized.
    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Executes one comparison run.
///
/// The temporary directory is removed whether or not the run succeeds.
///
/// # Errors
///
/// Returns an error if either download fails, a file cannot be opened as a
/// database, or the report cannot be rendered.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let workdir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir()
        .map_err(RunError::TempDir)?;
    tracing::debug!("Working directory: {}", workdir.path().display());

    let result = match ReqwestClient::new() {
        Ok(client) => compare_in(&config, client, workdir.path()).await,
        Err(e) => Err(RunError::Client(e)),
    };

    tracing::info!("Deleting temporary files...");
    if let Err(e) = workdir.close() {
        tracing::warn!("Failed to delete temporary directory: {e}");
    }

    print!("{}", result?);
    Ok(())
}

/// Downloads, opens and compares both databases inside `workdir`, returning
/// the rendered report.
async fn compare_in<H: HttpClient + Clone>(
    config: &ValidatedConfig,
    client: H,
    workdir: &Path,
) -> Result<String, RunError> {
    let baseline_source = GcsBaseline::new(client.clone(), config.baseline.clone())
        .map_err(RunError::Baseline)?
        .with_access_token(config.gcs_access_token.clone())
        .with_project_id(config.gcp_project_id.clone());
    let candidate_source = MaxMindSource::new(client, config.maxmind_license_key.clone())
        .map_err(RunError::Candidate)?
        .with_account_id(config.maxmind_account_id.clone())
        .with_edition_id(config.maxmind_edition_id.clone());

    let baseline_path = workdir.join(BASELINE_FILE);
    let candidate_path = workdir.join(CANDIDATE_FILE);
    baseline_source
        .fetch_to(&baseline_path)
        .await
        .map_err(RunError::Baseline)?;
    candidate_source
        .fetch_to(workdir, &candidate_path)
        .await
        .map_err(RunError::Candidate)?;

    let baseline = open_database(&baseline_path)?;
    let candidate = open_database(&candidate_path)?;

    log_sampling(config);
    let samples = sampling::generate(&config.sampling);
    if samples.remaining() < config.sampling.sample_size() {
        tracing::warn!(
            "Stride only yields {} addresses, fewer than the requested {}",
            samples.remaining(),
            config.sampling.sample_size()
        );
    }

    let progress = config.progress;
    let counters =
        tokio::task::spawn_blocking(move || compare(&baseline, &candidate, progress, samples))
            .await?;

    let formatter = ReportFormatter::new(
        baseline_source.location().to_string(),
        candidate_source.label(),
    );
    Ok(formatter.render_as(config.format, &counters)?)
}

fn open_database(path: &Path) -> Result<MmdbLookup, LookupError> {
    let db = MmdbLookup::open(path)?;
    tracing::debug!(
        "Opened {} ({}, built at epoch {})",
        path.display(),
        db.database_type(),
        db.build_epoch()
    );
    Ok(db)
}

fn log_sampling(config: &ValidatedConfig) {
    match config.sampling.mode() {
        SamplingMode::Random { seed } if config.seed_generated => {
            tracing::info!("Using random seed: {seed} (set RANDOM_SEED={seed} to reproduce)");
        }
        SamplingMode::Random { seed } => tracing::info!("Using random seed: {seed}"),
        SamplingMode::Stride(stride) => tracing::info!("Using fixed stride: {stride}"),
    }
}

/// Runs the comparison engine over `samples`, logging progress every
/// `progress` addresses when set.
fn compare<B, C>(
    baseline: B,
    candidate: C,
    progress: Option<NonZeroU64>,
    samples: Samples,
) -> ComparisonCounters
where
    B: GeoLookup,
    C: GeoLookup,
{
    let engine = ComparisonEngine::new(baseline, candidate);
    match progress {
        Some(interval) => engine.with_progress(interval, TracingProgress).run(samples),
        None => engine.run(samples),
    }
}
