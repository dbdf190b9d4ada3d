// urlwarden-cli/src/main.rs
// ============================================================================
// Module: Urlwarden CLI Entry Point
// Description: Command dispatcher for serving, checking, seeding, and load tests.
// Purpose: Provide one operational entry point over the inspection service.
// Dependencies: clap, urlwarden-config, urlwarden-core, urlwarden-server, urlwarden-store-sqlite
// ============================================================================

//! ## Overview
//! The CLI runs the HTTP server, performs one-off checks against the
//! configured stores, seeds the SQLite reference data, and drives a
//! running instance with a concurrent load test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use urlwarden_config::StoreBackend;
use urlwarden_config::UrlwardenConfig;
use urlwarden_core::RawRequest;
use urlwarden_core::UrlInspector;
use urlwarden_server::AppServer;
use urlwarden_server::build_stores;
use urlwarden_store_sqlite::SqliteReputationStore;
use urlwarden_store_sqlite::SqliteSignatureStore;
use urlwarden_store_sqlite::SqliteStoreConfig;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Urlwarden command-line interface.
#[derive(Debug, Parser)]
#[command(name = "urlwarden", version, about = "URL threat inspection service")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Inspect one URL fragment against the configured stores.
    Check {
        /// Path fragment in `hostname[:port]/path` form.
        url_parts: String,
        /// Query string supplied separately, without the leading `?`.
        #[arg(long)]
        query: Option<String>,
    },
    /// Create and seed the SQLite reference stores.
    Seed,
    /// Drive a running server with concurrent check requests.
    Loadtest {
        /// Base URL of the server under test.
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        target: String,
        /// Total number of requests to issue.
        #[arg(long, default_value_t = 1000)]
        requests: usize,
        /// Number of concurrent in-flight requests.
        #[arg(long, default_value_t = 100)]
        concurrency: usize,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI execution errors.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration loading or validation failed.
    #[error("config error: {0}")]
    Config(String),
    /// Server construction or serving failed.
    #[error("server error: {0}")]
    Server(String),
    /// Store access failed.
    #[error("store error: {0}")]
    Store(String),
    /// Inspection failed.
    #[error("check error: {0}")]
    Check(String),
    /// Load-test HTTP client failed.
    #[error("http error: {0}")]
    Http(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(std::io::stderr(), "urlwarden: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Dispatches the parsed command.
async fn run(cli: Cli) -> Result<(), CliError> {
    let config = UrlwardenConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::Config(err.to_string()))?;
    match cli.command {
        Command::Serve => run_serve(&config).await,
        Command::Check {
            url_parts,
            query,
        } => run_check(&config, &url_parts, query),
        Command::Seed => run_seed(&config),
        Command::Loadtest {
            target,
            requests,
            concurrency,
        } => run_loadtest(&target, requests, concurrency.max(1)).await,
    }
}

// ============================================================================
// SECTION: Serve
// ============================================================================

/// Runs the HTTP server until the transport fails.
async fn run_serve(config: &UrlwardenConfig) -> Result<(), CliError> {
    let server = AppServer::from_config(config).map_err(|err| CliError::Server(err.to_string()))?;
    emit(&format!("listening on {}", server.bind_addr()));
    server.serve().await.map_err(|err| CliError::Server(err.to_string()))
}

// ============================================================================
// SECTION: Check
// ============================================================================

/// Inspects one fragment locally and prints the verdict as JSON.
fn run_check(
    config: &UrlwardenConfig,
    url_parts: &str,
    query: Option<String>,
) -> Result<(), CliError> {
    config.validate().map_err(|err| CliError::Config(err.to_string()))?;
    let (signatures, reputation) =
        build_stores(config).map_err(|err| CliError::Store(err.to_string()))?;
    let inspector = UrlInspector::new(signatures, reputation, config.pipeline_config());
    let request = RawRequest {
        path_fragment: url_parts.to_string(),
        query_string: query,
    };
    let report = inspector.check(&request).map_err(|err| CliError::Check(err.to_string()))?;
    let rendered =
        serde_json::to_string_pretty(&report).map_err(|err| CliError::Check(err.to_string()))?;
    emit(&rendered);
    Ok(())
}

// ============================================================================
// SECTION: Seed
// ============================================================================

/// Creates and seeds the SQLite stores named by the configuration.
fn run_seed(config: &UrlwardenConfig) -> Result<(), CliError> {
    config.validate().map_err(|err| CliError::Config(err.to_string()))?;
    if config.stores.backend != StoreBackend::Sqlite {
        return Err(CliError::Config("seed requires stores.backend = \"sqlite\"".to_string()));
    }
    let path = config
        .stores
        .path
        .clone()
        .ok_or_else(|| CliError::Config("seed requires stores.path".to_string()))?;
    let store_config = SqliteStoreConfig {
        path,
        busy_timeout_ms: config.stores.busy_timeout_ms,
    };
    let signatures =
        SqliteSignatureStore::open(&store_config).map_err(|err| CliError::Store(err.to_string()))?;
    let reputation = SqliteReputationStore::open(&store_config)
        .map_err(|err| CliError::Store(err.to_string()))?;
    let seeded_signatures =
        signatures.seed_defaults().map_err(|err| CliError::Store(err.to_string()))?;
    let seeded_reputation =
        reputation.seed_defaults().map_err(|err| CliError::Store(err.to_string()))?;
    emit(&format!(
        "seeded {seeded_signatures} signatures, {seeded_reputation} reputation entries"
    ));
    Ok(())
}

// ============================================================================
// SECTION: Load Test
// ============================================================================

/// Check paths cycled through during a load test.
const LOADTEST_PATHS: [&str; 5] = [
    "/urlinfo/1/example.com/test",
    "/urlinfo/1/malicious-site.com/download",
    "/urlinfo/1/google.com/search?q=test",
    "/urlinfo/1/phishing-bank.com/login",
    "/urlinfo/1/safe-domain.org/page",
];

/// Issues `requests` checks against a running server in concurrent batches.
async fn run_loadtest(
    target: &str,
    requests: usize,
    concurrency: usize,
) -> Result<(), CliError> {
    let urls: Vec<String> =
        LOADTEST_PATHS.iter().map(|path| format!("{target}{path}")).collect();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(concurrency)
        .build()
        .map_err(|err| CliError::Http(err.to_string()))?;

    emit(&format!(
        "load test: target={target} requests={requests} concurrency={concurrency}"
    ));

    let started = Instant::now();
    let mut durations: Vec<Duration> = Vec::with_capacity(requests);
    let mut status_counts: BTreeMap<u16, u64> = BTreeMap::new();
    let mut errors: u64 = 0;

    let mut issued = 0;
    while issued < requests {
        let batch = concurrency.min(requests - issued);
        let mut handles = Vec::with_capacity(batch);
        for index in issued..issued + batch {
            let client = client.clone();
            let url = urls[index % urls.len()].clone();
            handles.push(tokio::spawn(async move {
                let begin = Instant::now();
                let status = client.get(&url).send().await.map(|response| response.status().as_u16());
                (status, begin.elapsed())
            }));
        }
        for handle in handles {
            match handle.await {
                Ok((Ok(code), duration)) => {
                    durations.push(duration);
                    *status_counts.entry(code).or_insert(0) += 1;
                }
                Ok((Err(_), duration)) => {
                    durations.push(duration);
                    errors += 1;
                }
                Err(_) => errors += 1,
            }
        }
        issued += batch;
    }

    let elapsed = started.elapsed();
    emit_summary(requests, errors, &mut durations, &status_counts, elapsed);
    Ok(())
}

/// Prints the load-test summary.
fn emit_summary(
    requests: usize,
    errors: u64,
    durations: &mut [Duration],
    status_counts: &BTreeMap<u16, u64>,
    elapsed: Duration,
) {
    durations.sort_unstable();
    let total_secs = elapsed.as_secs_f64().max(f64::EPSILON);
    let throughput = requests_f64(requests) / total_secs;

    emit(&format!("duration: {total_secs:.2}s"));
    emit(&format!("requests: {requests} ({errors} errors)"));
    emit(&format!("throughput: {throughput:.1} req/s"));
    if !durations.is_empty() {
        emit(&format!("latency avg: {:.2}ms", average_millis(durations)));
        emit(&format!("latency p50: {:.2}ms", percentile_millis(durations, 50)));
        emit(&format!("latency p95: {:.2}ms", percentile_millis(durations, 95)));
        emit(&format!("latency p99: {:.2}ms", percentile_millis(durations, 99)));
    }
    for (code, count) in status_counts {
        emit(&format!("status {code}: {count}"));
    }
}

/// Returns the request count as a float for rate math.
fn requests_f64(requests: usize) -> f64 {
    u32::try_from(requests).map_or(f64::MAX, f64::from)
}

/// Returns the mean latency in milliseconds.
fn average_millis(durations: &[Duration]) -> f64 {
    let total: Duration = durations.iter().sum();
    total.as_secs_f64() * 1000.0 / requests_f64(durations.len()).max(1.0)
}

/// Returns the latency percentile in milliseconds over sorted samples.
fn percentile_millis(sorted: &[Duration], percentile: usize) -> f64 {
    let index = (sorted.len() * percentile / 100).min(sorted.len() - 1);
    sorted[index].as_secs_f64() * 1000.0
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes one line of user-facing output.
#[allow(clippy::print_stdout, reason = "CLI output is the user-facing surface.")]
fn emit(line: &str) {
    println!("{line}");
}

// ============================================================================
// SECTION: Tests
// ============================================================================
