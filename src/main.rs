// uniwatch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and option resolution (CLI > config > default)
// 3. Logging initialisation (debug mode support)
// 4. Pipeline invocation and operator summary

use clap::Parser;
use std::path::PathBuf;

use uniwatch::app::pipeline;
use uniwatch::core::model::RunOutcome;
use uniwatch::platform::config::{self, PlatformPaths};
use uniwatch::util;

/// uniwatch - broker instrument-universe change tracker.
///
/// Fetches the published instrument catalog, extracts (ISIN, name) records
/// from it, and diffs them against the stored baseline to detect which
/// instruments were added or removed since the last run.
#[derive(Parser, Debug)]
#[command(name = "uniwatch", version, about)]
struct Cli {
    /// URL of the published catalog document.
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Directory holding the baseline, change logs, and cached document.
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Override the baseline table path.
    #[arg(long = "baseline")]
    baseline: Option<PathBuf>,

    /// Override the additions change-log path.
    #[arg(long = "added-log")]
    added_log: Option<PathBuf>,

    /// Override the removals change-log path.
    #[arg(long = "removed-log")]
    removed_log: Option<PathBuf>,

    /// Use an explicit config file instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging is up; the
    // few trace calls made in there are lost, which is acceptable.
    let platform_paths = PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());
    let (mut watch_config, config_warnings) =
        config::load_config(&config_path, &platform_paths);

    // Initialise logging subsystem
    util::logging::init(cli.debug, watch_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "uniwatch starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Apply CLI overrides on top of the resolved config.
    if let Some(url) = cli.url {
        watch_config.source_url = url;
    }
    if let Some(data_dir) = cli.data_dir {
        watch_config.baseline_path = data_dir.join(util::constants::BASELINE_FILE_NAME);
        watch_config.added_log_path = data_dir.join(util::constants::ADDED_LOG_FILE_NAME);
        watch_config.removed_log_path = data_dir.join(util::constants::REMOVED_LOG_FILE_NAME);
        watch_config.document_path = data_dir.join(util::constants::DOCUMENT_FILE_NAME);
        watch_config.data_dir = data_dir;
    }
    if let Some(baseline) = cli.baseline {
        watch_config.baseline_path = baseline;
    }
    if let Some(added_log) = cli.added_log {
        watch_config.added_log_path = added_log;
    }
    if let Some(removed_log) = cli.removed_log {
        watch_config.removed_log_path = removed_log;
    }

    tracing::debug!(
        url = %watch_config.source_url,
        baseline = %watch_config.baseline_path.display(),
        "Run configuration resolved"
    );

    match pipeline::run(&watch_config) {
        Ok(report) => {
            match report.outcome {
                RunOutcome::Seeded { count } => {
                    println!(
                        "Baseline created with {count} instruments. \
                         No previous data to compare."
                    );
                }
                RunOutcome::NoChange => {
                    println!("No changes found ({} instruments).", report.unique);
                }
                RunOutcome::Changed { added, removed } => {
                    println!("Changes detected: {added} added, {removed} removed.");
                    println!(
                        "Baseline and change logs updated in '{}'.",
                        watch_config.data_dir.display()
                    );
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
