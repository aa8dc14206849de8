// uniwatch - platform/config.rs
//
// Platform directory resolution and config.toml loading with startup
// validation. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), Library (macOS) compliance.
//
// Precedence for every option: CLI flag > config.toml > built-in default.
// CLI overrides are applied in main.rs on top of the resolved WatchConfig.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for uniwatch data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/uniwatch/).
    pub config_dir: PathBuf,

    /// Data directory for the baseline, change logs, and cached document.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback.join("data"),
            }
        }
    }

    /// Path of config.toml inside the config directory.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[source]` section.
    pub source: SourceSection,
    /// `[fetch]` section.
    pub fetch: FetchSection,
    /// `[store]` section.
    pub store: StoreSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[source]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// URL of the published catalog document.
    pub url: Option<String>,
}

/// `[fetch]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FetchSection {
    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Directory holding the baseline, change logs, and cached document.
    pub data_dir: Option<PathBuf>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated run configuration: the four recognised pipeline options plus
/// fetch and logging settings, every path made concrete.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// URL of the published catalog document.
    pub source_url: String,

    /// HTTP timeout for the catalog download, in seconds.
    pub fetch_timeout_secs: u64,

    /// Directory holding all persisted state.
    pub data_dir: PathBuf,

    /// The canonical current-state table.
    pub baseline_path: PathBuf,

    /// Append-only log of detected additions.
    pub added_log_path: PathBuf,

    /// Append-only log of detected removals.
    pub removed_log_path: PathBuf,

    /// Cache location for the fetched raw document.
    pub document_path: PathBuf,

    /// Logging level string from config (for init before tracing is up).
    pub log_level: Option<String>,
}

/// Load and validate config.toml, then resolve every option to a concrete
/// value rooted in the platform paths.
///
/// Returns the config plus a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning --
/// the run still proceeds but the user is informed.
pub fn load_config(config_path: &Path, paths: &PlatformPaths) -> (WatchConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut raw = RawConfig::default();

    if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(r) => {
                    tracing::info!(path = %config_path.display(), "Loaded config.toml");
                    raw = r;
                }
                Err(e) => {
                    let msg = format!(
                        "Failed to parse config file '{}': {e}. Using defaults.",
                        config_path.display()
                    );
                    tracing::warn!("{}", msg);
                    warnings.push(msg);
                }
            },
            Err(e) => {
                let msg = format!(
                    "Could not read config file '{}': {e}. Using defaults.",
                    config_path.display()
                );
                tracing::warn!("{}", msg);
                warnings.push(msg);
            }
        }
    } else {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
    }

    // Validate each field against named constants, accumulating all warnings.

    // -- [fetch] timeout_secs --
    let mut fetch_timeout_secs = constants::DEFAULT_FETCH_TIMEOUT_SECS;
    if let Some(secs) = raw.fetch.timeout_secs {
        if (constants::MIN_FETCH_TIMEOUT_SECS..=constants::MAX_FETCH_TIMEOUT_SECS).contains(&secs) {
            fetch_timeout_secs = secs;
        } else {
            warnings.push(format!(
                "[fetch] timeout_secs = {secs} is out of range ({}-{}). Using default ({}).",
                constants::MIN_FETCH_TIMEOUT_SECS,
                constants::MAX_FETCH_TIMEOUT_SECS,
                constants::DEFAULT_FETCH_TIMEOUT_SECS,
            ));
        }
    }

    // -- [logging] level --
    let mut log_level = None;
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- [source] url --
    let source_url = raw
        .source
        .url
        .filter(|u| {
            if u.trim().is_empty() {
                warnings.push("[source] url is empty. Using default.".to_string());
                false
            } else {
                true
            }
        })
        .unwrap_or_else(|| constants::DEFAULT_SOURCE_URL.to_string());

    // -- [store] data_dir --
    let data_dir = raw.store.data_dir.unwrap_or_else(|| paths.data_dir.clone());

    let config = WatchConfig {
        source_url,
        fetch_timeout_secs,
        baseline_path: data_dir.join(constants::BASELINE_FILE_NAME),
        added_log_path: data_dir.join(constants::ADDED_LOG_FILE_NAME),
        removed_log_path: data_dir.join(constants::REMOVED_LOG_FILE_NAME),
        document_path: data_dir.join(constants::DOCUMENT_FILE_NAME),
        data_dir,
        log_level,
    };

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths_in(dir: &TempDir) -> PlatformPaths {
        PlatformPaths {
            config_dir: dir.path().join("config"),
            data_dir: dir.path().join("data"),
        }
    }

    #[test]
    fn test_missing_config_file_yields_defaults_without_warnings() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let (config, warnings) = load_config(&paths.config_file(), &paths);

        assert!(warnings.is_empty());
        assert_eq!(config.source_url, constants::DEFAULT_SOURCE_URL);
        assert_eq!(config.fetch_timeout_secs, constants::DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(config.baseline_path, paths.data_dir.join("instruments.csv"));
        assert_eq!(config.added_log_path, paths.data_dir.join("added.json"));
        assert_eq!(config.removed_log_path, paths.data_dir.join("removed.json"));
    }

    #[test]
    fn test_valid_config_values_are_applied() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[source]
url = "https://example.com/universe.pdf"

[fetch]
timeout_secs = 60

[store]
data_dir = "/var/lib/uniwatch"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let (config, warnings) = load_config(&config_path, &paths);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.source_url, "https://example.com/universe.pdf");
        assert_eq!(config.fetch_timeout_secs, 60);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/uniwatch"));
        assert_eq!(
            config.baseline_path,
            PathBuf::from("/var/lib/uniwatch/instruments.csv")
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_timeout_falls_back_with_warning() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[fetch]\ntimeout_secs = 99999\n").unwrap();

        let (config, warnings) = load_config(&config_path, &paths);
        assert_eq!(config.fetch_timeout_secs, constants::DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("timeout_secs"));
    }

    #[test]
    fn test_unparseable_config_yields_defaults_with_warning() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "this is [ not toml").unwrap();

        let (config, warnings) = load_config(&config_path, &paths);
        assert_eq!(config.source_url, constants::DEFAULT_SOURCE_URL);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_log_level_is_rejected_with_warning() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[logging]\nlevel = \"verbose\"\n").unwrap();

        let (config, warnings) = load_config(&config_path, &paths);
        assert!(config.log_level.is_none());
        assert_eq!(warnings.len(), 1);
    }
}
