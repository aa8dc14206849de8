// uniwatch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "uniwatch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "uniwatch";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Identifier format
// =============================================================================

/// Total length of a valid instrument identifier (ISIN).
pub const ISIN_LENGTH: usize = 12;

/// Number of leading characters that must be ASCII-alphabetic
/// (the ISO 3166 country prefix).
pub const ISIN_PREFIX_LENGTH: usize = 2;

// =============================================================================
// Catalog document layout
// =============================================================================

/// Column header token: a page line starting with this is a table header,
/// not an instrument row.
pub const ISIN_COLUMN_HEADER: &str = "ISIN";

/// Section title marker: a page line containing this is a heading,
/// not an instrument row.
pub const SECTION_TITLE_MARKER: &str = "TRADING UNIVERSE";

// =============================================================================
// Fetch limits
// =============================================================================

/// Default URL of the published instrument catalog.
pub const DEFAULT_SOURCE_URL: &str =
    "https://assets.traderepublic.com/assets/files/DE/Instrument_Universe_DE_en.pdf";

/// Default HTTP timeout for the catalog download, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Minimum user-configurable fetch timeout (seconds).
pub const MIN_FETCH_TIMEOUT_SECS: u64 = 1;

/// Maximum user-configurable fetch timeout (seconds).
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 600;

/// Maximum size of the fetched catalog document in bytes. Downloads larger
/// than this abort the run rather than growing memory without bound.
pub const MAX_DOCUMENT_BYTES: u64 = 256 * 1024 * 1024; // 256 MB

// =============================================================================
// Persisted state
// =============================================================================

/// Baseline table file name (CSV, columns `ISIN,Name`).
pub const BASELINE_FILE_NAME: &str = "instruments.csv";

/// Additions change-log file name (JSON array, newest first).
pub const ADDED_LOG_FILE_NAME: &str = "added.json";

/// Removals change-log file name (JSON array, newest first).
pub const REMOVED_LOG_FILE_NAME: &str = "removed.json";

/// File name under which the fetched raw catalog document is cached.
pub const DOCUMENT_FILE_NAME: &str = "instrument_universe.pdf";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
