// uniwatch - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal
// chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all uniwatch operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum UniwatchError {
    /// Catalog document download failed.
    Fetch(FetchError),

    /// Catalog document could not be decoded into page text.
    Document(DocumentError),

    /// Baseline or change-log persistence failed.
    Store(StoreError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for UniwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Fetch error: {e}"),
            Self::Document(e) => write!(f, "Document error: {e}"),
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for UniwatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Document(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Errors related to downloading the catalog document.
///
/// Any fetch failure is fatal to the run: no persisted state is touched
/// and no retry is attempted (re-invoke the whole process to retry).
#[derive(Debug)]
pub enum FetchError {
    /// The source returned a non-success HTTP status.
    Status { url: String, status: u16 },

    /// Transport-level failure (DNS, TLS, connect, timeout).
    Transport {
        url: String,
        source: reqwest::Error,
    },

    /// The document exceeds the maximum allowed download size.
    TooLarge {
        url: String,
        size: u64,
        max_size: u64,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { url, status } => {
                write!(f, "'{url}' returned HTTP status {status}")
            }
            Self::Transport { url, source } => {
                write!(f, "request to '{url}' failed: {source}")
            }
            Self::TooLarge {
                url,
                size,
                max_size,
            } => write!(
                f,
                "document at '{url}' is {size} bytes, exceeds maximum of {max_size} bytes"
            ),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FetchError> for UniwatchError {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

// ---------------------------------------------------------------------------
// Document errors
// ---------------------------------------------------------------------------

/// Errors related to decoding the fetched document into page text.
///
/// Note: a single page with no extractable text is NOT an error -- it
/// contributes an empty page block and the run continues. Only a document
/// that cannot be opened at all aborts the run.
#[derive(Debug)]
pub enum DocumentError {
    /// The document bytes could not be decoded as a PDF.
    Decode { reason: String },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { reason } => write!(f, "cannot decode catalog document: {reason}"),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<DocumentError> for UniwatchError {
    fn from(e: DocumentError) -> Self {
        Self::Document(e)
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors related to reading or writing the baseline table and change logs.
#[derive(Debug)]
pub enum StoreError {
    /// CSV read or write failed on the baseline table.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON read or write failed on a change log.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error on a persisted file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "CSV error on '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON error on '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error on '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for UniwatchError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for UniwatchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for uniwatch results.
pub type Result<T> = std::result::Result<T, UniwatchError>;
