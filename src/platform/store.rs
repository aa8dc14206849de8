// uniwatch - platform/store.rs
//
// Persistent state: the baseline table (CSV, columns `ISIN,Name`) and the
// two change logs (JSON arrays, newest first). These three files are the
// only state that survives between runs.
//
// Design principles:
// - Every write is atomic (write -> sibling temp file, rename -> final)
//   so a crash mid-write never corrupts the previous good state.
// - A missing change log reads as an empty sequence. Seeding initialises
//   both logs, but a hand-deleted log file must not brick later runs.
// - Baseline ISINs are re-normalised on read so a hand-edited baseline
//   cannot produce phantom diffs.

use crate::core::model::{ChangeLogEntry, InstrumentRecord, InstrumentSnapshot};
use crate::util::error::StoreError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Which of the two change logs an operation targets. The added and
/// removed logs are fully independent: touching one never rewrites the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Added,
    Removed,
}

impl ChangeDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// Handle to the on-disk state files.
#[derive(Debug, Clone)]
pub struct Store {
    baseline_path: PathBuf,
    added_log_path: PathBuf,
    removed_log_path: PathBuf,
}

impl Store {
    pub fn new(baseline_path: PathBuf, added_log_path: PathBuf, removed_log_path: PathBuf) -> Self {
        Self {
            baseline_path,
            added_log_path,
            removed_log_path,
        }
    }

    pub fn baseline_path(&self) -> &Path {
        &self.baseline_path
    }

    fn log_path(&self, direction: ChangeDirection) -> &Path {
        match direction {
            ChangeDirection::Added => &self.added_log_path,
            ChangeDirection::Removed => &self.removed_log_path,
        }
    }

    // -------------------------------------------------------------------------
    // Baseline table
    // -------------------------------------------------------------------------

    /// True when a baseline has been persisted by a previous run.
    /// False triggers the bootstrap path (seed and exit).
    pub fn baseline_exists(&self) -> bool {
        self.baseline_path.exists()
    }

    /// Read the baseline table into a snapshot.
    ///
    /// Rows are re-normalised (trim + uppercase) through the snapshot
    /// constructor, matching how freshly extracted records are treated.
    pub fn read_baseline(&self) -> Result<InstrumentSnapshot, StoreError> {
        let mut reader =
            csv::Reader::from_path(&self.baseline_path).map_err(|e| StoreError::Csv {
                path: self.baseline_path.clone(),
                source: e,
            })?;

        let mut records = Vec::new();
        for row in reader.deserialize::<InstrumentRecord>() {
            records.push(row.map_err(|e| StoreError::Csv {
                path: self.baseline_path.clone(),
                source: e,
            })?);
        }

        tracing::debug!(
            path = %self.baseline_path.display(),
            rows = records.len(),
            "Baseline loaded"
        );
        Ok(InstrumentSnapshot::from_records(records))
    }

    /// Overwrite the baseline table with `snapshot`, atomically.
    pub fn write_baseline(&self, snapshot: &InstrumentSnapshot) -> Result<(), StoreError> {
        let mut bytes = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut bytes);
            for record in snapshot.iter() {
                writer.serialize(record).map_err(|e| StoreError::Csv {
                    path: self.baseline_path.clone(),
                    source: e,
                })?;
            }
            writer.flush().map_err(|e| StoreError::Io {
                path: self.baseline_path.clone(),
                source: e,
            })?;
        }

        atomic_write(&self.baseline_path, &bytes)?;
        tracing::info!(
            path = %self.baseline_path.display(),
            rows = snapshot.len(),
            "Baseline written"
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Change logs
    // -------------------------------------------------------------------------

    /// Read one change log, newest entry first.
    ///
    /// A missing file reads as an empty sequence; any other failure
    /// (unreadable file, malformed JSON) is an error -- silently dropping
    /// history would defeat the append-only audit log.
    pub fn read_change_log(
        &self,
        direction: ChangeDirection,
    ) -> Result<Vec<ChangeLogEntry>, StoreError> {
        let path = self.log_path(direction);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Prepend a batch of entries to one change log, atomically.
    ///
    /// The batch goes in front of all prior entries, in the order given
    /// (the differ's output order), preserving the newest-first invariant.
    /// Callers must not invoke this with an empty batch: an empty added
    /// set must not touch the added log, and symmetrically for removed.
    pub fn prepend_change_log(
        &self,
        direction: ChangeDirection,
        batch: &[ChangeLogEntry],
    ) -> Result<(), StoreError> {
        debug_assert!(!batch.is_empty(), "empty batch must not touch the log");

        let existing = self.read_change_log(direction)?;
        let mut updated = Vec::with_capacity(batch.len() + existing.len());
        updated.extend_from_slice(batch);
        updated.extend(existing);

        self.write_change_log(direction, &updated)?;
        tracing::info!(
            log = direction.label(),
            batch = batch.len(),
            total = updated.len(),
            "Change log updated"
        );
        Ok(())
    }

    /// Overwrite one change log with the full entry sequence, atomically.
    pub fn write_change_log(
        &self,
        direction: ChangeDirection,
        entries: &[ChangeLogEntry],
    ) -> Result<(), StoreError> {
        let path = self.log_path(direction);
        let json = serde_json::to_vec_pretty(entries).map_err(|e| StoreError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        atomic_write(path, &json)
    }

    // -------------------------------------------------------------------------
    // Bootstrap
    // -------------------------------------------------------------------------

    /// First-run seeding: persist `snapshot` as the baseline and initialise
    /// both change logs to empty sequences.
    pub fn seed(&self, snapshot: &InstrumentSnapshot) -> Result<(), StoreError> {
        self.write_baseline(snapshot)?;
        self.write_change_log(ChangeDirection::Added, &[])?;
        self.write_change_log(ChangeDirection::Removed, &[])?;
        Ok(())
    }
}

/// Atomic file write: bytes -> sibling temp file -> rename.
///
/// Creates parent directories as needed. A crash between write and rename
/// loses the new content but never corrupts the previous file (rename is
/// atomic on all supported platforms).
fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, bytes).map_err(|e| StoreError::Io {
        path: tmp.clone(),
        source: e,
    })?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
