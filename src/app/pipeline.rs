// uniwatch - app/pipeline.rs
//
// Orchestration of one run, as a strictly sequential state machine:
//
//   START -> FETCHED -> EXTRACTED -> NORMALISED ->
//     no baseline:  SEED_AND_EXIT
//     has baseline: DIFFED -> no change: DONE
//                            changed:   LOGGED -> BASELINE_UPDATED
//
// Single-threaded and synchronous throughout; the store and logs are
// exclusively owned by this process for the duration of a run. Nothing
// is persisted unless fetch, extraction, normalisation, and (when a
// baseline exists) diffing all completed.

use crate::core::diff::diff;
use crate::core::extract::extract_records;
use crate::core::model::{ChangeLogEntry, InstrumentSnapshot, RunOutcome, SnapshotDiff};
use crate::platform::config::WatchConfig;
use crate::platform::document::extract_page_texts;
use crate::platform::fetch::fetch_document;
use crate::platform::store::{ChangeDirection, Store};
use crate::util::error::{Result, UniwatchError};
use chrono::{Local, NaiveDate};

/// Summary of one completed run, for the operator report.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Terminal state the run reached.
    pub outcome: RunOutcome,

    /// Raw records emitted by the extractor (duplicates included).
    pub extracted: usize,

    /// Unique instruments after normalisation and dedupe.
    pub unique: usize,
}

/// Execute one full run: fetch the catalog, cache the raw document,
/// decode it into page text, and hand off to [`run_on_pages`].
pub fn run(config: &WatchConfig) -> Result<RunReport> {
    let bytes = fetch_document(&config.source_url, config.fetch_timeout_secs)?;

    // Cache the raw document next to the persisted state. Not pipeline
    // state proper: a failure past this point leaves the cached PDF
    // behind, which is fine.
    if let Some(parent) = config.document_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| UniwatchError::Io {
            path: parent.to_path_buf(),
            operation: "create data directory",
            source: e,
        })?;
    }
    std::fs::write(&config.document_path, &bytes).map_err(|e| UniwatchError::Io {
        path: config.document_path.clone(),
        operation: "cache catalog document",
        source: e,
    })?;
    tracing::debug!(path = %config.document_path.display(), "Catalog document cached");

    let pages = extract_page_texts(&bytes)?;

    let store = Store::new(
        config.baseline_path.clone(),
        config.added_log_path.clone(),
        config.removed_log_path.clone(),
    );
    let today = Local::now().date_naive();

    run_on_pages(&pages, today, &store)
}

/// The network-free tail of the pipeline: extraction through persistence.
///
/// Split out from [`run`] so tests can drive the whole state machine from
/// page text without a live document source.
pub fn run_on_pages(pages: &[String], today: NaiveDate, store: &Store) -> Result<RunReport> {
    let raw = extract_records(pages);
    let extracted = raw.len();

    let snapshot = InstrumentSnapshot::from_records(raw);
    let unique = snapshot.len();
    tracing::info!(extracted, unique, "Snapshot built");

    // Bootstrap: nothing to diff against. Seed and exit successfully.
    if !store.baseline_exists() {
        store.seed(&snapshot)?;
        tracing::info!(count = unique, "No baseline existed; seeded from this run");
        return Ok(RunReport {
            outcome: RunOutcome::Seeded { count: unique },
            extracted,
            unique,
        });
    }

    let baseline = store.read_baseline()?;
    let changes = diff(&snapshot, &baseline);

    // No membership change: confirm and stop. No file is rewritten --
    // a no-op run must not mutate persisted state.
    if changes.is_empty() {
        tracing::info!("No changes detected");
        return Ok(RunReport {
            outcome: RunOutcome::NoChange,
            extracted,
            unique,
        });
    }

    log_changes(&changes, today, store)?;
    store.write_baseline(&snapshot)?;

    tracing::info!(
        added = changes.added.len(),
        removed = changes.removed.len(),
        "Run complete; baseline updated"
    );

    Ok(RunReport {
        outcome: RunOutcome::Changed {
            added: changes.added.len(),
            removed: changes.removed.len(),
        },
        extracted,
        unique,
    })
}

/// Stamp each diffed record with the detection date and prepend the
/// batches to their logs. The two logs are independent: an empty added
/// set leaves the added log untouched, and symmetrically for removed.
fn log_changes(changes: &SnapshotDiff, today: NaiveDate, store: &Store) -> Result<()> {
    if !changes.added.is_empty() {
        let batch: Vec<ChangeLogEntry> = changes
            .added
            .iter()
            .map(|r| ChangeLogEntry::from_record(r, today))
            .collect();
        store.prepend_change_log(ChangeDirection::Added, &batch)?;
    }

    if !changes.removed.is_empty() {
        let batch: Vec<ChangeLogEntry> = changes
            .removed
            .iter()
            .map(|r| ChangeLogEntry::from_record(r, today))
            .collect();
        store.prepend_change_log(ChangeDirection::Removed, &batch)?;
    }

    Ok(())
}
