// uniwatch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies. These types are the shared vocabulary across
// all layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Instrument record
// =============================================================================

/// A single tradable instrument: a 12-character ISIN plus its free-text name.
///
/// Field names serialise as `ISIN` / `Name` -- the column header of the
/// baseline CSV and the key names in the change-log JSON, both of which are
/// long-lived on-disk artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentRecord {
    /// Instrument identifier. Uppercase and trimmed once it has passed
    /// through [`InstrumentSnapshot::from_records`].
    #[serde(rename = "ISIN")]
    pub isin: String,

    /// Free-text instrument name, tokens rejoined with single spaces.
    #[serde(rename = "Name")]
    pub name: String,
}

impl InstrumentRecord {
    pub fn new(isin: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            isin: isin.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Instrument snapshot
// =============================================================================

/// The normalised, deduplicated set of instruments extracted in one run,
/// or loaded from the baseline store.
///
/// Unique by ISIN; preserves first-seen order. Order is not semantically
/// significant to the differ (which is set-based) but keeps the persisted
/// baseline stable and diffable by eye.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentSnapshot {
    records: Vec<InstrumentRecord>,
}

impl InstrumentSnapshot {
    /// Build a snapshot from raw extractor output: uppercase and trim every
    /// ISIN, then drop later records whose ISIN was already seen (first
    /// occurrence wins).
    pub fn from_records(raw: Vec<InstrumentRecord>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
        let mut records = Vec::with_capacity(raw.len());

        for mut record in raw {
            record.isin = record.isin.trim().to_ascii_uppercase();
            if seen.insert(record.isin.clone()) {
                records.push(record);
            }
        }

        Self { records }
    }

    /// Number of unique instruments in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &InstrumentRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[InstrumentRecord] {
        &self.records
    }
}

// =============================================================================
// Snapshot diff
// =============================================================================

/// Result of diffing a freshly extracted snapshot against the stored
/// baseline. Both vectors are in the source snapshot's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Records present in the current snapshot but absent from the baseline.
    pub added: Vec<InstrumentRecord>,

    /// Records present in the baseline but absent from the current snapshot.
    pub removed: Vec<InstrumentRecord>,
}

impl SnapshotDiff {
    /// True when the run detected no membership changes. An empty diff
    /// must not cause any persisted state to be rewritten.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

// =============================================================================
// Change log entry
// =============================================================================

/// One historical addition or removal. Immutable once written: change logs
/// only ever grow by prepending new batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    #[serde(rename = "ISIN")]
    pub isin: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// Calendar date the change was detected (serialises as `YYYY-MM-DD`).
    pub date: NaiveDate,
}

impl ChangeLogEntry {
    /// Stamp a diffed record with its detection date.
    pub fn from_record(record: &InstrumentRecord, date: NaiveDate) -> Self {
        Self {
            isin: record.isin.clone(),
            name: record.name.clone(),
            date,
        }
    }
}

// =============================================================================
// Run outcome
// =============================================================================

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No baseline existed; the extracted snapshot was persisted as the new
    /// baseline and both change logs were initialised empty. No diff was
    /// computed -- there was nothing to diff against.
    Seeded { count: usize },

    /// The current snapshot matches the baseline. No state was written.
    NoChange,

    /// Additions and/or removals were detected, logged, and the baseline
    /// was overwritten with the current snapshot.
    Changed { added: usize, removed: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_normalises_case_and_whitespace() {
        let snapshot = InstrumentSnapshot::from_records(vec![InstrumentRecord::new(
            " de000basf111 ",
            "BASF SE",
        )]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].isin, "DE000BASF111");
    }

    #[test]
    fn test_snapshot_dedupe_first_occurrence_wins() {
        let snapshot = InstrumentSnapshot::from_records(vec![
            InstrumentRecord::new("de000basf111", "A"),
            InstrumentRecord::new("DE000BASF111", "B"),
        ]);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].name, "A");
        assert_eq!(snapshot.records()[0].isin, "DE000BASF111");
    }

    #[test]
    fn test_snapshot_preserves_first_seen_order() {
        let snapshot = InstrumentSnapshot::from_records(vec![
            InstrumentRecord::new("US0378331005", "Apple"),
            InstrumentRecord::new("DE000BASF111", "BASF"),
            InstrumentRecord::new("us0378331005", "Apple dup"),
            InstrumentRecord::new("NL0000235190", "Airbus"),
        ]);
        let isins: Vec<_> = snapshot.iter().map(|r| r.isin.as_str()).collect();
        assert_eq!(isins, ["US0378331005", "DE000BASF111", "NL0000235190"]);
    }

    #[test]
    fn test_change_log_entry_date_serialises_iso() {
        let entry = ChangeLogEntry {
            isin: "DE000BASF111".to_string(),
            name: "BASF SE".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""date":"2026-08-30""#), "got: {json}");
        assert!(json.contains(r#""ISIN":"DE000BASF111""#), "got: {json}");
        assert!(json.contains(r#""Name":"BASF SE""#), "got: {json}");
    }
}
