// uniwatch - core/diff.rs
//
// Snapshot differ: symmetric set-difference between the current snapshot
// and the stored baseline, keyed by ISIN.
//
// Known limitation, preserved deliberately: records present in both
// snapshots are ignored regardless of name differences. A renamed
// instrument with a stable ISIN produces no change-log entries. Whether
// name-change detection is wanted is a product decision, not something
// to add silently here.

use crate::core::model::{InstrumentSnapshot, SnapshotDiff};
use std::collections::HashSet;

/// Compute which instruments entered or left the universe.
///
/// `added` is every current record whose ISIN is absent from the baseline;
/// `removed` is every baseline record whose ISIN is absent from the current
/// snapshot. Membership is resolved via hash sets in two linear passes.
/// Output order follows the respective source snapshot.
pub fn diff(current: &InstrumentSnapshot, baseline: &InstrumentSnapshot) -> SnapshotDiff {
    let current_isins: HashSet<&str> = current.iter().map(|r| r.isin.as_str()).collect();
    let baseline_isins: HashSet<&str> = baseline.iter().map(|r| r.isin.as_str()).collect();

    let added = current
        .iter()
        .filter(|r| !baseline_isins.contains(r.isin.as_str()))
        .cloned()
        .collect();

    let removed = baseline
        .iter()
        .filter(|r| !current_isins.contains(r.isin.as_str()))
        .cloned()
        .collect();

    SnapshotDiff { added, removed }
}
