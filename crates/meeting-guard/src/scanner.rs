//! Scan a proposed meeting against every candidate meeting.
//!
//! The scan only relates the single proposal to each candidate; candidates are
//! never compared with each other. Results keep the relative order of their
//! source candidates and are not deduplicated.

use crate::classifier::{classify, Conflict, ConflictType, Severity};
use crate::meeting::{Meeting, ProposedMeeting};
use crate::policy::ScanPolicy;

/// Aggregated scan output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanReport {
    /// Duplicates and overlaps, plus adjacency when the policy keeps it here.
    pub conflicts: Vec<Conflict>,
    /// Adjacency messages when the policy reports adjacency as plain warnings.
    pub warnings: Vec<String>,
}

impl ScanReport {
    /// True iff at least one conflict blocks submission.
    pub fn has_conflicts(&self) -> bool {
        self.conflicts
            .iter()
            .any(|c| c.severity.blocks_submission())
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty() && self.warnings.is_empty()
    }

    /// Conflicts at or above the given severity, in scan order.
    pub fn conflicts_at_least(&self, severity: Severity) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(move |c| c.severity >= severity)
    }
}

/// Scan `candidates` for conflicts with `proposed` under `policy`.
///
/// Returns an empty report straight away if the proposal has no computable
/// interval (missing bounds or `start >= end`).
pub fn scan(proposed: &ProposedMeeting, candidates: &[Meeting], policy: &ScanPolicy) -> ScanReport {
    let mut report = ScanReport::default();

    if proposed.computable_interval().is_none() {
        tracing::debug!("scan_skipped_incomputable_interval");
        return report;
    }

    for candidate in candidates {
        let Some(conflict) = classify(proposed, candidate, policy) else {
            continue;
        };
        if conflict.conflict_type == ConflictType::Adjacent && policy.classify_adjacent_as_warning {
            report.warnings.push(conflict.message);
        } else {
            report.conflicts.push(conflict);
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        conflicts = report.conflicts.len(),
        warnings = report.warnings.len(),
        "scan_completed"
    );

    report
}
