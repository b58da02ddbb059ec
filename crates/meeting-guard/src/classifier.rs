//! Classify the relationship between a proposed meeting and one existing meeting.
//!
//! The checks form an ordered decision list and the first match wins, so a pair
//! of meetings receives at most one classification. Exact duplicates are checked
//! before general overlap because every duplicate also overlaps.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::interval::{format_range, is_adjacent, is_duplicate, overlaps};
use crate::meeting::{AttendeeId, Meeting, ProposedMeeting};
use crate::policy::ScanPolicy;

/// How the proposed slot relates to an existing meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    Duplicate,
    Overlap,
    Adjacent,
}

/// Ordered `Info < Warning < Error`. Only `Error` blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn blocks_submission(self) -> bool {
        self == Severity::Error
    }
}

/// A detected conflict between the proposal and an existing meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub meeting: Meeting,
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub message: String,
}

/// True iff the two attendee sets share at least one id.
pub fn attendees_intersect(a: &BTreeSet<AttendeeId>, b: &BTreeSet<AttendeeId>) -> bool {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().any(|id| large.contains(id))
}

/// Classify `existing` against `proposed`.
///
/// Returns `None` when the existing meeting is the one being edited, when the
/// proposal has no computable interval, when the policy requires a shared
/// attendee and there is none, or when the two meetings are unrelated.
pub fn classify(
    proposed: &ProposedMeeting,
    existing: &Meeting,
    policy: &ScanPolicy,
) -> Option<Conflict> {
    if proposed.exclude_meeting_id.as_deref() == Some(existing.id.as_str()) {
        return None;
    }

    let interval = proposed.computable_interval()?;

    // An attendee-less proposal is always checked on time alone.
    if policy.require_attendee_overlap
        && !proposed.attendee_ids.is_empty()
        && !attendees_intersect(&proposed.attendee_ids, &existing.attendee_ids)
    {
        return None;
    }

    let range = || format_range(&existing.interval, &policy.display_timezone);

    let (conflict_type, severity, message) = if is_duplicate(interval, &existing.interval) {
        (
            ConflictType::Duplicate,
            Severity::Error,
            format!("Duplicate meeting time: {}", range()),
        )
    } else if overlaps(interval, &existing.interval) {
        (
            ConflictType::Overlap,
            Severity::Error,
            format!("Meeting overlaps with \"{}\" ({})", existing.title, range()),
        )
    } else if is_adjacent(interval, &existing.interval, policy.adjacency_buffer_ms) {
        let message = if policy.classify_adjacent_as_warning {
            format!(
                "Meeting is very close to \"{}\" - consider adding buffer time",
                existing.title
            )
        } else {
            format!(
                "Meeting is adjacent to \"{}\" - consider adding buffer time",
                existing.title
            )
        };
        (ConflictType::Adjacent, Severity::Warning, message)
    } else {
        return None;
    };

    tracing::debug!(
        meeting_id = %existing.id,
        conflict_type = ?conflict_type,
        severity = ?severity,
        "meeting_classified"
    );

    Some(Conflict {
        meeting: existing.clone(),
        conflict_type,
        severity,
        message,
    })
}
