//! JSON shapes exchanged with the client form and the API resolver.
//!
//! Input coercion is forgiving: a proposal with missing or unreadable times
//! becomes a proposal without an interval (and therefore without conflicts),
//! and a stored meeting with unreadable times is skipped. Only documents that
//! are not JSON, or not the expected overall shape, are rejected.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::{Conflict, ConflictType, Severity};
use crate::error::{GuardError, Result};
use crate::interval::TimeInterval;
use crate::meeting::{Meeting, ProposedMeeting};
use crate::scanner::ScanReport;
use crate::validator::MeetingDraft;

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 timestamp into UTC.
///
/// RFC 3339 strings keep their offset; naive local strings such as
/// `2026-03-02T10:00:00` are read as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| ndt.and_utc())
        .ok_or_else(|| GuardError::InvalidTimestamp(s.to_string()))
}

/// Render a timestamp the way JavaScript's `Date.toISOString` does.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A timestamp as it arrives over the wire: an ISO string or epoch milliseconds
/// (a serialized `Date`). Anything else is kept so it can be ignored later.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Millis(i64),
    Text(String),
    Other(serde_json::Value),
}

impl WireTimestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            WireTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            WireTimestamp::Text(s) => parse_timestamp(s).ok(),
            WireTimestamp::Other(_) => None,
        }
    }
}

fn coerce(ts: Option<&WireTimestamp>) -> Option<DateTime<Utc>> {
    ts.and_then(WireTimestamp::to_utc)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// An attendee entry: either `{ id, name }` or a bare id string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireAttendee {
    Ref {
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
    Id(String),
}

impl WireAttendee {
    pub fn id(&self) -> &str {
        match self {
            WireAttendee::Ref { id, .. } => id,
            WireAttendee::Id(id) => id,
        }
    }
}

fn attendee_ids<'a>(
    attendees: &'a [WireAttendee],
    ids: &'a [String],
) -> impl Iterator<Item = String> + 'a {
    attendees
        .iter()
        .map(|a| a.id().to_string())
        .chain(ids.iter().cloned())
}

/// A stored meeting as cached by the client or fetched by the resolver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMeeting {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_time: Option<WireTimestamp>,
    #[serde(default)]
    pub end_time: Option<WireTimestamp>,
    #[serde(default)]
    pub attendees: Vec<WireAttendee>,
    #[serde(default)]
    pub attendee_ids: Vec<String>,
}

impl WireMeeting {
    /// `None` when either bound is missing or unreadable.
    pub fn to_meeting(&self) -> Option<Meeting> {
        let start = coerce(self.start_time.as_ref())?;
        let end = coerce(self.end_time.as_ref())?;
        Some(Meeting::new(
            self.id.clone(),
            self.title.clone().unwrap_or_default(),
            TimeInterval::new(start, end),
            attendee_ids(&self.attendees, &self.attendee_ids),
        ))
    }
}

/// The meeting being created or edited.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireProposal {
    pub title: Option<String>,
    pub start_time: Option<WireTimestamp>,
    pub end_time: Option<WireTimestamp>,
    pub attendees: Vec<WireAttendee>,
    pub attendee_ids: Vec<String>,
    pub exclude_meeting_id: Option<String>,
}

impl WireProposal {
    pub fn to_proposed(&self) -> ProposedMeeting {
        let interval = match (
            coerce(self.start_time.as_ref()),
            coerce(self.end_time.as_ref()),
        ) {
            (Some(start), Some(end)) => Some(TimeInterval::new(start, end)),
            _ => None,
        };
        ProposedMeeting {
            title: self.title.clone().unwrap_or_default(),
            interval,
            attendee_ids: attendee_ids(&self.attendees, &self.attendee_ids).collect(),
            exclude_meeting_id: self.exclude_meeting_id.clone(),
        }
    }
}

/// Form fields for validation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<WireTimestamp>,
    pub end_time: Option<WireTimestamp>,
    pub attendees: Vec<WireAttendee>,
    pub attendee_ids: Vec<String>,
}

impl WireDraft {
    pub fn to_draft(&self) -> MeetingDraft {
        MeetingDraft {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone(),
            start: coerce(self.start_time.as_ref()),
            end: coerce(self.end_time.as_ref()),
            attendee_ids: attendee_ids(&self.attendees, &self.attendee_ids).collect(),
        }
    }
}

/// A complete conflict-check request: the proposal plus its candidates.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckRequest {
    pub proposed: WireProposal,
    pub candidates: Vec<WireMeeting>,
}

/// Convert stored meetings, skipping any whose times cannot be read.
pub fn coerce_candidates(candidates: &[WireMeeting]) -> Vec<Meeting> {
    candidates
        .iter()
        .filter_map(|wire| {
            let meeting = wire.to_meeting();
            if meeting.is_none() {
                tracing::warn!(meeting_id = %wire.id, "candidate_skipped_unreadable_times");
            }
            meeting
        })
        .collect()
}

pub fn parse_proposal(json: &str) -> Result<ProposedMeeting> {
    let wire: WireProposal = serde_json::from_str(json)?;
    Ok(wire.to_proposed())
}

pub fn parse_candidates(json: &str) -> Result<Vec<Meeting>> {
    let wire: Vec<WireMeeting> = serde_json::from_str(json)?;
    Ok(coerce_candidates(&wire))
}

pub fn parse_check_request(json: &str) -> Result<(ProposedMeeting, Vec<Meeting>)> {
    let request: CheckRequest = serde_json::from_str(json)?;
    Ok((
        request.proposed.to_proposed(),
        coerce_candidates(&request.candidates),
    ))
}

pub fn parse_draft(json: &str) -> Result<MeetingDraft> {
    let wire: WireDraft = serde_json::from_str(json)?;
    Ok(wire.to_draft())
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDto {
    pub id: String,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub attendee_ids: Vec<String>,
}

impl From<&Meeting> for MeetingDto {
    fn from(m: &Meeting) -> Self {
        Self {
            id: m.id.clone(),
            title: m.title.clone(),
            start_time: format_timestamp(&m.interval.start),
            end_time: format_timestamp(&m.interval.end),
            attendee_ids: m.attendee_ids.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDto {
    pub meeting: MeetingDto,
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub message: String,
}

impl From<&Conflict> for ConflictDto {
    fn from(c: &Conflict) -> Self {
        Self {
            meeting: MeetingDto::from(&c.meeting),
            conflict_type: c.conflict_type,
            severity: c.severity,
            message: c.message.clone(),
        }
    }
}

/// The conflict-check response returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResponse {
    pub has_conflicts: bool,
    pub conflicts: Vec<ConflictDto>,
    pub warnings: Vec<String>,
}

impl From<&ScanReport> for ConflictResponse {
    fn from(report: &ScanReport) -> Self {
        Self {
            has_conflicts: report.has_conflicts(),
            conflicts: report.conflicts.iter().map(ConflictDto::from).collect(),
            warnings: report.warnings.clone(),
        }
    }
}
