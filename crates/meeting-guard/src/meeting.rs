//! Meeting snapshots handed to the conflict engine.

use std::collections::BTreeSet;

use crate::interval::TimeInterval;

/// Opaque identifier of a user attending a meeting.
pub type AttendeeId = String;

/// An existing, already persisted meeting. Read-only input to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub interval: TimeInterval,
    pub attendee_ids: BTreeSet<AttendeeId>,
}

impl Meeting {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        interval: TimeInterval,
        attendee_ids: impl IntoIterator<Item = impl Into<AttendeeId>>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            interval,
            attendee_ids: attendee_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// A meeting that has not been persisted yet.
///
/// `interval` is `None` when the caller could not supply both bounds (e.g. a
/// half-filled form); such a proposal never produces conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProposedMeeting {
    pub title: String,
    pub interval: Option<TimeInterval>,
    pub attendee_ids: BTreeSet<AttendeeId>,
    /// Id of the meeting being edited, so it does not conflict with itself.
    pub exclude_meeting_id: Option<String>,
}

impl ProposedMeeting {
    pub fn new(interval: TimeInterval) -> Self {
        Self {
            interval: Some(interval),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_attendees(
        mut self,
        attendee_ids: impl IntoIterator<Item = impl Into<AttendeeId>>,
    ) -> Self {
        self.attendee_ids = attendee_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn excluding(mut self, meeting_id: impl Into<String>) -> Self {
        self.exclude_meeting_id = Some(meeting_id.into());
        self
    }

    /// The interval, if present and computable.
    pub fn computable_interval(&self) -> Option<&TimeInterval> {
        self.interval.as_ref().filter(|iv| iv.is_computable())
    }
}
