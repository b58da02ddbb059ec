//! Scan policies: the knobs that distinguish the client pre-check from the
//! server authoritative check.
//!
//! Both call sites run the same scanner; they differ only in the policy they
//! pass in. [`ScanPolicy::client`] reproduces the simple browser check and
//! [`ScanPolicy::server`] the attendee-aware check with a 30-minute buffer.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::GuardError;
use crate::interval::DEFAULT_ADJACENCY_BUFFER_MS;

/// Parameters for [`crate::scanner::scan`] and [`crate::classifier::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanPolicy {
    /// Only flag meetings sharing at least one attendee with the proposal.
    /// Ignored when the proposal has no attendees.
    pub require_attendee_overlap: bool,
    /// Maximum gap between two meetings for them to count as adjacent.
    /// Zero disables adjacency detection.
    pub adjacency_buffer_ms: i64,
    /// Report adjacency as a plain string in `warnings` instead of a
    /// warning-severity entry in `conflicts`.
    pub classify_adjacent_as_warning: bool,
    /// Timezone used to render time ranges in diagnostic messages.
    pub display_timezone: Tz,
}

impl ScanPolicy {
    /// Simple variant: pure time overlap, no adjacency buffer, adjacency (if
    /// enabled later) kept in the conflicts list.
    pub fn client() -> Self {
        Self {
            require_attendee_overlap: false,
            adjacency_buffer_ms: 0,
            classify_adjacent_as_warning: false,
            display_timezone: Tz::UTC,
        }
    }

    /// Rich variant: attendee-aware, 30-minute buffer, adjacency as warnings.
    pub fn server() -> Self {
        Self {
            require_attendee_overlap: true,
            adjacency_buffer_ms: DEFAULT_ADJACENCY_BUFFER_MS,
            classify_adjacent_as_warning: true,
            display_timezone: Tz::UTC,
        }
    }

    /// Fails when `minutes` does not fit in a millisecond count.
    pub fn with_buffer_minutes(mut self, minutes: i64) -> crate::error::Result<Self> {
        let buffer = Duration::try_minutes(minutes).ok_or(GuardError::InvalidBuffer(minutes))?;
        self.adjacency_buffer_ms = buffer.num_milliseconds();
        Ok(self)
    }

    pub fn with_display_timezone(mut self, tz: Tz) -> Self {
        self.display_timezone = tz;
        self
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self::server()
    }
}

/// Named policy presets, as accepted by the CLI and the WASM bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyPreset {
    Client,
    #[default]
    Server,
}

impl PolicyPreset {
    pub fn policy(self) -> ScanPolicy {
        match self {
            PolicyPreset::Client => ScanPolicy::client(),
            PolicyPreset::Server => ScanPolicy::server(),
        }
    }
}

impl FromStr for PolicyPreset {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(PolicyPreset::Client),
            "server" => Ok(PolicyPreset::Server),
            _ => Err(GuardError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyPreset::Client => f.write_str("client"),
            PolicyPreset::Server => f.write_str("server"),
        }
    }
}

/// Parse an IANA timezone name (e.g. "Europe/Berlin").
pub fn parse_timezone(name: &str) -> crate::error::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| GuardError::InvalidTimezone(name.to_string()))
}
