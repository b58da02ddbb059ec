//! Field-level business rules for a single meeting, independent of any other
//! meeting.
//!
//! Errors block submission; warnings are advisory. Every rule is evaluated, so
//! one broken field never hides another. The current time is passed in rather
//! than read from a clock, keeping validation deterministic.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::interval::{duration_minutes, TimeInterval};
use crate::meeting::AttendeeId;

pub const TITLE_REQUIRED: &str = "Meeting title is required";
pub const START_REQUIRED: &str = "Start time is required";
pub const END_REQUIRED: &str = "End time is required";
pub const END_BEFORE_START: &str = "End time must be after start time";
pub const PAST_MEETING: &str = "Meeting is scheduled in the past";
pub const WEEKEND_MEETING: &str = "Meeting is scheduled on a weekend";

/// Meeting fields as entered, before anything is known to be valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeetingDraft {
    pub title: String,
    pub description: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub attendee_ids: BTreeSet<AttendeeId>,
}

impl MeetingDraft {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Thresholds for the advisory rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    pub min_duration_minutes: i64,
    pub max_duration_minutes: i64,
    /// First hour of the business day; starts before it are off-hours.
    pub business_start_hour: u32,
    /// Last hour of the business day; starts after it are off-hours.
    pub business_end_hour: u32,
    pub max_title_chars: usize,
    pub max_description_chars: usize,
    /// Calendar used to decide weekday and hour of day.
    pub reference_timezone: Tz,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_duration_minutes: 5,
            max_duration_minutes: 480,
            business_start_hour: 8,
            business_end_hour: 18,
            max_title_chars: 100,
            max_description_chars: 1000,
            reference_timezone: Tz::UTC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate with the default thresholds.
pub fn validate(draft: &MeetingDraft, now: DateTime<Utc>) -> ValidationResult {
    validate_with(draft, now, &ValidatorConfig::default())
}

pub fn validate_with(
    draft: &MeetingDraft,
    now: DateTime<Utc>,
    config: &ValidatorConfig,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push(TITLE_REQUIRED.to_string());
    }
    if draft.start.is_none() {
        errors.push(START_REQUIRED.to_string());
    }
    if draft.end.is_none() {
        errors.push(END_REQUIRED.to_string());
    }

    if let (Some(start), Some(end)) = (draft.start, draft.end) {
        if start >= end {
            errors.push(END_BEFORE_START.to_string());
        } else {
            time_warnings(&TimeInterval::new(start, end), now, config, &mut warnings);
        }
    }

    if draft.title.chars().count() > config.max_title_chars {
        warnings.push(format!(
            "Meeting title is longer than {} characters",
            config.max_title_chars
        ));
    }
    if let Some(description) = &draft.description {
        if description.chars().count() > config.max_description_chars {
            warnings.push(format!(
                "Meeting description is longer than {} characters",
                config.max_description_chars
            ));
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn time_warnings(
    interval: &TimeInterval,
    now: DateTime<Utc>,
    config: &ValidatorConfig,
    warnings: &mut Vec<String>,
) {
    let minutes = duration_minutes(interval);
    if minutes < config.min_duration_minutes {
        warnings.push(format!(
            "Meeting is shorter than {}",
            describe_minutes(config.min_duration_minutes)
        ));
    }
    if minutes > config.max_duration_minutes {
        warnings.push(format!(
            "Meeting is longer than {}",
            describe_minutes(config.max_duration_minutes)
        ));
    }

    if interval.start < now {
        warnings.push(PAST_MEETING.to_string());
    }

    let local_start = interval.start.with_timezone(&config.reference_timezone);
    if matches!(local_start.weekday(), Weekday::Sat | Weekday::Sun) {
        warnings.push(WEEKEND_MEETING.to_string());
    }
    let hour = local_start.hour();
    if hour < config.business_start_hour || hour > config.business_end_hour {
        warnings.push(format!(
            "Meeting is scheduled outside business hours ({:02}:00-{:02}:00)",
            config.business_start_hour, config.business_end_hour
        ));
    }
}

/// "5 minutes", "1 minute", "8 hours", "90 minutes".
fn describe_minutes(minutes: i64) -> String {
    match minutes {
        60 => "1 hour".to_string(),
        m if m > 0 && m % 60 == 0 => format!("{} hours", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{} minutes", m),
    }
}
