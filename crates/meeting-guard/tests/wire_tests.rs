//! Tests for JSON coercion of client and resolver shapes.

use chrono::{TimeZone, Utc};
use meeting_guard::wire::{
    format_timestamp, parse_candidates, parse_check_request, parse_draft, parse_proposal,
    parse_timestamp, ConflictResponse, WireTimestamp,
};
use meeting_guard::{scan, validate, GuardConfig, GuardError, ScanPolicy};
use serde_json::json;

// ── Timestamps ──────────────────────────────────────────────────────────────

#[test]
fn rfc3339_with_offset_normalized_to_utc() {
    let dt = parse_timestamp("2026-03-02T11:00:00+01:00").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
}

#[test]
fn javascript_iso_string_accepted() {
    let dt = parse_timestamp("2026-03-02T10:00:00.000Z").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
}

#[test]
fn naive_timestamp_read_as_utc() {
    let expected = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    assert_eq!(parse_timestamp("2026-03-02T10:00:00").unwrap(), expected);
    assert_eq!(parse_timestamp("2026-03-02T10:00").unwrap(), expected);
    assert_eq!(parse_timestamp("2026-03-02 10:00:00").unwrap(), expected);
}

#[test]
fn garbage_timestamp_rejected() {
    let err = parse_timestamp("next tuesday").unwrap_err();
    assert!(matches!(err, GuardError::InvalidTimestamp(ref s) if s == "next tuesday"));
}

#[test]
fn epoch_millis_accepted() {
    let expected = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let ts = WireTimestamp::Millis(expected.timestamp_millis());
    assert_eq!(ts.to_utc(), Some(expected));
}

#[test]
fn timestamps_formatted_like_javascript() {
    let dt = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    assert_eq!(format_timestamp(&dt), "2026-03-02T10:00:00.000Z");
}

// ── Proposals ───────────────────────────────────────────────────────────────

#[test]
fn proposal_with_attendee_objects() {
    let proposed = parse_proposal(
        r#"{
            "title": "Standup",
            "startTime": "2026-03-02T10:00:00Z",
            "endTime": "2026-03-02T11:00:00Z",
            "attendees": [{"id": "u1", "name": "Alice"}, {"id": "u2", "name": "Bob"}],
            "excludeMeetingId": "m9"
        }"#,
    )
    .unwrap();

    let interval = proposed.interval.expect("interval");
    assert_eq!(interval.start, Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
    assert_eq!(interval.end, Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap());
    assert_eq!(proposed.attendee_ids.len(), 2);
    assert!(proposed.attendee_ids.contains("u1"));
    assert_eq!(proposed.exclude_meeting_id.as_deref(), Some("m9"));
}

#[test]
fn proposal_attendee_ids_collapse_duplicates() {
    let proposed =
        parse_proposal(r#"{"attendeeIds": ["u1", "u1", "u2"], "attendees": ["u2"]}"#).unwrap();
    assert_eq!(proposed.attendee_ids.len(), 2);
}

#[test]
fn half_filled_proposal_has_no_interval() {
    let proposed = parse_proposal(r#"{"startTime": "2026-03-02T10:00:00Z"}"#).unwrap();
    assert!(proposed.interval.is_none());

    let proposed =
        parse_proposal(r#"{"startTime": "not a date", "endTime": "2026-03-02T11:00:00Z"}"#)
            .unwrap();
    assert!(proposed.interval.is_none());

    let proposed = parse_proposal(r#"{"startTime": null, "endTime": true}"#).unwrap();
    assert!(proposed.interval.is_none());
}

#[test]
fn malformed_json_is_an_error() {
    let err = parse_proposal("{not json").unwrap_err();
    assert!(matches!(err, GuardError::Json(_)));
}

// ── Candidates ──────────────────────────────────────────────────────────────

#[test]
fn candidates_with_unreadable_times_are_skipped() {
    let meetings = parse_candidates(
        r#"[
            {"id": "m1", "title": "Ok", "startTime": "2026-03-02T10:00:00Z",
             "endTime": "2026-03-02T11:00:00Z", "attendees": [{"id": "u1", "name": "Alice"}]},
            {"id": "m2", "title": "Broken", "startTime": "soon", "endTime": "later"},
            {"id": "m3", "title": "Epoch", "startTime": 1772445600000, "endTime": 1772449200000}
        ]"#,
    )
    .unwrap();

    let ids: Vec<&str> = meetings.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m1", "m3"]);
    assert!(meetings[0].attendee_ids.contains("u1"));
    assert_eq!(
        meetings[1].interval.start,
        Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
    );
}

#[test]
fn candidate_with_null_title_kept_with_empty_title() {
    let meetings = parse_candidates(
        r#"[
            {"id": "m1", "title": null, "startTime": "2026-03-02T10:00:00Z",
             "endTime": "2026-03-02T11:00:00Z"},
            {"id": "m2", "title": "Review", "startTime": "2026-03-02T10:30:00Z",
             "endTime": "2026-03-02T11:30:00Z"}
        ]"#,
    )
    .unwrap();

    assert_eq!(meetings.len(), 2);
    assert_eq!(meetings[0].title, "");
    assert_eq!(meetings[1].title, "Review");
}

// ── Responses ───────────────────────────────────────────────────────────────

#[test]
fn conflict_response_shape() {
    let (proposed, candidates) = parse_check_request(
        r#"{
            "proposed": {"startTime": "2026-03-02T10:00:00Z", "endTime": "2026-03-02T11:00:00Z",
                         "attendeeIds": ["u1"]},
            "candidates": [
                {"id": "m1", "title": "Review", "startTime": "2026-03-02T10:30:00Z",
                 "endTime": "2026-03-02T11:30:00Z", "attendees": [{"id": "u1", "name": "Alice"}]},
                {"id": "m2", "title": "Lunch", "startTime": "2026-03-02T11:15:00Z",
                 "endTime": "2026-03-02T12:00:00Z", "attendeeIds": ["u1"]}
            ]
        }"#,
    )
    .unwrap();

    let report = scan(&proposed, &candidates, &ScanPolicy::server());
    let value = serde_json::to_value(ConflictResponse::from(&report)).unwrap();

    assert_eq!(
        value,
        json!({
            "hasConflicts": true,
            "conflicts": [{
                "meeting": {
                    "id": "m1",
                    "title": "Review",
                    "startTime": "2026-03-02T10:30:00.000Z",
                    "endTime": "2026-03-02T11:30:00.000Z",
                    "attendeeIds": ["u1"]
                },
                "conflictType": "overlap",
                "severity": "error",
                "message": "Meeting overlaps with \"Review\" (2026-03-02 10:30 - 11:30)"
            }],
            "warnings": ["Meeting is very close to \"Lunch\" - consider adding buffer time"]
        })
    );
}

#[test]
fn draft_coercion_and_validation_result_shape() {
    let draft = parse_draft(r#"{"startTime": "2026-03-02T10:00:00Z", "endTime": "2026-03-02T10:00:00Z"}"#)
        .unwrap();
    let now = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

    let value = serde_json::to_value(validate(&draft, now)).unwrap();

    assert_eq!(
        value,
        json!({
            "isValid": false,
            "errors": ["Meeting title is required", "End time must be after start time"],
            "warnings": []
        })
    );
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn empty_config_uses_defaults() {
    let config = GuardConfig::from_json_str("{}").unwrap();
    assert_eq!(config, GuardConfig::default());
    assert_eq!(config.scan, ScanPolicy::server());
}

#[test]
fn partial_config_overrides_selected_fields() {
    let config = GuardConfig::from_json_str(
        r#"{
            "scan": {"adjacencyBufferMs": 900000, "displayTimezone": "Europe/Berlin"},
            "validation": {"businessEndHour": 17, "referenceTimezone": "Asia/Tokyo"}
        }"#,
    )
    .unwrap();

    assert_eq!(config.scan.adjacency_buffer_ms, 900_000);
    assert_eq!(config.scan.display_timezone, chrono_tz::Europe::Berlin);
    assert!(config.scan.require_attendee_overlap, "unspecified fields keep defaults");
    assert_eq!(config.validation.business_end_hour, 17);
    assert_eq!(config.validation.business_start_hour, 8);
    assert_eq!(config.validation.reference_timezone, chrono_tz::Asia::Tokyo);
}

#[test]
fn unknown_timezone_in_config_rejected() {
    let err = GuardConfig::from_json_str(r#"{"scan": {"displayTimezone": "Mars/Olympus"}}"#)
        .unwrap_err();
    assert!(matches!(err, GuardError::Json(_)));
}
