//! WASM bindings for meeting-guard.
//!
//! Exposes the conflict scanner, the meeting validator and the submission
//! verdict to the browser via `wasm-bindgen`, so the form's pre-check runs
//! exactly the same code as the server's authoritative check. All complex
//! types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meeting-guard-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/meeting-guard-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/meeting_guard_wasm.wasm
//! ```
//!
//! The scanner is synchronous; callers debounce form changes around it.

use chrono::{DateTime, Utc};
use meeting_guard::wire::{self, ConflictResponse};
use meeting_guard::{PolicyPreset, ScanPolicy};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// An empty preset selects the server policy.
fn policy_for(preset: &str) -> Result<ScanPolicy, JsValue> {
    if preset.trim().is_empty() {
        return Ok(ScanPolicy::default());
    }
    preset
        .parse::<PolicyPreset>()
        .map(PolicyPreset::policy)
        .map_err(js_error)
}

fn parse_now(now: &str) -> Result<DateTime<Utc>, JsValue> {
    wire::parse_timestamp(now).map_err(js_error)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check a proposed meeting against cached meetings.
///
/// - `proposal_json` -- `{ startTime, endTime, attendeeIds | attendees, excludeMeetingId? }`
/// - `candidates_json` -- array of `{ id, title, startTime, endTime, attendees }`
/// - `preset` -- `"client"` or `"server"` (empty string selects `"server"`)
///
/// Returns `{ hasConflicts, conflicts, warnings }` as a JSON string. A proposal
/// with missing or inverted times yields an empty result, not an error.
#[wasm_bindgen(js_name = "checkConflicts")]
pub fn check_conflicts(
    proposal_json: &str,
    candidates_json: &str,
    preset: &str,
) -> Result<String, JsValue> {
    let policy = policy_for(preset)?;
    let proposed = wire::parse_proposal(proposal_json).map_err(js_error)?;
    let candidates = wire::parse_candidates(candidates_json).map_err(js_error)?;

    let report = meeting_guard::scan(&proposed, &candidates, &policy);
    to_json(&ConflictResponse::from(&report))
}

/// Validate meeting form fields.
///
/// `now` is the caller's current time as an ISO 8601 string. Returns
/// `{ isValid, errors, warnings }` as a JSON string.
#[wasm_bindgen(js_name = "validateMeeting")]
pub fn validate_meeting(draft_json: &str, now: &str) -> Result<String, JsValue> {
    let draft = wire::parse_draft(draft_json).map_err(js_error)?;
    let result = meeting_guard::validate(&draft, parse_now(now)?);
    to_json(&result)
}

/// Run both checks on the same form state and decide whether submission is
/// blocked.
///
/// `form_json` carries the draft fields plus `attendeeIds`/`attendees` and an
/// optional `excludeMeetingId`. Returns `{ blocked, blockingReasons, advisories }`.
#[wasm_bindgen(js_name = "assessSubmission")]
pub fn assess_submission(
    form_json: &str,
    candidates_json: &str,
    preset: &str,
    now: &str,
) -> Result<String, JsValue> {
    let policy = policy_for(preset)?;
    let proposed = wire::parse_proposal(form_json).map_err(js_error)?;
    let draft = wire::parse_draft(form_json).map_err(js_error)?;
    let candidates = wire::parse_candidates(candidates_json).map_err(js_error)?;

    let report = meeting_guard::scan(&proposed, &candidates, &policy);
    let validation = meeting_guard::validate(&draft, parse_now(now)?);
    to_json(&meeting_guard::assess(&report, &validation))
}
