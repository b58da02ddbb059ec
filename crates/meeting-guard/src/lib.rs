//! # meeting-guard
//!
//! Deterministic meeting conflict detection and scheduling validation.
//!
//! Given a proposed meeting and the meetings that already exist, the scanner
//! reports duplicates, overlaps and meetings that sit too close together, each
//! with a severity and a human-readable message. The validator checks a single
//! meeting's fields (title, duration, past dates, weekends, business hours).
//! Both are pure functions: no I/O, no clock, no hidden state, so the same code
//! serves the browser pre-check and the server's authoritative check.
//!
//! ## Modules
//!
//! - [`interval`] -- half-open interval comparisons (overlap, duplicate, adjacency)
//! - [`meeting`] -- `Meeting` and `ProposedMeeting` snapshots
//! - [`policy`] -- `ScanPolicy` presets for the client and server call sites
//! - [`classifier`] -- classify one existing meeting against the proposal
//! - [`scanner`] -- scan all candidates into a `ScanReport`
//! - [`validator`] -- field-level rules producing a `ValidationResult`
//! - [`verdict`] -- combine scan and validation into a submit/block decision
//! - [`tiered`] -- local-then-authoritative two-tier checking
//! - [`wire`] -- JSON coercion of client/server shapes
//! - [`config`] -- JSON-loadable configuration
//! - [`error`] -- Error types

pub mod classifier;
pub mod config;
pub mod error;
pub mod interval;
pub mod meeting;
pub mod policy;
pub mod scanner;
pub mod tiered;
pub mod validator;
pub mod verdict;
pub mod wire;

pub use classifier::{classify, Conflict, ConflictType, Severity};
pub use config::GuardConfig;
pub use error::GuardError;
pub use interval::TimeInterval;
pub use meeting::{AttendeeId, Meeting, ProposedMeeting};
pub use policy::{PolicyPreset, ScanPolicy};
pub use scanner::{scan, ScanReport};
pub use tiered::{CandidateSource, Tier, TieredCheck, TieredReport};
pub use validator::{validate, validate_with, MeetingDraft, ValidationResult, ValidatorConfig};
pub use verdict::{assess, Verdict};
