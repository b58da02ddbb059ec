//! Combine scan and validation output into a submit/block decision.

use serde::{Deserialize, Serialize};

use crate::scanner::ScanReport;
use crate::validator::ValidationResult;

/// Whether a meeting may be submitted, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub blocked: bool,
    /// Validator errors first, then error-severity conflict messages.
    pub blocking_reasons: Vec<String>,
    /// Non-blocking conflict messages, scan warnings, then validator warnings.
    pub advisories: Vec<String>,
}

/// Only error-severity conflicts and validator errors block submission.
pub fn assess(report: &ScanReport, validation: &ValidationResult) -> Verdict {
    let mut blocking_reasons = validation.errors.clone();
    let mut advisories = Vec::new();

    for conflict in &report.conflicts {
        if conflict.severity.blocks_submission() {
            blocking_reasons.push(conflict.message.clone());
        } else {
            advisories.push(conflict.message.clone());
        }
    }
    advisories.extend(report.warnings.iter().cloned());
    advisories.extend(validation.warnings.iter().cloned());

    Verdict {
        blocked: !blocking_reasons.is_empty(),
        blocking_reasons,
        advisories,
    }
}
