//! Combined configuration for a conflict-check deployment.
//!
//! Every field is optional in the JSON form; omitted fields take the defaults
//! of [`ScanPolicy`] and [`ValidatorConfig`].
//!
//! ```json
//! {
//!   "scan": { "adjacencyBufferMs": 900000, "displayTimezone": "Europe/Berlin" },
//!   "validation": { "referenceTimezone": "Europe/Berlin", "businessEndHour": 17 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::ScanPolicy;
use crate::validator::ValidatorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub scan: ScanPolicy,
    pub validation: ValidatorConfig,
}

impl GuardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
