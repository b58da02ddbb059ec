//! Two-tier conflict checking: a local candidate set first, the authoritative
//! set only when the local one is clean.
//!
//! The local tier gives instant feedback from cached meetings. When it finds
//! nothing blocking, the authoritative source is consulted and its report is
//! returned instead. Both tiers scan with the same policy, so a report means
//! the same thing whichever tier produced it.

use crate::meeting::{Meeting, ProposedMeeting};
use crate::policy::ScanPolicy;
use crate::scanner::{scan, ScanReport};

/// Supplies the authoritative candidate meetings for a proposal.
///
/// Implementations typically query storage or a remote API; their failures
/// surface unchanged through [`TieredCheck::run`].
pub trait CandidateSource {
    type Error;

    fn candidates(&self, proposed: &ProposedMeeting) -> Result<Vec<Meeting>, Self::Error>;
}

impl CandidateSource for [Meeting] {
    type Error = std::convert::Infallible;

    fn candidates(&self, _proposed: &ProposedMeeting) -> Result<Vec<Meeting>, Self::Error> {
        Ok(self.to_vec())
    }
}

impl CandidateSource for Vec<Meeting> {
    type Error = std::convert::Infallible;

    fn candidates(&self, _proposed: &ProposedMeeting) -> Result<Vec<Meeting>, Self::Error> {
        Ok(self.clone())
    }
}

/// Which candidate set produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Local,
    Authoritative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredReport {
    pub tier: Tier,
    pub report: ScanReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TieredCheck {
    policy: ScanPolicy,
}

impl TieredCheck {
    pub fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Run the local tier, then the authoritative tier if nothing blocking
    /// was found locally.
    ///
    /// A proposal without a computable interval returns an empty local report
    /// without touching the source.
    pub fn run<S>(
        &self,
        proposed: &ProposedMeeting,
        local: &[Meeting],
        authoritative: &S,
    ) -> Result<TieredReport, S::Error>
    where
        S: CandidateSource + ?Sized,
    {
        let local_report = scan(proposed, local, &self.policy);
        if local_report.has_conflicts() || proposed.computable_interval().is_none() {
            tracing::debug!(
                conflicts = local_report.conflicts.len(),
                "tiered_check_resolved_locally"
            );
            return Ok(TieredReport {
                tier: Tier::Local,
                report: local_report,
            });
        }

        let candidates = authoritative.candidates(proposed)?;
        let report = scan(proposed, &candidates, &self.policy);
        tracing::debug!(
            candidates = candidates.len(),
            conflicts = report.conflicts.len(),
            "tiered_check_resolved_authoritatively"
        );
        Ok(TieredReport {
            tier: Tier::Authoritative,
            report,
        })
    }
}
