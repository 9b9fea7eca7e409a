//! Which administrator intents apply to a lease in a given status, and the
//! status the lease service reports once an intent is carried out.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::LeaseStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Add,
    Send,
    Renew,
    Amend,
    Terminate,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Add => "add",
            Intent::Send => "send",
            Intent::Renew => "renew",
            Intent::Amend => "amend",
            Intent::Terminate => "terminate",
        }
    }

    /// Intents that act on an existing lease.
    pub fn targets_lease(self) -> bool {
        !matches!(self, Intent::Add)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn eligible_intents(status: LeaseStatus) -> BTreeSet<Intent> {
    let intents: &[Intent] = match status {
        LeaseStatus::Draft => &[Intent::Send, Intent::Amend],
        LeaseStatus::PendingApproval => &[Intent::Terminate],
        LeaseStatus::Active => &[Intent::Amend, Intent::Terminate],
        LeaseStatus::Expired => &[Intent::Renew, Intent::Amend],
        LeaseStatus::ExpiresSoon => &[Intent::Renew, Intent::Amend, Intent::Terminate],
        LeaseStatus::Terminated | LeaseStatus::Renewed | LeaseStatus::Canceled => &[],
    };
    intents.iter().copied().collect()
}

pub fn is_eligible(status: LeaseStatus, intent: Intent) -> bool {
    eligible_intents(status).contains(&intent)
}

/// Eligibility as enforced by the command dispatcher. Amending is offered
/// for expired leases but only accepted while the term is still running or
/// not yet signed.
pub fn is_dispatchable(status: LeaseStatus, intent: Intent) -> bool {
    if !is_eligible(status, intent) {
        return false;
    }
    match intent {
        Intent::Amend => matches!(
            status,
            LeaseStatus::Draft | LeaseStatus::Active | LeaseStatus::ExpiresSoon
        ),
        Intent::Renew => matches!(status, LeaseStatus::Expired | LeaseStatus::ExpiresSoon),
        Intent::Send => status == LeaseStatus::Draft,
        _ => true,
    }
}

impl LeaseStatus {
    /// Status the lease service reports after `intent` is confirmed, or
    /// `None` when the intent does not apply.
    ///
    /// `pending_approval -> active` and `* -> renewed` happen on the remote
    /// side and have no intent here.
    pub fn after(self, intent: Intent) -> Option<LeaseStatus> {
        if !is_dispatchable(self, intent) {
            return None;
        }
        match intent {
            Intent::Send => Some(LeaseStatus::PendingApproval),
            Intent::Amend => Some(self),
            Intent::Renew => Some(LeaseStatus::PendingApproval),
            Intent::Terminate => Some(LeaseStatus::Terminated),
            Intent::Add => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
