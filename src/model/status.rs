use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Draft,
    PendingApproval,
    Active,
    Expired,
    ExpiresSoon,
    Terminated,
    Renewed,
    Canceled,
}

impl LeaseStatus {
    pub const ALL: [LeaseStatus; 8] = [
        LeaseStatus::Draft,
        LeaseStatus::PendingApproval,
        LeaseStatus::Active,
        LeaseStatus::Expired,
        LeaseStatus::ExpiresSoon,
        LeaseStatus::Terminated,
        LeaseStatus::Renewed,
        LeaseStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeaseStatus::Draft => "draft",
            LeaseStatus::PendingApproval => "pending_approval",
            LeaseStatus::Active => "active",
            LeaseStatus::Expired => "expired",
            LeaseStatus::ExpiresSoon => "expires_soon",
            LeaseStatus::Terminated => "terminated",
            LeaseStatus::Renewed => "renewed",
            LeaseStatus::Canceled => "canceled",
        }
    }

    /// Human-readable label for filters and tables.
    pub fn label(self) -> &'static str {
        match self {
            LeaseStatus::Draft => "Draft",
            LeaseStatus::PendingApproval => "Pending Approval",
            LeaseStatus::Active => "Active",
            LeaseStatus::Expired => "Expired",
            LeaseStatus::ExpiresSoon => "Expires Soon",
            LeaseStatus::Terminated => "Terminated",
            LeaseStatus::Renewed => "Renewed",
            LeaseStatus::Canceled => "Canceled",
        }
    }

    /// No administrator intent applies once a lease reaches one of these.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LeaseStatus::Terminated | LeaseStatus::Renewed | LeaseStatus::Canceled
        )
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let status = match normalized.as_str() {
            "draft" => LeaseStatus::Draft,
            // The lease service splits approval by signer.
            "pending_approval" | "pending_tenant_approval" | "pending_landlord_approval" => {
                LeaseStatus::PendingApproval
            }
            "active" => LeaseStatus::Active,
            "expired" => LeaseStatus::Expired,
            "expires_soon" => LeaseStatus::ExpiresSoon,
            "terminated" => LeaseStatus::Terminated,
            "renewed" => LeaseStatus::Renewed,
            "canceled" | "cancelled" => LeaseStatus::Canceled,
            _ => return Err(format!("unrecognized lease status {:?}", s)),
        };
        Ok(status)
    }
}

impl<'de> Deserialize<'de> for LeaseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
