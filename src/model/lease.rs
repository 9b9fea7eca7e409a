use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use super::{ApartmentId, LeaseId, LeaseStatus, TenantId};

/// Rent in minor currency units (cents). Only presentation divides by 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentAmount(pub i64);

impl RentAmount {
    pub fn minor_units(self) -> i64 {
        self.0
    }

    /// Major-unit rendering, e.g. `125000` -> `"1250.00"`.
    pub fn as_major(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for RentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_major())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lease {
    pub id: LeaseId,
    pub tenant_id: Option<TenantId>,
    pub apartment_id: Option<ApartmentId>,
    pub start: Date,
    pub end: Date,
    pub rent: RentAmount,
    pub status: LeaseStatus,
    pub document_url: Option<String>,

    pub tenant_name: Option<String>,
    pub apartment_label: Option<String>,
}

impl Lease {
    pub fn terms(&self) -> LeaseTerms {
        LeaseTerms {
            start: self.start,
            end: self.end,
            rent: self.rent,
        }
    }
}

/// Proposed bounds and rent for a lease command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaseTerms {
    pub start: Date,
    pub end: Date,
    pub rent: RentAmount,
}

impl LeaseTerms {
    pub fn validate(&self) -> Result<(), String> {
        if self.end <= self.start {
            return Err(format!(
                "lease end {} must be after start {}",
                self.end, self.start
            ));
        }
        if self.rent.minor_units() <= 0 {
            return Err("rent amount must be positive".to_string());
        }
        Ok(())
    }
}

/// Input of the add-lease flow; the service always creates it as `draft`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewLease {
    pub tenant_id: TenantId,
    pub apartment_id: ApartmentId,
    pub terms: LeaseTerms,
}
