//! DTOs and payload types for lease service requests/responses.

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{
    ApartmentId, Lease, LeaseId, LeaseStatus, RentAmount, TenantId, format_date, parse_date,
};

/// One row of `GET /admin/leases/`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseRecord {
    pub id: i64,

    #[serde(default)]
    pub tenant_id: Option<i64>,
    #[serde(default)]
    pub apartment_id: Option<i64>,

    #[serde(default)]
    pub tenant_name: Option<String>,
    /// Unit number; the service sends either a string or a number.
    #[serde(default, deserialize_with = "label_or_number")]
    pub apartment: Option<String>,

    pub lease_start_date: String,
    pub lease_end_date: String,

    #[serde(deserialize_with = "minor_units")]
    pub rent_amount: i64,

    pub status: String,

    #[serde(default, rename = "admin_doc_url")]
    pub admin_doc_url: Option<String>,
}

impl TryFrom<LeaseRecord> for Lease {
    type Error = String;

    fn try_from(r: LeaseRecord) -> Result<Self, Self::Error> {
        let start = parse_date(&r.lease_start_date).map_err(|e| {
            format!(
                "lease {}: invalid leaseStartDate {:?}: {}",
                r.id, r.lease_start_date, e
            )
        })?;
        let end = parse_date(&r.lease_end_date).map_err(|e| {
            format!(
                "lease {}: invalid leaseEndDate {:?}: {}",
                r.id, r.lease_end_date, e
            )
        })?;
        let status: LeaseStatus = r
            .status
            .parse()
            .map_err(|e| format!("lease {}: {}", r.id, e))?;
        Ok(Lease {
            id: LeaseId(r.id),
            tenant_id: r.tenant_id.map(TenantId),
            apartment_id: r.apartment_id.map(ApartmentId),
            start,
            end,
            rent: RentAmount(r.rent_amount),
            status,
            document_url: r.admin_doc_url.filter(|u| !u.trim().is_empty()),
            tenant_name: r.tenant_name,
            apartment_label: r.apartment,
        })
    }
}

fn minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        Raw::Float(v) => Err(serde::de::Error::custom(format!(
            "rentAmount {} is not a whole number of minor units",
            v
        ))),
        Raw::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            serde::de::Error::custom(format!("rentAmount {:?} is not a whole number of minor units", s))
        }),
    }
}

fn label_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TerminateRequest {
    pub(super) id: i64,
    pub(super) updated_by: i64,
}

/// Body shared by create, renew and amend.
#[derive(Debug, Serialize)]
pub(super) struct LeaseUpsertRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) lease_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) previous_lease_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) tenant_id: Option<i64>,
    pub(super) apartment_id: i64,
    pub(super) start_date: String,
    pub(super) end_date: String,
    pub(super) rent_amount: i64,
    pub(super) updated_by: i64,
}

impl LeaseUpsertRequest {
    pub(super) fn new(
        tenant_id: Option<TenantId>,
        apartment_id: ApartmentId,
        terms: &crate::model::LeaseTerms,
        updated_by: i64,
    ) -> Self {
        Self {
            lease_id: None,
            previous_lease_id: None,
            tenant_id: tenant_id.map(|t| t.0),
            apartment_id: apartment_id.0,
            start_date: format_date(terms.start),
            end_date: format_date(terms.end),
            rent_amount: terms.rent.minor_units(),
            updated_by,
        }
    }
}

/// What the lease service reported back for an accepted command.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReceipt {
    #[serde(default)]
    pub lease_id: Option<i64>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub sign_url: Option<String>,

    #[serde(default)]
    pub external_doc_id: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentUrlResponse {
    pub(super) url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpiringLeasesReport {
    pub expiring_leases_count: u64,

    #[serde(default)]
    pub expiring_leases: Vec<ExpiringLease>,

    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpiringLease {
    pub lease_id: i64,

    #[serde(default)]
    pub tenant_name: String,
    #[serde(default)]
    pub tenant_email: String,
    #[serde(default, deserialize_with = "label_or_number")]
    pub apartment: Option<String>,

    pub days_remaining: i64,
    pub expiration_date: String,
}

#[cfg(test)]
#[path = "../tests/remote/types_tests.rs"]
mod tests;
