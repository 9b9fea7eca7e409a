use super::*;

use time::macros::date;

fn record(v: serde_json::Value) -> LeaseRecord {
    serde_json::from_value(v).expect("parse lease record")
}

#[test]
fn maps_wire_fields_onto_a_lease() {
    let r = record(serde_json::json!({
        "id": 12,
        "tenantId": 3,
        "apartmentId": 40,
        "tenantName": "Ada Lovelace",
        "apartment": 101,
        "leaseStartDate": "2025-01-01",
        "leaseEndDate": "2026-01-01",
        "rentAmount": 185000,
        "status": "active",
        "admin_doc_url": "https://docs.example/12"
    }));
    let lease = Lease::try_from(r).expect("convert");
    assert_eq!(lease.id, LeaseId(12));
    assert_eq!(lease.tenant_id, Some(TenantId(3)));
    assert_eq!(lease.apartment_id, Some(ApartmentId(40)));
    assert_eq!(lease.apartment_label.as_deref(), Some("101"));
    assert_eq!(lease.start, date!(2025 - 01 - 01));
    assert_eq!(lease.end, date!(2026 - 01 - 01));
    assert_eq!(lease.rent, RentAmount(185_000));
    assert_eq!(lease.status, LeaseStatus::Active);
    assert_eq!(lease.document_url.as_deref(), Some("https://docs.example/12"));
}

#[test]
fn rent_accepts_numeric_strings_in_minor_units() {
    let r = record(serde_json::json!({
        "id": 1,
        "leaseStartDate": "2025-01-01",
        "leaseEndDate": "2026-01-01",
        "rentAmount": "99900",
        "status": "draft"
    }));
    assert_eq!(r.rent_amount, 99_900);
    let lease = Lease::try_from(r).expect("convert");
    assert_eq!(lease.apartment_id, None);
    assert_eq!(lease.document_url, None);
}

#[test]
fn rent_rejects_fractional_minor_units() {
    let err = serde_json::from_value::<LeaseRecord>(serde_json::json!({
        "id": 1,
        "leaseStartDate": "2025-01-01",
        "leaseEndDate": "2026-01-01",
        "rentAmount": "999.50",
        "status": "draft"
    }))
    .expect_err("fractional rent");
    assert!(err.to_string().contains("minor units"));
}

#[test]
fn unknown_status_fails_conversion() {
    let r = record(serde_json::json!({
        "id": 9,
        "leaseStartDate": "2025-01-01",
        "leaseEndDate": "2026-01-01",
        "rentAmount": 1,
        "status": "archived"
    }));
    let err = Lease::try_from(r).expect_err("unknown status");
    assert!(err.contains("lease 9"));
}

#[test]
fn bad_dates_name_the_field() {
    let r = record(serde_json::json!({
        "id": 9,
        "leaseStartDate": "2025-01-01",
        "leaseEndDate": "soon",
        "rentAmount": 1,
        "status": "active"
    }));
    let err = Lease::try_from(r).expect_err("bad end date");
    assert!(err.contains("leaseEndDate"));
}

#[test]
fn terminate_body_carries_id_and_updated_by() {
    let body = serde_json::to_value(TerminateRequest {
        id: 5,
        updated_by: 100,
    })
    .expect("serialize");
    assert_eq!(body, serde_json::json!({"id": 5, "updated_by": 100}));
}

#[test]
fn upsert_body_omits_absent_links() {
    let terms = crate::model::LeaseTerms {
        start: date!(2025 - 02 - 01),
        end: date!(2026 - 02 - 01),
        rent: RentAmount(120_000),
    };
    let body = serde_json::to_value(LeaseUpsertRequest::new(None, ApartmentId(8), &terms, 100))
        .expect("serialize");
    assert_eq!(
        body,
        serde_json::json!({
            "apartment_id": 8,
            "start_date": "2025-02-01",
            "end_date": "2026-02-01",
            "rent_amount": 120000,
            "updated_by": 100
        })
    );
}

#[test]
fn receipt_tolerates_partial_bodies() {
    let receipt: CommandReceipt = serde_json::from_value(serde_json::json!({
        "lease_id": 4,
        "status": "pending_tenant_approval",
        "sign_url": "https://sign.example/4",
        "terminated": true
    }))
    .expect("parse receipt");
    assert_eq!(receipt.lease_id, Some(4));
    assert_eq!(receipt.sign_url.as_deref(), Some("https://sign.example/4"));
    assert_eq!(receipt.external_doc_id, None);
}
