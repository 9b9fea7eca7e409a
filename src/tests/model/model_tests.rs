use super::*;
use time::macros::date;

#[test]
fn rent_renders_in_major_units_only_for_display() {
    assert_eq!(RentAmount(125_000).as_major(), "1250.00");
    assert_eq!(RentAmount(5).as_major(), "0.05");
    assert_eq!(RentAmount(-250).as_major(), "-2.50");
    assert_eq!(RentAmount(125_000).minor_units(), 125_000);
}

#[test]
fn status_parses_wire_aliases() {
    assert_eq!(
        "pending_tenant_approval".parse::<LeaseStatus>(),
        Ok(LeaseStatus::PendingApproval)
    );
    assert_eq!(
        "pending_landlord_approval".parse::<LeaseStatus>(),
        Ok(LeaseStatus::PendingApproval)
    );
    assert_eq!(" Active ".parse::<LeaseStatus>(), Ok(LeaseStatus::Active));
    assert_eq!("cancelled".parse::<LeaseStatus>(), Ok(LeaseStatus::Canceled));
    assert!("archived".parse::<LeaseStatus>().is_err());
}

#[test]
fn status_round_trips_through_its_wire_name() {
    for status in LeaseStatus::ALL {
        assert_eq!(status.as_str().parse::<LeaseStatus>(), Ok(status));
        let json = serde_json::to_string(&status).expect("serialize status");
        assert_eq!(json, format!("\"{}\"", status.as_str()));
    }
}

#[test]
fn terminal_statuses() {
    let terminal = LeaseStatus::ALL
        .iter()
        .filter(|s| s.is_terminal())
        .copied()
        .collect::<Vec<_>>();
    assert_eq!(
        terminal,
        vec![
            LeaseStatus::Terminated,
            LeaseStatus::Renewed,
            LeaseStatus::Canceled
        ]
    );
}

#[test]
fn dates_parse_plain_and_timestamped() {
    assert_eq!(parse_date("2025-03-01").expect("plain"), date!(2025 - 03 - 01));
    assert_eq!(
        parse_date("2025-03-01T00:00:00Z").expect("timestamp"),
        date!(2025 - 03 - 01)
    );
    assert!(parse_date("03/01/2025").is_err());
    assert_eq!(format_date(date!(2025 - 03 - 01)), "2025-03-01");
}

#[test]
fn one_year_later_clamps_leap_day() {
    assert_eq!(add_one_year(date!(2025 - 06 - 15)), date!(2026 - 06 - 15));
    assert_eq!(add_one_year(date!(2024 - 02 - 29)), date!(2025 - 02 - 28));
}

#[test]
fn terms_require_positive_rent_and_forward_bounds() {
    let ok = LeaseTerms {
        start: date!(2025 - 01 - 01),
        end: date!(2026 - 01 - 01),
        rent: RentAmount(100_000),
    };
    assert!(ok.validate().is_ok());

    let backwards = LeaseTerms {
        end: date!(2024 - 12 - 31),
        ..ok
    };
    assert!(backwards.validate().is_err());

    let same_day = LeaseTerms {
        end: ok.start,
        ..ok
    };
    assert!(same_day.validate().is_err());

    let free = LeaseTerms {
        rent: RentAmount(0),
        ..ok
    };
    assert!(free.validate().is_err());
}
