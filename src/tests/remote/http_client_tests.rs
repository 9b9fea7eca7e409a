use super::*;

use reqwest::StatusCode;

#[test]
fn error_message_prefers_json_error_field() {
    assert_eq!(
        error_message(StatusCode::BAD_REQUEST, r#"{"error": "lease is locked"}"#),
        "lease is locked"
    );
}

#[test]
fn error_message_falls_back_to_text_then_reason() {
    assert_eq!(
        error_message(StatusCode::INTERNAL_SERVER_ERROR, "Could not terminate lease\n"),
        "Could not terminate lease"
    );
    assert_eq!(
        error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
        "Internal Server Error"
    );
    assert_eq!(
        error_message(StatusCode::CONFLICT, r#"{"error": ""}"#),
        r#"{"error": ""}"#
    );
}

#[test]
fn signing_provider_marker_must_match_exactly() {
    assert!(is_signing_not_configured(
        r#"{"error": "documenso_not_configured"}"#
    ));
    assert!(!is_signing_not_configured(r#"{"error": "something_else"}"#));
    assert!(!is_signing_not_configured("documenso_not_configured"));
    assert!(!is_signing_not_configured(""));
}
