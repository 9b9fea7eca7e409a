use super::*;

pub(super) const SIGNING_NOT_CONFIGURED: &str = "documenso_not_configured";

impl RemoteClient {
    pub(super) fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    pub(super) fn url(&self, path: &str) -> Result<String, LeaseError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or(ConfigError::MissingEndpoint)?;
        Ok(format!("{}{}", base, path))
    }
}

fn reason(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

/// Prefers a JSON `{"error": ...}` body, then plain text, then the reason phrase.
pub(super) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<ErrorBody>(body)
        && let Some(msg) = v.error.filter(|m| !m.trim().is_empty())
    {
        return msg;
    }
    let text = body.trim();
    if text.is_empty() {
        reason(status)
    } else {
        text.to_string()
    }
}

pub(super) fn is_signing_not_configured(body: &str) -> bool {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|v| v.error)
        .is_some_and(|e| e == SIGNING_NOT_CONFIGURED)
}

/// Read-path classification: 2xx passes, 401 is transient, 412 naming the
/// signing provider is fatal config, anything else is a fetch failure.
pub(super) async fn ensure_ok(
    resp: reqwest::Response,
    label: &str,
) -> Result<reqwest::Response, LeaseError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(LeaseError::AuthTransient(format!("{}: unauthorized", label)));
    }
    if status == reqwest::StatusCode::PRECONDITION_FAILED {
        let body = resp.text().await.unwrap_or_default();
        if is_signing_not_configured(&body) {
            return Err(ConfigError::SigningProviderNotConfigured.into());
        }
    }
    Err(LeaseError::Fetch(reason(status)))
}

/// Command-path classification. Commands are never retried, so 401 is a
/// plain rejection here.
pub(super) async fn ensure_command_ok(
    resp: reqwest::Response,
    command: &'static str,
) -> Result<reqwest::Response, LeaseError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::PRECONDITION_FAILED && is_signing_not_configured(&body) {
        return Err(ConfigError::SigningProviderNotConfigured.into());
    }
    if status == reqwest::StatusCode::CONFLICT {
        return Err(LeaseError::Precondition(format!(
            "{}: {}",
            command,
            error_message(status, &body)
        )));
    }
    Err(LeaseError::Command {
        command,
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
