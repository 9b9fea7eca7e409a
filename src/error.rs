//! Error taxonomy for lease reads and lease commands.

use thiserror::Error;

use crate::lifecycle::Intent;
use crate::model::{LeaseId, LeaseStatus};

/// Faults that retrying cannot fix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no lease service endpoint configured (set RENTDESK_API_URL or api_url)")]
    MissingEndpoint,

    /// The remote digital-signature provider has not been set up.
    #[error("documenso_not_configured")]
    SigningProviderNotConfigured,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum LeaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("credential rejected or unavailable: {0}")]
    AuthTransient(String),

    #[error("lease fetch failed: {0}")]
    Fetch(String),

    #[error("invalid lease command: {0}")]
    Validation(String),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("{command} rejected by lease service ({status}): {message}")]
    Command {
        command: &'static str,
        status: u16,
        message: String,
    },
}

impl LeaseError {
    pub(crate) fn not_eligible(intent: Intent, lease_id: LeaseId, status: LeaseStatus) -> Self {
        LeaseError::Precondition(format!(
            "{} is not allowed for lease {} in status {}",
            intent, lease_id, status
        ))
    }

    /// True when the caller should offer signing-provider setup instead of a
    /// generic failure.
    pub fn is_signing_setup_required(&self) -> bool {
        matches!(
            self,
            LeaseError::Config(ConfigError::SigningProviderNotConfigured)
        )
    }
}
