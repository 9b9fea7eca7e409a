use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::LeaseSnapshot;
use crate::config::ClientConfig;
use crate::error::{ConfigError, LeaseError};
use crate::model::{Lease, LeaseId, LeaseTerms, NewLease};

mod credentials;
pub use self::credentials::{EnvToken, StaticToken, TokenSource};

mod retry;
pub use self::retry::{RetryPolicy, Sleeper, TokioSleeper};

mod http_client;
use self::http_client::{ensure_command_ok, ensure_ok};

mod types;
pub use self::types::*;

mod service;
pub use self::service::LeaseService;

mod commands;
mod fetch;

pub struct RemoteClient {
    base_url: Option<String>,
    admin_id: i64,
    retry: RetryPolicy,
    tokens: Arc<dyn TokenSource>,
    sleeper: Arc<dyn Sleeper>,
    client: reqwest::Client,
}

impl RemoteClient {
    /// A missing endpoint is reported by the first remote operation, not here.
    pub fn new(cfg: &ClientConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, LeaseError> {
        let client = reqwest::Client::builder()
            .user_agent("rentdesk")
            .build()
            .map_err(|e| ConfigError::Invalid(format!("build http client: {}", e)))?;
        Ok(Self {
            base_url: cfg.endpoint().ok(),
            admin_id: cfg.admin_id,
            retry: cfg.retry.policy(),
            tokens,
            sleeper: Arc::new(TokioSleeper),
            client,
        })
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }
}
