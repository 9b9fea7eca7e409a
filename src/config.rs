use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::remote::RetryPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "rentdesk.json";
pub const ENV_API_URL: &str = "RENTDESK_API_URL";
pub const ENV_ADMIN_ID: &str = "RENTDESK_ADMIN_ID";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the lease service, e.g. `https://api.example.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Sent as `updated_by` with every command.
    #[serde(default = "default_admin_id")]
    pub admin_id: i64,

    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

fn default_admin_id() -> i64 {
    100
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            admin_id: default_admin_id(),
            retry: RetryConfig::default(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

impl ClientConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ConfigError::Invalid(format!("read {}: {}", path.display(), e)))?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes)
            .map_err(|e| ConfigError::Invalid(format!("parse {}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Explicit path, else `rentdesk.json` in `cwd` if present, else
    /// defaults; environment overrides are applied last.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let path: Option<PathBuf> = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let p = cwd.join(DEFAULT_CONFIG_FILE);
                p.is_file().then_some(p)
            }
        };
        let mut cfg = match path {
            Some(p) => Self::read(&p)?,
            None => Self::default(),
        };
        cfg.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_ADMIN_ID) {
            self.admin_id = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{} is not an integer", ENV_ADMIN_ID)))?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Trimmed base URL without a trailing slash.
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        self.api_url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingEndpoint)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
