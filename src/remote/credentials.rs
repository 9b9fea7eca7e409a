//! Bearer credential sources. Issuance is someone else's job; a source only
//! answers "is there a token right now".

use async_trait::async_trait;

#[async_trait]
pub trait TokenSource: Send + Sync {
    /// `None` while no credential is available yet.
    async fn token(&self) -> Option<String>;
}

pub struct StaticToken(pub Option<String>);

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Re-reads an environment variable on every acquisition.
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenSource for EnvToken {
    async fn token(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}
