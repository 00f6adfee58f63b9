use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::{GhmarkError, Result};
use crate::gateway::Gateway;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Unauthenticated GitHub REST client with a fixed base URL.
pub struct GitHub {
    client: Octocrab,
    base_url: String,
}

impl std::fmt::Debug for GitHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHub")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl From<octocrab::Error> for GhmarkError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => GhmarkError::Api {
                status: source.status_code.as_u16(),
                message: source.message,
            },
            other => GhmarkError::Transport(other.to_string()),
        }
    }
}

impl GitHub {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Octocrab::builder()
            .base_uri(base_url)
            .map_err(|e| GhmarkError::Config(format!("invalid base url {}: {}", base_url, e)))?
            .build()
            .map_err(|e| GhmarkError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }
}

#[async_trait]
impl Gateway for GitHub {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        tracing::debug!(path, ?query, "GET");

        let value: octocrab::Result<serde_json::Value> = if query.is_empty() {
            self.client.get(path, None::<&()>).await
        } else {
            self.client.get(path, Some(&query)).await
        };

        value.map_err(|e| {
            let err = GhmarkError::from(e);
            tracing::warn!(path, error = %err, "request failed");
            err
        })
    }
}
