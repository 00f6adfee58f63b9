use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhmarkError {
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GhmarkError {
    /// True when the API answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GhmarkError::Api { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, GhmarkError>;
