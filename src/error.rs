#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Missing required parameters: {0}")]
    Validation(String),

    #[error("Failed to encode dispatch payload: {0}")]
    Encoding(String),

    #[error("GitHub API returned status {status}: {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("Network error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
