use thiserror::Error;

/// Coarse classification of a [`ProviderError`], for callers that only need
/// to tell "lookup failed" apart from "nothing matched".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Timeout,
    Decode,
    NotFound,
    Render,
    Config,
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Network(String),

    #[error("HTTP request timed out: {0}")]
    Timeout(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected JSON from {url}, got '{content_type}'")]
    ContentType { content_type: String, url: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Network(_) | ProviderError::Status { .. } => ErrorKind::Network,
            ProviderError::Timeout(_) => ErrorKind::Timeout,
            ProviderError::Json(_)
            | ProviderError::ContentType { .. }
            | ProviderError::MissingField(_) => ErrorKind::Decode,
            ProviderError::NotFound(_) => ErrorKind::NotFound,
            ProviderError::Render(_) => ErrorKind::Render,
            ProviderError::Config(_) | ProviderError::Toml(_) => ErrorKind::Config,
        }
    }

    /// Short label used for metrics and log fields
    pub fn kind_label(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Decode => "decode",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Render => "render",
            ErrorKind::Config => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
