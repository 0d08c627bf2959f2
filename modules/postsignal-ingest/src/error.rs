use postsignal_common::{Platform, UnknownPlatform};

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    UnknownPlatform(#[from] UnknownPlatform),

    #[error("Malformed {platform} payload: {source}")]
    Payload {
        platform: Platform,
        #[source]
        source: serde_json::Error,
    },

    #[error("Normalization task failed: {0}")]
    Task(String),
}
