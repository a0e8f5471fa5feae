use thiserror::Error;

use crate::providers::id::ProviderId;

/// Everything that can go wrong between receiving a generation request and
/// handing back an outcome. The `Display` text of each variant is exactly
/// what the caller sees in `{"error": ...}`.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Provider answered with a non-2xx status
    #[error("{provider} error: {status} {body}")]
    Upstream {
        provider: ProviderId,
        status: u16,
        body: String,
    },

    /// No response was obtained at all
    #[error("{0}")]
    Transport(String),

    #[error("{provider} error: invalid JSON response: {reason}")]
    InvalidResponse {
        provider: ProviderId,
        reason: String,
    },

    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    #[error("failed to serialize provider payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}
