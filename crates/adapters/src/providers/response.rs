use serde_json::{json, Value};

use crate::providers::error::AdapterError;
use crate::providers::id::ProviderId;

pub const SUCCESS_STATUS: u16 = 200;
pub const FAILURE_STATUS: u16 = 500;

/// The one value handed back to the caller for every inbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedOutcome {
    /// Provider JSON, untouched
    Success(Value),
    Failure { message: String },
}

impl NormalizedOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        NormalizedOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, NormalizedOutcome::Success(_))
    }

    pub fn http_status(&self) -> u16 {
        match self {
            NormalizedOutcome::Success(_) => SUCCESS_STATUS,
            NormalizedOutcome::Failure { .. } => FAILURE_STATUS,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            NormalizedOutcome::Success(_) => None,
            NormalizedOutcome::Failure { message } => Some(message),
        }
    }

    pub fn into_body(self) -> Value {
        match self {
            NormalizedOutcome::Success(value) => value,
            NormalizedOutcome::Failure { message } => json!({ "error": message }),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            NormalizedOutcome::Success(value) => serde_json::to_vec(value),
            NormalizedOutcome::Failure { message } => {
                serde_json::to_vec(&json!({ "error": message }))
            }
        }
    }

    /// Apply `f` to a failure message; successes pass through.
    pub fn map_failure<F>(self, f: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        match self {
            NormalizedOutcome::Failure { message } => NormalizedOutcome::Failure {
                message: f(message),
            },
            success => success,
        }
    }
}

impl From<AdapterError> for NormalizedOutcome {
    fn from(err: AdapterError) -> Self {
        NormalizedOutcome::failure(err.to_string())
    }
}

impl From<Result<Value, AdapterError>> for NormalizedOutcome {
    fn from(result: Result<Value, AdapterError>) -> Self {
        match result {
            Ok(value) => NormalizedOutcome::Success(value),
            Err(err) => err.into(),
        }
    }
}

/// Classify a provider's HTTP response.
///
/// 2xx bodies are parsed and passed through with no renaming; anything else
/// becomes `"<Provider> error: <status> <raw body>"`. Pure: the same input
/// always produces the same outcome.
pub fn interpret_response(
    provider: ProviderId,
    status: u16,
    raw_body: &[u8],
) -> NormalizedOutcome {
    classify_response(provider, status, raw_body).into()
}

fn classify_response(
    provider: ProviderId,
    status: u16,
    raw_body: &[u8],
) -> Result<Value, AdapterError> {
    if !(200..=299).contains(&status) {
        return Err(AdapterError::Upstream {
            provider,
            status,
            body: String::from_utf8_lossy(raw_body).into_owned(),
        });
    }

    serde_json::from_slice(raw_body).map_err(|err| AdapterError::InvalidResponse {
        provider,
        reason: err.to_string(),
    })
}
