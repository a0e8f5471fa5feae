use std::fmt::Display;

use crate::providers::error::AdapterError;
use crate::{GEMINI_API_BASE_URL, OPENAI_API_BASE_URL};

/// Provider identifier enum - simple enum for identifying providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Gemini,
    OpenAI,
}

impl TryFrom<&str> for ProviderId {
    type Error = AdapterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "gemini" => Ok(ProviderId::Gemini),
            "openai" => Ok(ProviderId::OpenAI),
            _ => Err(AdapterError::UnknownProvider(value.to_string())),
        }
    }
}

impl ProviderId {
    /// Lowercase identifier as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::OpenAI => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini-2.5-flash-preview-05-20",
            ProviderId::OpenAI => "gpt-4o",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderId::Gemini => GEMINI_API_BASE_URL,
            ProviderId::OpenAI => OPENAI_API_BASE_URL,
        }
    }

    /// Environment variable the access key is read from when the
    /// configuration does not name one
    pub fn default_credential_env(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "GEMINI_API_KEY",
            ProviderId::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderId::Gemini => write!(f, "Gemini"),
            ProviderId::OpenAI => write!(f, "OpenAI"),
        }
    }
}
