use serde::{Deserialize, Serialize};

use crate::providers::error::AdapterError;

/// The normalized request every inbound call is parsed into.
///
/// A missing `prompt` travels to the provider as-is and comes back as the
/// provider's own rejection. A present field that is not a string is
/// rejected here and never reaches a provider.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        GenerationRequest {
            prompt: Some(prompt.into()),
            system_instruction: None,
        }
    }

    pub fn with_system_instruction(mut self, system_instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(system_instruction.into());
        self
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// The system instruction exactly as received, empty string included
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction.as_deref()
    }

    /// The system instruction only when it carries text
    pub fn non_empty_system_instruction(&self) -> Option<&str> {
        self.system_instruction().filter(|s| !s.is_empty())
    }
}

impl TryFrom<&[u8]> for GenerationRequest {
    type Error = AdapterError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        serde_json::from_slice(bytes).map_err(|err| AdapterError::InvalidRequest(err.to_string()))
    }
}
