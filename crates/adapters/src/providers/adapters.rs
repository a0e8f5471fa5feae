use std::fmt::Debug;
use std::sync::Arc;

use crate::providers::credential::ProviderCredential;
use crate::providers::error::AdapterError;
use crate::providers::gemini::GeminiAdapter;
use crate::providers::id::ProviderId;
use crate::providers::openai::OpenAIAdapter;
use crate::providers::outbound::OutboundCall;
use crate::providers::request::GenerationRequest;
use crate::providers::response::{interpret_response, NormalizedOutcome};

/// One provider's wire protocol behind two pure operations.
///
/// Model and endpoint are fixed when the adapter is built; only the request
/// content and the credential vary per call.
pub trait ProviderAdapter: Debug + Send + Sync {
    fn provider_id(&self) -> ProviderId;

    fn model(&self) -> &str;

    /// Build the complete outbound call, credential included
    fn build_payload(
        &self,
        request: &GenerationRequest,
        credential: &ProviderCredential,
    ) -> Result<OutboundCall, AdapterError>;

    /// Turn the provider's status and raw body into the caller-facing outcome
    fn interpret_response(&self, status: u16, raw_body: &[u8]) -> NormalizedOutcome {
        interpret_response(self.provider_id(), status, raw_body)
    }
}

/// Per-instance adapter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    pub model: String,
    /// Scheme and host, optionally with a path prefix, no trailing slash needed
    pub base_url: String,
    /// OpenAI only: drop the system message instead of sending it without content
    pub omit_empty_system_message: bool,
}

impl AdapterSettings {
    pub fn defaults_for(provider_id: ProviderId) -> Self {
        AdapterSettings {
            model: provider_id.default_model().to_string(),
            base_url: provider_id.default_base_url().to_string(),
            omit_empty_system_message: false,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL joined with `path`, with exactly one slash between them
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Get the adapter for a provider
pub fn build_adapter(
    provider_id: ProviderId,
    settings: AdapterSettings,
) -> Arc<dyn ProviderAdapter> {
    match provider_id {
        ProviderId::Gemini => Arc::new(GeminiAdapter::new(settings)),
        ProviderId::OpenAI => Arc::new(OpenAIAdapter::new(settings)),
    }
}
