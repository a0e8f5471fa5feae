use log::debug;

use crate::apis::openai::{ChatCompletionsRequest, Message, OpenAIApi, Role};
use crate::apis::ApiDefinition;
use crate::providers::adapters::{AdapterSettings, ProviderAdapter};
use crate::providers::credential::ProviderCredential;
use crate::providers::error::AdapterError;
use crate::providers::id::ProviderId;
use crate::providers::outbound::{OutboundCall, AUTHORIZATION_HEADER};
use crate::providers::request::GenerationRequest;

/// OpenAI chat completions. Bearer auth; the request always carries a
/// system message followed by the user message unless
/// `omit_empty_system_message` is set and there is no instruction.
#[derive(Debug, Clone)]
pub struct OpenAIAdapter {
    settings: AdapterSettings,
}

impl OpenAIAdapter {
    pub fn new(settings: AdapterSettings) -> Self {
        OpenAIAdapter { settings }
    }

    fn messages(&self, request: &GenerationRequest) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        let system_instruction = request.system_instruction();
        if system_instruction.is_some() || !self.settings.omit_empty_system_message {
            messages.push(Message::new(Role::System, system_instruction));
        }
        messages.push(Message::new(Role::User, request.prompt()));
        messages
    }
}

impl ProviderAdapter for OpenAIAdapter {
    fn provider_id(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_payload(
        &self,
        request: &GenerationRequest,
        credential: &ProviderCredential,
    ) -> Result<OutboundCall, AdapterError> {
        let payload = ChatCompletionsRequest {
            model: self.settings.model.clone(),
            messages: self.messages(request),
        };
        debug!(
            "openai payload: model={} messages={}",
            payload.model,
            payload.messages.len()
        );
        let url = self
            .settings
            .url_for(&OpenAIApi::ChatCompletions.endpoint(&self.settings.model));
        Ok(OutboundCall::post_json(url, payload.to_bytes()?).with_header(
            AUTHORIZATION_HEADER,
            format!("Bearer {}", credential.expose_secret()),
        ))
    }
}
