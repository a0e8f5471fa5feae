use log::debug;

use crate::apis::gemini::{GeminiApi, GenerateContentRequest};
use crate::apis::ApiDefinition;
use crate::providers::adapters::{AdapterSettings, ProviderAdapter};
use crate::providers::credential::ProviderCredential;
use crate::providers::error::AdapterError;
use crate::providers::id::ProviderId;
use crate::providers::outbound::OutboundCall;
use crate::providers::request::GenerationRequest;

/// Google Generative Language API. The key travels as the `key` query
/// parameter; no auth header is sent.
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    settings: AdapterSettings,
}

impl GeminiAdapter {
    pub fn new(settings: AdapterSettings) -> Self {
        GeminiAdapter { settings }
    }

    fn endpoint_url(&self, credential: &ProviderCredential) -> String {
        let path = GeminiApi::GenerateContent.endpoint(&self.settings.model);
        format!(
            "{}?key={}",
            self.settings.url_for(&path),
            urlencoding::encode(credential.expose_secret())
        )
    }
}

impl ProviderAdapter for GeminiAdapter {
    fn provider_id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_payload(
        &self,
        request: &GenerationRequest,
        credential: &ProviderCredential,
    ) -> Result<OutboundCall, AdapterError> {
        let payload = GenerateContentRequest::new(
            request.prompt(),
            request.non_empty_system_instruction(),
        );
        debug!(
            "gemini payload: model={} system_instruction={}",
            self.settings.model,
            payload.system_instruction.is_some()
        );
        Ok(OutboundCall::post_json(
            self.endpoint_url(credential),
            payload.to_bytes()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn adapter() -> GeminiAdapter {
        GeminiAdapter::new(
            AdapterSettings::defaults_for(ProviderId::Gemini).with_model("gemini-test"),
        )
    }

    fn body(call: &OutboundCall) -> Value {
        serde_json::from_slice(&call.body).unwrap()
    }

    #[test]
    fn test_credential_goes_in_query() {
        let call = adapter()
            .build_payload(
                &GenerationRequest::new("Hello"),
                &ProviderCredential::new("abc123"),
            )
            .unwrap();
        assert_eq!(
            call.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent?key=abc123"
        );
        assert_eq!(call.method, "POST");
        assert_eq!(call.header("Content-Type"), Some("application/json"));
        assert_eq!(call.header("Authorization"), None);
    }

    #[test]
    fn test_credential_is_percent_encoded() {
        let call = adapter()
            .build_payload(
                &GenerationRequest::new("Hello"),
                &ProviderCredential::new("a&b=c"),
            )
            .unwrap();
        assert!(call.url.ends_with("?key=a%26b%3Dc"), "{}", call.url);
    }

    #[test]
    fn test_empty_credential_still_builds() {
        let call = adapter()
            .build_payload(
                &GenerationRequest::new("Hello"),
                &ProviderCredential::empty(),
            )
            .unwrap();
        assert!(call.url.ends_with(":generateContent?key="));
    }

    #[test]
    fn test_system_instruction_omitted_when_absent_or_empty() {
        for request in [
            GenerationRequest::new("Hello"),
            GenerationRequest::new("Hello").with_system_instruction(""),
        ] {
            let call = adapter()
                .build_payload(&request, &ProviderCredential::new("k"))
                .unwrap();
            assert_eq!(
                body(&call),
                json!({ "contents": [{ "parts": [{ "text": "Hello" }] }] })
            );
        }
    }

    #[test]
    fn test_system_instruction_included_verbatim() {
        let request = GenerationRequest::new("Hello").with_system_instruction("  Reply in haiku\n");
        let call = adapter()
            .build_payload(&request, &ProviderCredential::new("k"))
            .unwrap();
        assert_eq!(
            body(&call),
            json!({
                "contents": [{ "parts": [{ "text": "Hello" }] }],
                "systemInstruction": { "parts": [{ "text": "  Reply in haiku\n" }] }
            })
        );
    }

    #[test]
    fn test_credential_not_in_body() {
        let call = adapter()
            .build_payload(
                &GenerationRequest::new("Hello"),
                &ProviderCredential::new("zzsecretzz"),
            )
            .unwrap();
        assert!(!String::from_utf8_lossy(&call.body).contains("zzsecretzz"));
    }
}
