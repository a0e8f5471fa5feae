use serde::Serialize;

use super::ApiDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiApi {
    GenerateContent,
}

impl ApiDefinition for GeminiApi {
    fn endpoint(&self, model: &str) -> String {
        match self {
            GeminiApi::GenerateContent => {
                format!("/v1beta/models/{}:generateContent", model)
            }
        }
    }
}

/// Body of a `models/{model}:generateContent` call.
///
/// Only the fields this gateway fills in are modelled. `systemInstruction`
/// is left out of the JSON entirely when there is none.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Content {
    pub fn text(text: Option<&str>) -> Self {
        Content {
            parts: vec![Part {
                text: text.map(str::to_string),
            }],
        }
    }
}

impl GenerateContentRequest {
    pub fn new(prompt: Option<&str>, system_instruction: Option<&str>) -> Self {
        GenerateContentRequest {
            contents: vec![Content::text(prompt)],
            system_instruction: system_instruction.map(|text| Content::text(Some(text))),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_generate_content_endpoint() {
        assert_eq!(
            GeminiApi::GenerateContent.endpoint("gemini-2.5-flash"),
            "/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_without_system_instruction() {
        let request = GenerateContentRequest::new(Some("Hello"), None);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({ "contents": [{ "parts": [{ "text": "Hello" }] }] })
        );
    }

    #[test]
    fn test_request_with_system_instruction() {
        let request = GenerateContentRequest::new(Some("Hello"), Some("Answer in French"));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "Hello" }] }],
                "systemInstruction": { "parts": [{ "text": "Answer in French" }] }
            })
        );
    }

    #[test]
    fn test_missing_prompt_drops_text_key() {
        let request = GenerateContentRequest::new(None, None);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({ "contents": [{ "parts": [{}] }] }));
    }
}
