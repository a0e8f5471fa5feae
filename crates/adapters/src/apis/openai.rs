use serde::Serialize;

use super::ApiDefinition;

pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIApi {
    ChatCompletions,
}

impl ApiDefinition for OpenAIApi {
    fn endpoint(&self, _model: &str) -> String {
        match self {
            OpenAIApi::ChatCompletions => CHAT_COMPLETIONS_PATH.to_string(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A chat message. `content` is dropped from the JSON when it is `None`,
/// which is how a system message without an instruction goes on the wire.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: Option<&str>) -> Self {
        Message {
            role,
            content: content.map(str::to_string),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionsRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatCompletionsRequest {
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
    fn test_chat_completions_serialization() {
        let request = ChatCompletionsRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                Message::new(Role::System, Some("Be terse")),
                Message::new(Role::User, Some("Hi")),
            ],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "Be terse" },
                    { "role": "user", "content": "Hi" }
                ]
            })
        );
    }

    #[test]
    fn test_message_without_content() {
        let message = Message::new(Role::System, None);
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "role": "system" })
        );
    }
}
