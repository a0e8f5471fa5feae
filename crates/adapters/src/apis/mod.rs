pub mod gemini;
pub mod openai;

pub use gemini::{GeminiApi, GenerateContentRequest};
pub use openai::{ChatCompletionsRequest, OpenAIApi};

pub trait ApiDefinition {
    /// Returns the endpoint path for this API and the given model
    fn endpoint(&self, model: &str) -> String;
}
