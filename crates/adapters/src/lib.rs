//! promptgate_adapters: translating one normalized generation request into
//! the wire protocol of each supported LLM provider, and the provider's raw
//! HTTP response back into a single normalized outcome.

pub mod apis;
pub mod providers;

// Re-export important types and traits
pub use providers::adapters::{build_adapter, AdapterSettings, ProviderAdapter};
pub use providers::credential::ProviderCredential;
pub use providers::error::AdapterError;
pub use providers::id::ProviderId;
pub use providers::outbound::OutboundCall;
pub use providers::request::GenerationRequest;
pub use providers::response::{interpret_response, NormalizedOutcome};

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com";
