//! Provider implementations for different LLM APIs
//!
//! Each provider is an adapter with two pure operations: building the
//! outbound HTTP call from a normalized request, and interpreting the raw
//! HTTP response that comes back.
//!
pub mod adapters;
pub mod credential;
pub mod error;
pub mod gemini;
pub mod id;
pub mod openai;
pub mod outbound;
pub mod request;
pub mod response;

pub use adapters::{build_adapter, AdapterSettings, ProviderAdapter};
pub use id::ProviderId;
pub use request::GenerationRequest;
pub use response::NormalizedOutcome;
