pub mod configuration;
pub mod consts;
pub mod credentials;
pub mod errors;
pub mod llm_providers;
