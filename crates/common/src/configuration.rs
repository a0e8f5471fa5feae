use std::fmt::Display;
use std::path::Path;
use std::time::Duration;
use std::{env, fs};

use duration_string::DurationString;
use log::info;
use promptgate_adapters::{AdapterSettings, ProviderCredential, ProviderId};
use serde::{Deserialize, Serialize};

use crate::consts::{
    CONFIG_PATH_ENV, DEFAULT_BIND_ADDRESS, DEFAULT_CONFIG_PATH, DEFAULT_UPSTREAM_TIMEOUT_SECS,
};
use crate::errors::ConfigurationError;

#[derive(Debug, Clone, Deserialize)]
pub struct Configuration {
    pub version: Option<String>,
    pub listen_address: Option<String>,
    pub providers: Vec<ProviderConfig>,
    pub tracing: Option<Tracing>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tracing {
    pub random_sampling: Option<u32>,
    pub opentracing_grpc_endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LlmProviderType {
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
}

impl Display for LlmProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderType::Gemini => write!(f, "gemini"),
            LlmProviderType::OpenAI => write!(f, "openai"),
        }
    }
}

impl LlmProviderType {
    pub fn to_provider_id(&self) -> ProviderId {
        match self {
            LlmProviderType::Gemini => ProviderId::Gemini,
            LlmProviderType::OpenAI => ProviderId::OpenAI,
        }
    }
}

/// One inbound route (`POST /api/<name>`) bound to one provider protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub name: String,
    pub provider_interface: LlmProviderType,
    pub model: Option<String>,
    /// Base URL override, e.g. a corporate egress proxy
    pub endpoint: Option<String>,
    /// Inline secret; takes precedence over `access_key_env`
    pub access_key: Option<ProviderCredential>,
    pub access_key_env: Option<String>,
    pub timeout: Option<DurationString>,
    pub omit_empty_system_message: Option<bool>,
}

impl ProviderConfig {
    pub fn new(name: impl Into<String>, provider_interface: LlmProviderType) -> Self {
        ProviderConfig {
            name: name.into(),
            provider_interface,
            model: None,
            endpoint: None,
            access_key: None,
            access_key_env: None,
            timeout: None,
            omit_empty_system_message: None,
        }
    }

    pub fn adapter_settings(&self) -> AdapterSettings {
        let provider_id = self.provider_interface.to_provider_id();
        let mut settings = AdapterSettings::defaults_for(provider_id);
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            settings.base_url = endpoint.clone();
        }
        settings.omit_empty_system_message = self.omit_empty_system_message.unwrap_or(false);
        settings
    }

    pub fn upstream_timeout(&self) -> Duration {
        self.timeout
            .clone()
            .map(Duration::from)
            .unwrap_or(Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS))
    }

    /// Name of the environment variable holding this provider's key
    pub fn credential_env(&self) -> String {
        self.access_key_env.clone().unwrap_or_else(|| {
            self.provider_interface
                .to_provider_id()
                .default_credential_env()
                .to_string()
        })
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            version: None,
            listen_address: None,
            providers: vec![
                ProviderConfig::new("gemini", LlmProviderType::Gemini),
                ProviderConfig::new("openai", LlmProviderType::OpenAI),
            ],
            tracing: None,
        }
    }
}

impl Configuration {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load from `PROMPTGATE_CONFIG_PATH`, else from the default path if it
    /// exists, else fall back to the built-in gemini + openai routes.
    pub fn load_from_env() -> Result<Self, ConfigurationError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self::load(Path::new(&path));
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::load(default_path);
        }
        info!("no config file found, using built-in provider routes");
        Ok(Self::default())
    }

    pub fn listen_address(&self) -> String {
        self.listen_address
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
    }
}
