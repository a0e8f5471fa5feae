//! Credential resolution.
//!
//! The dispatcher never reads process configuration directly; it asks a
//! [`CredentialProvider`] for the key of the route it is serving. Lookups
//! happen on every call, so a rotated environment variable is picked up
//! without a restart.

use std::collections::HashMap;
use std::env;

use log::debug;
use promptgate_adapters::ProviderCredential;

use crate::configuration::ProviderConfig;

pub trait CredentialProvider: Send + Sync {
    /// Key for the named provider route, `None` when nothing is configured
    fn resolve(&self, provider_name: &str) -> Option<ProviderCredential>;

    /// Environment variable backing a route, named in missing-key warnings
    fn env_var_for(&self, _provider_name: &str) -> Option<&str> {
        None
    }
}

/// Reads one environment variable per provider at call time.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider {
    vars: HashMap<String, String>,
}

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, provider_name: impl Into<String>, var: impl Into<String>) -> Self {
        self.vars.insert(provider_name.into(), var.into());
        self
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn resolve(&self, provider_name: &str) -> Option<ProviderCredential> {
        let var = self.vars.get(provider_name)?;
        match env::var(var) {
            Ok(value) if !value.is_empty() => Some(ProviderCredential::new(value)),
            _ => {
                debug!("credential variable {} is not set", var);
                None
            }
        }
    }

    fn env_var_for(&self, provider_name: &str) -> Option<&str> {
        self.vars.get(provider_name).map(String::as_str)
    }
}

/// Fixed keys, mostly for tests and inline `access_key` config.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, ProviderCredential>,
}

impl StaticCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(
        mut self,
        provider_name: impl Into<String>,
        credential: ProviderCredential,
    ) -> Self {
        self.credentials.insert(provider_name.into(), credential);
        self
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn resolve(&self, provider_name: &str) -> Option<ProviderCredential> {
        self.credentials.get(provider_name).cloned()
    }
}

/// What the server runs with: inline keys from the config file first,
/// then each route's environment variable.
#[derive(Debug, Default, Clone)]
pub struct ConfiguredCredentialProvider {
    inline: StaticCredentialProvider,
    env: EnvCredentialProvider,
}

impl From<&[ProviderConfig]> for ConfiguredCredentialProvider {
    fn from(providers: &[ProviderConfig]) -> Self {
        let mut inline = StaticCredentialProvider::new();
        let mut env = EnvCredentialProvider::new();
        for provider in providers {
            if let Some(access_key) = &provider.access_key {
                inline = inline.with_credential(provider.name.clone(), access_key.clone());
            }
            env = env.with_var(provider.name.clone(), provider.credential_env());
        }
        ConfiguredCredentialProvider { inline, env }
    }
}

impl CredentialProvider for ConfiguredCredentialProvider {
    fn resolve(&self, provider_name: &str) -> Option<ProviderCredential> {
        self.inline
            .resolve(provider_name)
            .or_else(|| self.env.resolve(provider_name))
    }

    fn env_var_for(&self, provider_name: &str) -> Option<&str> {
        self.env.env_var_for(provider_name)
    }
}
