use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use promptgate_adapters::{build_adapter, ProviderAdapter};
use serde::Serialize;

use crate::configuration::ProviderConfig;
use crate::errors::ProviderRegistryError;

/// A configured route: the adapter that speaks the provider's protocol plus
/// the per-call limits the dispatcher applies.
#[derive(Debug, Clone)]
pub struct ProviderRoute {
    pub name: String,
    pub adapter: Arc<dyn ProviderAdapter>,
    pub timeout: Duration,
}

impl ProviderRoute {
    pub fn new(
        name: impl Into<String>,
        adapter: Arc<dyn ProviderAdapter>,
        timeout: Duration,
    ) -> Self {
        ProviderRoute {
            name: name.into(),
            adapter,
            timeout,
        }
    }
}

impl From<&ProviderConfig> for ProviderRoute {
    fn from(config: &ProviderConfig) -> Self {
        let adapter = build_adapter(
            config.provider_interface.to_provider_id(),
            config.adapter_settings(),
        );
        ProviderRoute::new(config.name.clone(), adapter, config.upstream_timeout())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProviderDetail {
    pub id: String,
    pub provider: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProviderListing {
    pub object: String,
    pub data: Vec<ProviderDetail>,
}

/// Immutable lookup of routes by name, built once at startup.
#[derive(Debug)]
pub struct ProviderRegistry {
    routes: Vec<Arc<ProviderRoute>>,
    by_name: HashMap<String, usize>,
}

impl ProviderRegistry {
    pub fn get(&self, name: &str) -> Option<Arc<ProviderRoute>> {
        self.by_name.get(name).map(|&index| self.routes[index].clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProviderRoute>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Public view of the configured routes for `GET /v1/providers`
    pub fn to_listing(&self) -> ProviderListing {
        let data = self
            .routes
            .iter()
            .map(|route| ProviderDetail {
                id: route.name.clone(),
                provider: route.adapter.provider_id().as_str().to_string(),
                model: route.adapter.model().to_string(),
            })
            .collect();

        ProviderListing {
            object: "list".to_string(),
            data,
        }
    }
}

fn is_valid_route_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl ProviderRegistry {
    /// Build from already constructed routes, e.g. adapters pointed at a
    /// test server.
    pub fn from_routes(routes: Vec<ProviderRoute>) -> Result<Self, ProviderRegistryError> {
        if routes.is_empty() {
            return Err(ProviderRegistryError::EmptySource);
        }

        let mut registry = ProviderRegistry {
            routes: Vec::with_capacity(routes.len()),
            by_name: HashMap::new(),
        };

        for route in routes {
            if !is_valid_route_name(&route.name) {
                return Err(ProviderRegistryError::InvalidName(route.name));
            }
            if registry.by_name.contains_key(&route.name) {
                return Err(ProviderRegistryError::DuplicateName(route.name));
            }
            registry
                .by_name
                .insert(route.name.clone(), registry.routes.len());
            registry.routes.push(Arc::new(route));
        }

        Ok(registry)
    }
}

impl TryFrom<Vec<ProviderConfig>> for ProviderRegistry {
    type Error = ProviderRegistryError;

    fn try_from(provider_configs: Vec<ProviderConfig>) -> Result<Self, Self::Error> {
        Self::from_routes(provider_configs.iter().map(ProviderRoute::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::LlmProviderType;
    use pretty_assertions::assert_eq;
    use promptgate_adapters::ProviderId;

    fn create_test_provider(name: &str, interface: LlmProviderType) -> ProviderConfig {
        ProviderConfig::new(name, interface)
    }

    #[test]
    fn test_lookup_by_route_name() {
        let registry = ProviderRegistry::try_from(vec![
            create_test_provider("gemini", LlmProviderType::Gemini),
            create_test_provider("openai", LlmProviderType::OpenAI),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        let route = registry.get("gemini").unwrap();
        assert_eq!(route.adapter.provider_id(), ProviderId::Gemini);
        assert_eq!(route.timeout, Duration::from_secs(60));
        assert!(registry.get("anthropic").is_none());
    }

    #[test]
    fn test_two_routes_same_interface() {
        let mut mini = create_test_provider("openai-mini", LlmProviderType::OpenAI);
        mini.model = Some("gpt-4o-mini".to_string());
        let registry = ProviderRegistry::try_from(vec![
            create_test_provider("openai", LlmProviderType::OpenAI),
            mini,
        ])
        .unwrap();
        assert_eq!(registry.get("openai").unwrap().adapter.model(), "gpt-4o");
        assert_eq!(
            registry.get("openai-mini").unwrap().adapter.model(),
            "gpt-4o-mini"
        );
    }

    #[test]
    fn test_empty_source() {
        let err = ProviderRegistry::try_from(vec![]).unwrap_err();
        assert_eq!(err, ProviderRegistryError::EmptySource);
    }

    #[test]
    fn test_duplicate_name() {
        let err = ProviderRegistry::try_from(vec![
            create_test_provider("gemini", LlmProviderType::Gemini),
            create_test_provider("gemini", LlmProviderType::OpenAI),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ProviderRegistryError::DuplicateName("gemini".to_string())
        );
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "a/b", "has space", "q?x"] {
            let err = ProviderRegistry::try_from(vec![create_test_provider(
                name,
                LlmProviderType::Gemini,
            )])
            .unwrap_err();
            assert_eq!(err, ProviderRegistryError::InvalidName(name.to_string()));
        }
    }

    #[test]
    fn test_listing_keeps_config_order_and_hides_keys() {
        let mut openai = create_test_provider("openai", LlmProviderType::OpenAI);
        openai.access_key = Some(promptgate_adapters::ProviderCredential::new("sk-hidden"));
        let registry = ProviderRegistry::try_from(vec![
            create_test_provider("gemini", LlmProviderType::Gemini),
            openai,
        ])
        .unwrap();

        let listing = registry.to_listing();
        assert_eq!(
            listing,
            ProviderListing {
                object: "list".to_string(),
                data: vec![
                    ProviderDetail {
                        id: "gemini".to_string(),
                        provider: "gemini".to_string(),
                        model: "gemini-2.5-flash-preview-05-20".to_string(),
                    },
                    ProviderDetail {
                        id: "openai".to_string(),
                        provider: "openai".to_string(),
                        model: "gpt-4o".to_string(),
                    },
                ],
            }
        );
        let json = serde_json::to_string(&listing).unwrap();
        assert!(!json.contains("sk-hidden"));
    }
}
