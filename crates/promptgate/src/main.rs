use std::env;
use std::sync::Arc;

use common::configuration::Configuration;
use common::consts::BIND_ADDRESS_ENV;
use common::credentials::ConfiguredCredentialProvider;
use common::llm_providers::ProviderRegistry;
use promptgate::dispatcher::Dispatcher;
use promptgate::router::AppState;
use promptgate::server::serve;
use promptgate::utils::tracing::init_tracer;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // config first so the tracing section can drive tracer setup
    let config = Configuration::load_from_env()?;
    let _tracer_provider = init_tracer(config.tracing.as_ref());

    let bind_address = env::var(BIND_ADDRESS_ENV).unwrap_or_else(|_| config.listen_address());

    let credentials = ConfiguredCredentialProvider::from(config.providers.as_slice());
    let registry = ProviderRegistry::try_from(config.providers.clone())?;
    for provider in registry.iter() {
        info!(
            provider = %provider.name,
            interface = %provider.adapter.provider_id().as_str(),
            model = %provider.adapter.model(),
            timeout_ms = provider.timeout.as_millis() as u64,
            "registered provider route"
        );
    }

    let dispatcher = Dispatcher::new(Arc::new(credentials));
    let state = Arc::new(AppState::new(registry, dispatcher));

    let listener = TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "promptgate listening");

    serve(listener, state).await;
    Ok(())
}
