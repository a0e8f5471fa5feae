use std::any::Any;
use std::error::Error;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::credentials::CredentialProvider;
use common::llm_providers::ProviderRoute;
use futures::FutureExt;
use promptgate_adapters::{
    AdapterError, GenerationRequest, NormalizedOutcome, OutboundCall, ProviderCredential,
};
use reqwest::Method;
use tracing::{debug, info, warn};

use crate::errors::GatewayError;

/// Runs one generation request against one provider route: build the call,
/// put it on the wire, normalize whatever comes back.
///
/// Every path through `dispatch` ends in a `NormalizedOutcome`; nothing it
/// does can fail the inbound connection.
#[derive(Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl Dispatcher {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self::with_client(reqwest::Client::new(), credentials)
    }

    pub fn with_client(client: reqwest::Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Dispatcher {
            client,
            credentials,
        }
    }

    pub async fn dispatch(&self, route: &ProviderRoute, body: &[u8]) -> NormalizedOutcome {
        let credential = self.resolve_credential(&route.name);

        let outcome = match AssertUnwindSafe(self.execute(route, body, &credential))
            .catch_unwind()
            .await
        {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => GatewayError::from(err).into(),
            Err(panic) => GatewayError::Panicked(panic_message(panic)).into(),
        };

        let outcome = outcome.map_failure(|message| credential.redact(&message));
        if let Some(message) = outcome.error_message() {
            warn!(provider = %route.name, error = %message, "generation failed");
        }
        outcome
    }

    fn resolve_credential(&self, provider_name: &str) -> ProviderCredential {
        self.credentials.resolve(provider_name).unwrap_or_else(|| {
            let env_var = self.credentials.env_var_for(provider_name).unwrap_or("-");
            warn!(
                provider = %provider_name,
                env_var = %env_var,
                "no credential configured, calling provider without one"
            );
            ProviderCredential::empty()
        })
    }

    async fn execute(
        &self,
        route: &ProviderRoute,
        body: &[u8],
        credential: &ProviderCredential,
    ) -> Result<NormalizedOutcome, AdapterError> {
        let request = GenerationRequest::try_from(body)?;
        let call = route.adapter.build_payload(&request, credential)?;
        debug!(provider = %route.name, call = ?call, "sending provider request");

        let started = Instant::now();
        let response = self.send(&call, route.timeout).await?;
        let status = response.status().as_u16();
        let raw_body = response.bytes().await.map_err(transport_error)?;

        info!(
            provider = %route.name,
            model = %route.adapter.model(),
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "provider responded"
        );

        Ok(route.adapter.interpret_response(status, &raw_body))
    }

    async fn send(
        &self,
        call: &OutboundCall,
        timeout: Duration,
    ) -> Result<reqwest::Response, AdapterError> {
        let method = Method::from_bytes(call.method.as_bytes()).map_err(|_| {
            AdapterError::Transport(format!("invalid HTTP method {}", call.method))
        })?;

        let mut request = self
            .client
            .request(method, call.url.as_str())
            .timeout(timeout)
            .body(call.body.clone());
        for (name, value) in &call.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        request.send().await.map_err(transport_error)
    }
}

/// reqwest's own message is terse ("error sending request"); the cause chain
/// carries the useful part. The URL is dropped since it may hold a key.
fn transport_error(err: reqwest::Error) -> AdapterError {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    AdapterError::Transport(message)
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "adapter panicked".to_string()
    }
}
