use std::fmt::Display;
use std::sync::Arc;

use bytes::Bytes;
use common::consts::{GENERATE_PATH_PREFIX, PROVIDERS_PATH, REQUEST_ID_HEADER};
use common::llm_providers::ProviderRegistry;
use http_body_util::combinators::BoxBody;
use hyper::body::Body;
use hyper::header::HeaderValue;
use hyper::{Method, Request, Response};
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::dispatcher::Dispatcher;
use crate::errors::GatewayError;
use crate::handlers::generate::generate;
use crate::handlers::providers::list_providers;

pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(registry: ProviderRegistry, dispatcher: Dispatcher) -> Self {
        AppState {
            registry: Arc::new(registry),
            dispatcher: Arc::new(dispatcher),
        }
    }
}

fn request_id_for<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub async fn route<B>(
    request: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<BoxBody<Bytes, hyper::Error>>, hyper::Error>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let request_id = request_id_for(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let provider = path
        .strip_prefix(GENERATE_PATH_PREFIX)
        .unwrap_or_default()
        .to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        provider = %provider
    );

    let response = async move {
        match (&method, path.as_str()) {
            (&Method::GET, PROVIDERS_PATH) => Ok(list_providers(&state.registry)),
            (&Method::POST, _) if !provider.is_empty() => match state.registry.get(&provider) {
                Some(route) => generate(request, route, Arc::clone(&state.dispatcher)).await,
                None => {
                    debug!("unknown provider");
                    Ok(not_found(&method, &path))
                }
            },
            _ => {
                debug!("no matching route");
                Ok(not_found(&method, &path))
            }
        }
    }
    .instrument(span)
    .await;

    response.map(|mut response| {
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    })
}

fn not_found(method: &Method, path: &str) -> Response<BoxBody<Bytes, hyper::Error>> {
    GatewayError::NotFound {
        method: method.to_string(),
        path: path.to_string(),
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::configuration::Configuration;
    use common::credentials::StaticCredentialProvider;
    use common::llm_providers::ProviderRoute;
    use http_body_util::{BodyExt, Full};
    use hyper::StatusCode;
    use promptgate_adapters::{build_adapter, AdapterSettings, ProviderCredential, ProviderId};
    use std::time::Duration;

    fn state_with_gemini_at(base_url: &str) -> Arc<AppState> {
        let mut providers = Configuration::default().providers;
        providers[0].endpoint = Some(base_url.to_string());
        providers[0].model = Some("gemini-test".to_string());
        let registry = ProviderRegistry::try_from(providers).unwrap();
        let credentials =
            StaticCredentialProvider::new().with_credential("gemini", ProviderCredential::new("k"));
        let dispatcher = Dispatcher::new(Arc::new(credentials));
        Arc::new(AppState::new(registry, dispatcher))
    }

    fn request(method: Method, path: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    async fn body_bytes(response: Response<BoxBody<Bytes, hyper::Error>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_generate_routes_to_provider() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let state = state_with_gemini_at(&server.url());
        let req = request(Method::POST, "/api/gemini", r#"{"prompt":"Hi"}"#);
        let response = route(req, state).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(body_bytes(response).await, r#"{"candidates":[]}"#);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let state = state_with_gemini_at("http://127.0.0.1:1");
        let mut req = request(Method::GET, PROVIDERS_PATH, "");
        req.headers_mut()
            .insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));

        let response = route(req, state).await.unwrap();
        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
    }

    #[tokio::test]
    async fn test_list_providers_route() {
        let state = state_with_gemini_at("http://127.0.0.1:1");
        let response = route(request(Method::GET, PROVIDERS_PATH, ""), state)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["data"][0]["model"], "gemini-test");
    }

    #[tokio::test]
    async fn test_unknown_provider_is_404() {
        let state = state_with_gemini_at("http://127.0.0.1:1");
        let response = route(request(Method::POST, "/api/mistral", "{}"), state)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_is_404() {
        let state = state_with_gemini_at("http://127.0.0.1:1");
        let response = route(request(Method::GET, "/api/gemini", ""), state)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let state = state_with_gemini_at("http://127.0.0.1:1");
        let response = route(request(Method::POST, "/api/", "{}"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_body_is_500_json() {
        let state = state_with_gemini_at("http://127.0.0.1:1");
        let response = route(request(Method::POST, "/api/gemini", "[1,2]"), state)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body"));
    }

    #[tokio::test]
    async fn test_custom_route_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"id":"x"}"#)
            .create_async()
            .await;

        let settings =
            AdapterSettings::defaults_for(ProviderId::OpenAI).with_base_url(server.url());
        let routes = vec![ProviderRoute::new(
            "openai-eu",
            build_adapter(ProviderId::OpenAI, settings),
            Duration::from_secs(5),
        )];
        let registry = ProviderRegistry::from_routes(routes).unwrap();
        let state = Arc::new(AppState::new(
            registry,
            Dispatcher::new(Arc::new(StaticCredentialProvider::new())),
        ));

        let req = request(Method::POST, "/api/openai-eu", r#"{"prompt":"Hi"}"#);
        let response = route(req, state).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
