use bytes::Bytes;
use common::llm_providers::ProviderRegistry;
use http_body_util::combinators::BoxBody;
use hyper::{Response, StatusCode};

use crate::handlers::response_handler::ResponseHandler;

pub fn list_providers(registry: &ProviderRegistry) -> Response<BoxBody<Bytes, hyper::Error>> {
    match serde_json::to_vec(&registry.to_listing()) {
        Ok(json) => ResponseHandler::create_json_response(StatusCode::OK, json),
        Err(_) => ResponseHandler::create_json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            Bytes::from_static(b"{\"error\":\"Failed to serialize providers\"}"),
        ),
    }
}
