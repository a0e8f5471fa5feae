use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use hyper::Response;
use promptgate_adapters::{AdapterError, NormalizedOutcome};
use thiserror::Error;

use crate::handlers::response_handler::ResponseHandler;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("internal error: {0}")]
    Panicked(String),

    #[error("no route for {method} {path}")]
    NotFound {
        method: String,
        path: String,
    },
}

impl GatewayError {
    /// Every failure on a provider route is a 500 with `{"error": message}`;
    /// unknown routes get an empty 404.
    pub fn into_response(self) -> Response<BoxBody<Bytes, hyper::Error>> {
        match self {
            GatewayError::NotFound { .. } => ResponseHandler::create_not_found(),
            err => ResponseHandler::from_outcome(err.into()),
        }
    }
}

impl From<GatewayError> for NormalizedOutcome {
    fn from(err: GatewayError) -> Self {
        NormalizedOutcome::failure(err.to_string())
    }
}
