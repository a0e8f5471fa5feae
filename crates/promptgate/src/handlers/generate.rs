use std::fmt::Display;
use std::sync::Arc;

use bytes::Bytes;
use common::llm_providers::ProviderRoute;
use http_body_util::combinators::BoxBody;
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::{Request, Response};
use tracing::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::errors::GatewayError;
use crate::handlers::response_handler::ResponseHandler;

/// `POST /api/<provider>`: exactly one response per request, success or not.
pub async fn generate<B>(
    request: Request<B>,
    route: Arc<ProviderRoute>,
    dispatcher: Arc<Dispatcher>,
) -> Result<Response<BoxBody<Bytes, hyper::Error>>, hyper::Error>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let request_body = match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            let err = GatewayError::BodyRead(err.to_string());
            warn!(provider = %route.name, error = %err, "failed to read request body");
            return Ok(err.into_response());
        }
    };

    debug!(
        provider = %route.name,
        body_len = request_body.len(),
        "received generation request"
    );

    let outcome = dispatcher.dispatch(&route, &request_body).await;
    Ok(ResponseHandler::from_outcome(outcome))
}
