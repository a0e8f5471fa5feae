use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use promptgate_adapters::NormalizedOutcome;
use tracing::warn;

const SERIALIZATION_FAILED_BODY: &[u8] = b"{\"error\":\"Failed to serialize response\"}";

/// Builders for every response this gateway writes
pub struct ResponseHandler;

impl ResponseHandler {
    /// Create a full response body from bytes
    pub fn create_full_body<T: Into<Bytes>>(chunk: T) -> BoxBody<Bytes, hyper::Error> {
        Full::new(chunk.into())
            .map_err(|never| match never {})
            .boxed()
    }

    pub fn empty() -> BoxBody<Bytes, hyper::Error> {
        Empty::<Bytes>::new()
            .map_err(|never| match never {})
            .boxed()
    }

    pub fn create_json_response<T: Into<Bytes>>(
        status: StatusCode,
        body: T,
    ) -> Response<BoxBody<Bytes, hyper::Error>> {
        let mut response = Response::new(Self::create_full_body(body));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    /// Write the one response an inbound generation request gets
    pub fn from_outcome(outcome: NormalizedOutcome) -> Response<BoxBody<Bytes, hyper::Error>> {
        let status = StatusCode::from_u16(outcome.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match outcome.to_bytes() {
            Ok(body) => Self::create_json_response(status, body),
            Err(err) => {
                warn!(error = %err, "failed to serialize outcome");
                Self::create_json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Bytes::from_static(SERIALIZATION_FAILED_BODY),
                )
            }
        }
    }

    pub fn create_not_found() -> Response<BoxBody<Bytes, hyper::Error>> {
        let mut not_found = Response::new(Self::empty());
        *not_found.status_mut() = StatusCode::NOT_FOUND;
        not_found
    }
}
