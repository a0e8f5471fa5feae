use std::fmt;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const APPLICATION_JSON: &str = "application/json";

/// A fully built provider call: everything the dispatcher needs to put the
/// request on the wire, and nothing it has to know about the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub url: String,
    pub method: &'static str,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl OutboundCall {
    pub fn post_json(url: String, body: Vec<u8>) -> Self {
        OutboundCall {
            url,
            method: "POST",
            headers: vec![(
                CONTENT_TYPE_HEADER.to_string(),
                APPLICATION_JSON.to_string(),
            )],
            body,
        }
    }

    pub fn with_header(mut self, name: &str, value: String) -> Self {
        self.headers.push((name.to_string(), value));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// URL query strings and auth headers both carry credentials.
impl fmt::Debug for OutboundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.url.split('?').next().unwrap_or_default();
        let headers: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("OutboundCall")
            .field("url", &url)
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}
