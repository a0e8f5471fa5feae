use std::fmt;

use serde::Deserialize;

const REDACTED: &str = "***";
/// Shorter secrets are too likely to collide with ordinary text in a
/// provider's error body; those bodies are returned verbatim.
const MIN_REDACTABLE_LEN: usize = 8;

/// An API key scoped to one provider.
///
/// The secret is only reachable through [`ProviderCredential::expose_secret`];
/// `Debug` never prints it.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ProviderCredential(String);

impl ProviderCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        ProviderCredential(secret.into())
    }

    /// The credential used when none is configured. The call still goes
    /// out and the provider rejects it.
    pub fn empty() -> Self {
        ProviderCredential(String::new())
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of the secret (raw or percent-encoded) in
    /// `text` so it can be logged or returned to a caller.
    pub fn redact(&self, text: &str) -> String {
        if self.0.len() < MIN_REDACTABLE_LEN {
            return text.to_string();
        }
        let encoded = urlencoding::encode(&self.0);
        text.replace(&self.0, REDACTED)
            .replace(encoded.as_ref(), REDACTED)
    }
}

impl fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ProviderCredential(<empty>)")
        } else {
            write!(f, "ProviderCredential({})", REDACTED)
        }
    }
}
