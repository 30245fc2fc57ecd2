//! Configuration for the parsing-service client.
//!
//! Everything the client needs to know about its environment lives in
//! [`ClientConfig`], built via [`ClientConfigBuilder`]. Keeping the knobs in
//! one struct makes it trivial to share a config between the library and the
//! CLI and to construct test configs pointing at a mock server.
//!
//! There are deliberately no retry, timeout, or backoff knobs: the client
//! performs exactly one request per submission and waits for it. A hung
//! request keeps the job pending until the caller drops the submission.

use crate::error::ClientError;
use url::Url;

/// Base address of the parsing service when none is configured.
pub const DEFAULT_SERVICE_BASE: &str = "http://localhost:8000";

/// Document title sent when the user leaves the title field unset.
///
/// Matches the service-side default, so an untitled upload round-trips to
/// the same title either way.
pub const DEFAULT_DOC_TITLE: &str = "USB Power Delivery Specification";

/// Configuration for a parsing-service client.
///
/// # Example
/// ```rust
/// use pdspec_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .service_base("http://parser.internal:8000")
///     .doc_title("USB PD R3.1 Spec")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the parsing service. Default: `http://localhost:8000`.
    ///
    /// All endpoints (`/parse`, `/health`, `/jobs/{id}`, `/download/...`)
    /// are resolved relative to this address.
    pub service_base: String,

    /// Title attached to uploads that do not set one explicitly.
    /// Default: [`DEFAULT_DOC_TITLE`].
    pub doc_title: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_base: DEFAULT_SERVICE_BASE.to_string(),
            doc_title: DEFAULT_DOC_TITLE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn service_base(mut self, base: impl Into<String>) -> Self {
        self.config.service_base = base.into();
        self
    }

    pub fn doc_title(mut self, title: impl Into<String>) -> Self {
        self.config.doc_title = title.into();
        self
    }

    /// Build the configuration, validating the service base URL.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let base = Url::parse(&self.config.service_base).map_err(|e| {
            ClientError::InvalidConfig(format!(
                "service base URL '{}': {}",
                self.config.service_base, e
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "service base URL '{}' must use http or https",
                self.config.service_base
            )));
        }
        Ok(self.config)
    }
}
