//! HTTP handle for the remote parsing service.
//!
//! [`ParserService`] owns the shared `reqwest::Client` and the validated
//! base URL; it is the only module that talks to the network. The parse
//! upload itself is driven by [`crate::pipeline::submit::JobSubmitter`],
//! which normalises failures into a job outcome — this module only hands it
//! the raw response. The auxiliary endpoints (`/health`, `/jobs/{id}`) sit
//! outside the submission state machine and report errors as
//! [`ClientError`] directly.
//!
//! The client is built without request timeouts: a parse job can legitimately
//! run for minutes on a large specification, and the submission contract is
//! one request awaited to completion. Callers abandon a hung exchange by
//! dropping the future.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::response::{HealthStatus, JobStatusInfo};
use reqwest::multipart::Form;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("pdspec-client/", env!("CARGO_PKG_VERSION"));

/// Handle to one parsing-service deployment.
#[derive(Debug, Clone)]
pub struct ParserService {
    http: reqwest::Client,
    base: Url,
    parse_endpoint: Url,
    health_endpoint: Url,
}

impl ParserService {
    /// Build a service handle from the configured base address.
    ///
    /// The base path is normalised to end with `/` so endpoint resolution
    /// appends rather than replaces the final path segment.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut base = Url::parse(&config.service_base).map_err(|e| {
            ClientError::InvalidConfig(format!(
                "service base URL '{}': {}",
                config.service_base, e
            ))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let parse_endpoint = join_endpoint(&base, "parse")?;
        let health_endpoint = join_endpoint(&base, "health")?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::Internal(format!("HTTP client construction: {e}")))?;

        debug!("parsing service at {}", base);
        Ok(Self {
            http,
            base,
            parse_endpoint,
            health_endpoint,
        })
    }

    /// The normalised service base URL. Download links are resolved
    /// against this.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Issue the parse upload. Classification of the response is the
    /// submitter's job; this is the raw exchange only.
    pub(crate) async fn send_parse(&self, form: Form) -> reqwest::Result<reqwest::Response> {
        self.http
            .post(self.parse_endpoint.clone())
            .multipart(form)
            .send()
            .await
    }

    /// `GET /health` — liveness probe.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json(self.health_endpoint.clone()).await
    }

    /// `GET /jobs/{job_id}` — look up a completed job's output files.
    pub async fn job_status(&self, job_id: &str) -> Result<JobStatusInfo, ClientError> {
        let endpoint = join_endpoint(&self.base, &format!("jobs/{job_id}"))?;
        self.get_json(endpoint).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::ServiceUnreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::MalformedResponse {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

fn join_endpoint(base: &Url, rel: &str) -> Result<Url, ClientError> {
    base.join(rel)
        .map_err(|e| ClientError::Internal(format!("endpoint '{rel}' against '{base}': {e}")))
}
