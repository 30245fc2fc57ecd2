//! Wire types for the parsing service's JSON responses.
//!
//! The service's response shape has drifted over time: the validations
//! metric has appeared as both `validations` and `validation`, and the
//! `missing_sections` / `extra_sections` keys are present in some deployments
//! and absent in others. `counts` and `files` are therefore kept as raw JSON
//! maps here and interpreted leniently by [`crate::pipeline::project`],
//! rather than pinned to a fixed schema that a service upgrade would break.
//!
//! serde_json is built with `preserve_order`, so map iteration follows the
//! order the service emitted — the order download links are rendered in.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Successful response from `POST /parse`.
///
/// Immutable once received; projections recompute their views from it on
/// every render instead of mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Opaque job identifier allocated by the service.
    pub job_id: String,

    /// Echo of the submitted document title, when the service returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_title: Option<String>,

    /// Named numeric metrics (`toc`, `sections`, `metadata`, …).
    #[serde(default)]
    pub counts: Map<String, Value>,

    /// Artifact key → server-relative path or filename.
    #[serde(default)]
    pub files: Map<String, Value>,

    /// Server-side output directory, when the service returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Response from `GET /jobs/{job_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusInfo {
    pub job_id: String,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub files: Map<String, Value>,
}
