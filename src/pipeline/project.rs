//! Response projection: raw service response → view models.
//!
//! Two projections feed the renderer: a counts summary and the list of
//! download links. Both are pure functions over the immutable
//! [`crate::response::ParseResponse`] — they are recomputed on every render
//! and never stored.
//!
//! Count keys are all optional with a zero default. Deployed services
//! disagree on the exact shape (`validation` vs `validations`, presence of
//! `missing_sections` / `extra_sections`), and a missing metric renders as
//! 0 rather than breaking the summary.

use serde_json::{Map, Value};
use tracing::warn;
use url::Url;

/// The counts summary shown after a successful parse.
///
/// Every field defaults to 0 when the service omits its key — a rendering
/// default, not a data correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountSummary {
    pub toc: u64,
    pub sections: u64,
    pub metadata: u64,
    pub validations: u64,
    pub missing_sections: u64,
    pub extra_sections: u64,
}

/// One downloadable output of a completed job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    /// Final path segment of the artifact's stored path.
    pub display_name: String,
    /// Absolute URL on the parsing service.
    pub resolved_url: Url,
}

/// Project the counts map into the summary view.
pub fn count_summary(counts: &Map<String, Value>) -> CountSummary {
    let metric = |key: &str| counts.get(key).and_then(Value::as_u64).unwrap_or(0);
    CountSummary {
        toc: metric("toc"),
        sections: metric("sections"),
        metadata: metric("metadata"),
        // Both spellings observed in the wild.
        validations: counts
            .get("validations")
            .or_else(|| counts.get("validation"))
            .and_then(Value::as_u64)
            .unwrap_or(0),
        missing_sections: metric("missing_sections"),
        extra_sections: metric("extra_sections"),
    }
}

/// Project the `files` map into download links, preserving wire order.
///
/// Each entry's display name is the text after the last `/` of its stored
/// path; the URL is the service base joined with
/// `download/{job_id}/{display_name}`. Entries that cannot be projected
/// (non-string path, empty name) are skipped with a warning — an empty or
/// absent map yields an empty list, never an error.
pub fn download_links(base: &Url, job_id: &str, files: &Map<String, Value>) -> Vec<DownloadLink> {
    files
        .iter()
        .filter_map(|(key, value)| {
            let Some(path) = value.as_str() else {
                warn!("artifact '{key}' has a non-string path, skipping");
                return None;
            };
            let display_name = path.rsplit('/').next().unwrap_or(path);
            if display_name.is_empty() {
                warn!("artifact '{key}' path '{path}' has no filename, skipping");
                return None;
            }
            match base.join(&format!("download/{job_id}/{display_name}")) {
                Ok(resolved_url) => Some(DownloadLink {
                    display_name: display_name.to_string(),
                    resolved_url,
                }),
                Err(e) => {
                    warn!("artifact '{key}' does not form a valid URL: {e}");
                    None
                }
            }
        })
        .collect()
}
