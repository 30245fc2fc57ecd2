//! One-shot submission entry points.
//!
//! These wrap the full draft → payload → submit pipeline for callers that
//! want a single call per document. Hold a [`JobSubmitter`] directly instead
//! when the hosting view re-submits and needs to observe the pending state
//! between attempts.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::pipeline::draft::{DraftBuilder, UploadDraft};
use crate::pipeline::payload::encode;
use crate::pipeline::submit::{JobOutcome, JobSubmitter};
use crate::service::ParserService;
use std::path::Path;
use tracing::info;

/// Submit a local PDF with the config's default title and wait for the
/// outcome.
///
/// # Errors
/// Returns `Err(ClientError)` only for problems resolved before the
/// submission starts (missing or unreadable file, invalid base URL).
/// Service and transport failures arrive inside [`JobOutcome::Failed`].
pub async fn parse_document(
    input: impl AsRef<Path>,
    config: &ClientConfig,
) -> Result<JobOutcome, ClientError> {
    let draft = DraftBuilder::new()
        .file_path(input)?
        .doc_title(&config.doc_title)
        .build()?;
    parse_draft(draft, config).await
}

/// Submit a prepared draft and wait for the outcome.
pub async fn parse_draft(
    draft: UploadDraft,
    config: &ClientConfig,
) -> Result<JobOutcome, ClientError> {
    info!("submitting '{}' for parsing", draft.file.filename);
    let service = ParserService::new(config)?;
    let mut submitter = JobSubmitter::new(service);
    submitter.submit(encode(draft)).await;
    Ok(submitter.into_outcome())
}
