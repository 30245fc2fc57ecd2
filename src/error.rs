//! Error types for the pdspec-client library.
//!
//! Two distinct types reflect two distinct failure modes:
//!
//! * [`ClientError`] — everything that is resolved **before a submission
//!   starts** (no file attached, unreadable file, bad base URL) or that
//!   happens on the auxiliary endpoints (`/health`, `/jobs/{id}`). Returned
//!   as `Err(ClientError)` from builders, config validation, and
//!   [`crate::service::ParserService`] calls.
//!
//! * [`crate::pipeline::submit::SubmitFailure`] — the terminal state of a
//!   submission attempt. Transport and service failures are normalised into
//!   it at the submission boundary and stored inside
//!   [`crate::pipeline::submit::JobOutcome::Failed`], never re-thrown.
//!
//! The separation keeps the submit path infallible from the caller's point
//! of view: `submit` always settles into an outcome, and only code that runs
//! before the request leaves the process can return `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdspec-client library outside the
/// submission state machine.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Draft errors ──────────────────────────────────────────────────────
    /// `build()` was called on a draft with no file attached.
    #[error("No PDF file attached to the upload draft.\nAttach one with file_path() or file_bytes() before build().")]
    MissingFile,

    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or base-URL validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Auxiliary endpoint errors ─────────────────────────────────────────
    /// A health or job-status call failed before a response arrived.
    #[error("Failed to reach '{url}': {reason}\nCheck the parsing service is running.")]
    ServiceUnreachable { url: String, reason: String },

    /// A health or job-status call returned a non-success status.
    #[error("'{url}' returned HTTP {status}")]
    UnexpectedStatus { url: String, status: u16 },

    /// A response body did not match the expected JSON shape.
    #[error("Malformed response from '{url}': {reason}")]
    MalformedResponse { url: String, reason: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
