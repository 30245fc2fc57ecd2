//! # pdspec-client
//!
//! Submit PDF specifications to a remote USB-PD parsing service and render
//! the structured results.
//!
//! ## Why this crate?
//!
//! The parsing service does the heavy lifting — ToC extraction, section
//! splitting, validation — behind a single multipart endpoint. What callers
//! actually need on their side is the unglamorous part done carefully:
//! validating input before it crosses the wire, tracking one submission's
//! lifecycle without stale state, and turning a loosely-shaped JSON response
//! into stable view models. That workflow is this crate.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF selection
//!  │
//!  ├─ 1. Draft    validate file, title, optional ToC page bounds
//!  ├─ 2. Payload  encode the draft as a multipart body (pure)
//!  ├─ 3. Submit   POST /parse, track Idle → Pending → Succeeded/Failed
//!  └─ 4. Project  counts summary + download links, in wire order
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdspec_client::{parse_document, count_summary, ClientConfig, JobOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::default(); // http://localhost:8000
//!     match parse_document("usb_pd_r3.pdf", &config).await? {
//!         JobOutcome::Succeeded(response) => {
//!             let counts = count_summary(&response.counts);
//!             println!("job {}: {} sections", response.job_id, counts.sections);
//!         }
//!         JobOutcome::Failed(failure) => eprintln!("{}", failure.message),
//!         _ => unreachable!("a finished submission is always settled"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdspec` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdspec-client = { version = "0.4", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod response;
pub mod service;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{parse_document, parse_draft};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_DOC_TITLE, DEFAULT_SERVICE_BASE};
pub use error::ClientError;
pub use pipeline::draft::{DraftBuilder, FileAttachment, UploadDraft};
pub use pipeline::payload::{encode, EncodedPayload, PartBody, PayloadPart};
pub use pipeline::project::{count_summary, download_links, CountSummary, DownloadLink};
pub use pipeline::submit::{JobOutcome, JobSubmitter, SubmitFailure};
pub use response::{HealthStatus, JobStatusInfo, ParseResponse};
pub use service::ParserService;
