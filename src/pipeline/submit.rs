//! Job submission: drive one parse request and track its lifecycle.
//!
//! ## State machine
//!
//! ```text
//! Idle ──submit──▶ Pending ──2xx──▶ Succeeded(ParseResponse)
//!                     │
//!                     └──non-2xx / transport──▶ Failed(SubmitFailure)
//!
//! Succeeded | Failed ──submit──▶ Pending   (prior outcome discarded)
//! ```
//!
//! The outcome slot has exactly one writer: `submit` takes `&mut self`, so
//! a second submission cannot start while one is in flight and no locking is
//! needed. Entering `Pending` replaces the previous result or error before
//! the network exchange begins — a caller can never observe a stale settled
//! state next to a pending attempt.
//!
//! ## Failure normalisation
//!
//! Both failure classes are terminal for the attempt and are stored, never
//! re-thrown:
//!
//! * service failure (non-2xx status) → `"Error: <status> <reason>"`,
//!   verbatim from the status line, body ignored;
//! * transport failure (connect error, aborted exchange, undecodable
//!   success body) → `"Upload failed"`, with the underlying cause logged
//!   at `warn` level rather than shown.
//!
//! There is no retry and no timeout. Dropping the `submit` future cancels
//! the HTTP exchange, so a response arriving after teardown can never be
//! applied to the outcome slot.

use crate::pipeline::payload::EncodedPayload;
use crate::response::ParseResponse;
use crate::service::ParserService;
use reqwest::StatusCode;
use std::fmt;
use tracing::{debug, info, warn};

/// Terminal failure of one submission attempt.
///
/// Ephemeral: replaced wholesale by the next attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure {
    pub message: String,
}

impl SubmitFailure {
    /// Service failure: the status line, shown verbatim.
    fn from_status(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");
        Self {
            message: format!("Error: {} {}", status.as_u16(), reason),
        }
    }

    /// Transport failure: a fixed message, details go to the log.
    fn upload_failed() -> Self {
        Self {
            message: "Upload failed".to_string(),
        }
    }
}

impl fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Lifecycle state of the current submission attempt.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JobOutcome {
    /// No submission has been attempted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The service accepted the job and returned its results.
    Succeeded(ParseResponse),
    /// The attempt ended in a service or transport failure.
    Failed(SubmitFailure),
}

impl JobOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, JobOutcome::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, JobOutcome::Pending)
    }

    /// Settled means the attempt has finished, either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, JobOutcome::Succeeded(_) | JobOutcome::Failed(_))
    }

    pub fn response(&self) -> Option<&ParseResponse> {
        match self {
            JobOutcome::Succeeded(response) => Some(response),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&SubmitFailure> {
        match self {
            JobOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Owns the request lifecycle for one view's submissions.
///
/// Created when the hosting view comes up, dropped when it goes away;
/// holds no global state. Exactly one [`JobOutcome`] is live at a time.
#[derive(Debug)]
pub struct JobSubmitter {
    service: ParserService,
    outcome: JobOutcome,
}

impl JobSubmitter {
    pub fn new(service: ParserService) -> Self {
        Self {
            service,
            outcome: JobOutcome::Idle,
        }
    }

    /// The service handle this submitter talks to.
    pub fn service(&self) -> &ParserService {
        &self.service
    }

    /// Current lifecycle state of the latest attempt.
    pub fn outcome(&self) -> &JobOutcome {
        &self.outcome
    }

    /// Consume the submitter, keeping only the outcome.
    pub fn into_outcome(self) -> JobOutcome {
        self.outcome
    }

    /// Submit a payload and wait for the attempt to settle.
    ///
    /// On return the outcome is exactly one of `Succeeded` or `Failed`,
    /// never `Pending`. Dropping the returned future abandons the attempt
    /// and leaves the outcome `Pending` until the next submission resets it.
    pub async fn submit(&mut self, payload: EncodedPayload) -> &JobOutcome {
        self.begin_attempt();
        let settled = self.run_attempt(payload).await;
        match &settled {
            JobOutcome::Succeeded(response) => {
                info!("parse job {} succeeded", response.job_id);
            }
            JobOutcome::Failed(failure) => {
                info!("parse attempt failed: {}", failure.message);
            }
            _ => {}
        }
        self.outcome = settled;
        &self.outcome
    }

    /// Enter `Pending`, discarding any previous result or error.
    fn begin_attempt(&mut self) {
        if self.outcome.is_settled() {
            debug!("discarding previous outcome for a new attempt");
        }
        self.outcome = JobOutcome::Pending;
    }

    async fn run_attempt(&self, payload: EncodedPayload) -> JobOutcome {
        let form = match payload.into_form() {
            Ok(form) => form,
            Err(e) => {
                warn!("payload could not be converted to a form: {e}");
                return JobOutcome::Failed(SubmitFailure::upload_failed());
            }
        };

        debug!("posting parse request to {}", self.service.base());
        let response = match self.service.send_parse(form).await {
            Ok(response) => response,
            Err(e) => {
                warn!("parse request failed before a response arrived: {e}");
                return JobOutcome::Failed(SubmitFailure::upload_failed());
            }
        };

        let status = response.status();
        if !status.is_success() {
            return JobOutcome::Failed(SubmitFailure::from_status(status));
        }

        match response.json::<ParseResponse>().await {
            Ok(body) => JobOutcome::Succeeded(body),
            Err(e) => {
                warn!("parse response body could not be decoded: {e}");
                JobOutcome::Failed(SubmitFailure::upload_failed())
            }
        }
    }
}
