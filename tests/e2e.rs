//! End-to-end tests for pdspec-client.
//!
//! The parsing service is stood in for by a `wiremock` server, so these run
//! offline and in CI. They cover the full draft → payload → submit →
//! project pipeline, the submission state machine, and the two auxiliary
//! endpoints.

use pdspec_client::{
    count_summary, download_links, encode, parse_document, ClientConfig, DraftBuilder, JobOutcome,
    JobSubmitter, ParserService, SubmitFailure, UploadDraft, DEFAULT_DOC_TITLE,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n%%EOF\n".to_vec()
}

fn draft() -> UploadDraft {
    DraftBuilder::new()
        .file_bytes("usb_pd_r3.pdf", pdf_bytes())
        .expect("valid pdf bytes")
        .build()
        .expect("draft")
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .service_base(server.uri())
        .build()
        .expect("valid config")
}

fn submitter_for(server: &MockServer) -> JobSubmitter {
    let service = ParserService::new(&config_for(server)).expect("service");
    JobSubmitter::new(service)
}

fn scenario_a_body() -> serde_json::Value {
    json!({
        "job_id": "job1",
        "counts": { "toc": 12, "sections": 340, "metadata": 58, "validations": 3 },
        "files": { "toc_jsonl": "/out/usb_pd_toc.jsonl" }
    })
}

// ── Submission scenarios ─────────────────────────────────────────────────────

#[tokio::test]
async fn success_projects_counts_and_links() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_a_body()))
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server);
    submitter.submit(encode(draft())).await;

    let outcome = submitter.outcome();
    assert!(!outcome.is_pending(), "a finished submission must settle");
    let response = outcome.response().expect("succeeded");
    assert_eq!(response.job_id, "job1");

    let counts = count_summary(&response.counts);
    assert_eq!(counts.toc, 12);
    assert_eq!(counts.sections, 340);
    assert_eq!(counts.metadata, 58);
    assert_eq!(counts.validations, 3);

    let links = download_links(submitter.service().base(), &response.job_id, &response.files);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].display_name, "usb_pd_toc.jsonl");
    assert_eq!(
        links[0].resolved_url.as_str(),
        format!("{}/download/job1/usb_pd_toc.jsonl", server.uri())
    );
}

#[tokio::test]
async fn service_failure_reports_the_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server);
    submitter.submit(encode(draft())).await;

    assert_eq!(
        submitter.outcome(),
        &JobOutcome::Failed(SubmitFailure {
            message: "Error: 500 Internal Server Error".to_string()
        })
    );
}

#[tokio::test]
async fn transport_failure_reports_upload_failed() {
    // Nothing listens on port 9; the connection is refused before any
    // response exists.
    let config = ClientConfig::builder()
        .service_base("http://127.0.0.1:9")
        .build()
        .expect("valid config");
    let service = ParserService::new(&config).expect("service");
    let mut submitter = JobSubmitter::new(service);

    submitter.submit(encode(draft())).await;

    assert_eq!(
        submitter.outcome(),
        &JobOutcome::Failed(SubmitFailure {
            message: "Upload failed".to_string()
        })
    );
}

#[tokio::test]
async fn undecodable_success_body_reports_upload_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server);
    submitter.submit(encode(draft())).await;

    assert_eq!(
        submitter.outcome().failure().map(|f| f.message.as_str()),
        Some("Upload failed")
    );
}

#[tokio::test]
async fn resubmission_discards_the_previous_outcome() {
    let server = MockServer::start().await;
    // First attempt hits a 500; the second lands on the success mock.
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_a_body()))
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server);

    submitter.submit(encode(draft())).await;
    assert!(submitter.outcome().failure().is_some());

    submitter.submit(encode(draft())).await;
    assert!(
        submitter.outcome().failure().is_none(),
        "the failed outcome must not survive a re-submission"
    );
    assert_eq!(
        submitter.outcome().response().map(|r| r.job_id.as_str()),
        Some("job1")
    );
}

// ── Wire format ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn multipart_parts_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "job1" })))
        .mount(&server)
        .await;

    let draft = DraftBuilder::new()
        .file_bytes("usb_pd_r3.pdf", pdf_bytes())
        .expect("valid pdf bytes")
        .toc_start(13)
        .toc_end(34)
        .build()
        .expect("draft");

    let mut submitter = submitter_for(&server);
    submitter.submit(encode(draft)).await;

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);

    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"usb_pd_r3.pdf\""));
    assert!(body.contains("application/pdf"));
    assert!(body.contains("name=\"doc_title\""));
    assert!(body.contains(DEFAULT_DOC_TITLE));
    assert!(body.contains("name=\"toc_start\""));
    assert!(body.contains("name=\"toc_end\""));
}

#[tokio::test]
async fn unset_bounds_never_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "job_id": "job1" })))
        .mount(&server)
        .await;

    let mut submitter = submitter_for(&server);
    submitter.submit(encode(draft())).await;

    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body);

    assert!(!body.contains("name=\"toc_start\""));
    assert!(!body.contains("name=\"toc_end\""));
    assert!(!body.contains("name=\"toc_pages\""));
    assert!(!body.contains("name=\"use_llm\""));
}

// ── One-shot entry point ─────────────────────────────────────────────────────

#[tokio::test]
async fn parse_document_round_trips_a_local_file() {
    use std::io::Write;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scenario_a_body()))
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(&pdf_bytes()).expect("write pdf");

    let outcome = parse_document(file.path(), &config_for(&server))
        .await
        .expect("no pre-submission error");
    assert_eq!(
        outcome.response().map(|r| r.job_id.as_str()),
        Some("job1")
    );
}

// ── Auxiliary endpoints ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let service = ParserService::new(&config_for(&server)).expect("service");
    let health = service.health().await.expect("health");
    assert!(health.is_ok());
}

#[tokio::test]
async fn job_status_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/job1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job1",
            "out_dir": "/outputs/job1",
            "files": { "toc_jsonl": "/outputs/job1/usb_pd_toc.jsonl" }
        })))
        .mount(&server)
        .await;

    let service = ParserService::new(&config_for(&server)).expect("service");
    let status = service.job_status("job1").await.expect("job status");
    assert_eq!(status.job_id, "job1");
    assert_eq!(status.out_dir.as_deref(), Some("/outputs/job1"));
    assert_eq!(status.files.len(), 1);
}

#[tokio::test]
async fn missing_job_surfaces_the_status() {
    use pdspec_client::ClientError;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = ParserService::new(&config_for(&server)).expect("service");
    let result = service.job_status("nope").await;
    assert!(matches!(
        result,
        Err(ClientError::UnexpectedStatus { status: 404, .. })
    ));
}
