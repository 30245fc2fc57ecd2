//! CLI binary for pdspec-client.
//!
//! A thin shim over the library crate that maps CLI flags to an upload
//! draft, drives one submission, and renders the outcome.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdspec_client::{
    count_summary, download_links, encode, ClientConfig, DraftBuilder, JobOutcome, JobSubmitter,
    ParserService, DEFAULT_DOC_TITLE, DEFAULT_SERVICE_BASE,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse a specification with the default title
  pdspec usb_pd_r3.pdf

  # Explicit ToC page range (1-indexed, inclusive)
  pdspec --toc-start 13 --toc-end 34 usb_pd_r3.pdf

  # Custom title, LLM-assisted extraction
  pdspec --title "USB PD R3.1 Spec" --use-llm usb_pd_r3.pdf

  # Remote service, JSON output
  pdspec --service http://parser.internal:8000 --json usb_pd_r3.pdf

  # Check the service is up / look up a finished job
  pdspec --health
  pdspec --job 20240801T120000

ENVIRONMENT VARIABLES:
  PDSPEC_SERVICE    Base URL of the parsing service (default http://localhost:8000)
  PDSPEC_TITLE      Document title sent with the upload
"#;

/// Submit PDF specifications to the USB-PD parsing service.
#[derive(Parser, Debug)]
#[command(
    name = "pdspec",
    version,
    about = "Submit PDF specifications to the USB-PD parsing service",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to submit.
    #[arg(required_unless_present_any = ["health", "job"])]
    input: Option<PathBuf>,

    /// Document title attached to the upload.
    #[arg(long, env = "PDSPEC_TITLE")]
    title: Option<String>,

    /// First page of the table of contents (1-indexed).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    toc_start: Option<u32>,

    /// Last page of the table of contents (1-indexed, inclusive).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    toc_end: Option<u32>,

    /// Number of ToC pages to scan when no explicit range is given.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    toc_pages: Option<u32>,

    /// Ask the service to run its LLM-assisted extraction pass.
    #[arg(long)]
    use_llm: bool,

    /// Base URL of the parsing service.
    #[arg(long, env = "PDSPEC_SERVICE", default_value = DEFAULT_SERVICE_BASE)]
    service: String,

    /// Print the raw JSON response instead of the formatted summary.
    #[arg(long)]
    json: bool,

    /// Check service liveness and exit.
    #[arg(long)]
    health: bool,

    /// Look up a finished job's output files and exit.
    #[arg(long, value_name = "JOB_ID")]
    job: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Config + service handle ──────────────────────────────────────────
    let config = ClientConfig::builder()
        .service_base(&cli.service)
        .doc_title(cli.title.clone().unwrap_or_else(|| DEFAULT_DOC_TITLE.to_string()))
        .build()
        .context("Invalid configuration")?;
    let service = ParserService::new(&config).context("Invalid service address")?;

    // ── Auxiliary modes ──────────────────────────────────────────────────
    if cli.health {
        let health = service.health().await.context("Health check failed")?;
        if health.is_ok() {
            println!("{} service at {} is up", green("✔"), service.base());
        } else {
            println!(
                "{} service at {} reports status '{}'",
                cyan("⚠"),
                service.base(),
                health.status
            );
        }
        return Ok(());
    }

    if let Some(ref job_id) = cli.job {
        let status = service
            .job_status(job_id)
            .await
            .with_context(|| format!("Job '{job_id}' could not be looked up"))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }
        println!("{} job {}", cyan("◆"), bold(&status.job_id));
        if let Some(ref out_dir) = status.out_dir {
            println!("  output dir: {out_dir}");
        }
        for (key, value) in &status.files {
            let shown = match value.as_str() {
                Some(path) => path.to_string(),
                None => value.to_string(),
            };
            println!("  {:<18} {}", key, dim(&shown));
        }
        return Ok(());
    }

    // ── Build the draft ──────────────────────────────────────────────────
    let input = cli
        .input
        .as_ref()
        .context("A PDF file is required unless --health or --job is given")?;

    let mut builder = DraftBuilder::new()
        .file_path(input)
        .context("Failed to prepare the upload")?
        .doc_title(&config.doc_title)
        .use_llm(cli.use_llm);
    if let Some(page) = cli.toc_start {
        builder = builder.toc_start(page);
    }
    if let Some(page) = cli.toc_end {
        builder = builder.toc_end(page);
    }
    if let Some(pages) = cli.toc_pages {
        builder = builder.toc_pages(pages);
    }
    let draft = builder.build().context("Failed to prepare the upload")?;

    // ── Submit ───────────────────────────────────────────────────────────
    let spinner = if cli.quiet || cli.json {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Uploading {} and parsing…", input.display()));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    let mut submitter = JobSubmitter::new(service);
    submitter.submit(encode(draft)).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    // ── Render the outcome ───────────────────────────────────────────────
    match submitter.outcome() {
        JobOutcome::Succeeded(response) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(response)?);
                return Ok(());
            }

            println!(
                "{} parse job {} finished",
                green("✔"),
                bold(&response.job_id)
            );

            let counts = count_summary(&response.counts);
            println!("  ToC entries      {:>6}", counts.toc);
            println!("  Sections         {:>6}", counts.sections);
            println!("  Metadata         {:>6}", counts.metadata);
            println!("  Validations      {:>6}", counts.validations);
            println!("  Missing sections {:>6}", counts.missing_sections);
            println!("  Extra sections   {:>6}", counts.extra_sections);

            let links = download_links(
                submitter.service().base(),
                &response.job_id,
                &response.files,
            );
            if !links.is_empty() {
                println!("\n{}", bold("Downloads"));
                for link in &links {
                    println!(
                        "  {:<28} {}",
                        link.display_name,
                        dim(link.resolved_url.as_str())
                    );
                }
            }
            Ok(())
        }
        JobOutcome::Failed(failure) => {
            eprintln!("{} {}", red("✘"), red(&failure.message));
            std::process::exit(1);
        }
        outcome => {
            // A finished submission is always settled.
            eprintln!("{} unexpected state: {outcome:?}", red("✘"));
            std::process::exit(1);
        }
    }
}
