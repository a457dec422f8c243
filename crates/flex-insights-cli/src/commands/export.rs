//! Export command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use insights_core::types::DEFAULT_API_URL;
use insights_file::FileSink;
use insights_http::{ExportPipeline, ExportState, HttpTransport, Progress};

use crate::config::ExportConfig;
use crate::output;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Login username (required) - can also be set using the FLEX_INSIGHTS_USER env var
    #[arg(short, long, env = "FLEX_INSIGHTS_USER", hide_env_values = true)]
    pub user: Option<String>,

    /// Login password (required) - can also be set using the FLEX_INSIGHTS_PASSWORD env var
    #[arg(short, long, env = "FLEX_INSIGHTS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Workspace ID (required)
    #[arg(short, long)]
    pub workspace: String,

    /// Report object ID (required)
    #[arg(short = 'o', long = "objectid")]
    pub object_id: String,

    /// Output file (required)
    #[arg(short = 'f', long)]
    pub output: PathBuf,

    /// Flex Insights API base URL
    #[arg(long, env = "FLEX_INSIGHTS_BASE_URL", default_value = DEFAULT_API_URL)]
    pub base_url: String,

    /// Seconds to wait before the first download retry; later retries wait
    /// proportionally longer
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    pub poll_delay: u64,

    /// Download retries while the report is still being generated
    #[arg(long, default_value_t = 8)]
    pub max_retries: u32,
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let config = ExportConfig::from_args(args)?;
    debug!(report = %config.target, api = %config.api, output = %config.output.display(), "Export configured");

    let transport = HttpTransport::new().context("Failed to create HTTP client")?;
    let max_retries = config.poll.max_retries;
    let pipeline = ExportPipeline::new(transport, config.api)
        .with_poll_policy(config.poll)
        .with_progress(move |progress| report_progress(progress, max_retries));

    let summary = pipeline
        .run(
            config.credentials,
            &config.target,
            &FileSink::new(),
            &config.output,
        )
        .await
        .context("Failed to export report")?;

    if let Some(e) = &summary.teardown_error {
        output::warning(&format!("Error logging out: {}", e));
    }

    output::success(&format!(
        "Report successfully saved to: {}",
        summary.destination.display()
    ));
    output::field("Bytes", &summary.bytes_written.to_string());

    Ok(())
}

fn report_progress(progress: Progress, max_retries: u32) {
    match progress {
        Progress::LoggingIn => output::step("Retrieving session token..."),
        Progress::AcquiringToken => output::step("Retrieving temporary token..."),
        Progress::Export(ExportState::Requested) => output::step("Exporting report..."),
        Progress::Export(ExportState::Polling) => output::step("Downloading report..."),
        Progress::Waiting { attempt, delay } => output::step(&format!(
            "Downloading report - this may take some time... (retry {}/{} in {}s)",
            attempt,
            max_retries,
            delay.as_secs()
        )),
        Progress::LoggingOut => output::step("Logging out..."),
        Progress::Saving => output::step("Saving report..."),
        Progress::Export(_) => {}
    }
}
