//! Export configuration: flags and env defaults, validated before any call.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use insights_core::{ApiUrl, Credentials, ExportTarget};
use insights_http::PollPolicy;

use crate::commands::export::ExportArgs;

/// Everything an export run needs, already validated.
#[derive(Debug)]
pub struct ExportConfig {
    pub credentials: Credentials,
    pub target: ExportTarget,
    pub output: PathBuf,
    pub api: ApiUrl,
    pub poll: PollPolicy,
}

impl ExportConfig {
    pub fn from_args(args: ExportArgs) -> Result<Self> {
        let credentials = match (args.user, args.password) {
            (Some(user), Some(password)) => Credentials::new(user, password),
            _ => bail!("Credentials not found. See --help for instructions."),
        };
        if credentials.is_incomplete() {
            bail!("Credentials not found. See --help for instructions.");
        }

        let target =
            ExportTarget::new(args.workspace, args.object_id).context("Invalid export target")?;

        if args.output.as_os_str().is_empty() {
            bail!("Output file must not be empty");
        }

        let api = ApiUrl::new(&args.base_url).context("Invalid API base URL")?;
        let poll = PollPolicy::new(Duration::from_secs(args.poll_delay), args.max_retries);

        Ok(Self {
            credentials,
            target,
            output: args.output,
            api,
            poll,
        })
    }
}
