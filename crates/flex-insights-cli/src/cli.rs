//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::export::ExportArgs;

/// Helper program for interacting with the Flex Insights API.
#[derive(Parser, Debug)]
#[command(name = "flex-insights")]
#[command(author, version = env!("FLEX_INSIGHTS_VERSION"), about)]
#[command(
    long_about = "A CLI tool for interacting with the Flex Insights API. It wraps the \
                  Flex Insights API with the aim to simplify its use."
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export reports.
    ///
    /// Rather than making three separate API calls, export a report with a
    /// single command. Example: flex-insights export --user me@email.com
    /// --password 123456 --workspace abcd --objectid 9999 --output myreport.csv
    Export(ExportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_with_short_flags() {
        let cli = Cli::try_parse_from([
            "flex-insights",
            "export",
            "-u",
            "me@email.com",
            "-p",
            "123456",
            "-w",
            "abcd",
            "-o",
            "9999",
            "-f",
            "myreport.csv",
        ])
        .unwrap();

        let Commands::Export(args) = cli.command;
        assert_eq!(args.user.as_deref(), Some("me@email.com"));
        assert_eq!(args.workspace, "abcd");
        assert_eq!(args.object_id, "9999");
        assert_eq!(args.output.to_str(), Some("myreport.csv"));
        assert_eq!(args.poll_delay, 10);
        assert_eq!(args.max_retries, 8);
    }

    #[test]
    fn export_requires_target_and_output() {
        let result = Cli::try_parse_from(["flex-insights", "export", "-u", "me", "-p", "pw"]);
        assert!(result.is_err());
    }
}
