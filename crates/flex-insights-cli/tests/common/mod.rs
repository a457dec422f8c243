use std::process::Output;

use tokio::process::Command;

/// Run the CLI binary with arguments and an isolated environment.
///
/// Credential and base URL variables from the caller's shell are removed so
/// each test states exactly what it provides.
pub async fn run_cli(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_flex-insights"));
    cmd.args(args)
        .env_remove("FLEX_INSIGHTS_USER")
        .env_remove("FLEX_INSIGHTS_PASSWORD")
        .env_remove("FLEX_INSIGHTS_BASE_URL")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().await.expect("Failed to execute CLI")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
