//! insights-http - HTTP client for the Flex Insights export protocol.
//!
//! The protocol runs in three legs: log in for a session token, exchange it
//! for a temporary access token, then request a raw report export and poll
//! its locator until the report is ready. The session is logged out
//! afterwards whether or not the export worked.
//!
//! [`ExportPipeline`] runs the whole sequence. [`InsightsClient`] exposes each
//! leg on its own.

mod client;
mod endpoints;
mod export;
mod pipeline;
mod poll;
mod session;
mod teardown;
mod transport;

#[cfg(test)]
mod mock;

pub use client::InsightsClient;
pub use export::{Download, ExportState};
pub use pipeline::{ExportPipeline, ExportSummary, Progress};
pub use poll::PollPolicy;
pub use session::{AuthorizedSession, Session};
pub use transport::HttpTransport;
