//! Export orchestration: request a raw report, then poll its locator.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use insights_core::error::{Error, Stage};
use insights_core::{ApiRequest, ApiResponse, ExportTarget, Method, ReportLocator, Transport};

use crate::client::InsightsClient;
use crate::endpoints::{COOKIE, ExportRequest, ExportResponse, ReportReq};
use crate::pipeline::Progress;
use crate::poll::PollPolicy;
use crate::session::AuthorizedSession;

/// HTTP 202: the report is still being generated.
const ACCEPTED: u16 = 202;

/// Where an export run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    /// The export request was sent.
    Requested,
    /// A locator was received and is being polled.
    Polling,
    /// The locator answered with something other than 202.
    Ready,
    /// The body was copied into the sink.
    Downloaded,
    /// Terminal failure.
    Failed,
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportState::Requested => "requested",
            ExportState::Polling => "polling",
            ExportState::Ready => "ready",
            ExportState::Downloaded => "downloaded",
            ExportState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The first non-202 answer from a report locator.
///
/// The status is not classified here: a 200 carries the report, anything
/// else is for the caller to interpret. The body has not been read.
#[derive(Debug)]
pub struct Download {
    pub response: ApiResponse,
    pub locator: ReportLocator,
    pub polls: u32,
}

impl<T: Transport> InsightsClient<T> {
    /// Ask the service to render the report and return its locator.
    ///
    /// Not retried: resubmitting would start a second export.
    #[instrument(skip(self, auth), fields(report = %target))]
    pub async fn request_export(
        &self,
        auth: &AuthorizedSession,
        target: &ExportTarget,
    ) -> Result<ReportLocator, Error> {
        info!("Exporting report");

        let body = ExportRequest {
            report_req: ReportReq {
                report: target.report_path(),
            },
        };
        let path = target.execute_path();
        let request = self
            .json_request(Method::Post, &path)
            .header(COOKIE, auth.access_token().cookie())
            .json(&body)
            .map_err(|source| Error::Transport {
                stage: Stage::ExportRequest,
                source,
            })?;
        let url = request.url().to_string();

        let response = self
            .transport()
            .send(request)
            .await
            .map_err(|source| Error::Transport {
                stage: Stage::ExportRequest,
                source,
            })?;

        if !response.is_success() {
            return Err(Error::UnexpectedStatus {
                stage: Stage::ExportRequest,
                status: response.status(),
                url,
            });
        }

        let body = response.bytes().await.map_err(|source| Error::Transport {
            stage: Stage::ExportRequest,
            source,
        })?;
        let parsed: ExportResponse =
            serde_json::from_slice(&body).map_err(|e| Error::MalformedResponse {
                stage: Stage::ExportRequest,
                reason: e.to_string(),
            })?;

        let locator = self
            .api()
            .resolve(&parsed.uri)
            .map_err(|e| Error::MalformedResponse {
                stage: Stage::ExportRequest,
                reason: e.to_string(),
            })?;

        debug!(locator = %locator, "Export accepted");
        Ok(locator)
    }

    /// Poll `locator` until it stops answering 202 or `policy` is exhausted.
    ///
    /// Each 202 body is dropped before waiting. The first non-202 response is
    /// returned with its body unread. A transport failure ends the export.
    #[instrument(skip(self, auth, progress), fields(locator = %locator))]
    pub async fn poll_and_download(
        &self,
        auth: &AuthorizedSession,
        locator: &ReportLocator,
        policy: &PollPolicy,
        progress: &(dyn Fn(Progress) + Send + Sync),
    ) -> Result<Download, Error> {
        info!("Downloading report");

        let request = ApiRequest::new(Method::Get, locator.as_str())
            .header(COOKIE, auth.access_token().cookie());

        let mut retries = 0;
        let mut polls = 0;
        loop {
            let response = self
                .transport()
                .send(request.clone())
                .await
                .map_err(|source| Error::Transport {
                    stage: Stage::Download,
                    source,
                })?;
            polls += 1;

            if response.status() != ACCEPTED {
                debug!(status = response.status(), polls, "Report locator answered");
                return Ok(Download {
                    response,
                    locator: locator.clone(),
                    polls,
                });
            }
            drop(response);

            if retries >= policy.max_retries {
                warn!(polls, "Report still not ready, giving up");
                return Err(Error::NotReady {
                    url: locator.as_str().to_string(),
                });
            }

            retries += 1;
            let delay = policy.delay_for(retries);
            info!(
                attempt = retries,
                max_retries = policy.max_retries,
                delay_secs = delay.as_secs_f64(),
                "Downloading report - this may take some time"
            );
            progress(Progress::Waiting {
                attempt: retries,
                delay,
            });
            tokio::time::sleep(delay).await;
        }
    }
}
