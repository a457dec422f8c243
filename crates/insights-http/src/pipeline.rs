//! The full export run: login, token, export, poll, logout, save.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, instrument, warn};

use insights_core::error::{Error, Stage, TeardownError};
use insights_core::{
    AccessToken, ApiUrl, Credentials, ExportTarget, ResultSink, Transport,
};

use crate::client::InsightsClient;
use crate::export::{Download, ExportState};
use crate::poll::PollPolicy;
use crate::session::{AuthorizedSession, Session};

/// Observable steps of a run, for progress output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    LoggingIn,
    AcquiringToken,
    Export(ExportState),
    /// About to sleep before poll retry `attempt`.
    Waiting { attempt: u32, delay: Duration },
    LoggingOut,
    Saving,
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct ExportSummary {
    pub destination: PathBuf,
    pub bytes_written: u64,
    pub polls: u32,
    /// Set when logout failed. The export itself still succeeded.
    pub teardown_error: Option<TeardownError>,
}

type ProgressFn = dyn Fn(Progress) + Send + Sync;

/// Runs every protocol leg in order, carrying session state between them.
///
/// Once a session token exists, logout is attempted exactly once, whatever
/// happens afterwards. It runs after the download response arrives and
/// before the body is saved.
pub struct ExportPipeline<T> {
    client: InsightsClient<T>,
    policy: PollPolicy,
    progress: Box<ProgressFn>,
}

impl<T: Transport> ExportPipeline<T> {
    pub fn new(transport: T, api: ApiUrl) -> Self {
        Self {
            client: InsightsClient::new(transport, api),
            policy: PollPolicy::default(),
            progress: Box::new(|_| {}),
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: impl Fn(Progress) + Send + Sync + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn client(&self) -> &InsightsClient<T> {
        &self.client
    }

    pub fn poll_policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Export `target` and save it to `destination` through `sink`.
    #[instrument(skip_all, fields(report = %target, destination = %destination.display()))]
    pub async fn run<S: ResultSink + ?Sized>(
        &self,
        credentials: Credentials,
        target: &ExportTarget,
        sink: &S,
        destination: &Path,
    ) -> Result<ExportSummary, Error> {
        self.emit(Progress::LoggingIn);
        let session = self.client.login(credentials).await?;

        self.emit(Progress::AcquiringToken);
        let access_token = match self.client.acquire_access_token(&session).await {
            Ok(token) => token,
            Err(e) => {
                self.teardown(&session, None).await;
                return Err(e.into());
            }
        };
        let auth = session.authorize(access_token);

        let fetched = self.fetch(&auth, target).await;
        let teardown_error = self
            .teardown(auth.session(), Some(auth.access_token()))
            .await;
        let download = fetched?;

        self.emit(Progress::Saving);
        let bytes_written = match sink
            .write(destination, download.response.into_body())
            .await
        {
            Ok(n) => n,
            Err(e) => {
                self.emit(Progress::Export(ExportState::Failed));
                return Err(e.into());
            }
        };
        self.emit(Progress::Export(ExportState::Downloaded));
        info!(bytes_written, "Report saved");

        Ok(ExportSummary {
            destination: destination.to_path_buf(),
            bytes_written,
            polls: download.polls,
            teardown_error,
        })
    }

    /// Request the export and poll until a successful response is in hand.
    async fn fetch(
        &self,
        auth: &AuthorizedSession,
        target: &ExportTarget,
    ) -> Result<Download, Error> {
        let result = self.fetch_inner(auth, target).await;
        if result.is_err() {
            self.emit(Progress::Export(ExportState::Failed));
        }
        result
    }

    async fn fetch_inner(
        &self,
        auth: &AuthorizedSession,
        target: &ExportTarget,
    ) -> Result<Download, Error> {
        self.emit(Progress::Export(ExportState::Requested));
        let locator = self.client.request_export(auth, target).await?;

        self.emit(Progress::Export(ExportState::Polling));
        let download = self
            .client
            .poll_and_download(auth, &locator, &self.policy, &*self.progress)
            .await?;

        if !download.response.is_success() {
            return Err(Error::UnexpectedStatus {
                stage: Stage::Download,
                status: download.response.status(),
                url: download.locator.to_string(),
            });
        }

        self.emit(Progress::Export(ExportState::Ready));
        Ok(download)
    }

    /// Best-effort logout. Failures are logged and handed back for reporting.
    async fn teardown(
        &self,
        session: &Session,
        access_token: Option<&AccessToken>,
    ) -> Option<TeardownError> {
        self.emit(Progress::LoggingOut);
        match self.client.logout(session, access_token).await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Error logging out");
                Some(e)
            }
        }
    }

    fn emit(&self, progress: Progress) {
        (self.progress)(progress);
    }
}
