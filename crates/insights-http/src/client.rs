//! Stage-level client.

use insights_core::{ApiRequest, ApiUrl, Method, Transport};

use crate::endpoints::{ACCEPT, APPLICATION_JSON, CONTENT_TYPE};

/// Client for the individual protocol legs.
///
/// Each leg lives in its own module: [`login`](Self::login) and
/// [`acquire_access_token`](Self::acquire_access_token) in `session`,
/// [`request_export`](Self::request_export) and
/// [`poll_and_download`](Self::poll_and_download) in `export`, and
/// [`logout`](Self::logout) in `teardown`.
#[derive(Debug, Clone)]
pub struct InsightsClient<T> {
    transport: T,
    api: ApiUrl,
}

impl<T: Transport> InsightsClient<T> {
    pub fn new(transport: T, api: ApiUrl) -> Self {
        Self { transport, api }
    }

    /// Returns the API base URL.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// A request to an API path with the JSON `Accept` and `Content-Type`
    /// headers every endpoint except the download expects.
    pub(crate) fn json_request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, self.api.endpoint(path))
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
    }
}
