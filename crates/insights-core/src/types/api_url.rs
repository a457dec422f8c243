//! API base URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

use super::ReportLocator;

/// The production Flex Insights analytics host.
pub const DEFAULT_API_URL: &str = "https://analytics.ytica.com";

/// A validated base URL for the Flex Insights API.
///
/// The URL must be absolute and use HTTPS (HTTP is accepted for localhost so
/// tests can point at a mock server).
///
/// # Example
///
/// ```
/// use insights_core::ApiUrl;
///
/// let api = ApiUrl::new("https://analytics.ytica.com").unwrap();
/// assert_eq!(api.endpoint("/gdc/account/login"),
///            "https://analytics.ytica.com/gdc/account/login");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the absolute URL of an API path such as `/gdc/account/token`.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Resolves a `uri` returned by the service against this base.
    ///
    /// The export endpoint answers with a host-relative path. A `uri` that
    /// resolves to a different origin (scheme, host or port) is rejected, so
    /// the access token cookie is only ever sent to the API host.
    pub fn resolve(&self, uri: &str) -> Result<ReportLocator, Error> {
        if uri.trim().is_empty() {
            return Err(InvalidInputError::Locator {
                value: uri.to_string(),
                reason: "empty".to_string(),
            }
            .into());
        }

        let url = self.0.join(uri).map_err(|e| InvalidInputError::Locator {
            value: uri.to_string(),
            reason: e.to_string(),
        })?;

        if url.origin() != self.0.origin() {
            return Err(InvalidInputError::Locator {
                value: uri.to_string(),
                reason: format!("must stay on {}", self.0.origin().ascii_serialization()),
            }
            .into());
        }

        Ok(ReportLocator::new(url))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
