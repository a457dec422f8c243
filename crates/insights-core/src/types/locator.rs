//! Report locator type.

use std::fmt;
use url::Url;

/// Absolute URL of a report artifact that may or may not be ready yet.
///
/// Obtained from the export request and valid for a single export run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLocator(Url);

impl ReportLocator {
    pub(crate) fn new(url: Url) -> Self {
        Self(url)
    }

    /// Returns the locator as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ReportLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
