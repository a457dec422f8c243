//! insights-core - Core types and traits for the Flex Insights report exporter.

pub mod credentials;
pub mod error;
pub mod http;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use http::{ApiRequest, ApiResponse, BodyStream, Method};
pub use tokens::{AccessToken, SessionToken};
pub use traits::{ResultSink, Transport};
pub use types::{ApiUrl, ExportTarget, ProfileReference, ReportLocator};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
