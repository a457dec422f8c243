//! Result sink trait.

use std::path::Path;

use async_trait::async_trait;

use crate::error::PersistenceError;
use crate::http::BodyStream;

/// Durable destination for a downloaded report.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Copy `body` into `destination`, returning the number of bytes written.
    async fn write(&self, destination: &Path, body: BodyStream) -> Result<u64, PersistenceError>;
}
