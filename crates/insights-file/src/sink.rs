//! File-backed result sink.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use insights_core::error::PersistenceError;
use insights_core::{BodyStream, ResultSink};

/// Writes reports to the local filesystem.
///
/// The report is streamed into a `.tmp` sibling and renamed over the
/// destination once complete, so an existing file is only replaced by a full
/// report. The parent directory must exist. On failure the temporary file is
/// removed and the destination is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl FileSink {
    pub fn new() -> Self {
        Self
    }

    fn temp_path(destination: &Path) -> PathBuf {
        let mut name = destination
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        destination.with_file_name(name)
    }

    async fn copy(
        file: &mut File,
        destination: &Path,
        mut body: BodyStream,
    ) -> Result<u64, PersistenceError> {
        let io = |source: std::io::Error| PersistenceError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let mut written = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|source| PersistenceError::Stream {
                path: destination.to_path_buf(),
                source,
            })?;
            file.write_all(&chunk).await.map_err(io)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io)?;
        file.sync_all().await.map_err(io)?;

        Ok(written)
    }
}

#[async_trait]
impl ResultSink for FileSink {
    #[instrument(skip(self, body), fields(destination = %destination.display()))]
    async fn write(&self, destination: &Path, body: BodyStream) -> Result<u64, PersistenceError> {
        debug!("Saving report");

        let io = |source: std::io::Error| PersistenceError::Io {
            path: destination.to_path_buf(),
            source,
        };
        let temp_path = Self::temp_path(destination);

        let mut file = File::create(&temp_path).await.map_err(io)?;
        let copied = Self::copy(&mut file, destination, body).await;
        drop(file);

        let result = match copied {
            Ok(written) => tokio::fs::rename(&temp_path, destination)
                .await
                .map(|()| written)
                .map_err(io),
            Err(e) => Err(e),
        };

        match result {
            Ok(written) => {
                debug!(written, "Report written");
                Ok(written)
            }
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(&temp_path).await {
                    warn!(error = %remove_err, "Failed to remove partial report");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures_util::stream;
    use insights_core::error::TransportError;
    use tempfile::TempDir;

    fn body(chunks: Vec<Result<Bytes, TransportError>>) -> BodyStream {
        Box::pin(stream::iter(chunks))
    }

    #[tokio::test]
    async fn writes_chunks_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let written = FileSink::new()
            .write(
                &path,
                body(vec![
                    Ok(Bytes::from_static(b"agent,calls\n")),
                    Ok(Bytes::from_static(b"ana,12\n")),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(written, 19);
        assert_eq!(std::fs::read(&path).unwrap(), b"agent,calls\nana,12\n");
        assert!(!dir.path().join("report.csv.tmp").exists());
    }

    #[tokio::test]
    async fn truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "old contents that are longer").unwrap();

        FileSink::new()
            .write(&path, body(vec![Ok(Bytes::from_static(b"new"))]))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn missing_directory_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("report.csv");

        let err = FileSink::new()
            .write(&path, body(vec![Ok(Bytes::from_static(b"x"))]))
            .await
            .unwrap_err();

        assert!(matches!(err, PersistenceError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[tokio::test]
    async fn broken_stream_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let err = FileSink::new()
            .write(
                &path,
                body(vec![
                    Ok(Bytes::from_static(b"partial")),
                    Err(TransportError::Body {
                        message: "connection reset".to_string(),
                    }),
                ]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, PersistenceError::Stream { .. }));
        assert!(!path.exists());
        assert!(!dir.path().join("report.csv.tmp").exists());
    }

    #[tokio::test]
    async fn broken_stream_keeps_existing_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        std::fs::write(&path, "queue,handled\nsales,7\n").unwrap();

        FileSink::new()
            .write(
                &path,
                body(vec![
                    Ok(Bytes::from_static(b"partial")),
                    Err(TransportError::Body {
                        message: "connection reset".to_string(),
                    }),
                ]),
            )
            .await
            .unwrap_err();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "queue,handled\nsales,7\n"
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
