//! Scripted in-memory transport for stage tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use insights_core::error::TransportError;
use insights_core::{ApiRequest, ApiResponse, Method, Transport};

/// Replays queued responses in order and records every request it sees.
/// An empty queue answers with a connection error.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push(ApiResponse::from_bytes(status, body.to_string()));
    }

    pub fn push_raw(&self, status: u16, body: &'static str) {
        self.push(ApiResponse::from_bytes(status, body));
    }

    pub fn push_connection_error(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Connection {
                message: "connection refused".to_string(),
            }));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, url_suffix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method() == method && r.url().ends_with(url_suffix))
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::Connection {
                    message: "no scripted response".to_string(),
                })
            })
    }
}

pub fn login_ok(token: &str, profile: &str) -> ApiResponse {
    ApiResponse::from_bytes(
        200,
        json!({"userLogin": {"profile": profile, "state": "/gdc/account/login/p1", "token": token}})
            .to_string(),
    )
}

pub fn token_ok(token: &str) -> ApiResponse {
    ApiResponse::from_bytes(200, json!({"userToken": {"token": token}}).to_string())
}

pub fn export_ok(uri: &str) -> ApiResponse {
    ApiResponse::from_bytes(201, json!({"uri": uri}).to_string())
}

pub fn accepted() -> ApiResponse {
    ApiResponse::from_bytes(202, "")
}

/// Sink that keeps written reports in memory, or fails every write.
#[derive(Default)]
pub struct MemorySink {
    pub written: Mutex<Vec<(std::path::PathBuf, Vec<u8>)>>,
    pub fail: bool,
}

impl MemorySink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl insights_core::ResultSink for MemorySink {
    async fn write(
        &self,
        destination: &std::path::Path,
        body: insights_core::BodyStream,
    ) -> Result<u64, insights_core::error::PersistenceError> {
        use futures_util::StreamExt;

        if self.fail {
            return Err(insights_core::error::PersistenceError::Io {
                path: destination.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }

        let mut body = body;
        let mut buf = Vec::new();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|source| insights_core::error::PersistenceError::Stream {
                path: destination.to_path_buf(),
                source,
            })?;
            buf.extend_from_slice(&chunk);
        }
        let len = buf.len() as u64;
        self.written
            .lock()
            .unwrap()
            .push((destination.to_path_buf(), buf));
        Ok(len)
    }
}
