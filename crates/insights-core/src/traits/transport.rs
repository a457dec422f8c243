//! Transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{ApiRequest, ApiResponse};

/// Sends one request and returns the raw response.
///
/// Implementations never inspect status codes and never retry. The returned
/// body is not drained; callers read or drop it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }
}
