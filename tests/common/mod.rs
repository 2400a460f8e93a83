//! Shared fixtures for fetch-parse integration tests.

use async_trait::async_trait;
use bytes::Bytes;
use fetch_parse::{FetchError, Request, Response, Transport};
use http::{HeaderMap, HeaderValue, StatusCode, header};

/// Transport returning the same canned response for every request.
pub struct CannedTransport {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
}

impl CannedTransport {
    pub fn new(status: u16, content_type: Option<&'static str>, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            content_type,
            body: body.into(),
        }
    }

    pub fn ok(content_type: &'static str, body: impl Into<Bytes>) -> Self {
        Self::new(200, Some(content_type), body)
    }
}

#[async_trait]
impl Transport for CannedTransport {
    async fn fetch(&self, _request: Request) -> Result<Response, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(value) = self.content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        }
        Ok(Response::from_bytes(self.status, headers, self.body.clone()))
    }
}
