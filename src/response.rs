//! Response type, one-shot body readers, and the decoded body slot.
//!
//! [`Response`] is the value flowing through the decode pipeline. Its raw
//! body is behind the [`ResponseBody`] capability trait so any transport can
//! supply one; [`MemoryBody`] is the canonical in-memory implementation. The
//! decoded result lives in an engine-owned slot ([`Body`]) that
//! [`Response::set_body`] replaces unconditionally, so instrumentation
//! layered on the same response can never leave a stale value behind.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, StatusCode, header};
use mime::Mime;

use crate::error::BodyError;

/// One-shot body reader capability required of a transport's responses.
///
/// After either reader has been invoked, [`is_used`](Self::is_used) must
/// report `true` and every further read must fail with
/// [`BodyError::AlreadyUsed`]. The decode pipeline reads a body at most
/// once and relies on `is_used` to skip responses that were already
/// consumed, which is what makes nested wrapping idempotent.
#[async_trait]
pub trait ResponseBody: Send {
    /// Whether the body has already been consumed.
    fn is_used(&self) -> bool;

    /// Read the full body as decoded text.
    ///
    /// # Errors
    /// Fails with [`BodyError::AlreadyUsed`] on a second read, or
    /// [`BodyError::Io`] if the underlying source fails.
    async fn text(&mut self) -> Result<String, BodyError>;

    /// Read the full body as raw bytes.
    ///
    /// # Errors
    /// Fails with [`BodyError::AlreadyUsed`] on a second read, or
    /// [`BodyError::Io`] if the underlying source fails.
    async fn bytes(&mut self) -> Result<Bytes, BodyError>;
}

/// In-memory [`ResponseBody`] backed by a byte buffer.
///
/// Text reads decode as UTF-8 with malformed sequences replaced by
/// [`char::REPLACEMENT_CHARACTER`].
#[derive(Clone, Debug, Default)]
pub struct MemoryBody {
    data: Bytes,
    used: bool,
}

impl MemoryBody {
    /// Wrap a byte buffer as an unconsumed body.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            used: false,
        }
    }

    fn take(&mut self) -> Result<Bytes, BodyError> {
        if self.used {
            return Err(BodyError::AlreadyUsed);
        }
        self.used = true;
        Ok(std::mem::take(&mut self.data))
    }
}

#[async_trait]
impl ResponseBody for MemoryBody {
    fn is_used(&self) -> bool { self.used }

    async fn text(&mut self) -> Result<String, BodyError> {
        let data = self.take()?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    async fn bytes(&mut self) -> Result<Bytes, BodyError> { self.take() }
}

/// Decoded body slot attached to a [`Response`].
///
/// `Unset` means no decode was attempted: the response passed through the
/// pipeline untouched (ineligible, or no pattern matched). `Empty` means a
/// decoder ran but the payload carried no value, which only the JSON decoder
/// produces for a zero-length body.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Body {
    /// No decode was attempted.
    #[default]
    Unset,
    /// A decoder ran and the payload was empty.
    Empty,
    /// Body decoded as text.
    Text(String),
    /// Body read as raw bytes.
    Bytes(Bytes),
    /// Body decoded as structured JSON data.
    Json(serde_json::Value),
}

impl Body {
    /// Whether any decode outcome was attached.
    #[must_use]
    pub const fn is_set(&self) -> bool { !matches!(self, Self::Unset) }

    /// The decoded text, if this is a text body.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The raw bytes, if this is a byte body.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The decoded JSON value, if this is a structured body.
    #[must_use]
    pub const fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// An HTTP response carrying status, headers, a one-shot raw body, and the
/// decoded body slot.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    raw: Box<dyn ResponseBody>,
    body: Body,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

impl Response {
    /// Assemble a response from transport-provided parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, raw: Box<dyn ResponseBody>) -> Self {
        Self {
            status,
            headers,
            raw,
            body: Body::Unset,
        }
    }

    /// Assemble a response over an in-memory body.
    ///
    /// # Examples
    ///
    /// ```
    /// use fetch_parse::Response;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let response = Response::from_bytes(StatusCode::OK, HeaderMap::new(), "hello");
    /// assert_eq!(response.status(), StatusCode::OK);
    /// assert!(!response.body_used());
    /// ```
    #[must_use]
    pub fn from_bytes(status: StatusCode, headers: HeaderMap, data: impl Into<Bytes>) -> Self {
        Self::new(status, headers, Box::new(MemoryBody::new(data)))
    }

    /// The response status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode { self.status }

    /// All response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap { &self.headers }

    /// A single header value as a string, if present and ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Whether the raw body has already been consumed.
    #[must_use]
    pub fn body_used(&self) -> bool { self.raw.is_used() }

    /// Read the full raw body as decoded text.
    ///
    /// # Errors
    /// Fails with [`BodyError::AlreadyUsed`] on a second read.
    pub async fn text(&mut self) -> Result<String, BodyError> { self.raw.text().await }

    /// Read the full raw body as bytes.
    ///
    /// # Errors
    /// Fails with [`BodyError::AlreadyUsed`] on a second read.
    pub async fn bytes(&mut self) -> Result<Bytes, BodyError> { self.raw.bytes().await }

    /// The decoded body slot.
    #[must_use]
    pub const fn body(&self) -> &Body { &self.body }

    /// Take the decoded body, leaving the slot [`Body::Unset`].
    pub fn take_body(&mut self) -> Body { std::mem::take(&mut self.body) }

    /// Attach a decode outcome, replacing any prior value unconditionally.
    pub fn set_body(&mut self, body: Body) { self.body = body; }

    /// Content eligibility classifier: the media type to dispatch on, or
    /// `None` when no decode should happen at all.
    ///
    /// Returns `None` when the body was already consumed, the status is
    /// 204 or 304 (those carry no body even if a `Content-Type` header is
    /// erroneously present), the `Content-Type` header is absent or empty,
    /// or the header value is not a valid media type. None of these are
    /// errors; the response simply passes through undecoded.
    #[must_use]
    pub fn content_media_type(&self) -> Option<Mime> {
        if self.raw.is_used() {
            return None;
        }
        if self.status == StatusCode::NO_CONTENT || self.status == StatusCode::NOT_MODIFIED {
            return None;
        }
        let value = self.headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        if value.is_empty() {
            return None;
        }
        value.parse::<Mime>().ok()
    }
}

#[cfg(test)]
mod tests;
