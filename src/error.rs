//! Canonical error types for the crate.
//!
//! The taxonomy distinguishes wrap-time configuration failures from
//! per-request body read and decode failures. Eligibility and matching
//! decisions are never errors: an unrecognised or malformed `Content-Type`
//! leaves the response untouched.

use std::io;

use thiserror::Error;

use crate::response::Response;

/// Configuration failures raised synchronously when a registry is built.
///
/// These never surface on a request's future; an invalid configuration
/// fails [`crate::Registry::build`] (and therefore
/// [`crate::FetchClient::with_parsers`]) before any request is made.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A parser key is neither a shorthand group nor a valid media-type
    /// pattern.
    #[error("invalid media type pattern: {pattern:?}")]
    InvalidPattern {
        /// The offending configuration key.
        pattern: String,
    },
}

/// Failures from a response's one-shot body readers.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The body was already consumed by an earlier read.
    #[error("response body has already been consumed")]
    AlreadyUsed,
    /// I/O failure while reading the body.
    #[error("failed to read response body: {0}")]
    Io(#[from] io::Error),
}

/// Structural decode failure carrying the response it came from.
///
/// By the time this error reaches the caller the raw payload text has
/// already been attached to the response's body slot, so the malformed
/// payload can be recovered through [`DecodeError::response`] or
/// [`DecodeError::into_response`]. The response is deliberately excluded
/// from the `Display` output; only the underlying JSON error is shown.
#[derive(Debug, Error)]
#[error("invalid JSON in response body: {source}")]
pub struct DecodeError {
    source: serde_json::Error,
    response: Response,
}

impl DecodeError {
    pub(crate) fn new(source: serde_json::Error, response: Response) -> Self {
        Self { source, response }
    }

    /// The response whose body failed to decode, raw text attached.
    #[must_use]
    pub fn response(&self) -> &Response { &self.response }

    /// Consume the error, recovering the response.
    #[must_use]
    pub fn into_response(self) -> Response { self.response }
}

/// Errors surfaced by [`crate::FetchClient::fetch`] and
/// [`crate::parse_body`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The underlying transport failed before a response was produced.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A one-shot body reader failed.
    #[error(transparent)]
    Body(#[from] BodyError),
    /// A built-in structural decoder rejected the payload.
    #[error(transparent)]
    Decode(Box<DecodeError>),
    /// A custom body parser failed; passed through unmodified.
    #[error("body parser failed: {0}")]
    Parser(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    /// Wrap a transport-level failure.
    pub fn transport(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(error.into())
    }

    /// Wrap a custom parser failure.
    pub fn parser(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Parser(error.into())
    }

    /// The response attached to a structural decode failure, if any.
    #[must_use]
    pub fn decode_response(&self) -> Option<&Response> {
        match self {
            Self::Decode(error) => Some(error.response()),
            _ => None,
        }
    }

    /// Consume the error, recovering a decode failure's response.
    #[must_use]
    pub fn into_decode_response(self) -> Option<Response> {
        match self {
            Self::Decode(error) => Some(error.into_response()),
            _ => None,
        }
    }
}

impl From<DecodeError> for FetchError {
    fn from(error: DecodeError) -> Self { Self::Decode(Box::new(error)) }
}
