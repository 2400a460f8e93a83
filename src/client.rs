//! Transport wrapping and the body materialization pipeline.
//!
//! [`FetchClient`] wraps any [`Transport`] and runs every response through
//! [`parse_body`]: eligibility check, first-match dispatch against the
//! registry, decode, attach. The wrapper implements [`Transport`] itself, so
//! clients compose; wrapping an already-wrapped transport decodes each body
//! exactly once because the inner layer's read marks the body consumed and
//! the outer layer's eligibility check then passes the response through.

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use log::{debug, trace};

use crate::{
    decode::{self, DecodeFailure},
    error::{ConfigError, DecodeError, FetchError},
    registry::{ParserConfig, Registry},
    response::{Body, Response},
};

/// Request handed to a [`Transport`].
///
/// The engine treats this as opaque; it exists so the transport contract has
/// a concrete argument shape.
#[derive(Clone, Debug, Default)]
pub struct Request {
    /// Target URL.
    pub url: String,
    /// HTTP method.
    pub method: Method,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional request body.
    pub body: Option<Bytes>,
}

impl Request {
    /// A request with the given method and URL and no headers or body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// A bare GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self { Self::new(Method::GET, url) }
}

/// Transport capability consumed, and re-exposed, by [`FetchClient`].
///
/// The engine does not know or care how the request is performed; the only
/// requirement is a response satisfying the [`Response`] shape.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and produce a response.
    ///
    /// # Errors
    /// Returns [`FetchError`] if the request cannot be performed.
    async fn fetch(&self, request: Request) -> Result<Response, FetchError>;
}

/// Transport wrapper that materializes response bodies.
///
/// # Examples
///
/// ```
/// use fetch_parse::{FetchClient, ParserConfig};
///
/// # struct NoopTransport;
/// # #[async_trait::async_trait]
/// # impl fetch_parse::Transport for NoopTransport {
/// #     async fn fetch(
/// #         &self,
/// #         _request: fetch_parse::Request,
/// #     ) -> Result<fetch_parse::Response, fetch_parse::FetchError> {
/// #         unimplemented!()
/// #     }
/// # }
/// let config = ParserConfig::new().default_for("json").default_for("text/*");
/// let client = FetchClient::with_parsers(NoopTransport, &config).expect("valid config");
/// let _ = client;
/// ```
#[derive(Clone, Debug)]
pub struct FetchClient<T> {
    transport: T,
    registry: Registry,
}

impl<T: Transport> FetchClient<T> {
    /// Wrap `transport` with the default wildcard registry: every eligible
    /// response is decoded by category.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            registry: Registry::default(),
        }
    }

    /// Wrap `transport` with parsers built from `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for an invalid configuration key. This is
    /// the only failure mode of wrapping and it happens here, synchronously;
    /// it never surfaces on a request's future.
    pub fn with_parsers(transport: T, config: &ParserConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            transport,
            registry: Registry::build(config)?,
        })
    }

    /// The registry this client dispatches against.
    #[must_use]
    pub const fn registry(&self) -> &Registry { &self.registry }

    /// Access the wrapped transport.
    #[must_use]
    pub const fn transport(&self) -> &T { &self.transport }

    /// Perform the request and decode the response body.
    ///
    /// # Errors
    /// Propagates transport failures, body read failures, and decode
    /// failures; see [`FetchError`]. Pass-through cases (ineligible
    /// response, unmatched media type) are not errors.
    pub async fn fetch(&self, request: Request) -> Result<Response, FetchError> {
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request) -> Result<Response, FetchError> {
        let response = self.transport.fetch(request).await?;
        parse_body(&self.registry, response).await
    }
}

#[async_trait]
impl<T: Transport> Transport for FetchClient<T> {
    async fn fetch(&self, request: Request) -> Result<Response, FetchError> {
        self.dispatch(request).await
    }
}

/// Run eligibility, dispatch, decode, and attach on `response`.
///
/// Ineligible responses and responses whose media type matches no registry
/// entry pass through untouched with their body slot left
/// [`Body::Unset`]. On a structural decode failure the raw payload text is
/// attached to the response before the error is returned, so the caller can
/// recover it via [`FetchError::decode_response`].
///
/// # Examples
///
/// ```
/// use fetch_parse::{Registry, Response, parse_body};
/// use http::{HeaderMap, HeaderValue, StatusCode, header};
///
/// # futures::executor::block_on(async {
/// let mut headers = HeaderMap::new();
/// headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
/// let response = Response::from_bytes(StatusCode::OK, headers, r#"{"key":"value"}"#);
/// let response = parse_body(&Registry::default(), response).await.expect("valid JSON");
/// assert!(response.body().as_json().is_some());
/// # });
/// ```
///
/// # Errors
/// Returns [`FetchError::Body`] if a one-shot read fails,
/// [`FetchError::Decode`] if the JSON decoder rejects the payload, or the
/// custom parser's error unmodified.
pub async fn parse_body(registry: &Registry, mut response: Response) -> Result<Response, FetchError> {
    let Some(media_type) = response.content_media_type() else {
        trace!("response not eligible for body decoding; passing through");
        return Ok(response);
    };
    let Some(parser) = registry.resolve(&media_type) else {
        trace!("no parser matches {media_type}; passing through");
        return Ok(response);
    };
    trace!("decoding {media_type} response with {parser:?}");

    match decode::run(&parser, &mut response).await {
        Ok(body) => {
            response.set_body(body);
            Ok(response)
        }
        Err(DecodeFailure::Json { raw, source }) => {
            debug!("invalid JSON in {media_type} response: {source}");
            // The raw text goes on first so the caller can still inspect the
            // malformed payload through the error's response.
            response.set_body(Body::Text(raw));
            Err(DecodeError::new(source, response).into())
        }
        Err(DecodeFailure::Body(error)) => Err(error.into()),
        Err(DecodeFailure::Parser(error)) => Err(error),
    }
}

#[cfg(test)]
mod tests;
