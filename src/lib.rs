//! Automatic HTTP response body materialization.
//!
//! `fetch-parse` wraps an HTTP transport call and attaches the decoded body
//! to each response based on its declared `Content-Type`: text types decode
//! as text, JSON types as structured data, XML types as raw text, and
//! everything else as raw bytes. Which types are decoded, and how, is
//! configured as an ordered set of media-type patterns supporting wildcards
//! (`text/*`, `*/*`) and suffix wildcards (`*/*+json`); custom decoders can
//! be registered per pattern.
//!
//! Decoding is idempotent and pass-through by default: responses without a
//! usable `Content-Type`, 204/304 responses, responses whose body was
//! already consumed, and media types matching no configured pattern flow
//! through untouched. Wrapping an already-wrapped transport decodes each
//! body exactly once.
//!
//! ```
//! use fetch_parse::{Registry, Response, parse_body};
//! use http::{HeaderMap, HeaderValue, StatusCode, header};
//!
//! # futures::executor::block_on(async {
//! let mut headers = HeaderMap::new();
//! headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
//! let response = Response::from_bytes(StatusCode::OK, headers, r#"{"key":"value"}"#);
//!
//! let response = parse_body(&Registry::default(), response).await.expect("valid JSON");
//! let value = response.body().as_json().expect("JSON body");
//! assert_eq!(value["key"], "value");
//! # });
//! ```

pub mod client;
pub mod decode;
pub mod error;
pub mod pattern;
pub mod registry;
pub mod response;

pub use client::{FetchClient, Request, Transport, parse_body};
pub use error::{BodyError, ConfigError, DecodeError, FetchError};
pub use pattern::MediaPattern;
pub use registry::{BodyParser, BuiltinDecoder, ParseFn, ParserConfig, Registry, ResolvedParser};
pub use response::{Body, MemoryBody, Response, ResponseBody};
