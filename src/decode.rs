//! Built-in body decoders.
//!
//! [`text`] and [`bytes`] are public so custom parsers can delegate to them.
//! The JSON decoder is only reachable through the pipeline because its
//! failure path carries the raw payload for attachment, which
//! [`crate::parse_body`] turns into a [`crate::DecodeError`].

use crate::{
    error::{BodyError, FetchError},
    registry::{BuiltinDecoder, ResolvedParser},
    response::{Body, Response},
};

/// Decode failures internal to the dispatch pipeline.
#[derive(Debug)]
pub(crate) enum DecodeFailure {
    /// A one-shot body reader failed.
    Body(BodyError),
    /// Structural decode failed; the raw text is kept for attachment.
    Json {
        raw: String,
        source: serde_json::Error,
    },
    /// A custom parser failed; propagated to the caller unmodified.
    Parser(FetchError),
}

/// Read the full body as decoded text.
///
/// Resolves to the text verbatim, the empty string included.
///
/// # Errors
/// Fails with [`BodyError`] if the body was already consumed or the read
/// itself fails.
pub async fn text(response: &mut Response) -> Result<Body, BodyError> {
    Ok(Body::Text(response.text().await?))
}

/// Read the full body as raw bytes.
///
/// # Errors
/// Fails with [`BodyError`] if the body was already consumed or the read
/// itself fails.
pub async fn bytes(response: &mut Response) -> Result<Body, BodyError> {
    Ok(Body::Bytes(response.bytes().await?))
}

/// Decode the body as JSON, reading it as text first.
///
/// An empty body resolves to [`Body::Empty`] without attempting a
/// structural decode; some servers answer HEAD requests with a JSON
/// `Content-Type` but a zero-length body.
async fn json(response: &mut Response) -> Result<Body, DecodeFailure> {
    let raw = response.text().await.map_err(DecodeFailure::Body)?;
    if raw.is_empty() {
        return Ok(Body::Empty);
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Body::Json(value)),
        Err(source) => Err(DecodeFailure::Json { raw, source }),
    }
}

/// Run the resolved decoder against `response`.
pub(crate) async fn run(
    parser: &ResolvedParser,
    response: &mut Response,
) -> Result<Body, DecodeFailure> {
    match parser {
        ResolvedParser::Builtin(BuiltinDecoder::Text) => {
            text(response).await.map_err(DecodeFailure::Body)
        }
        ResolvedParser::Builtin(BuiltinDecoder::Bytes) => {
            bytes(response).await.map_err(DecodeFailure::Body)
        }
        ResolvedParser::Builtin(BuiltinDecoder::Json) => json(response).await,
        ResolvedParser::Custom(parse) => parse(response).await.map_err(DecodeFailure::Parser),
    }
}
