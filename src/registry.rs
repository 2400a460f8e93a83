//! Parser configuration and the ordered dispatch registry.
//!
//! A [`ParserConfig`] records, in insertion order, which media types should
//! be decoded and how. [`Registry::build`] expands it once at wrap time into
//! an ordered list of `(pattern, parser)` entries; the registry is immutable
//! afterwards and shared by every request. Resolution is first match wins,
//! so configuration order is the match priority.

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use futures::future::BoxFuture;
use mime::Mime;

use crate::{
    error::{ConfigError, FetchError},
    pattern::MediaPattern,
    response::{Body, Response},
};

/// Patterns expanded from the `"json"` shorthand group.
///
/// `text/javascript` is a compatibility alias; note that as a `text` type it
/// still resolves to the text decoder under default-by-category resolution.
static JSON_TYPES: LazyLock<Vec<MediaPattern>> = LazyLock::new(|| {
    vec![
        MediaPattern::exact("application", "json"),
        MediaPattern::with_suffix("json"),
        MediaPattern::exact("text", "javascript"),
    ]
});

/// Patterns expanded from the `"xml"` shorthand group.
static XML_TYPES: LazyLock<Vec<MediaPattern>> = LazyLock::new(|| {
    vec![
        MediaPattern::exact("application", "xml"),
        MediaPattern::exact("text", "xml"),
        MediaPattern::with_suffix("xml"),
    ]
});

/// User-supplied decoder hook.
///
/// Receives the response and produces the decoded [`Body`] to attach. The
/// hook owns the read: the engine will not touch the raw body itself when a
/// custom parser is configured for the matched pattern.
pub type ParseFn = Arc<
    dyn for<'a> Fn(&'a mut Response) -> BoxFuture<'a, Result<Body, FetchError>> + Send + Sync,
>;

/// Configured parser for a pattern.
#[derive(Clone)]
pub enum BodyParser {
    /// Resolve a built-in decoder by media-type category at match time.
    Default,
    /// Run this decoder directly.
    Custom(ParseFn),
}

impl fmt::Debug for BodyParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Ordered parser configuration consumed by [`Registry::build`].
///
/// Keys may be a concrete media type (`"application/json"`), a wildcard
/// pattern (`"text/*"`, `"*/*"`, `"*/*+json"`), or a shorthand group name
/// (`"json"`, `"xml"`). Insertion order is preserved and becomes the match
/// priority.
///
/// # Examples
///
/// ```
/// use fetch_parse::ParserConfig;
///
/// let config = ParserConfig::new()
///     .default_for("json")
///     .default_for("text/*");
/// let _ = config;
/// ```
#[derive(Clone, Debug, Default)]
pub struct ParserConfig {
    entries: Vec<(String, BodyParser)>,
}

impl ParserConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Decode `key` with the built-in decoder for its category.
    #[must_use]
    pub fn default_for(mut self, key: impl Into<String>) -> Self {
        self.entries.push((key.into(), BodyParser::Default));
        self
    }

    /// Decode `key` with a custom parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use fetch_parse::{Body, FetchError, ParserConfig, Response};
    /// use futures::{FutureExt, future::BoxFuture};
    ///
    /// fn upper(response: &mut Response) -> BoxFuture<'_, Result<Body, FetchError>> {
    ///     async move {
    ///         let text = response.text().await?;
    ///         Ok(Body::Text(text.to_uppercase()))
    ///     }
    ///     .boxed()
    /// }
    ///
    /// let config = ParserConfig::new().custom("text/*", upper);
    /// let _ = config;
    /// ```
    #[must_use]
    pub fn custom<F>(mut self, key: impl Into<String>, parser: F) -> Self
    where
        F: for<'a> Fn(&'a mut Response) -> BoxFuture<'a, Result<Body, FetchError>>
            + Send
            + Sync
            + 'static,
    {
        self.entries
            .push((key.into(), BodyParser::Custom(Arc::new(parser))));
        self
    }

    pub(crate) fn entries(&self) -> &[(String, BodyParser)] { &self.entries }
}

#[derive(Clone, Debug)]
struct ParserEntry {
    pattern: MediaPattern,
    parser: BodyParser,
}

/// Built-in decoder categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinDecoder {
    /// Decode the body as text.
    Text,
    /// Read the body as raw bytes.
    Bytes,
    /// Decode the body as structured JSON data.
    Json,
}

/// Decoder resolved for a particular response.
#[derive(Clone)]
pub enum ResolvedParser {
    /// One of the built-in decoders.
    Builtin(BuiltinDecoder),
    /// A user-supplied hook.
    Custom(ParseFn),
}

impl fmt::Debug for ResolvedParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(decoder) => f.debug_tuple("Builtin").field(decoder).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Ordered, immutable dispatch registry built once per configuration.
#[derive(Clone, Debug)]
pub struct Registry {
    entries: Vec<ParserEntry>,
}

impl Default for Registry {
    /// The single-entry `*/*` fallback used when no configuration is
    /// supplied: every eligible response is decoded by category.
    fn default() -> Self {
        Self {
            entries: vec![ParserEntry {
                pattern: MediaPattern::any(),
                parser: BodyParser::Default,
            }],
        }
    }
}

impl Registry {
    /// Expand `config` into an ordered registry.
    ///
    /// Shorthand groups expand to their pattern lists; every other key must
    /// parse as a single [`MediaPattern`].
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] for a key that is neither a
    /// shorthand group nor a valid pattern. This is the wrap-time failure
    /// mode; it never surfaces on a request.
    pub fn build(config: &ParserConfig) -> Result<Self, ConfigError> {
        let mut entries = Vec::new();
        for (key, parser) in config.entries() {
            for pattern in expand_key(key)? {
                entries.push(ParserEntry {
                    pattern,
                    parser: parser.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Resolve the decoder for `media_type`, or `None` for pass-through.
    ///
    /// Entries are scanned in configuration order and the first matching
    /// pattern wins. A matching entry configured as [`BodyParser::Default`]
    /// resolves by category: `text` types and XML-group types decode as
    /// text, JSON-group types as JSON, everything else as raw bytes.
    #[must_use]
    pub fn resolve(&self, media_type: &Mime) -> Option<ResolvedParser> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.pattern.matches(media_type))?;
        Some(match &entry.parser {
            BodyParser::Custom(parse) => ResolvedParser::Custom(parse.clone()),
            BodyParser::Default => ResolvedParser::Builtin(default_decoder(media_type)),
        })
    }
}

fn expand_key(key: &str) -> Result<Vec<MediaPattern>, ConfigError> {
    match key {
        "json" => Ok(JSON_TYPES.clone()),
        "xml" => Ok(XML_TYPES.clone()),
        _ => Ok(vec![key.parse()?]),
    }
}

/// Default-by-category decoder resolution for the actual media type.
fn default_decoder(media_type: &Mime) -> BuiltinDecoder {
    if media_type.type_() == mime::TEXT {
        return BuiltinDecoder::Text;
    }
    if JSON_TYPES.iter().any(|pattern| pattern.matches(media_type)) {
        return BuiltinDecoder::Json;
    }
    if XML_TYPES.iter().any(|pattern| pattern.matches(media_type)) {
        // XML is surfaced as raw text, never tree-parsed.
        return BuiltinDecoder::Text;
    }
    BuiltinDecoder::Bytes
}
