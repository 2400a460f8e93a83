//! Media-type patterns used to route responses to body parsers.
//!
//! A [`MediaPattern`] is the configured side of a match: either part may be
//! the wildcard `*`, and the subtype may be a suffix wildcard such as
//! `*+json`, which matches any subtype carrying that `+suffix` (for example
//! `application/vnd.foo+json`). The actual side of a match is a parsed
//! [`mime::Mime`]; media-type parameters never affect matching.

use std::{fmt, str::FromStr};

use mime::Mime;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum TypePart {
    Any,
    Exact(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SubtypePart {
    Any,
    Exact(String),
    Suffix(String),
}

/// A media-type pattern such as `application/json`, `text/*` or `*/*+json`.
///
/// Immutable once constructed. Parse one with [`str::parse`]:
///
/// ```
/// use fetch_parse::MediaPattern;
///
/// let pattern: MediaPattern = "*/*+json".parse().expect("valid pattern");
/// let media_type: mime::Mime = "application/vnd.foo+json".parse().expect("valid media type");
/// assert!(pattern.matches(&media_type));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaPattern {
    type_: TypePart,
    subtype: SubtypePart,
}

impl MediaPattern {
    /// The `*/*` pattern matching every media type.
    #[must_use]
    pub fn any() -> Self {
        Self {
            type_: TypePart::Any,
            subtype: SubtypePart::Any,
        }
    }

    pub(crate) fn exact(type_: &str, subtype: &str) -> Self {
        Self {
            type_: TypePart::Exact(type_.to_ascii_lowercase()),
            subtype: SubtypePart::Exact(subtype.to_ascii_lowercase()),
        }
    }

    pub(crate) fn with_suffix(suffix: &str) -> Self {
        Self {
            type_: TypePart::Any,
            subtype: SubtypePart::Suffix(suffix.to_ascii_lowercase()),
        }
    }

    /// Whether `media_type` falls under this pattern.
    ///
    /// Type parts match when equal or when the pattern's is `*`. Subtype
    /// parts match when equal, when the pattern's is `*`, or when the
    /// pattern is a suffix wildcard equal to the actual subtype's
    /// `+suffix` segment.
    #[must_use]
    pub fn matches(&self, media_type: &Mime) -> bool {
        let type_ok = match &self.type_ {
            TypePart::Any => true,
            TypePart::Exact(type_) => media_type.type_().as_str().eq_ignore_ascii_case(type_),
        };
        if !type_ok {
            return false;
        }
        match &self.subtype {
            SubtypePart::Any => true,
            SubtypePart::Exact(subtype) => {
                media_type.subtype().as_str().eq_ignore_ascii_case(subtype)
            }
            SubtypePart::Suffix(suffix) => media_type
                .suffix()
                .is_some_and(|actual| actual.as_str().eq_ignore_ascii_case(suffix)),
        }
    }
}

impl FromStr for MediaPattern {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPattern {
            pattern: input.to_owned(),
        };
        let (type_, subtype) = input.split_once('/').ok_or_else(invalid)?;

        let type_ = match type_ {
            "*" => TypePart::Any,
            part if is_token(part) => TypePart::Exact(part.to_ascii_lowercase()),
            _ => return Err(invalid()),
        };
        let subtype = if subtype == "*" {
            SubtypePart::Any
        } else if let Some(suffix) = subtype.strip_prefix("*+") {
            if !is_token(suffix) {
                return Err(invalid());
            }
            SubtypePart::Suffix(suffix.to_ascii_lowercase())
        } else if is_token(subtype) {
            SubtypePart::Exact(subtype.to_ascii_lowercase())
        } else {
            return Err(invalid());
        };

        Ok(Self { type_, subtype })
    }
}

impl fmt::Display for MediaPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_ {
            TypePart::Any => f.write_str("*")?,
            TypePart::Exact(type_) => f.write_str(type_)?,
        }
        f.write_str("/")?;
        match &self.subtype {
            SubtypePart::Any => f.write_str("*"),
            SubtypePart::Exact(subtype) => f.write_str(subtype),
            SubtypePart::Suffix(suffix) => write!(f, "*+{suffix}"),
        }
    }
}

/// RFC 7230 token characters, minus `*`, which is reserved for wildcards.
fn is_token(part: &str) -> bool {
    !part.is_empty()
        && part.bytes().all(|byte| {
            matches!(byte,
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9'
                | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'+' | b'-' | b'.'
                | b'^' | b'_' | b'`' | b'|' | b'~')
        })
}

#[cfg(test)]
mod tests;
