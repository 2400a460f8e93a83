//! Unit tests for media-type pattern parsing and matching.

use rstest::rstest;

use super::*;

fn media_type(input: &str) -> Mime { input.parse().expect("valid media type") }

#[rstest]
#[case("application/json", "application/json", true)]
#[case("application/json", "application/json; charset=utf-8", true)]
#[case("application/json", "application/vnd.foo+json", false)]
#[case("text/plain", "text/markdown", false)]
#[case("text/*", "text/markdown", true)]
#[case("text/*", "application/json", false)]
#[case("*/*", "application/octet-stream", true)]
#[case("*/xml", "text/xml", true)]
#[case("*/*+json", "application/vnd.foo+json", true)]
#[case("*/*+json", "application/vnd.foo+json; v=1", true)]
#[case("*/*+json", "text/vnd.bar+json", true)]
#[case("*/*+json", "application/json", false)]
#[case("*/*+xml", "image/svg+xml", true)]
#[case("APPLICATION/JSON", "application/json", true)]
fn pattern_matching(#[case] pattern: &str, #[case] actual: &str, #[case] expected: bool) {
    let pattern: MediaPattern = pattern.parse().expect("valid pattern");
    assert_eq!(pattern.matches(&media_type(actual)), expected);
}

#[rstest]
#[case("")]
#[case("application")]
#[case("application/")]
#[case("/json")]
#[case("application///")]
#[case("text/pla in")]
#[case("te*t/plain")]
#[case("*/*+")]
fn invalid_patterns_are_rejected(#[case] input: &str) {
    let error = input.parse::<MediaPattern>().expect_err("pattern must be rejected");
    assert_eq!(
        error,
        ConfigError::InvalidPattern {
            pattern: input.to_owned()
        }
    );
}

#[rstest]
#[case("application/json")]
#[case("text/*")]
#[case("*/*")]
#[case("*/*+json")]
fn display_round_trips(#[case] input: &str) {
    let pattern: MediaPattern = input.parse().expect("valid pattern");
    assert_eq!(pattern.to_string(), input);
}

#[test]
fn any_matches_everything() {
    for actual in ["text/plain", "application/vnd.foo+json", "image/png"] {
        assert!(MediaPattern::any().matches(&media_type(actual)));
    }
}
