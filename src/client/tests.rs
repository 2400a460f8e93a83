//! Unit tests for the body materialization pipeline.

use futures::FutureExt;
use futures::future::BoxFuture;
use http::{HeaderValue, StatusCode, header};

use super::*;

fn json_response(body: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_bytes(StatusCode::OK, headers, body)
}

#[tokio::test]
async fn pass_through_leaves_the_body_readable() {
    let config = ParserConfig::new().default_for("text/plain");
    let registry = Registry::build(&config).expect("valid config");

    let mut response = parse_body(&registry, json_response("{}"))
        .await
        .expect("pass-through is not an error");
    assert_eq!(response.body(), &Body::Unset);
    assert!(!response.body_used());
    assert_eq!(response.text().await.expect("still readable"), "{}");
}

#[tokio::test]
async fn decode_failure_attaches_raw_text_before_erroring() {
    let error = parse_body(&Registry::default(), json_response("{\"foo\": "))
        .await
        .expect_err("truncated JSON must fail");

    let response = error.decode_response().expect("decode error carries the response");
    assert_eq!(response.body().as_text(), Some("{\"foo\": "));
    assert!(response.body_used());
}

#[tokio::test]
async fn empty_json_body_attaches_the_empty_marker() {
    let response = parse_body(&Registry::default(), json_response(""))
        .await
        .expect("empty body is not a decode failure");
    assert_eq!(response.body(), &Body::Empty);
}

#[tokio::test]
async fn custom_parser_error_propagates_unmodified() {
    fn failing(response: &mut Response) -> BoxFuture<'_, Result<Body, FetchError>> {
        let _ = response;
        async move { Err(FetchError::parser("boom")) }.boxed()
    }

    let config = ParserConfig::new().custom("*/*", failing);
    let registry = Registry::build(&config).expect("valid config");
    let error = parse_body(&registry, json_response("{}"))
        .await
        .expect_err("custom parser failure must propagate");
    assert!(matches!(error, FetchError::Parser(_)));
    assert!(error.decode_response().is_none());
}

#[tokio::test]
async fn already_parsed_response_is_not_decoded_again() {
    let parsed = parse_body(&Registry::default(), json_response("{\"key\":\"value\"}"))
        .await
        .expect("valid JSON");
    let reparsed = parse_body(&Registry::default(), parsed)
        .await
        .expect("second pass is a no-op");
    assert_eq!(
        reparsed.body().as_json(),
        Some(&serde_json::json!({"key": "value"}))
    );
}

#[test]
fn request_constructors_default_sensibly() {
    let request = Request::get("http://example.com/");
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, "http://example.com/");
    assert!(request.headers.is_empty());
    assert!(request.body.is_none());
}
