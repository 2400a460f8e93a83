//! Unit tests for one-shot bodies, the decoded slot, and eligibility.

use http::HeaderValue;
use rstest::rstest;

use super::*;

fn response_with_content_type(status: u16, content_type: Option<&'static str>) -> Response {
    let mut headers = HeaderMap::new();
    if let Some(value) = content_type {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
    }
    let status = StatusCode::from_u16(status).expect("valid status");
    Response::from_bytes(status, headers, "payload")
}

#[tokio::test]
async fn memory_body_reads_exactly_once() {
    let mut body = MemoryBody::new("hello");
    assert!(!body.is_used());
    assert_eq!(body.text().await.expect("first read"), "hello");
    assert!(body.is_used());
    assert!(matches!(body.text().await, Err(BodyError::AlreadyUsed)));
    assert!(matches!(body.bytes().await, Err(BodyError::AlreadyUsed)));
}

#[tokio::test]
async fn memory_body_bytes_then_text_fails() {
    let mut body = MemoryBody::new(&b"\x00\x01\x02"[..]);
    assert_eq!(body.bytes().await.expect("first read"), Bytes::from_static(b"\x00\x01\x02"));
    assert!(matches!(body.text().await, Err(BodyError::AlreadyUsed)));
}

#[tokio::test]
async fn memory_body_replaces_malformed_utf8() {
    let mut body = MemoryBody::new(&b"\xffhi"[..]);
    assert_eq!(body.text().await.expect("read"), "\u{fffd}hi");
}

#[rstest]
#[case(204)]
#[case(304)]
fn bodyless_statuses_are_ineligible(#[case] status: u16) {
    let response = response_with_content_type(status, Some("application/json"));
    assert!(response.content_media_type().is_none());
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("application///"))]
#[case(Some("not a media type"))]
fn unusable_content_type_is_ineligible(#[case] content_type: Option<&'static str>) {
    let response = response_with_content_type(200, content_type);
    assert!(response.content_media_type().is_none());
}

#[tokio::test]
async fn consumed_body_is_ineligible() {
    let mut response = response_with_content_type(200, Some("application/json"));
    assert!(response.content_media_type().is_some());
    response.text().await.expect("read");
    assert!(response.content_media_type().is_none());
}

#[rstest]
#[case("text/plain", "text", "plain")]
#[case("text/plain; charset=utf-8", "text", "plain")]
#[case("application/vnd.foo+json; v=1", "application", "vnd.foo+json")]
fn eligible_responses_expose_the_media_type(
    #[case] content_type: &'static str,
    #[case] type_: &str,
    #[case] subtype: &str,
) {
    let response = response_with_content_type(401, Some(content_type));
    let media_type = response.content_media_type().expect("eligible");
    assert_eq!(media_type.type_().as_str(), type_);
    assert_eq!(media_type.subtype().as_str(), subtype);
}

#[test]
fn set_body_replaces_unconditionally() {
    let mut response = response_with_content_type(200, Some("text/plain"));
    assert_eq!(response.body(), &Body::Unset);
    response.set_body(Body::Text("first".into()));
    response.set_body(Body::Json(serde_json::json!({"second": true})));
    assert_eq!(
        response.body().as_json(),
        Some(&serde_json::json!({"second": true}))
    );
}

#[test]
fn take_body_leaves_the_slot_unset() {
    let mut response = response_with_content_type(200, Some("text/plain"));
    response.set_body(Body::Text("hello".into()));
    assert_eq!(response.take_body(), Body::Text("hello".into()));
    assert_eq!(response.body(), &Body::Unset);
    assert!(!response.body().is_set());
}

#[test]
fn header_lookup_is_case_insensitive() {
    let response = response_with_content_type(200, Some("text/plain"));
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.header("x-missing"), None);
}

#[test]
fn body_accessors_match_variants() {
    assert_eq!(Body::Text("hi".into()).as_text(), Some("hi"));
    assert_eq!(Body::Text("hi".into()).as_bytes(), None);
    assert_eq!(
        Body::Bytes(Bytes::from_static(b"hi")).as_bytes(),
        Some(&Bytes::from_static(b"hi"))
    );
    assert!(Body::Empty.is_set());
    assert!(!Body::Unset.is_set());
}
