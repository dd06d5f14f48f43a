use super::headers::{header_value, vary_values};
use gateway_cors_rs::{CorsDecision, Headers};

pub fn assert_actual(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Actual(result) => result.headers,
        other => panic!("expected actual decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> (Headers, u16, bool) {
    match decision {
        CorsDecision::Preflight(result) => (result.headers, result.status, result.end_response),
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_not_applicable(decision: CorsDecision) {
    assert!(
        matches!(decision, CorsDecision::NotApplicable),
        "expected no CORS decision, got {:?}",
        decision
    );
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for {name}"
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected: Vec<String> = expected.into_iter().map(Into::into).collect();
    assert_eq!(vary_values(headers), expected);
}

/// Only `Vary` was emitted.
pub fn assert_vary_only(headers: &Headers) {
    assert!(
        headers.keys().all(|name| name.eq_ignore_ascii_case("Vary")),
        "expected only Vary, got {:?}",
        headers
    );
}
