mod common;

use common::asserts::{assert_actual, assert_header_eq, assert_not_applicable, assert_vary_eq};
use common::builders::{actual_request, policy};
use common::headers::has_header;
use gateway_cors_rs::RequestContext;
use gateway_cors_rs::constants::{header, method};

#[test]
fn default_policy_allows_any_origin() {
    let cors = policy().build();

    let headers = assert_actual(actual_request().origin("https://app.example").check(&cors));

    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
    assert_vary_eq(&headers, [header::ORIGIN]);
    assert!(!has_header(&headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
    assert!(!has_header(&headers, header::ACCESS_CONTROL_EXPOSE_HEADERS));
}

#[test]
fn listed_origin_is_echoed() {
    let cors = policy()
        .origins(["https://a.example", "https://b.example"])
        .build();

    let headers = assert_actual(
        actual_request()
            .method(method::POST)
            .origin("https://b.example")
            .check(&cors),
    );

    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://b.example");
}

#[test]
fn disallowed_origin_only_receives_vary() {
    let cors = policy()
        .origins(["https://a.example"])
        .credentials(true)
        .exposed_headers(["X-Total-Count"])
        .build();

    let headers = assert_actual(actual_request().origin("https://c.example").check(&cors));

    assert_eq!(headers.len(), 1);
    assert_vary_eq(&headers, [header::ORIGIN]);
}

#[test]
fn credentials_and_exposed_headers_are_added() {
    let cors = policy()
        .origins(["https://a.example"])
        .credentials(true)
        .exposed_headers(["X-Total-Count", "X-Request-Id", "x-total-count"])
        .build();

    let headers = assert_actual(actual_request().origin("https://a.example").check(&cors));

    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
    assert_header_eq(
        &headers,
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        "X-Total-Count, X-Request-Id",
    );
}

#[test]
fn actual_requests_ignore_allowed_methods() {
    let cors = policy().methods([method::GET]).build();

    let headers = assert_actual(
        actual_request()
            .method(method::DELETE)
            .origin("https://app.example")
            .check(&cors),
    );

    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
}

#[test]
fn options_without_request_method_is_an_actual_request() {
    let cors = policy().build();

    let headers = assert_actual(
        actual_request()
            .method(method::OPTIONS)
            .origin("https://app.example")
            .check(&cors),
    );

    assert_vary_eq(&headers, [header::ORIGIN]);
    assert!(!has_header(&headers, header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[test]
fn lowercase_options_with_request_method_is_an_actual_request() {
    let cors = policy()
        .origins(["https://app.example"])
        .methods([method::GET])
        .build();
    let ctx = RequestContext {
        method: "options",
        origin: Some("https://app.example"),
        access_control_request_method: Some(method::DELETE),
        ..RequestContext::default()
    };

    let headers = assert_actual(cors.check(&ctx));

    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://app.example");
    assert_vary_eq(&headers, [header::ORIGIN]);
    assert!(!has_header(&headers, header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[test]
fn actual_request_never_emits_preflight_only_headers() {
    let cors = policy()
        .methods([method::GET])
        .allowed_headers(["X-Test"])
        .private_network(true)
        .max_age(std::time::Duration::from_secs(600))
        .build();

    let headers = assert_actual(actual_request().origin("https://app.example").check(&cors));

    for name in [
        header::ACCESS_CONTROL_ALLOW_METHODS,
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        header::ACCESS_CONTROL_MAX_AGE,
        header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK,
    ] {
        assert!(!has_header(&headers, name), "{name} must not be emitted");
    }
}

#[test]
fn missing_origin_is_not_applicable() {
    let cors = policy().credentials(true).build();

    assert_not_applicable(actual_request().check(&cors));
}
