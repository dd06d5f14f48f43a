use super::*;
use crate::constants::{NAMESPACE, header};
use http::{Request, Response};
use serde_json::json;
use std::convert::Infallible;
use std::future::{Ready, ready};
use tower::util::ServiceFn;
use tower::{ServiceExt, service_fn};

fn extra(value: serde_json::Value) -> ExtraConfig {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

type Handler = fn(Request<String>) -> Ready<Result<Response<String>, Infallible>>;
type Inner = ServiceFn<Handler>;

fn respond(_request: Request<String>) -> Ready<Result<Response<String>, Infallible>> {
    ready(Ok(Response::new("bar".to_string())))
}

fn inner() -> Inner {
    service_fn(respond as Handler)
}

mod wrap_run_server {
    use super::*;

    #[tokio::test]
    async fn should_install_middleware_before_handler() {
        // Arrange
        let run = wrap_run_server(|_extra: ExtraConfig, handler: CorsService<Inner>| handler);
        let config = extra(json!({ NAMESPACE: { "allow_origins": ["https://a.test"] } }));

        // Act
        let service = run(config, inner());
        let response = service
            .oneshot(
                Request::builder()
                    .header(header::ORIGIN, "https://a.test")
                    .body(String::new())
                    .expect("valid request"),
            )
            .await
            .expect("infallible");

        // Assert
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://a.test"
        );
    }

    #[tokio::test]
    async fn should_hand_over_pass_through_without_policy() {
        let run = wrap_run_server(|_extra: ExtraConfig, handler: CorsService<Inner>| handler);

        let service = run(ExtraConfig::new(), inner());
        let response = service
            .oneshot(
                Request::builder()
                    .header(header::ORIGIN, "https://a.test")
                    .body(String::new())
                    .expect("valid request"),
            )
            .await
            .expect("infallible");

        assert!(response.headers().is_empty());
        assert_eq!(response.body(), "bar");
    }

    #[test]
    fn should_forward_extra_config_to_next() {
        let run = wrap_run_server(|extra: ExtraConfig, _handler: CorsService<()>| extra.len());
        let config = extra(json!({ "other": true, NAMESPACE: {} }));

        assert_eq!(run(config, ()), 2);
    }
}
