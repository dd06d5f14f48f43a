//! tower binding: wraps any `http` service with the CORS engine.

use crate::config::{ExtraConfig, policy_from_extra_config};
use crate::constants::{NAMESPACE, header};
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::debug::DebugLogger;
use crate::headers::Headers;
use crate::policy::Policy;
use crate::result::CorsDecision;
use http::{HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode};
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use tower_layer::Layer;
use tower_service::Service;

/// Builds the middleware for `policy`. `None` yields a disabled layer that
/// passes every request through untouched.
pub fn build(policy: Option<Policy>) -> CorsLayer {
    build_with_logger(policy, None)
}

pub fn build_with_logger(
    policy: Option<Policy>,
    logger: Option<Arc<dyn DebugLogger>>,
) -> CorsLayer {
    let Some(policy) = policy else {
        return CorsLayer::disabled();
    };

    let cors = match logger {
        Some(logger) => Cors::with_logger(policy, logger),
        None => Cors::new(policy),
    };
    CorsLayer::new(cors)
}

#[derive(Clone, Debug, Default)]
pub struct CorsLayer {
    cors: Option<Arc<Cors>>,
}

impl CorsLayer {
    pub fn new(cors: Cors) -> Self {
        Self {
            cors: Some(Arc::new(cors)),
        }
    }

    pub fn disabled() -> Self {
        Self { cors: None }
    }

    pub fn from_extra_config(extra: &ExtraConfig) -> Self {
        Self::from_extra_config_with_logger(extra, None)
    }

    pub fn from_extra_config_with_logger(
        extra: &ExtraConfig,
        logger: Option<Arc<dyn DebugLogger>>,
    ) -> Self {
        let layer = build_with_logger(policy_from_extra_config(extra), logger);
        if layer.is_enabled() {
            tracing::debug!("CORS enabled for all requests");
        } else {
            tracing::debug!(namespace = NAMESPACE, "CORS disabled, no policy configured");
        }
        layer
    }

    pub fn is_enabled(&self) -> bool {
        self.cors.is_some()
    }

    pub fn cors(&self) -> Option<&Arc<Cors>> {
        self.cors.as_ref()
    }

    /// Drains and closes the engine's debug sink.
    pub async fn shutdown(&self) {
        if let Some(cors) = &self.cors {
            cors.shutdown().await;
        }
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            cors: self.cors.clone(),
        }
    }
}

/// Service produced by [`CorsLayer`]; has the same request/response shape as
/// the service it wraps.
#[derive(Clone, Debug)]
pub struct CorsService<S> {
    inner: S,
    cors: Option<Arc<Cors>>,
}

impl<S> CorsService<S> {
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let decision = match &self.cors {
            Some(cors) => cors.check(&request_context(&request)),
            None => CorsDecision::NotApplicable,
        };

        let kind = match decision {
            CorsDecision::NotApplicable => Kind::Passthrough {
                future: self.inner.call(request),
            },
            CorsDecision::Preflight(result) if result.end_response => Kind::Terminated {
                response: Some(preflight_response(result.status, &result.headers)),
            },
            CorsDecision::Preflight(result) => Kind::Decorated {
                future: self.inner.call(request),
                headers: result.headers,
            },
            CorsDecision::Actual(result) => Kind::Decorated {
                future: self.inner.call(request),
                headers: result.headers,
            },
        };

        ResponseFuture { kind }
    }
}

pin_project! {
    /// Response future for [`CorsService`].
    pub struct ResponseFuture<F, B> {
        #[pin]
        kind: Kind<F, B>,
    }
}

pin_project! {
    #[project = KindProj]
    enum Kind<F, B> {
        Passthrough {
            #[pin]
            future: F,
        },
        Decorated {
            #[pin]
            future: F,
            headers: Headers,
        },
        Terminated {
            response: Option<Response<B>>,
        },
    }
}

impl<F, B, E> Future for ResponseFuture<F, B>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().kind.project() {
            KindProj::Passthrough { future } => future.poll(cx),
            KindProj::Decorated { future, headers } => {
                let mut response = ready!(future.poll(cx))?;
                apply_headers(response.headers_mut(), headers);
                Poll::Ready(Ok(response))
            }
            KindProj::Terminated { response } => Poll::Ready(Ok(response
                .take()
                .expect("ResponseFuture polled after completion"))),
        }
    }
}

fn request_context<B>(request: &Request<B>) -> RequestContext<'_> {
    let headers = request.headers();

    RequestContext {
        method: request.method().as_str(),
        origin: header_value(headers, header::ORIGIN),
        access_control_request_method: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ),
        access_control_request_headers: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ),
        access_control_request_private_network: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK,
        )
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true")),
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn preflight_response<B: Default>(status: u16, headers: &Headers) -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::NO_CONTENT);
    apply_headers(response.headers_mut(), headers);
    response
}

fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        let (Ok(parsed_name), Ok(parsed_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) else {
            tracing::warn!(header = %name, "skipping CORS header with invalid name or value");
            continue;
        };

        if parsed_name == http::header::VARY {
            map.append(parsed_name, parsed_value);
        } else {
            map.insert(parsed_name, parsed_value);
        }
    }
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
