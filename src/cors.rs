use crate::constants::{DEFAULT_DEBUG_BUFFER, header};
use crate::context::RequestContext;
use crate::debug::{DebugLogger, DebugSink};
use crate::header_builder::HeaderBuilder;
use crate::headers::{HeaderCollection, describe};
use crate::normalized_request::NormalizedRequest;
use crate::policy::Policy;
use crate::result::{ActualResult, CorsDecision, PreflightResult};
use std::sync::Arc;

/// Core CORS policy engine that evaluates requests against a [`Policy`].
///
/// Evaluation is a pure function of the policy and the request; the engine can
/// be shared across threads without locking.
#[derive(Debug)]
pub struct Cors {
    policy: Policy,
    debug: Option<DebugSink>,
}

impl Cors {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            debug: None,
        }
    }

    /// Like [`Cors::new`], additionally streaming decisions to `logger` when
    /// the policy enables debug output.
    pub fn with_logger(policy: Policy, logger: Arc<dyn DebugLogger>) -> Self {
        let debug = if policy.debug {
            DebugSink::spawn(logger, DEFAULT_DEBUG_BUFFER)
        } else {
            None
        };

        Self { policy, debug }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.is_some()
    }

    pub fn debug_sink(&self) -> Option<&DebugSink> {
        self.debug.as_ref()
    }

    /// Drains and closes the debug sink, if any.
    pub async fn shutdown(&self) {
        if let Some(sink) = &self.debug {
            sink.shutdown().await;
        }
    }

    pub fn check(&self, request: &RequestContext<'_>) -> CorsDecision {
        let request = NormalizedRequest::new(request);

        if request.is_preflight() {
            self.trace(|| "Handler: Preflight request".to_string());
            self.process_preflight(&request)
        } else {
            self.trace(|| "Handler: Actual request".to_string());
            self.process_actual(&request)
        }
    }

    fn process_preflight(&self, request: &NormalizedRequest<'_>) -> CorsDecision {
        let Some(origin) = request.origin else {
            self.trace(|| "  Preflight aborted: empty origin".to_string());
            return CorsDecision::NotApplicable;
        };

        let builder = HeaderBuilder::new(&self.policy);
        let mut headers = HeaderCollection::new();
        headers.add_vary(header::ORIGIN);
        headers.add_vary(header::ACCESS_CONTROL_REQUEST_METHOD);
        headers.add_vary(header::ACCESS_CONTROL_REQUEST_HEADERS);

        let decision = self
            .policy
            .allow_origins
            .resolve(Some(origin), self.policy.allow_credentials);
        let requested_method = request.request_method();

        if !decision.is_allowed() {
            self.trace(|| format!("  Preflight aborted: origin '{origin}' not allowed"));
        } else if !self.policy.allow_methods.allows_method(requested_method) {
            self.trace(|| format!("  Preflight aborted: method '{requested_method}' not allowed"));
        } else {
            headers.extend(builder.build_origin_header(decision, origin));
            headers.extend(builder.build_methods_header(requested_method));
            headers.extend(builder.build_allowed_headers(&request.request_headers));
            headers.extend(builder.build_credentials_header());
            headers.extend(builder.build_max_age_header());
            headers.extend(builder.build_private_network_header(request.request_private_network));
        }

        let result = PreflightResult {
            headers: headers.into_headers(),
            status: self.policy.success_status(),
            end_response: !self.policy.options_passthrough,
        };
        self.trace(|| format!("  Preflight response headers: {}", describe(&result.headers)));

        CorsDecision::Preflight(result)
    }

    fn process_actual(&self, request: &NormalizedRequest<'_>) -> CorsDecision {
        let Some(origin) = request.origin else {
            self.trace(|| "  Actual request no headers added: missing origin".to_string());
            return CorsDecision::NotApplicable;
        };

        let builder = HeaderBuilder::new(&self.policy);
        let mut headers = HeaderCollection::new();
        headers.add_vary(header::ORIGIN);

        let decision = self
            .policy
            .allow_origins
            .resolve(Some(origin), self.policy.allow_credentials);

        if decision.is_allowed() {
            headers.extend(builder.build_origin_header(decision, origin));
            headers.extend(builder.build_credentials_header());
            headers.extend(builder.build_exposed_headers());
        } else {
            self.trace(|| {
                format!("  Actual request no headers added: origin '{origin}' not allowed")
            });
        }

        let result = ActualResult {
            headers: headers.into_headers(),
        };
        self.trace(|| format!("  Actual response added headers: {}", describe(&result.headers)));

        CorsDecision::Actual(result)
    }

    fn trace<F>(&self, line: F)
    where
        F: FnOnce() -> String,
    {
        if let Some(sink) = &self.debug {
            sink.log(line());
        }
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
