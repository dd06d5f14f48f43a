use crate::constants::{WILDCARD, header};
use crate::headers::HeaderCollection;
use crate::origin::OriginDecision;
use crate::policy::Policy;

pub(crate) struct HeaderBuilder<'a> {
    policy: &'a Policy,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(policy: &'a Policy) -> Self {
        Self { policy }
    }

    /// `Access-Control-Allow-Origin` for an allowed origin; nothing otherwise.
    pub(crate) fn build_origin_header(
        &self,
        decision: OriginDecision,
        request_origin: &str,
    ) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        match decision {
            OriginDecision::Any => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, WILDCARD);
            }
            OriginDecision::Mirror => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, request_origin);
            }
            OriginDecision::Disallow | OriginDecision::Skip => {}
        }
        headers
    }

    pub(crate) fn build_methods_header(&self, requested_method: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.policy.allow_methods.header_value(requested_method) {
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        headers
    }

    pub(crate) fn build_allowed_headers(&self, requested_headers: &[&str]) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.policy.allow_headers.header_value(requested_headers) {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if self.policy.allow_credentials {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
        headers
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(seconds) = self.policy.max_age_seconds() {
            headers.push(header::ACCESS_CONTROL_MAX_AGE, seconds.to_string());
        }
        headers
    }

    pub(crate) fn build_private_network_header(&self, requested: bool) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if self.policy.allow_private_network && requested {
            headers.push(header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK, "true");
        }
        headers
    }

    pub(crate) fn build_exposed_headers(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        if let Some(value) = self.policy.expose_headers.header_value() {
            headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
