use crate::constants::method;
use crate::context::RequestContext;
use crate::util::split_header_list;
use std::borrow::Cow;

/// Canonical view of a [`RequestContext`]: the requested method upper-cased,
/// blank headers treated as absent, requested headers split into entries. The
/// request method and the origin are kept verbatim; both are case-sensitive.
#[derive(Debug)]
pub(crate) struct NormalizedRequest<'a> {
    pub(crate) method: &'a str,
    pub(crate) origin: Option<&'a str>,
    pub(crate) request_method: Option<Cow<'a, str>>,
    pub(crate) request_headers: Vec<&'a str>,
    pub(crate) request_private_network: bool,
}

impl<'a> NormalizedRequest<'a> {
    pub(crate) fn new(request: &RequestContext<'a>) -> Self {
        Self {
            method: request.method,
            origin: request.origin.filter(|origin| !origin.is_empty()),
            request_method: request
                .access_control_request_method
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(Self::normalize_method),
            request_headers: request
                .access_control_request_headers
                .map(|value| split_header_list(value).collect())
                .unwrap_or_default(),
            request_private_network: request.access_control_request_private_network,
        }
    }

    fn normalize_method(value: &'a str) -> Cow<'a, str> {
        let value = value.trim();
        if value.bytes().any(|byte| byte.is_ascii_lowercase()) {
            Cow::Owned(value.to_ascii_uppercase())
        } else {
            Cow::Borrowed(value)
        }
    }

    /// Exactly `OPTIONS` carrying `Access-Control-Request-Method`.
    pub(crate) fn is_preflight(&self) -> bool {
        self.method == method::OPTIONS && self.request_method.is_some()
    }

    pub(crate) fn request_method(&self) -> &str {
        self.request_method.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "normalized_request_test.rs"]
mod normalized_request_test;
