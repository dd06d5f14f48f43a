use crate::headers::Headers;

/// Outcome of evaluating a preflight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    pub headers: Headers,
    /// Status to answer with when `end_response` is set.
    pub status: u16,
    /// `false` when the preflight must be forwarded to the next handler.
    pub end_response: bool,
}

/// Headers to merge into the response of an actual cross-origin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualResult {
    pub headers: Headers,
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    Preflight(PreflightResult),
    Actual(ActualResult),
    /// The request carries no `Origin`; nothing is added.
    NotApplicable,
}

impl CorsDecision {
    pub fn headers(&self) -> Option<&Headers> {
        match self {
            CorsDecision::Preflight(result) => Some(&result.headers),
            CorsDecision::Actual(result) => Some(&result.headers),
            CorsDecision::NotApplicable => None,
        }
    }
}
