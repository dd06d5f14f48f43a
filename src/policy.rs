use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::DEFAULT_OPTIONS_SUCCESS_STATUS;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::AllowedOrigins;
use std::time::Duration;

/// Normalized CORS rules. Built once per configuration load and never mutated
/// afterwards; the engine takes ownership of it.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    pub allow_origins: AllowedOrigins,
    pub allow_methods: AllowedMethods,
    pub allow_headers: AllowedHeaders,
    pub expose_headers: ExposedHeaders,
    pub allow_credentials: bool,
    pub allow_private_network: bool,
    /// Forward handled preflights to the next handler instead of answering them.
    pub options_passthrough: bool,
    /// `None` selects [`DEFAULT_OPTIONS_SUCCESS_STATUS`].
    pub options_success_status: Option<u16>,
    /// Zero omits `Access-Control-Max-Age`.
    pub max_age: Duration,
    pub debug: bool,
}

impl Policy {
    pub fn success_status(&self) -> u16 {
        self.options_success_status
            .unwrap_or(DEFAULT_OPTIONS_SUCCESS_STATUS)
    }

    /// Whole seconds for `Access-Control-Max-Age`, if the header should be sent.
    pub fn max_age_seconds(&self) -> Option<u64> {
        match self.max_age.as_secs() {
            0 => None,
            seconds => Some(seconds),
        }
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
