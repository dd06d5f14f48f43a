//! Normalization of the loosely typed gateway extra config into a [`Policy`].
//!
//! Every field is coerced on its own: a value of the wrong type reverts that
//! field to its default and leaves the rest of the policy intact.

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::NAMESPACE;
use crate::duration::parse_duration;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::AllowedOrigins;
use crate::policy::Policy;
use serde_json::{Map, Value};
use std::time::Duration;

/// Generic key/value blob handed over by the gateway.
pub type ExtraConfig = Map<String, Value>;

const ALLOW_ORIGINS: &str = "allow_origins";
const ALLOW_METHODS: &str = "allow_methods";
const ALLOW_HEADERS: &str = "allow_headers";
const EXPOSE_HEADERS: &str = "expose_headers";
const ALLOW_CREDENTIALS: &str = "allow_credentials";
const ALLOW_PRIVATE_NETWORK: &str = "allow_private_network";
const OPTIONS_PASSTHROUGH: &str = "options_passthrough";
const OPTIONS_SUCCESS_STATUS: &str = "options_success_status";
const MAX_AGE: &str = "max_age";
const DEBUG: &str = "debug";

/// Looks up [`NAMESPACE`] and normalizes it.
///
/// Returns `None` when the namespace is missing or is not an object, which
/// callers must treat as "CORS disabled".
pub fn policy_from_extra_config(extra: &ExtraConfig) -> Option<Policy> {
    let section = extra.get(NAMESPACE)?.as_object()?;
    Some(policy_from_section(section))
}

/// Normalizes the namespaced object itself. Unknown keys are ignored.
pub fn policy_from_section(section: &Map<String, Value>) -> Policy {
    Policy {
        allow_origins: AllowedOrigins::list(string_list(section, ALLOW_ORIGINS)),
        allow_methods: AllowedMethods::list(string_list(section, ALLOW_METHODS)),
        allow_headers: AllowedHeaders::list(string_list(section, ALLOW_HEADERS)),
        expose_headers: ExposedHeaders::list(string_list(section, EXPOSE_HEADERS)),
        allow_credentials: flag(section, ALLOW_CREDENTIALS),
        allow_private_network: flag(section, ALLOW_PRIVATE_NETWORK),
        options_passthrough: flag(section, OPTIONS_PASSTHROUGH),
        options_success_status: status(section, OPTIONS_SUCCESS_STATUS),
        max_age: duration(section, MAX_AGE),
        debug: flag(section, DEBUG),
    }
}

fn string_list(section: &Map<String, Value>, key: &str) -> Vec<String> {
    section
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn flag(section: &Map<String, Value>, key: &str) -> bool {
    section.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn duration(section: &Map<String, Value>, key: &str) -> Duration {
    section
        .get(key)
        .and_then(Value::as_str)
        .and_then(|value| parse_duration(value).ok())
        .unwrap_or_default()
}

fn status(section: &Map<String, Value>, key: &str) -> Option<u16> {
    let value = section.get(key)?.as_f64()?.trunc();
    if (100.0..=599.0).contains(&value) {
        Some(value as u16)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
