use crate::util::{is_http_token, normalize_lower};
use std::collections::HashSet;
use std::ops::Deref;

/// Ordered set mirrored into `Access-Control-Expose-Headers` on actual responses.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExposedHeaders {
    values: Vec<String>,
}

impl ExposedHeaders {
    /// Builds the set from the provided iterator, trimming whitespace and
    /// removing blanks and case-insensitive duplicates.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut deduped: Vec<String> = Vec::new();

        for value in values {
            let trimmed = value.into().trim().to_string();
            if !is_http_token(&trimmed) {
                continue;
            }
            if seen.insert(normalize_lower(&trimmed)) {
                deduped.push(trimmed);
            }
        }

        Self { values: deduped }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.join(", "))
        }
    }
}

impl Deref for ExposedHeaders {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
