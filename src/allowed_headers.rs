use crate::constants::WILDCARD;
use crate::util::{is_http_token, normalize_lower};
use std::collections::HashSet;

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedHeaders {
    /// Explicit allow-list. An empty list is permissive and allows every
    /// requested header.
    List(AllowedHeaderList),
    /// Configured with `*`: every requested header is allowed.
    Any,
    /// Entries were declared but none of them was a valid header name.
    None,
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        AllowedHeaders::List(AllowedHeaderList::default())
    }
}

impl AllowedHeaders {
    /// Builds an allow-list, trimming entries and dropping blanks, invalid
    /// tokens and case-insensitive duplicates. A `*` entry turns the whole
    /// configuration into [`AllowedHeaders::Any`]; a non-blank list with no
    /// valid entry becomes [`AllowedHeaders::None`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared = 0usize;
        let mut lookup = HashSet::new();
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let trimmed = value.into().trim().to_string();
            if trimmed.is_empty() {
                continue;
            }
            declared += 1;
            if trimmed == WILDCARD {
                return Self::Any;
            }
            if !is_http_token(&trimmed) {
                continue;
            }
            if lookup.insert(normalize_lower(&trimmed)) {
                deduped.push(trimmed);
            }
        }

        if declared > 0 && deduped.is_empty() {
            return Self::None;
        }

        Self::List(AllowedHeaderList {
            values: deduped,
            lookup,
        })
    }

    pub fn any() -> Self {
        Self::Any
    }

    /// True when every requested header passes through unfiltered.
    pub fn is_permissive(&self) -> bool {
        match self {
            Self::Any => true,
            Self::List(list) => list.is_empty(),
            Self::None => false,
        }
    }

    pub fn allows_header(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(list) => list.is_empty() || list.contains(name),
            Self::None => false,
        }
    }

    /// Intersects the requested headers with the allow-list, keeping the
    /// request's order and spelling.
    pub fn filter_requested<'a>(&self, requested: &[&'a str]) -> Vec<&'a str> {
        requested
            .iter()
            .copied()
            .filter(|name| self.allows_header(name))
            .collect()
    }

    pub fn header_value(&self, requested: &[&str]) -> Option<String> {
        let allowed = self.filter_requested(requested);
        if allowed.is_empty() {
            None
        } else {
            Some(allowed.join(", "))
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AllowedHeaderList {
    values: Vec<String>,
    lookup: HashSet<String>,
}

impl AllowedHeaderList {
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(&normalize_lower(name.trim()))
    }
}

impl PartialEq for AllowedHeaderList {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for AllowedHeaderList {}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
