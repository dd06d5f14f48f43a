use crate::constants::{EMPTY_ORIGINS_FALLBACK, EmptyOrigins, WILDCARD};
use regex_automata::meta::{BuildError, Regex};
use regex_syntax::escape;
use thiserror::Error;

const MAX_PATTERN_LENGTH: usize = 4_096;
const MAX_ORIGIN_LENGTH: usize = 4_096;

/// Outcome of matching a request `Origin` against [`AllowedOrigins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    /// Emit the literal wildcard.
    Any,
    /// Emit the requesting origin verbatim.
    Mirror,
    /// Origin present but not permitted.
    Disallow,
    /// No origin on the request; not a cross-origin request.
    Skip,
}

impl OriginDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Any | Self::Mirror)
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern {pattern:?}")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
    #[error("origin pattern {0:?} must contain exactly one wildcard")]
    WildcardCount(String),
}

/// A single `allow_origins` entry.
#[derive(Clone, Debug)]
pub enum OriginMatcher {
    /// Case-sensitive scheme+host+port match.
    Exact(String),
    /// Entry such as `https://*.example.com`; the wildcard stands for one or
    /// more characters.
    Pattern { source: String, regex: Regex },
}

impl OriginMatcher {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    pub fn wildcard(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let Some((prefix, suffix)) = pattern.split_once(WILDCARD) else {
            return Err(PatternError::WildcardCount(pattern.to_string()));
        };
        if suffix.contains(WILDCARD) {
            return Err(PatternError::WildcardCount(pattern.to_string()));
        }

        let expression = format!("^{}.+{}$", escape(prefix), escape(suffix));
        let regex = Regex::new(&expression).map_err(|source| PatternError::Build {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })?;

        Ok(Self::Pattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Entries containing `*` become patterns, everything else an exact match.
    pub fn parse(value: &str) -> Result<Self, PatternError> {
        if value.contains(WILDCARD) {
            Self::wildcard(value)
        } else {
            Ok(Self::exact(value))
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Exact(value) => value == candidate,
            OriginMatcher::Pattern { regex, .. } => regex.is_match(candidate.as_bytes()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OriginMatcher::Exact(value) => value,
            OriginMatcher::Pattern { source, .. } => source,
        }
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Exact(value.to_owned())
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Exact(value)
    }
}

/// Origins permitted to make cross-origin requests.
#[derive(Clone, Debug, Default)]
pub enum AllowedOrigins {
    /// No origins were declared; resolved through [`EMPTY_ORIGINS_FALLBACK`].
    #[default]
    Unspecified,
    /// The list contained the wildcard token.
    Any,
    List(Vec<OriginMatcher>),
}

impl AllowedOrigins {
    /// Builds the configuration from raw `allow_origins` entries.
    ///
    /// A wildcard anywhere in the list short-circuits to [`AllowedOrigins::Any`].
    /// Entries that fail to compile are dropped; a list whose every entry was
    /// dropped still denies everything rather than falling back.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut declared = 0usize;
        let mut matchers: Vec<OriginMatcher> = Vec::new();
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            declared += 1;
            if value == WILDCARD {
                return Self::Any;
            }
            if matchers.iter().any(|existing| existing.as_str() == value) {
                continue;
            }
            if let Ok(matcher) = OriginMatcher::parse(value) {
                matchers.push(matcher);
            }
        }

        if declared == 0 {
            Self::Unspecified
        } else {
            Self::List(matchers)
        }
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }

    /// Resolves the request origin. With credentials enabled a wildcard
    /// result is turned into a mirror of the requesting origin.
    pub fn resolve(&self, request_origin: Option<&str>, credentials: bool) -> OriginDecision {
        let Some(origin) = request_origin.filter(|origin| !origin.is_empty()) else {
            return OriginDecision::Skip;
        };
        if origin.len() > MAX_ORIGIN_LENGTH {
            return OriginDecision::Disallow;
        }

        let allow_all = match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::Unspecified => EMPTY_ORIGINS_FALLBACK == EmptyOrigins::AllowAll,
            AllowedOrigins::List(matchers) => {
                return if matchers.iter().any(|matcher| matcher.matches(origin)) {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                };
            }
        };

        match (allow_all, credentials) {
            (true, false) => OriginDecision::Any,
            (true, true) => OriginDecision::Mirror,
            (false, _) => OriginDecision::Disallow,
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
