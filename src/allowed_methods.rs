use crate::util::is_http_token;

/// Ordered set backing the `Access-Control-Allow-Methods` response header.
///
/// Methods are stored upper-cased; an undeclared set accepts whatever method
/// the preflight declares. A declared set whose entries were all invalid
/// accepts nothing.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AllowedMethods {
    values: Vec<String>,
    declared: bool,
}

impl AllowedMethods {
    /// Builds the set, upper-casing entries and dropping blanks, invalid tokens
    /// and duplicates while keeping the first occurrence's position.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut declared = false;
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let method = value.into().trim().to_ascii_uppercase();
            if method.is_empty() {
                continue;
            }
            declared = true;
            if !is_http_token(&method) || deduped.contains(&method) {
                continue;
            }
            deduped.push(method);
        }

        Self {
            values: deduped,
            declared,
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when nothing was configured and the requested method is echoed.
    pub fn is_unrestricted(&self) -> bool {
        !self.declared
    }

    pub fn allows_method(&self, method: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        self.values
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(method))
    }

    /// Value for a preflight that requested `requested_method`: the configured
    /// list, or the requested method itself when nothing is configured.
    pub fn header_value(&self, requested_method: &str) -> Option<String> {
        if self.is_unrestricted() {
            let requested = requested_method.trim();
            if requested.is_empty() {
                None
            } else {
                Some(requested.to_ascii_uppercase())
            }
        } else if self.values.is_empty() {
            None
        } else {
            Some(self.values.join(", "))
        }
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
