//! Ordered, case-insensitive header set and the header composer.
//!
//! [`Headers`] keeps the insertion order and the original spelling of each
//! name, but compares names case-insensitively: inserting a name that is
//! already present replaces its value in place instead of appending a
//! duplicate.
//!
//! # Example
//!
//! ```
//! use courier_core::Headers;
//!
//! let mut headers = Headers::new();
//! headers.replace_or_add("Accept", "text/plain");
//! headers.replace_or_add("accept", "application/json");
//!
//! assert_eq!(headers.len(), 1);
//! assert_eq!(headers.get("ACCEPT"), Some("application/json"));
//! ```

use crate::ContentType;

/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Ordered mapping from case-insensitive header name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `name` to `value`, replacing any entry with the same name.
    ///
    /// The replaced entry keeps its position; a new name is appended.
    pub fn replace_or_add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => *entry = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`Headers::replace_or_add`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.replace_or_add(name, value);
        self
    }

    /// Value of the header `name`, compared case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if a header named `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes the header `name` and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Merges `other` into `self` with replace-or-add semantics.
    pub fn merge(&mut self, other: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) {
        for (name, value) in other {
            self.replace_or_add(name, value);
        }
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        headers.merge(iter);
        headers
    }
}

impl<K, V> Extend<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.merge(iter);
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// Header Composer
// ============================================================================

/// Builds the header set of a request from defaults, overrides and an
/// optional bearer token.
///
/// The defaults always declare a JSON content type unless an extra default
/// explicitly replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderComposer {
    defaults: Headers,
}

impl Default for HeaderComposer {
    fn default() -> Self {
        Self {
            defaults: Headers::new().with(CONTENT_TYPE, ContentType::Json.as_str()),
        }
    }
}

impl HeaderComposer {
    /// Composer with the JSON content type as the only default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a default header.
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.replace_or_add(name, value);
        self
    }

    /// The default header set.
    #[must_use]
    pub fn headers(&self) -> Headers {
        self.defaults.clone()
    }

    /// Defaults with `overrides` merged on top.
    #[must_use]
    pub fn headers_with(
        &self,
        overrides: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Headers {
        let mut headers = self.headers();
        headers.merge(overrides);
        headers
    }

    /// Defaults plus `Authorization: Bearer <token>` when a token is given.
    #[must_use]
    pub fn headers_with_token(&self, token: Option<&str>) -> Headers {
        self.headers_with_token_and(token, Headers::new())
    }

    /// `other` with the bearer token injected, merged onto the defaults.
    #[must_use]
    pub fn headers_with_token_and(
        &self,
        token: Option<&str>,
        other: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Headers {
        let mut overrides: Headers = other.into_iter().collect();
        if let Some(token) = token {
            overrides.replace_or_add(AUTHORIZATION, format!("Bearer {token}"));
        }
        self.headers_with(overrides)
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn replace_or_add_keeps_position() {
        let mut headers = Headers::new()
            .with("Accept", "text/plain")
            .with("X-Trace", "1");
        headers.replace_or_add("ACCEPT", "application/json");

        let entries: Vec<_> = headers.iter().collect();
        check!(entries == vec![("ACCEPT", "application/json"), ("X-Trace", "1")]);
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut headers = Headers::new().with("X-Token", "secret");
        check!(headers.remove("x-token") == Some("secret".to_string()));
        check!(headers.is_empty());
        check!(headers.remove("x-token") == None);
    }

    #[test]
    fn collect_deduplicates() {
        let headers: Headers = [("a", "1"), ("A", "2"), ("b", "3")].into_iter().collect();
        check!(headers.len() == 2);
        check!(headers.get("a") == Some("2"));
    }

    #[test]
    fn default_headers_declare_json() {
        let headers = HeaderComposer::new().headers();
        check!(headers.get("content-type") == Some("application/json"));
    }

    #[test]
    fn overrides_win_and_defaults_survive() {
        let composer = HeaderComposer::new().with_default("User-Agent", "courier");
        let headers = composer.headers_with([
            ("content-type", "text/plain"),
            ("X-Request-Id", "42"),
        ]);

        check!(headers.len() == 3);
        check!(headers.get("Content-Type") == Some("text/plain"));
        check!(headers.get("user-agent") == Some("courier"));
        check!(headers.get("x-request-id") == Some("42"));
    }

    #[test]
    fn overrides_property_holds_for_mixed_case_names() {
        let composer = HeaderComposer::new()
            .with_default("Accept", "application/json")
            .with_default("User-Agent", "courier");
        let overrides = [("ACCEPT", "text/csv"), ("x-custom", "yes")];

        let headers = composer.headers_with(overrides);

        for (name, value) in overrides {
            check!(headers.get(name) == Some(value));
        }
        for (name, value) in composer.headers().iter() {
            if !overrides.iter().any(|(o, _)| o.eq_ignore_ascii_case(name)) {
                check!(headers.get(name) == Some(value));
            }
        }
        check!(headers.len() == 4);
    }

    #[test]
    fn token_injects_bearer() {
        let headers = HeaderComposer::new().headers_with_token(Some("abc"));
        check!(headers.get("authorization") == Some("Bearer abc"));
        check!(headers.get("content-type") == Some("application/json"));
    }

    #[test]
    fn no_token_no_authorization() {
        let headers = HeaderComposer::new().headers_with_token(None);
        check!(!headers.contains(AUTHORIZATION));
    }

    #[test]
    fn token_replaces_authorization_in_other() {
        let headers = HeaderComposer::new()
            .headers_with_token_and(Some("abc"), [("authorization", "Basic xyz"), ("X-A", "1")]);

        check!(headers.get("Authorization") == Some("Bearer abc"));
        check!(headers.get("x-a") == Some("1"));
        check!(headers.len() == 3);
    }
}
