//! Paths the locale router leaves alone.
//!
//! # Responsibilities
//! - Match path prefixes on segment boundaries (`/api` covers `/api/users`,
//!   not `/apiary`)
//! - Match static file requests (last segment contains a `.`)
//! - Combine rules with OR semantics
//!
//! Matching is case-sensitive and uses no regex.

use std::fmt::Debug;

use super::path::strip_path_prefix;

/// A rule deciding whether a request path bypasses locale routing.
pub trait PathMatcher: Send + Sync + Debug {
    fn matches(&self, path: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim_end_matches('/');
        let prefix = if prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl PathMatcher for PrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        strip_path_prefix(path, &self.prefix).is_some()
    }
}

/// Matches requests for files, e.g. `/favicon.ico` or `/img/logo.svg`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFileMatcher;

impl PathMatcher for StaticFileMatcher {
    fn matches(&self, path: &str) -> bool {
        path.rsplit('/').next().is_some_and(|last| last.contains('.'))
    }
}

/// Matches when any of its rules match.
#[derive(Debug, Default)]
pub struct Exclusions {
    matchers: Vec<Box<dyn PathMatcher>>,
}

impl Exclusions {
    pub fn new(matchers: Vec<Box<dyn PathMatcher>>) -> Self {
        Self { matchers }
    }

    /// Prefix rules for every entry of `prefixes`, plus the static file rule
    /// when `static_files` is set.
    pub fn from_prefixes<I, S>(prefixes: I, static_files: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut matchers: Vec<Box<dyn PathMatcher>> = prefixes
            .into_iter()
            .map(|p| Box::new(PrefixMatcher::new(p)) as Box<dyn PathMatcher>)
            .collect();
        if static_files {
            matchers.push(Box::new(StaticFileMatcher));
        }
        Self { matchers }
    }

    /// `/api` and `/_next`, plus static files.
    pub fn standard() -> Self {
        Self::from_prefixes(["/api", "/_next"], true)
    }

    pub fn push(&mut self, matcher: impl PathMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl PathMatcher for Exclusions {
    fn matches(&self, path: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matcher() {
        let matcher = PrefixMatcher::new("/api");
        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/users"));
        assert!(!matcher.matches("/apiary"));
        assert!(!matcher.matches("/fr/api"));

        assert_eq!(PrefixMatcher::new("_next/").prefix(), "/_next");
    }

    #[test]
    fn test_static_file_matcher() {
        assert!(StaticFileMatcher.matches("/favicon.ico"));
        assert!(StaticFileMatcher.matches("/images/logo.svg"));
        assert!(!StaticFileMatcher.matches("/v1.2/docs"));
        assert!(!StaticFileMatcher.matches("/settings"));
        assert!(!StaticFileMatcher.matches("/"));
    }

    #[test]
    fn test_exclusions_any() {
        let exclusions = Exclusions::standard();
        assert_eq!(exclusions.len(), 3);
        assert!(exclusions.matches("/api/users"));
        assert!(exclusions.matches("/_next/static/chunk.js"));
        assert!(exclusions.matches("/robots.txt"));
        assert!(!exclusions.matches("/settings"));

        let mut exclusions = Exclusions::from_prefixes(Vec::<String>::new(), false);
        assert!(exclusions.is_empty());
        assert!(!exclusions.matches("/api"));
        exclusions.push(PrefixMatcher::new("/health"));
        assert!(exclusions.matches("/health"));
    }
}
