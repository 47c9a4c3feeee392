//! The closed set of locales an application serves.
//!
//! A [`LocaleRegistry`] is built once from configuration and handed to the
//! router and navigation helpers. It is never mutated afterwards.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("locale registry must contain at least one locale")]
    Empty,
    #[error("invalid locale tag: {0:?}")]
    InvalidTag(String),
    #[error("duplicate locale tag: {0}")]
    Duplicate(String),
    #[error("default locale {0:?} is not one of the supported locales")]
    UnknownDefault(String),
}

/// A validated, lowercase locale identifier such as `en` or `fr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Parses a tag, normalising it to lowercase.
    ///
    /// Tags end up as a path segment, so only ASCII alphanumerics and inner
    /// hyphens are accepted.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let tag = raw.trim().to_ascii_lowercase();
        let valid = !tag.is_empty()
            && !tag.starts_with('-')
            && !tag.ends_with('-')
            && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

        if !valid {
            return Err(RegistryError::InvalidTag(raw.to_string()));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LocaleTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    tags: Vec<LocaleTag>,
    default: usize,
}

impl LocaleRegistry {
    /// Builds a registry from the supported tags and the default tag.
    ///
    /// Order is preserved; it is the order the locales are listed in by
    /// [`tags`](Self::tags).
    pub fn new<I, S>(tags: I, default: &str) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed: Vec<LocaleTag> = Vec::new();
        for raw in tags {
            let tag = LocaleTag::parse(raw.as_ref())?;
            if parsed.contains(&tag) {
                return Err(RegistryError::Duplicate(tag.0));
            }
            parsed.push(tag);
        }

        if parsed.is_empty() {
            return Err(RegistryError::Empty);
        }

        let wanted = default.trim().to_ascii_lowercase();
        let default = parsed
            .iter()
            .position(|t| t.0 == wanted)
            .ok_or_else(|| RegistryError::UnknownDefault(default.to_string()))?;

        Ok(Self {
            tags: parsed,
            default,
        })
    }

    pub fn tags(&self) -> &[LocaleTag] {
        &self.tags
    }

    pub fn default_locale(&self) -> &LocaleTag {
        &self.tags[self.default]
    }

    pub fn is_default(&self, tag: &LocaleTag) -> bool {
        tag == self.default_locale()
    }

    /// Exact, case-sensitive lookup. Used for path segments.
    pub fn get(&self, code: &str) -> Option<&LocaleTag> {
        self.tags.iter().find(|t| t.0 == code)
    }

    /// Case-insensitive lookup. Used for header values.
    pub fn lookup(&self, code: &str) -> Option<&LocaleTag> {
        self.tags.iter().find(|t| t.0.eq_ignore_ascii_case(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_and_keeps_order() {
        let registry = LocaleRegistry::new(["EN", "fr", " kr "], "En").unwrap();
        let tags: Vec<&str> = registry.tags().iter().map(LocaleTag::as_str).collect();
        assert_eq!(tags, vec!["en", "fr", "kr"]);
        assert_eq!(registry.default_locale(), "en");
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            LocaleRegistry::new(Vec::<&str>::new(), "en").unwrap_err(),
            RegistryError::Empty
        );
        assert_eq!(
            LocaleRegistry::new(["en", "f/r"], "en").unwrap_err(),
            RegistryError::InvalidTag("f/r".to_string())
        );
        assert_eq!(
            LocaleRegistry::new(["en", "EN"], "en").unwrap_err(),
            RegistryError::Duplicate("en".to_string())
        );
        assert_eq!(
            LocaleRegistry::new(["en", "fr"], "de").unwrap_err(),
            RegistryError::UnknownDefault("de".to_string())
        );
    }

    #[test]
    fn test_tag_validation() {
        assert!(LocaleTag::parse("zh-hans").is_ok());
        assert!(LocaleTag::parse("").is_err());
        assert!(LocaleTag::parse("-en").is_err());
        assert!(LocaleTag::parse("en-").is_err());
        assert!(LocaleTag::parse("e n").is_err());
    }

    #[test]
    fn test_lookups() {
        let registry = LocaleRegistry::new(["en", "fr", "kr"], "en").unwrap();
        assert_eq!(registry.get("fr").map(LocaleTag::as_str), Some("fr"));
        assert!(registry.get("FR").is_none());
        assert_eq!(registry.lookup("FR").map(LocaleTag::as_str), Some("fr"));
        assert!(registry.lookup("de").is_none());
        assert!(registry.contains("kr"));
        assert!(registry.is_default(&LocaleTag::parse("en").unwrap()));
        assert!(!registry.is_default(&LocaleTag::parse("kr").unwrap()));
    }
}
