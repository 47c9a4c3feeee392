//! Building and taking apart localized in-app links.
//!
//! These follow the same prefix rules the router enforces, so a link built
//! here never bounces through a redirect.

use serde::{Deserialize, Serialize};

use super::path::strip_path_prefix;
use super::registry::{LocaleRegistry, LocaleTag};

/// Whether the default locale carries its own path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixPolicy {
    /// Every locale is prefixed: `/en/home`, `/fr/home`.
    #[default]
    Always,
    /// The default locale is not prefixed: `/home`, `/fr/home`.
    AsNeeded,
}

impl PrefixPolicy {
    pub fn prefixes(self, current: &str, default: &str) -> bool {
        match self {
            PrefixPolicy::Always => true,
            PrefixPolicy::AsNeeded => current != default,
        }
    }
}

/// Returns `path` as seen by a visitor browsing in `current`.
///
/// `/` maps to `/{current}`, never `/{current}/`.
pub fn build_localized_path(
    path: &str,
    current: &str,
    default: &str,
    policy: PrefixPolicy,
) -> String {
    if !policy.prefixes(current, default) {
        return path.to_string();
    }
    match path {
        "" | "/" => format!("/{current}"),
        p if p.starts_with('/') => format!("/{current}{p}"),
        p => format!("/{current}/{p}"),
    }
}

/// Inverse of [`build_localized_path`] for absolute paths.
pub fn strip_locale_prefix<'p>(
    path: &'p str,
    current: &str,
    default: &str,
    policy: PrefixPolicy,
) -> &'p str {
    if !policy.prefixes(current, default) {
        return path;
    }
    match strip_path_prefix(path, &format!("/{current}")) {
        Some("") => "/",
        Some(rest) => rest,
        None => path,
    }
}

/// Target of a language switch: drop the `current` prefix, add `target`'s.
pub fn switch_locale_path(
    path: &str,
    current: &str,
    target: &str,
    default: &str,
    policy: PrefixPolicy,
) -> String {
    let bare = strip_locale_prefix(path, current, default, policy);
    build_localized_path(bare, target, default, policy)
}

/// The navigation helpers bound to one registry and policy.
#[derive(Debug, Clone)]
pub struct Navigator {
    registry: LocaleRegistry,
    policy: PrefixPolicy,
}

impl Navigator {
    pub fn new(registry: LocaleRegistry, policy: PrefixPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn policy(&self) -> PrefixPolicy {
        self.policy
    }

    pub fn localize(&self, path: &str, locale: &LocaleTag) -> String {
        build_localized_path(
            path,
            locale.as_str(),
            self.registry.default_locale().as_str(),
            self.policy,
        )
    }

    pub fn strip<'p>(&self, path: &'p str, locale: &LocaleTag) -> &'p str {
        strip_locale_prefix(
            path,
            locale.as_str(),
            self.registry.default_locale().as_str(),
            self.policy,
        )
    }

    pub fn switch(&self, path: &str, from: &LocaleTag, to: &LocaleTag) -> String {
        switch_locale_path(
            path,
            from.as_str(),
            to.as_str(),
            self.registry.default_locale().as_str(),
            self.policy,
        )
    }
}
