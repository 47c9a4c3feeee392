//! The per-request routing decision.

use serde::{Deserialize, Serialize};

use super::matcher::{Exclusions, PathMatcher};
use super::navigation::{Navigator, PrefixPolicy};
use super::path::classify;
use super::preference::resolve;
use super::registry::{LocaleRegistry, LocaleTag};

/// Status used for locale redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectKind {
    /// 307
    #[default]
    Temporary,
    /// 308
    Permanent,
}

impl RedirectKind {
    pub fn status_code(self) -> u16 {
        match self {
            RedirectKind::Temporary => 307,
            RedirectKind::Permanent => 308,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Outside locale routing; forward untouched.
    Excluded,
    /// Prefixed, or unprefixed under [`PrefixPolicy::AsNeeded`]; forward with
    /// the locale attached.
    Localized { locale: LocaleTag },
    /// Unprefixed under [`PrefixPolicy::Always`]; send the client to `location`.
    Redirect { location: String, locale: LocaleTag },
}

impl RoutingDecision {
    pub fn locale(&self) -> Option<&LocaleTag> {
        match self {
            RoutingDecision::Excluded => None,
            RoutingDecision::Localized { locale } | RoutingDecision::Redirect { locale, .. } => {
                Some(locale)
            }
        }
    }
}

/// Immutable routing rules, built at startup and shared across requests.
#[derive(Debug)]
pub struct LocaleRouter {
    registry: LocaleRegistry,
    exclusions: Exclusions,
    policy: PrefixPolicy,
    redirect: RedirectKind,
}

impl LocaleRouter {
    /// A router with the standard exclusions, [`PrefixPolicy::Always`] and
    /// temporary redirects.
    pub fn new(registry: LocaleRegistry) -> Self {
        Self {
            registry,
            exclusions: Exclusions::standard(),
            policy: PrefixPolicy::default(),
            redirect: RedirectKind::default(),
        }
    }

    pub fn exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn policy(mut self, policy: PrefixPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn redirect_kind(mut self, kind: RedirectKind) -> Self {
        self.redirect = kind;
        self
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn prefix_policy(&self) -> PrefixPolicy {
        self.policy
    }

    pub fn redirect(&self) -> RedirectKind {
        self.redirect
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.registry.clone(), self.policy)
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclusions.matches(path)
    }

    /// Locale preferred by the client, ignoring the path.
    pub fn preferred(&self, accept_language: Option<&str>) -> &LocaleTag {
        resolve(accept_language, &self.registry)
    }

    pub fn decide(
        &self,
        path: &str,
        query: Option<&str>,
        accept_language: Option<&str>,
    ) -> RoutingDecision {
        if self.is_excluded(path) {
            return RoutingDecision::Excluded;
        }

        if let Some(locale) = classify(path, &self.registry) {
            return RoutingDecision::Localized {
                locale: locale.clone(),
            };
        }

        // under as-needed, unprefixed URLs belong to the default locale
        if self.policy == PrefixPolicy::AsNeeded {
            return RoutingDecision::Localized {
                locale: self.registry.default_locale().clone(),
            };
        }

        let locale = self.preferred(accept_language).clone();
        let location = redirect_target(&locale, path, query);
        RoutingDecision::Redirect { location, locale }
    }
}

/// `/` becomes `/{locale}`, any other path `/{locale}{path}`; a non-empty
/// query is carried over.
pub fn redirect_target(locale: &LocaleTag, path: &str, query: Option<&str>) -> String {
    let mut target = match path {
        "" | "/" => format!("/{locale}"),
        p => format!("/{locale}{p}"),
    };
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(q);
    }
    target
}
