//! `Accept-Language` parsing and matching.
//!
//! Parsing is lenient: entries that cannot be understood are skipped, and a
//! header that yields nothing usable resolves to the default locale.

use std::slice;

use serde::Serialize;

use super::registry::{LocaleRegistry, LocaleTag};

/// One entry of an `Accept-Language` header, e.g. `fr-CA;q=0.8`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preference {
    /// Lowercase primary subtag (`fr`).
    pub code: String,
    /// Lowercase remainder after the first hyphen (`ca`).
    pub region: Option<String>,
    pub weight: f32,
}

impl Preference {
    /// The full lowercase range, `code` or `code-region`.
    pub fn range(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.code, region),
            None => self.code.clone(),
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(';').map(str::trim);
        let range = parts.next().filter(|r| !r.is_empty())?;

        let mut weight = 1.0;
        for param in parts {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if !name.trim().eq_ignore_ascii_case("q") {
                continue;
            }
            match value.trim().parse::<f32>() {
                Ok(q) if (0.0..=1.0).contains(&q) => weight = q,
                _ => {
                    log::debug!("Skipping language range {range:?} with bad weight {value:?}");
                    return None;
                }
            }
        }

        let range = range.to_ascii_lowercase();
        let (code, region) = match range.split_once('-') {
            Some((code, region)) => (code.to_string(), Some(region.to_string())),
            None => (range, None),
        };
        if code.is_empty() {
            return None;
        }

        Some(Self {
            code,
            region,
            weight,
        })
    }
}

/// Preferences ordered by descending weight. Equal weights keep header order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PreferenceList(Vec<Preference>);

impl PreferenceList {
    pub fn parse(header: &str) -> Self {
        let mut preferences: Vec<Preference> = header.split(',').filter_map(Preference::parse).collect();
        // sort_by is stable
        preferences.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        Self(preferences)
    }

    pub fn iter(&self) -> slice::Iter<'_, Preference> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First preference that names a registered locale.
    ///
    /// The full range is tried before the primary subtag, so a registry that
    /// lists `zh-hant` can still be reached.
    pub fn best_match<'r>(&self, registry: &'r LocaleRegistry) -> Option<&'r LocaleTag> {
        self.0.iter().find_map(|preference| {
            preference
                .region
                .as_ref()
                .and_then(|_| registry.lookup(&preference.range()))
                .or_else(|| registry.lookup(&preference.code))
        })
    }
}

impl<'a> IntoIterator for &'a PreferenceList {
    type Item = &'a Preference;
    type IntoIter = slice::Iter<'a, Preference>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub fn parse_accept_language(header: &str) -> PreferenceList {
    PreferenceList::parse(header)
}

/// Resolves the locale to serve for an optional `Accept-Language` value.
pub fn resolve<'r>(header: Option<&str>, registry: &'r LocaleRegistry) -> &'r LocaleTag {
    header
        .map(PreferenceList::parse)
        .and_then(|preferences| preferences.best_match(registry))
        .unwrap_or_else(|| registry.default_locale())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::new(["en", "fr", "kr"], "en").unwrap()
    }

    fn codes(list: &PreferenceList) -> Vec<(String, f32)> {
        list.iter().map(|p| (p.range(), p.weight)).collect()
    }

    #[test]
    fn test_parse_orders_by_weight() {
        let list = parse_accept_language("en;q=0.5, fr-CA;q=0.9, kr");
        assert_eq!(
            codes(&list),
            vec![
                ("kr".to_string(), 1.0),
                ("fr-ca".to_string(), 0.9),
                ("en".to_string(), 0.5)
            ]
        );
        assert_eq!(list.iter().nth(1).unwrap().code, "fr");
        assert_eq!(list.iter().nth(1).unwrap().region.as_deref(), Some("ca"));
    }

    #[test]
    fn test_parse_ties_keep_header_order() {
        let list = parse_accept_language("de;q=0.8, fr;q=0.8, en;q=0.8");
        let order: Vec<String> = list.iter().map(Preference::range).collect();
        assert_eq!(order, vec!["de", "fr", "en"]);
    }

    #[test]
    fn test_parse_skips_malformed_entries() {
        let list = parse_accept_language(" , fr;q=abc, en;q=1.5, kr;Q=0.3 , -US, de;level=1");
        assert_eq!(
            codes(&list),
            vec![("de".to_string(), 1.0), ("kr".to_string(), 0.3)]
        );
        assert!(parse_accept_language("").is_empty());
        assert!(parse_accept_language(";;;,,,").is_empty());
        assert!(parse_accept_language("fr;q=NaN").is_empty());
    }

    #[test]
    fn test_resolve_highest_weight_match() {
        let registry = registry();
        assert_eq!(resolve(Some("fr;q=0.9, en;q=0.5"), &registry), "fr");
        assert_eq!(resolve(Some("de, en;q=0.2, fr;q=0.4"), &registry), "fr");
        assert_eq!(resolve(Some("FR-ca"), &registry), "fr");
        assert_eq!(resolve(Some("ko-KR, kr;q=0.1"), &registry), "kr");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let registry = registry();
        assert_eq!(resolve(None, &registry), "en");
        assert_eq!(resolve(Some(""), &registry), "en");
        assert_eq!(resolve(Some("de, es;q=0.9"), &registry), "en");
        assert_eq!(resolve(Some("*"), &registry), "en");
        assert_eq!(resolve(Some("garbage;q=;;"), &registry), "en");
    }

    #[test]
    fn test_resolve_prefers_full_range() {
        let registry = LocaleRegistry::new(["zh", "zh-hant"], "zh").unwrap();
        assert_eq!(resolve(Some("zh-Hant"), &registry), "zh-hant");
        assert_eq!(resolve(Some("zh-CN"), &registry), "zh");
    }
}
