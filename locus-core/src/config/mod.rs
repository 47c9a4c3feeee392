//! YAML configuration with `${VAR}` / `${VAR:default}` environment substitution.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use dotenvy::dotenv;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::locale::matcher::Exclusions;
use crate::locale::navigation::PrefixPolicy;
use crate::locale::registry::{LocaleRegistry, RegistryError};
use crate::locale::routing::{LocaleRouter, RedirectKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("locale configuration: {0}")]
    Registry(#[from] RegistryError),
    #[error("invalid excluded prefix: {0:?}")]
    InvalidExclusion(String),
}

fn expand_env(content: &str) -> String {
    // a missing .env file is normal outside development
    let _ = dotenv();

    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z0-9_]+)(?::([^\}]*))?\}").expect("Invalid regex pattern")
    });

    re.replace_all(content, |caps: &regex::Captures| {
        let default = caps.get(2).map(|m| m.as_str());
        env::var(&caps[1]).unwrap_or_else(|_| default.unwrap_or("").to_string())
    })
    .into_owned()
}

pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(serde_yaml::from_str(&expand_env(content))?)
}

/// Embeds a YAML file at compile time and deserializes it at runtime.
#[macro_export]
macro_rules! include_yaml {
    ($path:expr, $t:ty) => {
        $crate::config::load_from_str::<$t>(include_str!($path))
    };
}

/// The `locale:` section of the application config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub prefix_policy: PrefixPolicy,
    pub redirect: RedirectKind,
    pub exclude_prefixes: Vec<String>,
    pub exclude_static_files: bool,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            locales: vec!["en".into(), "fr".into(), "kr".into()],
            default_locale: "en".into(),
            prefix_policy: PrefixPolicy::Always,
            redirect: RedirectKind::Temporary,
            exclude_prefixes: vec!["/api".into(), "/_next".into()],
            exclude_static_files: true,
        }
    }
}

impl LocaleSettings {
    pub fn registry(&self) -> Result<LocaleRegistry, ConfigError> {
        Ok(LocaleRegistry::new(&self.locales, &self.default_locale)?)
    }

    pub fn build_router(&self) -> Result<LocaleRouter, ConfigError> {
        if let Some(bad) = self
            .exclude_prefixes
            .iter()
            .find(|p| p.trim_matches('/').trim().is_empty())
        {
            return Err(ConfigError::InvalidExclusion(bad.clone()));
        }

        let exclusions =
            Exclusions::from_prefixes(self.exclude_prefixes.iter().cloned(), self.exclude_static_files);

        Ok(LocaleRouter::new(self.registry()?)
            .exclusions(exclusions)
            .policy(self.prefix_policy)
            .redirect_kind(self.redirect))
    }
}
