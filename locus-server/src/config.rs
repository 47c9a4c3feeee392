use std::env;
use std::path::Path;

use anyhow::Context;
use locus_core::config::{LocaleSettings, load_from_file};
use locus_core::include_yaml;
use locus_logger::LogSettings;
use serde::Deserialize;

const CONFIG_ENV: &str = "LOCUS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub log: LogSettings,
    pub locale: LocaleSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Loads `$LOCUS_CONFIG`, else `config/app.yaml`, else the built-in copy of
/// `config/app.yaml`. Returns the config and where it came from.
pub fn load() -> anyhow::Result<(AppConfig, String)> {
    let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if Path::new(&path).exists() {
        let config = load_from_file(&path).with_context(|| format!("failed to load {path}"))?;
        return Ok((config, path));
    }

    let config = include_yaml!("../config/app.yaml", AppConfig)
        .context("built-in configuration is invalid")?;
    Ok((config, "built-in defaults".to_string()))
}
