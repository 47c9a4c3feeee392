//! Per-locale message catalogs.
//!
//! One TOML file per locale (`en.toml`, `fr.toml`, ...) mapping keys to
//! templates. Catalogs are installed once, either at runtime with [`init`] or
//! at compile time through `catalog_assets!`, and are read-only afterwards.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use locus_core::template::{TemplatePart, parse_template, render};
use log::{error, info, warn};

/// locale -> key -> template
pub type CatalogMap = HashMap<String, HashMap<String, Vec<TemplatePart>>>;

static CATALOGS: OnceLock<CatalogMap> = OnceLock::new();

/// Installs `data` unless catalogs are already installed.
pub fn internal_init_catalog(data: CatalogMap) -> bool {
    let installed = CATALOGS.set(data).is_ok();
    if !installed {
        warn!("Message catalogs already installed, ignoring");
    }
    installed
}

fn load_catalog_file(path: &Path) -> Option<(String, HashMap<String, Vec<TemplatePart>>)> {
    if path.extension()? != "toml" {
        return None;
    }

    let locale = path.file_stem()?.to_str()?.to_ascii_lowercase();

    let content = fs::read_to_string(path)
        .inspect_err(|e| error!("Failed to read catalog {}: {}", path.display(), e))
        .ok()?;

    let raw: HashMap<String, String> = toml::from_str(&content)
        .inspect_err(|e| error!("Failed to parse catalog {}: {}", path.display(), e))
        .ok()?;

    let messages = raw
        .into_iter()
        .map(|(key, value)| (key, parse_template(&value)))
        .collect();

    info!("Loaded message catalog for locale: {}", locale);
    Some((locale, messages))
}

/// Reads every `*.toml` file of `dir`. Unreadable or malformed files are
/// logged and skipped.
pub fn load_dir(dir: impl AsRef<Path>) -> std::io::Result<CatalogMap> {
    let catalogs = fs::read_dir(dir.as_ref())?
        .filter_map(Result::ok)
        .filter_map(|entry| load_catalog_file(&entry.path()))
        .collect();
    Ok(catalogs)
}

/// Loads and installs the catalogs found in `dir`.
pub fn init(dir: impl AsRef<Path>) -> bool {
    let dir = dir.as_ref();
    match load_dir(dir) {
        Ok(catalogs) => internal_init_catalog(catalogs),
        Err(e) => {
            error!("Failed to read catalog directory {}: {}", dir.display(), e);
            false
        }
    }
}

/// Locales with an installed catalog.
pub fn installed_locales() -> Vec<&'static str> {
    CATALOGS
        .get()
        .map(|catalogs| catalogs.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn lookup<'a>(catalogs: &'a CatalogMap, locale: &str, key: &str) -> Option<&'a [TemplatePart]> {
    catalogs
        .get(locale)
        .and_then(|messages| messages.get(key))
        .map(Vec::as_slice)
}

pub fn translate(locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
    CATALOGS
        .get()
        .and_then(|catalogs| lookup(catalogs, locale, key))
        .map(|parts| render(parts, args))
}
