mod config;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use locus_axum::WebServer;
use locus_axum::locale::catalog::installed_locales;
use locus_axum_macro::catalog_assets;
use locus_logger::LoggerConfig;

catalog_assets!("locales");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = config::load()?;
    let _guard = LoggerConfig::from(config.log).init()?;
    log::info!("Loaded configuration from {}", source);

    let locales = Arc::new(
        config
            .locale
            .build_router()
            .context("invalid locale configuration")?,
    );

    let installed = installed_locales();
    for tag in locales.registry().tags() {
        if !installed.contains(&tag.as_str()) {
            log::warn!("No message catalog for locale {}, responses fall back to {}", tag, locales.registry().default_locale());
        }
    }
    log::info!(
        "Serving locales {:?} (default {}, {:?} prefixes)",
        locales.registry().tags(),
        locales.registry().default_locale(),
        locales.prefix_policy()
    );

    WebServer::new(config.server.addr)
        .mount(routes::routes(locales.clone()))
        .layer_locale(locales)
        .start()
        .await
}
