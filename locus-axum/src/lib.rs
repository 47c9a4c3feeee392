pub mod locale;
pub use locale::catalog::{CatalogMap, internal_init_catalog};
pub use locale::extract::Locale;
pub use locale::middleware::{ActiveLocale, CURRENT_LOCALE, ResolvedLocale, route_locale};
pub use locus_core::template::TemplatePart;

pub mod resp;
pub mod server;
pub use server::WebServer;

// catalog_assets! expands to `#[locus_axum::ctor::ctor]`
pub use ctor;
