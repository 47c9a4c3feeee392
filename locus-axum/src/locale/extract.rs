use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use locus_core::LocaleTag;

use super::middleware::{CURRENT_LOCALE, ResolvedLocale};

/// The locale a handler should respond in.
///
/// Taken from the [`ResolvedLocale`] extension on prefixed routes, otherwise
/// from the active locale scope. Requires the locale middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub LocaleTag);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(resolved) = parts.extensions.get::<ResolvedLocale>() {
            return Ok(Locale(resolved.locale.clone()));
        }

        CURRENT_LOCALE
            .try_with(|active| Locale(active.locale.clone()))
            .map_err(|_| {
                log::error!("Locale extractor used on a route without the locale middleware");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "locale middleware is not installed",
                )
            })
    }
}
