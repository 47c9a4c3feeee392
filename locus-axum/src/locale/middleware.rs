use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use locus_core::locale::path::split_locale;
use locus_core::{LocaleRouter, LocaleTag, RedirectKind, RoutingDecision};
use tokio::task_local;

/// Locale of the request being handled, plus the locale to fall back to when
/// a message is missing from its catalog.
#[derive(Debug, Clone)]
pub struct ActiveLocale {
    pub locale: LocaleTag,
    pub fallback: LocaleTag,
}

task_local! {
    pub static CURRENT_LOCALE: ActiveLocale;
}

/// Request extension attached to locale-prefixed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    pub locale: LocaleTag,
    /// The request path without its locale segment, if any; `/` at minimum.
    pub path: String,
}

/// Locale routing middleware.
///
/// - unprefixed paths are redirected to `/{preferred}{path}`, or served as the
///   default locale under [`PrefixPolicy::AsNeeded`](locus_core::PrefixPolicy)
/// - prefixed paths continue with a [`ResolvedLocale`] extension
/// - excluded paths continue untouched
///
/// Handlers run inside a [`CURRENT_LOCALE`] scope in the last two cases; for
/// excluded paths the locale comes from `Accept-Language`.
pub async fn route_locale(
    State(router): State<Arc<LocaleRouter>>,
    mut req: Request,
    next: Next,
) -> Response {
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let decision = router.decide(
        req.uri().path(),
        req.uri().query(),
        accept_language.as_deref(),
    );
    let fallback = router.registry().default_locale().clone();

    match decision {
        RoutingDecision::Redirect { location, locale } => {
            log::debug!(
                "Redirecting non-localized path {} to {} ({})",
                req.uri().path(),
                location,
                locale
            );
            redirect(router.redirect(), &location)
        }
        RoutingDecision::Localized { locale } => {
            let path = split_locale(req.uri().path(), router.registry())
                .map(|(_, rest)| rest.to_string())
                .unwrap_or_else(|| req.uri().path().to_string());
            req.extensions_mut().insert(ResolvedLocale {
                locale: locale.clone(),
                path,
            });
            CURRENT_LOCALE
                .scope(ActiveLocale { locale, fallback }, next.run(req))
                .await
        }
        RoutingDecision::Excluded => {
            let locale = router.preferred(accept_language.as_deref()).clone();
            CURRENT_LOCALE
                .scope(ActiveLocale { locale, fallback }, next.run(req))
                .await
        }
    }
}

fn redirect(kind: RedirectKind, location: &str) -> Response {
    match kind {
        RedirectKind::Temporary => Redirect::temporary(location).into_response(),
        RedirectKind::Permanent => Redirect::permanent(location).into_response(),
    }
}

/// Locale of the current task, if a locale scope is active.
pub fn current_locale() -> Option<LocaleTag> {
    CURRENT_LOCALE.try_with(|active| active.locale.clone()).ok()
}
