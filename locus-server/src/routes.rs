//! HTTP surface of the server.
//!
//! `/api/*` exposes the locale registry and the navigation helpers to
//! clients; `/{locale}/...` stands in for the downstream page renderer.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use locus_axum::locale::catalog::translate;
use locus_axum::resp::code::Code;
use locus_axum::resp::err::E;
use locus_axum::resp::r::R;
use locus_axum::{Locale, ResolvedLocale, r};
use locus_core::{LocaleRouter, LocaleTag, PreferenceList, PrefixPolicy};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Clone)]
struct AppState {
    locales: Arc<LocaleRouter>,
}

impl AppState {
    fn locale(&self, code: &str) -> Result<LocaleTag, E> {
        self.locales
            .registry()
            .lookup(code)
            .cloned()
            .ok_or_else(|| E::with_arg(Code::UnsupportedLocale, "locale", code))
    }
}

pub fn routes(locales: Arc<LocaleRouter>) -> Router {
    Router::new()
        .route("/api/locales", get(list_locales))
        .route("/api/locales/resolve", get(resolve_locale))
        .route("/api/navigation/localize", post(localize))
        .route("/api/navigation/strip", post(strip))
        .route("/api/navigation/switch", post(switch))
        .route("/", get(render_page))
        .route("/{locale}", get(render_page))
        .route("/{locale}/{*rest}", get(render_page))
        .fallback(not_found)
        .with_state(AppState { locales })
}

#[derive(Debug, Default, Serialize)]
struct LocalesView {
    locales: Vec<LocaleTag>,
    default_locale: Option<LocaleTag>,
    prefix_policy: PrefixPolicy,
}

async fn list_locales(State(state): State<AppState>) -> R<LocalesView> {
    let registry = state.locales.registry();
    R::ok(LocalesView {
        locales: registry.tags().to_vec(),
        default_locale: Some(registry.default_locale().clone()),
        prefix_policy: state.locales.prefix_policy(),
    })
}

#[derive(Debug, Serialize)]
struct ResolveView {
    locale: LocaleTag,
    preferences: PreferenceList,
}

async fn resolve_locale(Locale(locale): Locale, headers: HeaderMap) -> R<ResolveView> {
    let preferences = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(PreferenceList::parse)
        .unwrap_or_default();
    R::ok(ResolveView {
        locale,
        preferences,
    })
}

fn absolute_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::new("absolute_path"))
    }
}

#[derive(Debug, Deserialize, Validate)]
struct PathLocaleJson {
    #[validate(required, length(min = 1, max = 2048), custom(function = "absolute_path"))]
    path: Option<String>,
    #[validate(required, length(min = 1, max = 16))]
    locale: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct SwitchJson {
    #[validate(required, length(min = 1, max = 2048), custom(function = "absolute_path"))]
    path: Option<String>,
    #[validate(required, length(min = 1, max = 16))]
    from: Option<String>,
    #[validate(required, length(min = 1, max = 16))]
    to: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct PathView {
    path: String,
}

async fn localize(State(state): State<AppState>, Json(json): Json<PathLocaleJson>) -> R<PathView> {
    r!(json.validate());
    let locale = r!(state.locale(json.locale.as_deref().unwrap_or_default()));
    let path = json.path.unwrap_or_default();

    R::ok(PathView {
        path: state.locales.navigator().localize(&path, &locale),
    })
}

async fn strip(State(state): State<AppState>, Json(json): Json<PathLocaleJson>) -> R<PathView> {
    r!(json.validate());
    let locale = r!(state.locale(json.locale.as_deref().unwrap_or_default()));
    let path = json.path.unwrap_or_default();

    R::ok(PathView {
        path: state.locales.navigator().strip(&path, &locale).to_string(),
    })
}

async fn switch(State(state): State<AppState>, Json(json): Json<SwitchJson>) -> R<PathView> {
    r!(json.validate());
    let from = r!(state.locale(json.from.as_deref().unwrap_or_default()));
    let to = r!(state.locale(json.to.as_deref().unwrap_or_default()));
    let path = json.path.unwrap_or_default();

    R::ok(PathView {
        path: state.locales.navigator().switch(&path, &from, &to),
    })
}

#[derive(Debug, Default, Serialize)]
struct PageView {
    locale: String,
    path: String,
    title: String,
}

/// Placeholder for the downstream renderer.
///
/// Also reached by excluded static file paths, which carry no resolved locale.
async fn render_page(resolved: Option<Extension<ResolvedLocale>>) -> R<PageView> {
    let Some(Extension(resolved)) = resolved else {
        return R::err(Code::NotFound.into());
    };

    let title = translate(resolved.locale.as_str(), "welcome", &[]).unwrap_or_default();
    R::ok(PageView {
        locale: resolved.locale.to_string(),
        path: resolved.path,
        title,
    })
}

async fn not_found() -> R<()> {
    R::err(Code::NotFound.into())
}
