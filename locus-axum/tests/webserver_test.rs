use axum::body::Body;
use axum::http::header::LOCATION;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use locus_axum::locale::catalog;
use locus_axum::resp::code::Code;
use locus_axum::resp::err::E;
use locus_axum::resp::r::R;
use locus_axum::{Locale, ResolvedLocale, WebServer, r};
use locus_core::{LocaleRegistry, LocaleRouter, RedirectKind};
use tower::ServiceExt;
use validator::Validate;

#[derive(serde::Serialize, Default)]
struct Page {
    locale: String,
    path: String,
}

#[derive(serde::Serialize)]
struct Ping {
    pong: bool,
}

#[derive(serde::Serialize, Default)]
struct Echo {
    name: String,
}

#[derive(serde::Deserialize, Validate)]
struct EchoJson {
    #[validate(required, length(min = 1, max = 10))]
    name: Option<String>,
}

// static file requests also land here, without a resolved locale
async fn page(resolved: Option<Extension<ResolvedLocale>>) -> R<Page> {
    let Some(Extension(resolved)) = resolved else {
        return R::err(Code::NotFound.into());
    };
    R::ok(Page {
        locale: resolved.locale.to_string(),
        path: resolved.path,
    })
}

async fn ping() -> R<Ping> {
    R::ok(Ping { pong: true })
}

async fn whoami(Locale(locale): Locale) -> String {
    locale.to_string()
}

async fn echo(Json(json): Json<EchoJson>) -> R<Option<Echo>> {
    r!(json.validate());

    R::ok(Some(Echo {
        name: json.name.unwrap_or_default(),
    }))
}

async fn unsupported() -> R<()> {
    R::err(E::with_arg(Code::UnsupportedLocale, "locale", "de"))
}

async fn not_found() -> R<()> {
    R::err(Code::NotFound.into())
}

async fn boom() -> R<()> {
    R::err(E::Sys(anyhow::anyhow!("boom")))
}

fn locales_dir() -> String {
    format!("{}/tests/locales", env!("CARGO_MANIFEST_DIR"))
}

fn app() -> Router {
    Router::new()
        .route("/{locale}", get(page))
        .route("/{locale}/{*rest}", get(page))
        .route("/api/ping", get(ping))
        .route("/api/whoami", get(whoami))
        .route("/api/echo", post(echo))
        .route("/api/unsupported", get(unsupported))
        .route("/api/boom", get(boom))
        .fallback(not_found)
}

fn router_with(kind: RedirectKind) -> Router {
    catalog::init(locales_dir());

    let registry = LocaleRegistry::new(["en", "fr", "kr"], "en").unwrap();
    WebServer::new("127.0.0.1:0")
        .mount(app())
        .layer_locale(LocaleRouter::new(registry).redirect_kind(kind))
        .into_router()
}

fn router() -> Router {
    router_with(RedirectKind::Temporary)
}

async fn send(
    router: Router,
    method: &str,
    uri: &str,
    body: Body,
    accept_language: Option<&str>,
) -> (StatusCode, Option<String>, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if method == "POST" {
        builder = builder.header("content-type", "application/json");
    }
    if let Some(v) = accept_language {
        builder = builder.header("accept-language", v);
    }

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

async fn request_get(
    router: Router,
    uri: &str,
    accept_language: Option<&str>,
) -> (StatusCode, Option<String>, String) {
    send(router, "GET", uri, Body::empty(), accept_language).await
}

#[tokio::test]
async fn root_redirects_to_highest_weighted_locale() {
    let (status, location, _) = request_get(router(), "/", Some("fr;q=0.9, en;q=0.5")).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/fr"));
}

#[tokio::test]
async fn unprefixed_path_without_header_uses_default() {
    let (status, location, _) = request_get(router(), "/settings", None).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location.as_deref(), Some("/en/settings"));
}

#[tokio::test]
async fn redirect_keeps_query_and_honours_kind() {
    let (status, location, _) = request_get(
        router_with(RedirectKind::Permanent),
        "/checkout?plan=pro&period=year",
        Some("de-DE, kr;q=0.7"),
    )
    .await;
    assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
    assert_eq!(location.as_deref(), Some("/kr/checkout?plan=pro&period=year"));
}

#[tokio::test]
async fn lookalike_segment_is_not_a_locale() {
    let (_, location, _) = request_get(router(), "/frank", Some("kr")).await;
    assert_eq!(location.as_deref(), Some("/kr/frank"));
}

#[tokio::test]
async fn prefixed_path_is_rendered_in_its_locale() {
    let (status, location, body) = request_get(router(), "/fr/home", Some("kr")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    assert!(body.contains("\"message\":\"Succès\""));
    assert!(body.contains("\"data\":{\"locale\":\"fr\",\"path\":\"/home\"}"));

    let (status, _, body) = request_get(router(), "/kr", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"message\":\"성공\""));
    assert!(body.contains("\"path\":\"/\""));
}

#[tokio::test]
async fn api_paths_pass_through_untouched() {
    let (status, location, body) = request_get(router(), "/api/ping", Some("fr")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    assert!(body.contains("\"code\":200"));
    assert!(body.contains("\"message\":\"Succès\""));
    assert!(body.contains("\"data\":{\"pong\":true}"));

    let (_, _, body) = request_get(router(), "/api/ping", None).await;
    assert!(body.contains("\"message\":\"Ok\""));

    let (_, _, body) = request_get(router(), "/api/whoami", Some("kr;q=0.2, fr;q=0.8")).await;
    assert_eq!(body, "fr");
}

#[tokio::test]
async fn static_files_pass_through() {
    let (status, location, body) = request_get(router(), "/favicon.ico", Some("fr")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    assert!(body.contains("\"code\":404"));
    assert!(body.contains("\"message\":\"Introuvable\""));
}

#[tokio::test]
async fn messages_fall_back_to_default_locale() {
    let (_, _, body) = request_get(router(), "/api/unsupported", Some("kr")).await;
    assert!(body.contains("\"code\":903"));
    assert!(body.contains("\"message\":\"Unsupported locale: de\""));

    let (_, _, body) = request_get(router(), "/api/unsupported", Some("fr")).await;
    assert!(body.contains("\"message\":\"Langue non prise en charge : de\""));
}

#[tokio::test]
async fn payloads_are_validated() {
    let (status, _, body) = send(
        router(),
        "POST",
        "/api/echo",
        Body::from(r#"{"name":"ada"}"#),
        Some("en"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"data\":{\"name\":\"ada\"}"));

    let (status, _, body) = send(router(), "POST", "/api/echo", Body::from("{}"), Some("fr")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"code\":901"));
    assert!(body.contains("\"message\":\"Paramètre manquant\""));
    assert!(body.contains("\"data\":null"));

    let (_, _, body) = send(
        router(),
        "POST",
        "/api/echo",
        Body::from(r#"{"name":""}"#),
        Some("en"),
    )
    .await;
    assert!(body.contains("\"code\":902"));
    assert!(body.contains("\"message\":\"Illegal Parameter\""));
}

#[tokio::test]
async fn internal_errors_map_to_http_500() {
    let (status, _, body) = request_get(router(), "/api/boom", Some("en")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("\"code\":500"));
    assert!(body.contains("\"message\":\"Internal Server Error\""));
}
