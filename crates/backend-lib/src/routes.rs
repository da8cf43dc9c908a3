// ============================
// sessiongate-backend-lib/src/routes.rs
// ============================
//! HTTP router: decodes forms, cookies and headers, calls the `AuthService`
//! and turns its verdict into a response.
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, HeaderName, Method},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sessiongate_common::{
    CredentialsForm, MessageResponse, UsernameForm, CSRF_COOKIE, CSRF_HEADER, SESSION_COOKIE,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AuthSettings;
use crate::error::AppError;
use crate::AppState;

/// Create the HTTP router.
///
/// OPTIONS requests are answered by the CORS layer before routing.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(CSRF_HEADER)]);

    Router::new()
        .route("/", get(index))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/protected", post(protected))
        .route("/logout", post(logout))
        .route("/signup", post(signup))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> &'static str {
    "Hello World"
}

async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth.register(&form.username, form.password).await?;
    Ok(Json(MessageResponse::new("User registered successfully")))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = state.auth.login(&form.username, form.password).await?;

    let settings = &state.settings.auth;
    let jar = jar
        .add(issue_cookie(SESSION_COOKIE, tokens.session_token, true, settings))
        .add(issue_cookie(CSRF_COOKIE, tokens.csrf_token, false, settings));

    Ok((jar, Json(MessageResponse::new("User logged in successfully!"))))
}

async fn protected(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<UsernameForm>,
) -> Result<Json<MessageResponse>, AppError> {
    let (session_token, csrf_token) = presented_tokens(&jar, &headers);
    state
        .auth
        .authorize(&form.username, &session_token, &csrf_token)?;

    Ok(Json(MessageResponse::new(format!(
        "CSRF validation successful! Welcome {}",
        form.username
    ))))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<UsernameForm>,
) -> Result<impl IntoResponse, AppError> {
    let (session_token, csrf_token) = presented_tokens(&jar, &headers);
    state
        .auth
        .logout(&form.username, &session_token, &csrf_token)?;

    let settings = &state.settings.auth;
    let jar = jar
        .add(expired_cookie(SESSION_COOKIE, true, settings))
        .add(expired_cookie(CSRF_COOKIE, false, settings));

    Ok((jar, Json(MessageResponse::new("Logged out successfully!"))))
}

/// Validation-only dry run of the registration rules
async fn signup(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CredentialsForm>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .auth
        .check_credentials(&form.username, &form.password)?;
    Ok(Json(MessageResponse::new("Credentials are valid")))
}

/// Session token from the cookie, CSRF token from the header; empty if absent
fn presented_tokens(jar: &CookieJar, headers: &HeaderMap) -> (String, String) {
    let session_token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .unwrap_or_default();
    let csrf_token = headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    (session_token, csrf_token)
}

fn issue_cookie(
    name: &'static str,
    value: String,
    http_only: bool,
    settings: &AuthSettings,
) -> Cookie<'static> {
    let max_age = i64::try_from(settings.cookie_ttl_secs).unwrap_or(i64::MAX);
    Cookie::build((name, value))
        .path("/")
        .http_only(http_only)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Empty cookie dated in the past so the browser drops it
fn expired_cookie(name: &'static str, http_only: bool, settings: &AuthSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, ""))
        .path("/")
        .http_only(http_only)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}
