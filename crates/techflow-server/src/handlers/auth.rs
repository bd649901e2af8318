//! Login and logout handlers

use crate::error::Result;
use crate::extractors::SESSION_COOKIE;
use crate::AppState;
use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Verify credentials and establish the session cookie.
///
/// Success lands on the admin panel; failure surfaces as an inline error
/// for the login view (the client stays anonymous).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect)> {
    let (token, _session) = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);

    Ok((jar.add(cookie), Redirect::to("/admin")))
}

/// Drop the session and clear the cookie. Idempotent: logging out while
/// anonymous just redirects.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth_service.logout(cookie.value());
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/"))
}
