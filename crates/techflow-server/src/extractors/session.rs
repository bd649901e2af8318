//! Session extractor for protected routes

use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use techflow_types::Session;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// The authenticated admin session, resolved from the request cookie.
///
/// Every admin operation goes through this extractor before any handler
/// code runs, so an anonymous request can never reach a mutating path.
pub struct AdminSession(pub Session);

/// Anonymous requests to protected routes are sent to the login view
/// instead of getting a hard error.
pub struct RedirectToLogin;

impl IntoResponse for RedirectToLogin {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = RedirectToLogin;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value())
            .ok_or(RedirectToLogin)?;

        match state.auth_service.session(token) {
            Some(session) => Ok(AdminSession(session)),
            None => Err(RedirectToLogin),
        }
    }
}
