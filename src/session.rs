//! Signed-cookie session handling.
//!
//! The session carries exactly one field: the opaque bearer token obtained
//! from the OAuth token exchange. It lives encrypted and signed inside a
//! single cookie, so there is no server-side session store and no explicit
//! destruction; the session ends when the browser drops the cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::server::AppState;

const SESSION_COOKIE: &str = "spotweb_session";

/// Per-browser session state, materialized from the cookie jar.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Bearer token for the upstream API, if the browser has authenticated.
    pub token: Option<String>,
}

impl Session {
    pub fn from_jar(jar: &PrivateCookieJar) -> Session {
        Session {
            token: jar.get(SESSION_COOKIE).map(|c| c.value().to_string()),
        }
    }
}

/// Writes the bearer token into the session cookie.
///
/// The returned jar must be included in the response for the cookie to be
/// set. No `Max-Age` is attached: this is a session cookie that expires with
/// the browser session.
pub fn store_token(jar: PrivateCookieJar, token: &str) -> PrivateCookieJar {
    jar.add(session_cookie(token))
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Bearer token of an authenticated session.
///
/// Use as an extractor in protected route handlers. The rejection is a
/// redirect to `/login`, so no handler body ever runs without a token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub String);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar: PrivateCookieJar = PrivateCookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        Session::from_jar(&jar)
            .token
            .map(Authenticated)
            .ok_or_else(|| Redirect::to("/login"))
    }
}
