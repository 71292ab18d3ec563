use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::session;
use crate::warning;

/// Sends the browser to the Spotify authorize endpoint with the configured
/// client ID, scopes and redirect URI.
pub async fn login(State(state): State<AppState>) -> Redirect {
    let auth_url = format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        auth_url = &state.config.auth_url,
        client_id = &state.config.client_id,
        redirect_uri = &state.config.redirect_uri,
        scope = &state.config.scope,
    );

    Redirect::to(&auth_url)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
}

/// OAuth callback: exchanges the authorization code for a bearer token and
/// stores it in the session cookie. The session is only mutated on a
/// successful exchange.
pub async fn callback(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(PrivateCookieJar, Redirect), ApiError> {
    let Some(code) = params.code else {
        return Err(ApiError::MissingCode);
    };

    match state.spotify.exchange_code(&code).await {
        Ok(token) => Ok((session::store_token(jar, &token), Redirect::to("/"))),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Err(ApiError::TokenExchange)
        }
    }
}
