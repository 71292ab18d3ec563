use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::spotify::UpstreamError;

/// User-visible request errors.
///
/// Every variant is terminal for the current request and renders as a flat
/// 400 with a fixed plain-text message. Upstream error bodies are never
/// parsed or surfaced to the browser.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The OAuth callback was invoked without a `code` query parameter.
    #[error("Error: No code found in request")]
    MissingCode,

    /// The token endpoint returned no access token.
    #[error("Error: Failed to retrieve access token")]
    TokenExchange,

    /// The playlist-add call returned something other than 201 Created.
    #[error("Error: Failed to add track")]
    TrackAdd,

    /// Transport failure talking to the upstream API.
    #[error("Error: Upstream request failed")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
