use axum::extract::{Path, State};
use axum::response::{Html, Redirect};

use crate::error::ApiError;
use crate::server::AppState;
use crate::session::Authenticated;
use crate::warning;

/// Renders the authenticated user's profile as raw JSON. The payload is
/// forwarded verbatim from upstream, without validation.
pub async fn profile(
    State(state): State<AppState>,
    Authenticated(token): Authenticated,
) -> Result<Html<String>, ApiError> {
    let user = state.spotify.get_profile(&token).await?;
    let pretty = serde_json::to_string_pretty(&user).unwrap_or_else(|_| user.to_string());

    Ok(Html(format!(
        "<h2>Profile</h2><pre>{}</pre>",
        escape(&pretty)
    )))
}

/// Renders the `items` list of the user's playlists. An upstream response
/// without `items` renders as an empty list.
pub async fn playlists(
    State(state): State<AppState>,
    Authenticated(token): Authenticated,
) -> Result<Html<String>, ApiError> {
    let playlists = state.spotify.get_playlists(&token).await?;

    let mut page = String::from("<h2>Your playlists</h2><ul>");
    for playlist in &playlists {
        page.push_str(&format!(
            "<li>{name} <small>({id})</small></li>",
            name = escape(&playlist.name),
            id = escape(&playlist.id),
        ));
    }
    page.push_str("</ul>");

    Ok(Html(page))
}

/// Adds a single track to a playlist, then redirects back to the playlist
/// list. Anything other than 201 Created from upstream is a flat 400; two
/// identical requests issue two independent upstream POSTs.
pub async fn add_track(
    State(state): State<AppState>,
    Authenticated(token): Authenticated,
    Path((playlist_id, track_id)): Path<(String, String)>,
) -> Result<Redirect, ApiError> {
    match state
        .spotify
        .add_track(&token, &playlist_id, &track_id)
        .await
    {
        Ok(()) => Ok(Redirect::to("/playlists")),
        Err(e) => {
            warning!("Adding track to playlist {} failed: {}", playlist_id, e);
            Err(ApiError::TrackAdd)
        }
    }
}

// Minimal HTML escaping for upstream-controlled strings.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
