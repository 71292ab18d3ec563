use axum::response::Html;

use crate::session::Authenticated;

/// Landing page. Unauthenticated browsers are redirected to `/login` by the
/// extractor before this body runs.
pub async fn home(_session: Authenticated) -> Html<&'static str> {
    Html(
        "<h2>Spotify library</h2>\
         <p><a href=\"/profile\">Profile</a> | <a href=\"/playlists\">Playlists</a></p>",
    )
}
