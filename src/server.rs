use axum::extract::FromRef;
use axum::{Router, routing::get};
use axum_extra::extract::cookie::Key;
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{api, config::Config, error, spotify::SpotifyApi, success};

/// Shared state for the route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: Arc<dyn SpotifyApi>,
}

// PrivateCookieJar requires Key to be extractable from state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.config.cookie_key.clone()
    }
}

/// Builds the application router. Exposed separately from the serve loop so
/// tests can drive it without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/profile", get(api::profile))
        .route("/playlists", get(api::playlists))
        .route("/add-track/{playlist_id}/{track_id}", get(api::add_track))
        .route("/health", get(api::health))
        .with_state(state)
}

pub async fn start_api_server(state: AppState) {
    let addr = match SocketAddr::from_str(&state.config.server_addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    success!("Listening on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
