use serde::{Deserialize, Serialize};

/// Body of a successful (or unsuccessful) token exchange. Spotify returns a
/// JSON error object without `access_token` on failure, so everything is
/// optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    /// Missing `items` renders as an empty list, not an error.
    #[serde(default)]
    pub items: Vec<Playlist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

impl AddTrackToPlaylistRequest {
    /// Request body for adding a single track by ID.
    pub fn for_track(track_id: &str) -> Self {
        AddTrackToPlaylistRequest {
            uris: vec![format!("spotify:track:{track_id}")],
        }
    }
}
