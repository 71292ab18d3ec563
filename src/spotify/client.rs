use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{SpotifyApi, UpstreamError};
use crate::config::Config;
use crate::types::{
    AddTrackToPlaylistRequest, GetUserPlaylistsResponse, Playlist, TokenResponse,
};

/// Production client for the Spotify Web API.
///
/// Endpoint URLs come from the [`Config`], so a test or local mock server
/// can be substituted without touching this code.
pub struct SpotifyClient {
    config: Config,
}

impl SpotifyClient {
    pub fn new(config: Config) -> SpotifyClient {
        SpotifyClient { config }
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Result<String, UpstreamError> {
        let client = Client::new();
        let res = client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        let json = res.json::<TokenResponse>().await?;
        json.access_token.ok_or(UpstreamError::MissingAccessToken)
    }

    async fn get_profile(&self, token: &str) -> Result<Value, UpstreamError> {
        let api_url = format!("{url}/me", url = &self.config.api_url);

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        Ok(response.json::<Value>().await?)
    }

    async fn get_playlists(&self, token: &str) -> Result<Vec<Playlist>, UpstreamError> {
        let api_url = format!("{url}/me/playlists", url = &self.config.api_url);

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;
        let json = response.json::<GetUserPlaylistsResponse>().await?;

        Ok(json.items)
    }

    async fn add_track(
        &self,
        token: &str,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), UpstreamError> {
        let api_url = format!(
            "{url}/playlists/{id}/tracks",
            url = &self.config.api_url,
            id = playlist_id
        );

        let client = Client::new();
        let response = client
            .post(&api_url)
            .bearer_auth(token)
            .json(&AddTrackToPlaylistRequest::for_track(track_id))
            .send()
            .await?;

        if response.status() != StatusCode::CREATED {
            return Err(UpstreamError::Status(response.status()));
        }

        Ok(())
    }
}
