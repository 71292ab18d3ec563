//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by the web
//! front: the Authorization Code token exchange and the small set of profile
//! and playlist calls the routes proxy.
//!
//! ## Architecture
//!
//! ```text
//! Route handlers (api)
//!          ↓
//! SpotifyApi trait  ←  substituted by a fake in tests
//!          ↓
//! SpotifyClient (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The [`SpotifyApi`] trait is the seam between the web front and the
//! network: handlers hold it as `Arc<dyn SpotifyApi>` and never construct an
//! HTTP client themselves. [`SpotifyClient`] is the production
//! implementation.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - authorization code exchange
//! - `GET /me` - authenticated user's profile
//! - `GET /me/playlists` - authenticated user's playlists
//! - `POST /playlists/{playlist_id}/tracks` - add a track to a playlist
//!
//! There is no retry, backoff or rate-limit handling; each call is made once
//! and its failure terminates the current request.

pub mod client;

pub use client::SpotifyClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::Playlist;

/// Errors from upstream Spotify calls.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token endpoint answered without an `access_token` field.
    #[error("token response contained no access token")]
    MissingAccessToken,

    /// Upstream answered with an unexpected status code.
    #[error("unexpected upstream status: {0}")]
    Status(reqwest::StatusCode),
}

/// Capability interface over the upstream Spotify Web API.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchanges an authorization code for a bearer token.
    async fn exchange_code(&self, code: &str) -> Result<String, UpstreamError>;

    /// Fetches the authenticated user's profile as raw JSON.
    async fn get_profile(&self, token: &str) -> Result<Value, UpstreamError>;

    /// Fetches the authenticated user's playlists (the `items` list only).
    async fn get_playlists(&self, token: &str) -> Result<Vec<Playlist>, UpstreamError>;

    /// Adds a track to a playlist. Succeeds only on 201 Created.
    async fn add_track(
        &self,
        token: &str,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), UpstreamError>;
}
