//! Configuration management for the Spotify web front.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and a `.env` file. All configuration is read once at
//! startup into an immutable [`Config`] struct that is passed to the route
//! handlers through the application state; nothing reads the environment ad
//! hoc at request time.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. Application defaults (endpoint URLs and scope only)

use std::env;

use axum_extra::extract::cookie::Key;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SCOPE: &str = "user-library-read playlist-read-private playlist-modify-public";

/// Loads environment variables from a `.env` file in the working directory.
///
/// Missing files are ignored; plain environment variables always work without
/// one.
pub fn load_env() {
    dotenv::dotenv().ok();
}

/// Immutable application configuration.
///
/// Credentials and the session key are required; the Spotify endpoint URLs
/// and the OAuth scope fall back to well-known defaults and exist as
/// overrides so tests and local mocks can substitute the upstream.
#[derive(Clone)]
pub struct Config {
    /// Address and port the HTTP server binds to.
    pub server_addr: String,
    /// OAuth client ID from the Spotify developer dashboard.
    pub client_id: String,
    /// OAuth client secret from the Spotify developer dashboard.
    pub client_secret: String,
    /// Callback URL registered with the Spotify application.
    pub redirect_uri: String,
    /// Space-separated OAuth scopes requested during authorization.
    pub scope: String,
    /// Spotify OAuth authorization endpoint.
    pub auth_url: String,
    /// Spotify OAuth token exchange endpoint.
    pub token_url: String,
    /// Spotify Web API base URL.
    pub api_url: String,
    /// Key used to encrypt and sign the session cookie.
    pub cookie_key: Key,
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// # Required env vars
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID`
    /// - `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// - `SPOTIFY_API_REDIRECT_URI`
    /// - `SESSION_KEY` (at least 64 bytes of key material)
    ///
    /// # Optional env vars
    ///
    /// - `SERVER_ADDRESS` (default `127.0.0.1:8080`)
    /// - `SPOTIFY_API_AUTH_SCOPE`
    /// - `SPOTIFY_API_AUTH_URL`
    /// - `SPOTIFY_API_TOKEN_URL`
    /// - `SPOTIFY_API_URL`
    ///
    /// # Errors
    ///
    /// Returns a message naming the first missing required variable, or an
    /// undersized `SESSION_KEY`. Callers are expected to treat this as fatal
    /// at startup.
    pub fn from_env() -> Result<Config, String> {
        let client_id = require("SPOTIFY_API_AUTH_CLIENT_ID")?;
        let client_secret = require("SPOTIFY_API_AUTH_CLIENT_SECRET")?;
        let redirect_uri = require("SPOTIFY_API_REDIRECT_URI")?;

        let key_material = require("SESSION_KEY")?;
        let cookie_key = Key::try_from(key_material.as_bytes())
            .map_err(|_| "SESSION_KEY must be at least 64 bytes".to_string())?;

        Ok(Config {
            server_addr: var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id,
            client_secret,
            redirect_uri,
            scope: var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            cookie_key,
        })
    }
}

fn require(var: &str) -> Result<String, String> {
    env::var(var).map_err(|_| format!("{var} must be set"))
}

fn var_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}
