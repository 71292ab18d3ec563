//! # API Module
//!
//! HTTP route handlers for the web front. Every route either redirects the
//! browser back into the OAuth flow or forwards a single call to the
//! upstream Spotify API using the session's bearer token and renders the
//! result.
//!
//! ## Endpoints
//!
//! - [`home`] - landing page, gated on an authenticated session
//! - [`login`] - redirect to the Spotify authorize endpoint
//! - [`callback`] - OAuth callback; exchanges the code and stores the token
//! - [`profile`] - renders the user's profile as raw JSON
//! - [`playlists`] - renders the user's playlists
//! - [`add_track`] - adds a track to a playlist, then redirects to the list
//! - [`health`] - liveness check for monitoring
//!
//! Handlers hold no state of their own; everything they need arrives through
//! [`crate::server::AppState`] and the session extractor.

mod auth;
mod health;
mod home;
mod library;

pub use auth::{callback, login};
pub use health::health;
pub use home::home;
pub use library::{add_track, playlists, profile};
