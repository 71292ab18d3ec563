use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use axum_extra::extract::cookie::Key;
use serde_json::{Value, json};
use tower::ServiceExt;

use spotweb::config::Config;
use spotweb::server::{AppState, router};
use spotweb::spotify::{SpotifyApi, UpstreamError};
use spotweb::types::Playlist;

// ---- fake upstream ------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Exchange(String),
    Profile(String),
    Playlists(String),
    AddTrack {
        token: String,
        playlist_id: String,
        track_id: String,
    },
}

/// Scripted stand-in for the Spotify API that records every call it receives.
#[derive(Default)]
struct FakeSpotify {
    /// Token the exchange hands out; `None` simulates a response without
    /// `access_token`.
    access_token: Option<String>,
    playlists: Vec<Playlist>,
    /// Whether the add-track call answers 201 Created.
    add_track_created: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeSpotify {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpotifyApi for FakeSpotify {
    async fn exchange_code(&self, code: &str) -> Result<String, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Exchange(code.to_string()));
        self.access_token
            .clone()
            .ok_or(UpstreamError::MissingAccessToken)
    }

    async fn get_profile(&self, token: &str) -> Result<Value, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Profile(token.to_string()));
        Ok(json!({"id": "user-1", "display_name": "Tester"}))
    }

    async fn get_playlists(&self, token: &str) -> Result<Vec<Playlist>, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Playlists(token.to_string()));
        Ok(self.playlists.clone())
    }

    async fn add_track(
        &self,
        token: &str,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().push(Call::AddTrack {
            token: token.to_string(),
            playlist_id: playlist_id.to_string(),
            track_id: track_id.to_string(),
        });
        if self.add_track_created {
            Ok(())
        } else {
            Err(UpstreamError::Status(reqwest::StatusCode::FORBIDDEN))
        }
    }
}

// ---- helpers ------------------------------------------------------------

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://localhost:8080/callback".to_string(),
        scope: "playlist-read-private".to_string(),
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: "https://accounts.example.com/api/token".to_string(),
        api_url: "https://api.example.com/v1".to_string(),
        cookie_key: Key::generate(),
    }
}

fn app(fake: Arc<FakeSpotify>) -> Router {
    router(AppState {
        config: Arc::new(test_config()),
        spotify: fake,
    })
}

async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

/// First Set-Cookie pair of a response, suitable for replaying in a
/// Cookie header.
fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

/// Runs the callback with a fixed code and returns the session cookie.
async fn authenticate(app: &Router) -> String {
    let response = get(app, "/callback?code=test-code").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    set_cookie(&response).expect("successful callback must set the session cookie")
}

// ---- tests --------------------------------------------------------------

#[tokio::test]
async fn protected_routes_redirect_to_login_without_session() {
    let fake = Arc::new(FakeSpotify::default());
    let app = app(fake.clone());

    for uri in ["/", "/profile", "/playlists", "/add-track/p1/t1"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "uri: {uri}");
        assert_eq!(location(&response), "/login", "uri: {uri}");
    }

    // nothing ever reached the upstream
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn login_redirects_to_authorize_endpoint() {
    let app = app(Arc::new(FakeSpotify::default()));

    let response = get(&app, "/login").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.starts_with("https://accounts.example.com/authorize?"));
    assert!(target.contains("client_id=test-client"));
    assert!(target.contains("response_type=code"));
    assert!(target.contains("redirect_uri=http://localhost:8080/callback"));
    assert!(target.contains("scope=playlist-read-private"));
}

#[tokio::test]
async fn callback_without_code_is_400_and_does_not_touch_the_session() {
    let fake = Arc::new(FakeSpotify::default());
    let app = app(fake.clone());

    let response = get(&app, "/callback").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());
    assert!(fake.calls().is_empty());

    let body = body_string(response).await;
    assert_eq!(body, "Error: No code found in request");
}

#[tokio::test]
async fn callback_with_failed_exchange_is_400_and_does_not_touch_the_session() {
    let fake = Arc::new(FakeSpotify::default()); // access_token: None
    let app = app(fake.clone());

    let response = get(&app, "/callback?code=bad-code").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());
    assert_eq!(fake.calls(), vec![Call::Exchange("bad-code".to_string())]);

    let body = body_string(response).await;
    assert_eq!(body, "Error: Failed to retrieve access token");
}

#[tokio::test]
async fn callback_stores_token_and_profile_sends_that_exact_token() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        ..FakeSpotify::default()
    });
    let app = app(fake.clone());

    let response = get(&app, "/callback?code=abc").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let cookie = set_cookie(&response).expect("session cookie must be set");

    let response = get_with_cookie(&app, "/profile", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Tester"));

    assert_eq!(
        fake.calls(),
        vec![
            Call::Exchange("abc".to_string()),
            Call::Profile("token-123".to_string()),
        ]
    );
}

#[tokio::test]
async fn home_renders_for_an_authenticated_session() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        ..FakeSpotify::default()
    });
    let app = app(fake);

    let cookie = authenticate(&app).await;
    let response = get_with_cookie(&app, "/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("/playlists"));
}

#[tokio::test]
async fn playlists_render_the_items_from_upstream() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        playlists: vec![
            Playlist {
                id: "pl-1".to_string(),
                name: "Morning Mix".to_string(),
            },
            Playlist {
                id: "pl-2".to_string(),
                name: "Deep Focus".to_string(),
            },
        ],
        ..FakeSpotify::default()
    });
    let app = app(fake.clone());

    let cookie = authenticate(&app).await;
    let response = get_with_cookie(&app, "/playlists", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Morning Mix"));
    assert!(body.contains("Deep Focus"));
    assert!(
        fake.calls()
            .contains(&Call::Playlists("token-123".to_string()))
    );
}

#[tokio::test]
async fn playlists_default_to_an_empty_list() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        ..FakeSpotify::default()
    });
    let app = app(fake);

    let cookie = authenticate(&app).await;
    let response = get_with_cookie(&app, "/playlists", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("<ul></ul>"));
}

#[tokio::test]
async fn add_track_redirects_to_playlists_on_created() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        add_track_created: true,
        ..FakeSpotify::default()
    });
    let app = app(fake.clone());

    let cookie = authenticate(&app).await;
    let response = get_with_cookie(&app, "/add-track/pl-1/tr-9", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/playlists");

    assert!(fake.calls().contains(&Call::AddTrack {
        token: "token-123".to_string(),
        playlist_id: "pl-1".to_string(),
        track_id: "tr-9".to_string(),
    }));
}

#[tokio::test]
async fn add_track_is_400_when_upstream_does_not_answer_created() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        add_track_created: false,
        ..FakeSpotify::default()
    });
    let app = app(fake);

    let cookie = authenticate(&app).await;
    let response = get_with_cookie(&app, "/add-track/pl-1/tr-9", &cookie).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_string(response).await;
    assert_eq!(body, "Error: Failed to add track");
}

#[tokio::test]
async fn add_track_twice_issues_two_independent_upstream_posts() {
    let fake = Arc::new(FakeSpotify {
        access_token: Some("token-123".to_string()),
        add_track_created: true,
        ..FakeSpotify::default()
    });
    let app = app(fake.clone());

    let cookie = authenticate(&app).await;
    for _ in 0..2 {
        let response = get_with_cookie(&app, "/add-track/pl-1/tr-9", &cookie).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let add_calls = fake
        .calls()
        .iter()
        .filter(|c| matches!(c, Call::AddTrack { .. }))
        .count();
    assert_eq!(add_calls, 2);
}

#[tokio::test]
async fn health_needs_no_session() {
    let app = app(Arc::new(FakeSpotify::default()));

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}
