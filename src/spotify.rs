//! # External Catalog Client
//!
//! Spotify Web API client that serves as an alternate [`SongSource`].
//!
//! The client authenticates with the client-credentials flow, caches the
//! bearer token (refreshing it once when the API rejects it), and asks the
//! recommendations endpoint for tracks matching
//! the mood's [`MoodProfile`]. Whenever credentials are missing or a request
//! fails, it logs a warning and answers from the curated catalog instead, so
//! callers see the same contract either way.
//!
//! All calls block; async callers must run them on a blocking thread.
//!
//! [`MoodProfile`]: crate::mood::MoodProfile

use crate::catalog::{SongSource, StaticCatalog};
use crate::config::SpotifyConfig;
use crate::error::{Error, Result};
use crate::mood::Mood;
use crate::song::Song;
use log::{debug, info, warn};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;

/// Blocking Spotify client with static-catalog fallback.
pub struct SpotifyCatalog {
    config: SpotifyConfig,
    http: Client,
    token: Mutex<Option<String>>,
    fallback: StaticCatalog,
}

impl SpotifyCatalog {
    /// Builds the HTTP client. No network traffic happens until the first
    /// request.
    pub fn new(config: SpotifyConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            config,
            http,
            token: Mutex::new(None),
            fallback: StaticCatalog,
        })
    }

    /// Whether both client id and secret are configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.config.client_id, &self.config.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }

    /// Returns the cached bearer token, requesting a new one if needed.
    fn access_token(&self) -> Result<String> {
        if let Ok(guard) = self.token.lock() {
            if let Some(token) = guard.as_ref() {
                return Ok(token.clone());
            }
        }

        let (id, secret) = self.credentials().ok_or_else(|| {
            Error::Catalog("Spotify credentials not provided".to_string())
        })?;

        let response: TokenResponse = self
            .http
            .post(&self.config.token_url)
            .basic_auth(id, Some(secret))
            .form(&[("grant_type", "client_credentials")])
            .send()?
            .error_for_status()?
            .json()?;

        info!("Successfully authenticated with Spotify API");
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(response.access_token.clone());
        }
        Ok(response.access_token)
    }

    fn forget_token(&self) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
    }

    /// Authenticated GET returning parsed JSON.
    ///
    /// A 401 means the cached token has expired or been revoked; the token is
    /// dropped and the request is retried once with a fresh one.
    fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let mut response = self.send_get(url, query)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Access token rejected, re-authenticating");
            self.forget_token();
            response = self.send_get(url, query)?;
            if response.status() == StatusCode::UNAUTHORIZED {
                self.forget_token();
            }
        }
        Ok(response.error_for_status()?.json()?)
    }

    fn send_get(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        let token = self.access_token()?;
        Ok(self.http.get(url).bearer_auth(&token).query(query).send()?)
    }

    /// Recommendations straight from Spotify, without fallback.
    pub fn fetch_recommendations(&self, mood: Mood, count: usize) -> Result<Vec<Song>> {
        let profile = mood.profile();
        let url = format!("{}/recommendations", self.config.api_base_url);
        let query = [
            ("seed_genres", profile.seed_genres[..2].join(",")),
            ("target_valence", profile.target_valence.to_string()),
            ("target_energy", profile.target_energy.to_string()),
            ("limit", count.to_string()),
        ];

        let body: RecommendationsResponse = self.get_json(&url, &query)?;
        let songs: Vec<Song> = body.tracks.into_iter().map(|t| t.into_song(mood)).collect();
        debug!("Spotify returned {} {mood} tracks", songs.len());
        Ok(songs)
    }

    /// Free-text track search.
    ///
    /// Unlike recommendations this has no curated equivalent, so failures
    /// are returned to the caller.
    pub fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<Song>> {
        let url = format!("{}/search", self.config.api_base_url);
        let params = [
            ("q", query.to_string()),
            ("type", "track".to_string()),
            ("limit", limit.to_string()),
        ];

        let body: SearchResponse = self.get_json(&url, &params)?;

        // Search results have no mood; tag them with the mood the query
        // itself reads as.
        let mood = crate::algorithm::detect(query, &crate::algorithm::ScoringContext::default()).mood;
        Ok(body.tracks.items.into_iter().map(|t| t.into_song(mood)).collect())
    }
}

impl SongSource for SpotifyCatalog {
    fn name(&self) -> &'static str {
        "spotify"
    }

    fn recommend(&self, mood: Mood, count: usize) -> Result<Vec<Song>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if !self.has_credentials() {
            warn!("Spotify credentials not provided. Using curated catalog.");
            return self.fallback.recommend(mood, count);
        }
        match self.fetch_recommendations(mood, count) {
            Ok(songs) => Ok(songs),
            Err(e) => {
                warn!("Error fetching Spotify recommendations: {e}. Using curated catalog.");
                self.fallback.recommend(mood, count)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
    album: Album,
    preview_url: Option<String>,
    #[serde(default)]
    external_urls: ExternalUrls,
    duration_ms: Option<u64>,
    popularity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Album {
    name: String,
    release_date: Option<String>,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalUrls {
    spotify: Option<String>,
}

impl Track {
    fn into_song(self, mood: Mood) -> Song {
        let artist = self
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        // Release dates come as "YYYY", "YYYY-MM" or "YYYY-MM-DD".
        let year = self
            .album
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|y| y.parse().ok());

        Song {
            title: self.name,
            artist,
            year,
            genre: None,
            energy: None,
            valence: None,
            tags: Vec::new(),
            mood,
            album: Some(self.album.name),
            preview_url: self.preview_url,
            external_url: self.external_urls.spotify,
            album_art: self.album.images.into_iter().next().map(|i| i.url),
            duration_ms: self.duration_ms,
            popularity: self.popularity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECOMMENDATIONS: &str = r#"{
        "tracks": [
            {
                "name": "Uptown Funk",
                "artists": [{"name": "Mark Ronson"}, {"name": "Bruno Mars"}],
                "album": {
                    "name": "Uptown Special",
                    "release_date": "2015-01-12",
                    "images": [{"url": "https://i.scdn.co/image/large"}, {"url": "https://i.scdn.co/image/small"}]
                },
                "preview_url": null,
                "external_urls": {"spotify": "https://open.spotify.com/track/32OlwWuMpZ6b0aN2RZOeMS"},
                "duration_ms": 269733,
                "popularity": 83
            },
            {
                "name": "Untitled",
                "artists": [],
                "album": {"name": "Demos", "release_date": null, "images": []},
                "external_urls": {}
            }
        ]
    }"#;

    fn offline_config() -> SpotifyConfig {
        SpotifyConfig {
            client_id: None,
            client_secret: None,
            // Unroutable, tests must never reach it
            token_url: "http://127.0.0.1:9/token".to_string(),
            api_base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 1,
        }
    }

    #[test]
    fn test_track_mapping() {
        let body: RecommendationsResponse = serde_json::from_str(RECOMMENDATIONS).unwrap();
        let songs: Vec<Song> = body.tracks.into_iter().map(|t| t.into_song(Mood::Happy)).collect();

        assert_eq!(songs.len(), 2);
        let funk = &songs[0];
        assert_eq!(funk.title, "Uptown Funk");
        assert_eq!(funk.artist, "Mark Ronson, Bruno Mars");
        assert_eq!(funk.year, Some(2015));
        assert_eq!(funk.album.as_deref(), Some("Uptown Special"));
        assert_eq!(funk.album_art.as_deref(), Some("https://i.scdn.co/image/large"));
        assert_eq!(funk.popularity, Some(83));
        assert_eq!(funk.mood, Mood::Happy);

        let bare = &songs[1];
        assert_eq!(bare.artist, "");
        assert_eq!(bare.year, None);
        assert!(bare.album_art.is_none());
        assert!(bare.external_url.is_none());
    }

    #[test]
    fn test_missing_credentials_fall_back_to_catalog() {
        let client = SpotifyCatalog::new(offline_config()).unwrap();
        assert!(!client.has_credentials());

        let songs = client.recommend(Mood::Nostalgic, 3).unwrap();
        assert_eq!(songs, crate::catalog::recommend(Mood::Nostalgic, 3));
    }

    #[test]
    fn test_empty_credentials_count_as_missing() {
        let config = SpotifyConfig {
            client_id: Some(String::new()),
            client_secret: Some("secret".to_string()),
            ..offline_config()
        };
        let client = SpotifyCatalog::new(config).unwrap();
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_search_without_credentials_errors() {
        let client = SpotifyCatalog::new(offline_config()).unwrap();
        let err = client.search_tracks("queen", 5).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_zero_count_short_circuits() {
        let client = SpotifyCatalog::new(offline_config()).unwrap();
        assert!(client.recommend(Mood::Calm, 0).unwrap().is_empty());
    }

    #[test]
    fn test_unreachable_api_falls_back() {
        let config = SpotifyConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..offline_config()
        };
        let client = SpotifyCatalog::new(config).unwrap();
        let songs = client.recommend(Mood::Angry, 2).unwrap();
        assert_eq!(songs, crate::catalog::recommend(Mood::Angry, 2));
    }

    /// In-process stand-in for the Spotify token and Web API endpoints.
    mod mock {
        use axum::{
            extract::{Query, State},
            http::{header, HeaderMap, StatusCode},
            response::{IntoResponse, Response},
            routing::{get, post},
            Form, Json, Router,
        };
        use serde_json::json;
        use std::collections::HashMap;
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        pub struct MockState {
            pub token_requests: Arc<AtomicUsize>,
            pub basic_auth: Arc<Mutex<Option<String>>>,
            pub grant_type: Arc<Mutex<Option<String>>>,
            pub queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
            pub fail_recommendations: Arc<AtomicBool>,
            valid_token: Arc<Mutex<Option<String>>>,
        }

        impl MockState {
            /// Invalidates every token issued so far.
            pub fn expire_tokens(&self) {
                *self.valid_token.lock().unwrap() = None;
            }

            fn authorized(&self, headers: &HeaderMap) -> bool {
                let bearer = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "));
                match (bearer, self.valid_token.lock().unwrap().as_deref()) {
                    (Some(given), Some(valid)) => given == valid,
                    _ => false,
                }
            }
        }

        /// Runs the mock on its own runtime; the blocking client under test
        /// stays on the test thread.
        pub struct MockSpotify {
            pub state: MockState,
            pub base_url: String,
            _runtime: tokio::runtime::Runtime,
        }

        impl MockSpotify {
            pub fn start() -> Self {
                let runtime = tokio::runtime::Runtime::new().unwrap();
                let state = MockState::default();
                let app = Router::new()
                    .route("/token", post(token))
                    .route("/v1/recommendations", get(recommendations))
                    .route("/v1/search", get(search))
                    .with_state(state.clone());

                let listener = runtime
                    .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
                    .unwrap();
                let addr = listener.local_addr().unwrap();
                runtime.spawn(async move { axum::serve(listener, app).await });

                Self {
                    state,
                    base_url: format!("http://{addr}"),
                    _runtime: runtime,
                }
            }
        }

        fn track(name: &str) -> serde_json::Value {
            json!({
                "name": name,
                "artists": [{"name": "Remote Artist"}],
                "album": {"name": "Remote Album", "release_date": "2021-06-01", "images": []},
                "external_urls": {"spotify": "https://open.spotify.com/track/remote"},
                "duration_ms": 200000,
                "popularity": 50
            })
        }

        async fn token(
            State(state): State<MockState>,
            headers: HeaderMap,
            Form(form): Form<HashMap<String, String>>,
        ) -> Json<serde_json::Value> {
            let n = state.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
            *state.basic_auth.lock().unwrap() = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            *state.grant_type.lock().unwrap() = form.get("grant_type").cloned();

            let issued = format!("token-{n}");
            *state.valid_token.lock().unwrap() = Some(issued.clone());
            Json(json!({"access_token": issued, "token_type": "Bearer", "expires_in": 3600}))
        }

        async fn recommendations(
            State(state): State<MockState>,
            headers: HeaderMap,
            Query(params): Query<HashMap<String, String>>,
        ) -> Response {
            if !state.authorized(&headers) {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            if state.fail_recommendations.load(Ordering::SeqCst) {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            state.queries.lock().unwrap().push(params);
            Json(json!({"tracks": [track("Remote Song")]})).into_response()
        }

        async fn search(
            State(state): State<MockState>,
            headers: HeaderMap,
            Query(params): Query<HashMap<String, String>>,
        ) -> Response {
            if !state.authorized(&headers) {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            state.queries.lock().unwrap().push(params);
            Json(json!({"tracks": {"items": [track("Found Song"), track("Other Song")]}})).into_response()
        }
    }

    fn client_for(mock: &mock::MockSpotify) -> SpotifyCatalog {
        SpotifyCatalog::new(SpotifyConfig {
            client_id: Some("client-id".to_string()),
            client_secret: Some("client-secret".to_string()),
            token_url: format!("{}/token", mock.base_url),
            api_base_url: format!("{}/v1", mock.base_url),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_recommendations_use_cached_token_and_profile_query() {
        use std::sync::atomic::Ordering;

        let mock = mock::MockSpotify::start();
        let client = client_for(&mock);

        let first = client.recommend(Mood::Happy, 4).unwrap();
        let second = client.recommend(Mood::Happy, 4).unwrap();

        assert_eq!(first[0].title, "Remote Song");
        assert_eq!(first[0].mood, Mood::Happy);
        assert_eq!(first[0].year, Some(2021));
        assert_eq!(first, second);
        assert_eq!(mock.state.token_requests.load(Ordering::SeqCst), 1);

        // base64("client-id:client-secret")
        assert_eq!(
            mock.state.basic_auth.lock().unwrap().as_deref(),
            Some("Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=")
        );
        assert_eq!(
            mock.state.grant_type.lock().unwrap().as_deref(),
            Some("client_credentials")
        );

        let queries = mock.state.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0]["seed_genres"], "pop,dance");
        assert_eq!(queries[0]["target_valence"], "0.8");
        assert_eq!(queries[0]["target_energy"], "0.7");
        assert_eq!(queries[0]["limit"], "4");
    }

    #[test]
    fn test_expired_token_is_refreshed_before_falling_back() {
        use std::sync::atomic::Ordering;

        let mock = mock::MockSpotify::start();
        let client = client_for(&mock);

        assert_eq!(client.recommend(Mood::Calm, 2).unwrap()[0].title, "Remote Song");
        mock.state.expire_tokens();

        let songs = client.recommend(Mood::Calm, 2).unwrap();
        assert_eq!(songs[0].title, "Remote Song");
        assert_ne!(songs, crate::catalog::recommend(Mood::Calm, 2));
        assert_eq!(mock.state.token_requests.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_server_error_falls_back_to_catalog() {
        use std::sync::atomic::Ordering;

        let mock = mock::MockSpotify::start();
        mock.state.fail_recommendations.store(true, Ordering::SeqCst);
        let client = client_for(&mock);

        let songs = client.recommend(Mood::Sad, 3).unwrap();
        assert_eq!(songs, crate::catalog::recommend(Mood::Sad, 3));
        assert!(client.fetch_recommendations(Mood::Sad, 3).is_err());
    }

    #[test]
    fn test_search_tracks_returns_remote_results() {
        let mock = mock::MockSpotify::start();
        let client = client_for(&mock);

        let songs = client.search_tracks("happy summer vibes", 3).unwrap();
        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Found Song", "Other Song"]);
        assert!(songs.iter().all(|s| s.mood == Mood::Happy));
        assert_eq!(songs[0].artist, "Remote Artist");

        let queries = mock.state.queries.lock().unwrap();
        assert_eq!(queries[0]["q"], "happy summer vibes");
        assert_eq!(queries[0]["type"], "track");
        assert_eq!(queries[0]["limit"], "3");
    }
}
