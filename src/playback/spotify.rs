//! `SpotifyClient`: [`PlaybackClient`] over the Spotify Web API.
//!
//! | Operation          | Request                                   |
//! |--------------------|-------------------------------------------|
//! | `current_playback` | `GET  /v1/me/player`                      |
//! | `play`             | `PUT  /v1/me/player/play?device_id=…`     |
//! | `pause`            | `PUT  /v1/me/player/pause?device_id=…`    |
//! | `next`             | `POST /v1/me/player/next?device_id=…`     |
//! | `set_volume`       | `PUT  /v1/me/player/volume?volume_percent=…&device_id=…` |
//!
//! The bearer token comes from config; refreshing it is the caller's problem.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::config::PlaybackConfig;

use super::client::{PlaybackClient, PlaybackError};
use super::snapshot::{Device, PlaybackSnapshot, TrackInfo};

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WirePlayback {
    device: Option<WireDevice>,
    #[serde(default)]
    is_playing: bool,
    item: Option<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WireDevice {
    id: Option<String>,
    volume_percent: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    name: String,
    #[serde(default)]
    artists: Vec<WireArtist>,
}

#[derive(Debug, Deserialize)]
struct WireArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    error: WireError,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

/// Parse a `GET /v1/me/player` body.
///
/// A device without an id cannot receive commands, so it is dropped.
pub fn parse_playback(body: &str) -> Result<PlaybackSnapshot, PlaybackError> {
    let wire: WirePlayback =
        serde_json::from_str(body).map_err(|e| PlaybackError::Parse(e.to_string()))?;

    let device = wire.device.and_then(|d| {
        d.id.filter(|id| !id.is_empty()).map(|id| Device {
            id,
            volume_percent: d.volume_percent.unwrap_or(0).min(100) as u8,
        })
    });

    let track = wire.item.map(|item| TrackInfo {
        name: item.name,
        artist: item.artists.into_iter().next().map(|a| a.name),
    });

    Ok(PlaybackSnapshot {
        device,
        is_playing: wire.is_playing,
        track,
    })
}

/// Pull the human message out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<WireErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// SpotifyClient
// ---------------------------------------------------------------------------

/// Calls the Spotify Web API player endpoints.
pub struct SpotifyClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Build a client from config and an already-resolved access token.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`.
    pub fn from_config(config: &PlaybackConfig, access_token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("playback: HTTP client build failed ({e}); requests will have no timeout");
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/me/player{}", self.base_url, path)
    }

    /// Send a body-less player command and map the status.
    async fn command(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), PlaybackError> {
        let response = self
            .client
            .request(method, self.url(path))
            .bearer_auth(&self.access_token)
            .query(query)
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PlaybackError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(PlaybackError::Unauthorized);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PlaybackError::Status {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

#[async_trait]
impl PlaybackClient for SpotifyClient {
    async fn current_playback(&self) -> Result<Option<PlaybackSnapshot>, PlaybackError> {
        let response = self
            .client
            .get(self.url(""))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let response = check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        parse_playback(&body).map(Some)
    }

    async fn play(&self, device_id: &str) -> Result<(), PlaybackError> {
        self.command(Method::PUT, "/play", &[("device_id", device_id.into())])
            .await
    }

    async fn pause(&self, device_id: &str) -> Result<(), PlaybackError> {
        self.command(Method::PUT, "/pause", &[("device_id", device_id.into())])
            .await
    }

    async fn next(&self, device_id: &str) -> Result<(), PlaybackError> {
        self.command(Method::POST, "/next", &[("device_id", device_id.into())])
            .await
    }

    async fn set_volume(&self, percent: u8, device_id: &str) -> Result<(), PlaybackError> {
        self.command(
            Method::PUT,
            "/volume",
            &[
                ("volume_percent", percent.to_string()),
                ("device_id", device_id.into()),
            ],
        )
        .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
