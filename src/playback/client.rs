//! Core `PlaybackClient` trait, its error type, and a test double.

use async_trait::async_trait;
use thiserror::Error;

use super::snapshot::PlaybackSnapshot;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors that can occur talking to the playback backend.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("playback request timed out")]
    Timeout,

    /// The access token was rejected.
    #[error("access token rejected (401)")]
    Unauthorized,

    /// Any other non-success status.
    #[error("playback backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be parsed.
    #[error("failed to parse playback response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PlaybackError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlaybackError::Timeout
        } else if e.is_decode() {
            PlaybackError::Parse(e.to_string())
        } else {
            PlaybackError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackClient trait
// ---------------------------------------------------------------------------

/// The remote playback device.
///
/// Every call may be slow and may fail; callers do not retry.  Implementors
/// must be `Send + Sync` so they can be shared as `Arc<dyn PlaybackClient>`.
#[async_trait]
pub trait PlaybackClient: Send + Sync {
    /// Read the current playback state.  `Ok(None)` when nothing is active.
    async fn current_playback(&self) -> Result<Option<PlaybackSnapshot>, PlaybackError>;

    async fn play(&self, device_id: &str) -> Result<(), PlaybackError>;

    async fn pause(&self, device_id: &str) -> Result<(), PlaybackError>;

    async fn next(&self, device_id: &str) -> Result<(), PlaybackError>;

    /// `percent` is already clamped to 0–100.
    async fn set_volume(&self, percent: u8, device_id: &str) -> Result<(), PlaybackError>;
}

// ---------------------------------------------------------------------------
// MockPlaybackClient  (test-only)
// ---------------------------------------------------------------------------

/// One recorded outbound call.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Play(String),
    Pause(String),
    Next(String),
    SetVolume(u8, String),
}

/// Test double that records every command and can be told to fail.
#[cfg(test)]
#[derive(Default)]
pub struct MockPlaybackClient {
    snapshot: std::sync::Mutex<Option<PlaybackSnapshot>>,
    calls: std::sync::Mutex<Vec<MockCall>>,
    fail_commands: std::sync::atomic::AtomicBool,
    fail_reads: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl MockPlaybackClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose `current_playback` returns `snapshot`.
    pub fn with_snapshot(snapshot: PlaybackSnapshot) -> Self {
        let mock = Self::default();
        mock.set_snapshot(Some(snapshot));
        mock
    }

    pub fn set_snapshot(&self, snapshot: Option<PlaybackSnapshot>) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    /// Make every command call return an error.
    pub fn fail_commands(&self, fail: bool) {
        self.fail_commands
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Make `current_playback` return an error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) -> Result<(), PlaybackError> {
        if self.fail_commands.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(PlaybackError::Request("connection refused".into()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[cfg(test)]
#[async_trait]
impl PlaybackClient for MockPlaybackClient {
    async fn current_playback(&self) -> Result<Option<PlaybackSnapshot>, PlaybackError> {
        if self.fail_reads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(PlaybackError::Timeout);
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn play(&self, device_id: &str) -> Result<(), PlaybackError> {
        self.record(MockCall::Play(device_id.into()))
    }

    async fn pause(&self, device_id: &str) -> Result<(), PlaybackError> {
        self.record(MockCall::Pause(device_id.into()))
    }

    async fn next(&self, device_id: &str) -> Result<(), PlaybackError> {
        self.record(MockCall::Next(device_id.into()))
    }

    async fn set_volume(&self, percent: u8, device_id: &str) -> Result<(), PlaybackError> {
        self.record(MockCall::SetVolume(percent, device_id.into()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_object_safe() {
        let _: Box<dyn PlaybackClient> = Box::new(MockPlaybackClient::new());
    }

    #[tokio::test]
    async fn mock_records_commands_in_order() {
        let mock = MockPlaybackClient::new();
        mock.play("d1").await.unwrap();
        mock.set_volume(30, "d1").await.unwrap();
        assert_eq!(
            mock.calls(),
            vec![MockCall::Play("d1".into()), MockCall::SetVolume(30, "d1".into())]
        );
    }

    #[tokio::test]
    async fn mock_failures_record_nothing() {
        let mock = MockPlaybackClient::new();
        mock.fail_commands(true);
        assert!(mock.next("d1").await.is_err());
        assert!(mock.calls().is_empty());

        mock.fail_reads(true);
        assert!(matches!(
            mock.current_playback().await,
            Err(PlaybackError::Timeout)
        ));
    }

    #[test]
    fn error_messages_are_readable() {
        let err = PlaybackError::Status {
            status: 404,
            message: "Device not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "playback backend returned 404: Device not found"
        );
        assert_eq!(
            PlaybackError::Unauthorized.to_string(),
            "access token rejected (401)"
        );
    }
}
