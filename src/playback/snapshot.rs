//! Point-in-time view of the playback device.

use serde::Serialize;

/// The device currently receiving playback commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    /// Current volume, 0–100.
    pub volume_percent: u8,
}

/// The item currently loaded on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackInfo {
    pub name: String,
    /// First listed artist, if any.
    pub artist: Option<String>,
}

impl TrackInfo {
    /// `"<name> - <artist>"`, or just the name when no artist is listed.
    pub fn display(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", self.name, artist),
            None => self.name.clone(),
        }
    }
}

/// Playback state read fresh for every dispatch.  Never cached across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackSnapshot {
    /// `None` when no device is active.
    pub device: Option<Device>,
    pub is_playing: bool,
    pub track: Option<TrackInfo>,
}

impl PlaybackSnapshot {
    /// Volume of the active device, or 0 without one.
    pub fn volume_percent(&self) -> u8 {
        self.device.as_ref().map_or(0, |d| d.volume_percent)
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device.as_ref().map(|d| d.id.as_str())
    }
}
