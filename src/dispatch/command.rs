//! Commands the dispatcher can issue against the playback device.

use serde::Serialize;

/// One outbound playback intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    Play,
    Pause,
    Next,
    /// Absolute target volume, 0–100.
    SetVolume(u8),
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Play => f.write_str("Play"),
            Command::Pause => f.write_str("Pause"),
            Command::Next => f.write_str("Skip Track"),
            Command::SetVolume(percent) => write!(f, "Set Volume ({percent}%)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Command::Play.to_string(), "Play");
        assert_eq!(Command::Next.to_string(), "Skip Track");
        assert_eq!(Command::SetVolume(70).to_string(), "Set Volume (70%)");
    }
}
