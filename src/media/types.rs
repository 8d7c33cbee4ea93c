use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse playback state as observed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Stopped, buffering, connecting, error, ...
    Other,
}

/// Point-in-time playback information reported by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub position_ms: Option<u64>,
}

impl PlaybackSnapshot {
    pub fn new(state: PlaybackState) -> Self {
        Self {
            state,
            position_ms: None,
        }
    }

    pub fn with_position(mut self, position_ms: u64) -> Self {
        self.position_ms = Some(position_ms);
        self
    }
}

/// Metadata slots exactly as the host exposes them. Every slot is optional.
#[derive(Debug, Clone, Default)]
pub struct SessionMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration_ms: Option<u64>,
    /// The "album art" image slot, preferred over `art`.
    pub album_art: Option<DynamicImage>,
    /// The generic "art" image slot.
    pub art: Option<DynamicImage>,
}

/// Normalized snapshot returned to the UI for `getMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: u64,
    pub position: u64,
    pub package_name: String,
    pub album_art: Option<Vec<u8>>,
}

/// Identity this application registered with the host to observe sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerIdentity(String);

impl ListenerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListenerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generic media keys understood by the audio-routing fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKey {
    PlayPause,
    Next,
    Previous,
}

impl MediaKey {
    /// Android `KeyEvent` key code for this key.
    pub fn key_code(self) -> u16 {
        match self {
            MediaKey::PlayPause => 85,
            MediaKey::Next => 87,
            MediaKey::Previous => 88,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}
