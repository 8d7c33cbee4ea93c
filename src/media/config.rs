//! Configuration constants and runtime settings for the media bridge

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::types::ListenerIdentity;

/// Name of the channel the UI layer sends media method calls on
pub const MEDIA_CHANNEL: &str = "casi.launcher/media";

/// Listener the launcher registers with the host to observe sessions
pub const DEFAULT_LISTENER_ID: &str = "com.example.casi/.CasiNotificationListenerService";

/// Overrides the listener identity
pub const LISTENER_ENV: &str = "CASI_LISTENER_ID";

/// Artwork handling: `png` (default) or `off`
pub const ARTWORK_ENV: &str = "CASI_ARTWORK";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkMode {
    /// Encode artwork as PNG at maximum compression.
    #[default]
    Png,
    /// Never read artwork slots; `albumArt` is always null.
    Off,
}

impl FromStr for ArtworkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ArtworkMode::Png),
            "off" | "none" | "false" | "0" => Ok(ArtworkMode::Off),
            other => Err(format!("unknown artwork mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub listener_id: String,
    pub artwork: ArtworkMode,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listener_id: DEFAULT_LISTENER_ID.to_string(),
            artwork: ArtworkMode::default(),
        }
    }
}

impl BridgeConfig {
    /// Reads overrides from the process environment, honoring a `.env` file.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(listener) = lookup(LISTENER_ENV).filter(|v| !v.trim().is_empty()) {
            config.listener_id = listener.trim().to_string();
        }

        if let Some(raw) = lookup(ARTWORK_ENV) {
            match raw.parse::<ArtworkMode>() {
                Ok(mode) => config.artwork = mode,
                Err(e) => log::warn!("Ignoring {}: {}", ARTWORK_ENV, e),
            }
        }

        config
    }

    pub fn listener(&self) -> ListenerIdentity {
        ListenerIdentity::new(self.listener_id.clone())
    }
}
