//! Host capability seams.
//!
//! Everything the bridge needs from the host sits behind one of these traits,
//! so resolution and dispatch can run against recording fakes in tests.

use image::DynamicImage;

use super::error::MediaError;
use super::types::{
    KeyAction, ListenerIdentity, MediaKey, PlaybackSnapshot, PlaybackState, SessionMetadata,
};

/// A host-owned playback context. The bridge only observes it for the
/// duration of a single request.
pub trait MediaSession {
    /// Identifier of the application that owns the session.
    fn package_name(&self) -> String;

    fn playback_state(&self) -> Option<PlaybackSnapshot>;

    fn metadata(&self) -> Option<SessionMetadata>;

    // Transport controls. Fire-and-forget: hosts report no outcome.
    fn play(&self);
    fn pause(&self);
    fn skip_to_next(&self);
    fn skip_to_previous(&self);

    fn is_playing(&self) -> bool {
        self.playback_state()
            .map(|snapshot| snapshot.state == PlaybackState::Playing)
            .unwrap_or(false)
    }
}

/// The host's registry of active sessions.
#[cfg_attr(test, mockall::automock)]
pub trait SessionSource {
    /// Lists the sessions visible to `listener`, in host order (typically
    /// most recently active first). Fails with [`MediaError::AccessDenied`]
    /// when the user has not granted access.
    fn list_active_sessions(
        &self,
        listener: &ListenerIdentity,
    ) -> Result<Vec<Box<dyn MediaSession>>, MediaError>;
}

/// Key half of the generic audio-routing capability.
#[cfg_attr(test, mockall::automock)]
pub trait MediaKeyInjector {
    fn send_key(&self, action: KeyAction, key: MediaKey) -> Result<(), MediaError>;
}

/// Activity half of the generic audio-routing capability.
#[cfg_attr(test, mockall::automock)]
pub trait AudioActivity {
    /// Whether any audio is currently being played on the host.
    fn is_audio_active(&self) -> bool;
}

#[cfg_attr(test, mockall::automock)]
pub trait SettingsNavigator {
    /// Opens the system screen where the user grants session access.
    fn open_access_settings(&self) -> Result<(), MediaError>;
}

/// Lossless image transform applied to artwork before it leaves the bridge.
pub trait ArtworkEncoder {
    fn encode(&self, image: &DynamicImage) -> Result<Vec<u8>, MediaError>;
}
