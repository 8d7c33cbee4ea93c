//! Host backends for the media bridge.
//!
//! - Linux: MPRIS over D-Bus (`mpris` crate), media keys through `enigo`
//! - macOS: `media-remote` crate (MediaRemote.framework via Perl adapter)
//! - Windows: `windows` crate (GlobalSystemMediaTransportControls, SendInput, WASAPI)

mod artwork;
mod settings;

#[cfg(target_os = "linux")]
mod enigo_keys;
#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

pub use artwork::{image_from_bytes, image_from_url};
pub use settings::{access_settings_command, SystemSettingsNavigator};

use crate::media::{
    ArtworkEncoder, ArtworkMode, AudioActivity, BridgeConfig, ControlDispatcher, KeyAction,
    ListenerIdentity, MediaBridge, MediaError, MediaKey, MediaKeyInjector, MediaSession,
    PngArtworkEncoder, SessionResolver, SessionSource,
};

type HostBackends = (
    Box<dyn SessionSource>,
    Box<dyn MediaKeyInjector>,
    Box<dyn AudioActivity>,
);

/// Wires the backends of the current host into a bridge.
pub fn host_bridge(config: &BridgeConfig) -> MediaBridge {
    let (source, keys, audio) = host_backends();
    log::info!(
        "Media bridge ready on '{}' (listener: {}, artwork: {:?})",
        crate::media::config::MEDIA_CHANNEL,
        config.listener_id,
        config.artwork
    );
    MediaBridge::new(
        SessionResolver::new(source, config.listener()),
        ControlDispatcher::new(
            keys,
            audio,
            Box::new(SystemSettingsNavigator),
            artwork_encoder(config.artwork),
        ),
    )
}

pub fn artwork_encoder(mode: ArtworkMode) -> Option<Box<dyn ArtworkEncoder>> {
    match mode {
        ArtworkMode::Png => Some(Box::new(PngArtworkEncoder)),
        ArtworkMode::Off => None,
    }
}

#[cfg(target_os = "linux")]
fn host_backends() -> HostBackends {
    (
        Box::new(linux::MprisSessionSource),
        Box::new(enigo_keys::EnigoKeyInjector::new()),
        Box::new(linux::MprisActivity),
    )
}

#[cfg(target_os = "macos")]
fn host_backends() -> HostBackends {
    let now_playing = macos::shared_now_playing();
    (
        Box::new(macos::NowPlayingSource::new(now_playing.clone())),
        Box::new(macos::MediaRemoteKeys::new(now_playing.clone())),
        Box::new(macos::NowPlayingActivity::new(now_playing)),
    )
}

#[cfg(target_os = "windows")]
fn host_backends() -> HostBackends {
    (
        Box::new(windows::SmtcSessionSource),
        Box::new(windows::SendInputKeys),
        Box::new(windows::EndpointPeakActivity),
    )
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn host_backends() -> HostBackends {
    log::debug!("Media sessions not supported on this platform");
    (Box::new(NoSessions), Box::new(NoMediaKeys), Box::new(NoAudioActivity))
}

/// Source for hosts without a session registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSessions;

impl SessionSource for NoSessions {
    fn list_active_sessions(
        &self,
        _listener: &ListenerIdentity,
    ) -> Result<Vec<Box<dyn MediaSession>>, MediaError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoMediaKeys;

impl MediaKeyInjector for NoMediaKeys {
    fn send_key(&self, _action: KeyAction, _key: MediaKey) -> Result<(), MediaError> {
        Err(MediaError::Unavailable(
            "media keys not supported on this platform".to_string(),
        ))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoAudioActivity;

impl AudioActivity for NoAudioActivity {
    fn is_audio_active(&self) -> bool {
        false
    }
}
