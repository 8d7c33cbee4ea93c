//! MPRIS session backend.

use mpris::{FindingError, PlaybackStatus, Player, PlayerFinder};

use super::artwork::image_from_url;
use crate::media::{
    AudioActivity, ListenerIdentity, MediaError, MediaSession, PlaybackSnapshot, PlaybackState,
    SessionMetadata, SessionSource,
};

const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Lists MPRIS players on the session bus. The listener identity is not
/// needed: MPRIS has no access grant.
#[derive(Debug, Default, Clone, Copy)]
pub struct MprisSessionSource;

fn find_players() -> Result<Vec<Player>, MediaError> {
    let finder = PlayerFinder::new()
        .map_err(|e| MediaError::Unavailable(format!("D-Bus session bus: {}", e)))?;
    match finder.find_all() {
        Ok(players) => Ok(players),
        Err(FindingError::NoPlayerFound) => Ok(Vec::new()),
        Err(e) => Err(MediaError::Backend(e.to_string())),
    }
}

impl SessionSource for MprisSessionSource {
    fn list_active_sessions(
        &self,
        _listener: &ListenerIdentity,
    ) -> Result<Vec<Box<dyn MediaSession>>, MediaError> {
        Ok(find_players()?
            .into_iter()
            .map(|player| Box::new(MprisSession { player }) as Box<dyn MediaSession>)
            .collect())
    }
}

/// Reports audio as active while any MPRIS player is playing.
#[derive(Debug, Default, Clone, Copy)]
pub struct MprisActivity;

impl AudioActivity for MprisActivity {
    fn is_audio_active(&self) -> bool {
        match find_players() {
            Ok(players) => players.iter().any(|player| {
                matches!(player.get_playback_status(), Ok(PlaybackStatus::Playing))
            }),
            Err(e) => {
                log::debug!("Audio activity unknown: {}", e);
                false
            }
        }
    }
}

pub struct MprisSession {
    player: Player,
}

pub(crate) fn package_from_bus_name(bus_name: &str) -> String {
    bus_name
        .strip_prefix(MPRIS_PREFIX)
        .unwrap_or(bus_name)
        .to_string()
}

fn playback_state(status: PlaybackStatus) -> PlaybackState {
    match status {
        PlaybackStatus::Playing => PlaybackState::Playing,
        PlaybackStatus::Paused => PlaybackState::Paused,
        PlaybackStatus::Stopped => PlaybackState::Other,
    }
}

impl MprisSession {
    fn transport(&self, name: &str, result: Result<(), mpris::DBusError>) {
        if let Err(e) = result {
            log::warn!(
                "⚠️ MPRIS {} failed for {}: {}",
                name,
                self.player.bus_name(),
                e
            );
        }
    }
}

impl MediaSession for MprisSession {
    fn package_name(&self) -> String {
        package_from_bus_name(self.player.bus_name())
    }

    fn playback_state(&self) -> Option<PlaybackSnapshot> {
        let status = self.player.get_playback_status().ok()?;
        let snapshot = PlaybackSnapshot::new(playback_state(status));
        Some(match self.player.get_position() {
            Ok(position) => snapshot.with_position(position.as_millis() as u64),
            Err(_) => snapshot,
        })
    }

    fn metadata(&self) -> Option<SessionMetadata> {
        let meta = self.player.get_metadata().ok()?;
        Some(SessionMetadata {
            title: meta.title().map(str::to_string),
            artist: meta
                .artists()
                .filter(|artists| !artists.is_empty())
                .map(|artists| artists.join(", ")),
            duration_ms: meta.length().map(|length| length.as_millis() as u64),
            // MPRIS exposes a single art URL
            album_art: meta.art_url().and_then(image_from_url),
            art: None,
        })
    }

    fn play(&self) {
        self.transport("Play", self.player.play());
    }

    fn pause(&self) {
        self.transport("Pause", self.player.pause());
    }

    fn skip_to_next(&self) {
        self.transport("Next", self.player.next());
    }

    fn skip_to_previous(&self) {
        self.transport("Previous", self.player.previous());
    }
}
