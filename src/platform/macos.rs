//! macOS backend over the `media-remote` crate.
//!
//! MediaRemote exposes a single "now playing" client, so the source reports
//! at most one session.

use media_remote::{Controller, NowPlayingPerl};
use std::rc::Rc;

use crate::media::{
    AudioActivity, KeyAction, ListenerIdentity, MediaError, MediaKey, MediaKeyInjector,
    MediaSession, PlaybackSnapshot, PlaybackState, SessionMetadata, SessionSource,
};

pub fn shared_now_playing() -> Rc<NowPlayingPerl> {
    Rc::new(NowPlayingPerl::new())
}

fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0) as u64
}

/// Values copied out of the now-playing guard for one request.
struct NowPlayingSnapshot {
    bundle_id: String,
    is_playing: Option<bool>,
    elapsed_ms: Option<u64>,
    metadata: SessionMetadata,
}

fn snapshot(now_playing: &NowPlayingPerl) -> Option<NowPlayingSnapshot> {
    let guard = now_playing.get_info();
    let info = guard.as_ref()?;
    Some(NowPlayingSnapshot {
        bundle_id: info
            .bundle_id
            .clone()
            .or_else(|| info.bundle_name.clone())
            .unwrap_or_default(),
        is_playing: info.is_playing,
        elapsed_ms: info.elapsed_time.map(seconds_to_ms),
        metadata: SessionMetadata {
            title: info.title.clone(),
            artist: info.artist.clone(),
            duration_ms: info.duration.map(seconds_to_ms),
            album_art: info.album_cover.clone(),
            art: None,
        },
    })
}

pub struct NowPlayingSource {
    now_playing: Rc<NowPlayingPerl>,
}

impl NowPlayingSource {
    pub fn new(now_playing: Rc<NowPlayingPerl>) -> Self {
        Self { now_playing }
    }
}

impl SessionSource for NowPlayingSource {
    fn list_active_sessions(
        &self,
        _listener: &ListenerIdentity,
    ) -> Result<Vec<Box<dyn MediaSession>>, MediaError> {
        Ok(snapshot(&self.now_playing)
            .map(|info| {
                Box::new(NowPlayingSession {
                    now_playing: Rc::clone(&self.now_playing),
                    info,
                }) as Box<dyn MediaSession>
            })
            .into_iter()
            .collect())
    }
}

pub struct NowPlayingSession {
    now_playing: Rc<NowPlayingPerl>,
    info: NowPlayingSnapshot,
}

impl NowPlayingSession {
    fn transport(&self, name: &str, delivered: bool) {
        if !delivered {
            log::warn!("⚠️ Failed to {} {}", name, self.info.bundle_id);
        }
    }
}

impl MediaSession for NowPlayingSession {
    fn package_name(&self) -> String {
        self.info.bundle_id.clone()
    }

    fn playback_state(&self) -> Option<PlaybackSnapshot> {
        let state = match self.info.is_playing? {
            true => PlaybackState::Playing,
            false => PlaybackState::Paused,
        };
        let snapshot = PlaybackSnapshot::new(state);
        Some(match self.info.elapsed_ms {
            Some(ms) => snapshot.with_position(ms),
            None => snapshot,
        })
    }

    fn metadata(&self) -> Option<SessionMetadata> {
        Some(self.info.metadata.clone())
    }

    fn play(&self) {
        self.transport("play", self.now_playing.play());
    }

    fn pause(&self) {
        self.transport("pause", self.now_playing.pause());
    }

    fn skip_to_next(&self) {
        self.transport("skip", self.now_playing.next());
    }

    fn skip_to_previous(&self) {
        self.transport("rewind", self.now_playing.previous());
    }
}

/// Media keys as MediaRemote commands. The command fires on key down; key up
/// has no MediaRemote counterpart.
pub struct MediaRemoteKeys {
    now_playing: Rc<NowPlayingPerl>,
}

impl MediaRemoteKeys {
    pub fn new(now_playing: Rc<NowPlayingPerl>) -> Self {
        Self { now_playing }
    }
}

impl MediaKeyInjector for MediaRemoteKeys {
    fn send_key(&self, action: KeyAction, key: MediaKey) -> Result<(), MediaError> {
        if action == KeyAction::Up {
            return Ok(());
        }
        let delivered = match key {
            MediaKey::PlayPause => self.now_playing.toggle(),
            MediaKey::Next => self.now_playing.next(),
            MediaKey::Previous => self.now_playing.previous(),
        };
        if delivered {
            Ok(())
        } else {
            Err(MediaError::KeyInjection(format!(
                "MediaRemote rejected {:?}",
                key
            )))
        }
    }
}

pub struct NowPlayingActivity {
    now_playing: Rc<NowPlayingPerl>,
}

impl NowPlayingActivity {
    pub fn new(now_playing: Rc<NowPlayingPerl>) -> Self {
        Self { now_playing }
    }
}

impl AudioActivity for NowPlayingActivity {
    fn is_audio_active(&self) -> bool {
        let guard = self.now_playing.get_info();
        guard
            .as_ref()
            .map(|info| info.is_playing == Some(true))
            .unwrap_or(false)
    }
}
