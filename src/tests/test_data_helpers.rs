//! Test Data Helpers for Media Bridge Testing
//!
//! Recording fakes for every host capability. Fakes only record what they
//! were asked to do; they never simulate device state changes.

use image::{DynamicImage, Rgba, RgbaImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::media::{
    AudioActivity, ControlDispatcher, KeyAction, ListenerIdentity, MediaBridge, MediaError,
    MediaKey, MediaKeyInjector, MediaSession, PlaybackSnapshot, PlaybackState,
    PngArtworkEncoder, SessionMetadata, SessionResolver, SessionSource, SettingsNavigator,
};

/// Transport calls a fake session can receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    Play,
    Pause,
    SkipToNext,
    SkipToPrevious,
}

/// Session double that records transport calls. Clones share the call log.
#[derive(Debug, Clone)]
pub struct FakeSession {
    package_name: String,
    snapshot: Option<PlaybackSnapshot>,
    metadata: Option<SessionMetadata>,
    calls: Arc<Mutex<Vec<TransportCall>>>,
}

impl FakeSession {
    pub fn new(package_name: &str, state: PlaybackState) -> Self {
        Self {
            package_name: package_name.to_string(),
            snapshot: Some(PlaybackSnapshot::new(state)),
            metadata: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Session whose host reports no playback state at all
    pub fn without_playback_state(package_name: &str) -> Self {
        Self {
            snapshot: None,
            ..Self::new(package_name, PlaybackState::Other)
        }
    }

    pub fn with_snapshot(mut self, snapshot: PlaybackSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn with_metadata(mut self, metadata: SessionMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaSession for FakeSession {
    fn package_name(&self) -> String {
        self.package_name.clone()
    }

    fn playback_state(&self) -> Option<PlaybackSnapshot> {
        self.snapshot
    }

    fn metadata(&self) -> Option<SessionMetadata> {
        self.metadata.clone()
    }

    fn play(&self) {
        self.record(TransportCall::Play);
    }

    fn pause(&self) {
        self.record(TransportCall::Pause);
    }

    fn skip_to_next(&self) {
        self.record(TransportCall::SkipToNext);
    }

    fn skip_to_previous(&self) {
        self.record(TransportCall::SkipToPrevious);
    }
}

/// Session registry double. Hands out clones of its sessions on every query.
#[derive(Debug, Clone, Default)]
pub struct FakeSessionSource {
    sessions: Vec<FakeSession>,
    error: Option<MediaError>,
    queries: Arc<AtomicUsize>,
}

impl FakeSessionSource {
    pub fn with_sessions(sessions: Vec<FakeSession>) -> Self {
        Self {
            sessions,
            ..Default::default()
        }
    }

    pub fn failing(error: MediaError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl SessionSource for FakeSessionSource {
    fn list_active_sessions(
        &self,
        _listener: &ListenerIdentity,
    ) -> Result<Vec<Box<dyn MediaSession>>, MediaError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self
            .sessions
            .iter()
            .cloned()
            .map(|s| Box::new(s) as Box<dyn MediaSession>)
            .collect())
    }
}

/// Key injector double that records every transition
#[derive(Debug, Clone, Default)]
pub struct RecordingKeys {
    events: Arc<Mutex<Vec<(KeyAction, MediaKey)>>>,
}

impl RecordingKeys {
    pub fn events(&self) -> Vec<(KeyAction, MediaKey)> {
        self.events.lock().unwrap().clone()
    }
}

impl MediaKeyInjector for RecordingKeys {
    fn send_key(&self, action: KeyAction, key: MediaKey) -> Result<(), MediaError> {
        self.events.lock().unwrap().push((action, key));
        Ok(())
    }
}

/// Audio activity double with a fixed answer and a query counter
#[derive(Debug, Clone, Default)]
pub struct FixedActivity {
    active: bool,
    queries: Arc<AtomicUsize>,
}

impl FixedActivity {
    pub fn new(active: bool) -> Self {
        Self {
            active,
            ..Default::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl AudioActivity for FixedActivity {
    fn is_audio_active(&self) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.active
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSettings {
    opened: Arc<AtomicUsize>,
}

impl RecordingSettings {
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl SettingsNavigator for RecordingSettings {
    fn open_access_settings(&self) -> Result<(), MediaError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A bridge wired to fakes, with handles to inspect them afterwards
pub struct TestBridge {
    pub bridge: MediaBridge,
    pub source: FakeSessionSource,
    pub keys: RecordingKeys,
    pub activity: FixedActivity,
    pub settings: RecordingSettings,
}

impl TestBridge {
    pub fn new(source: FakeSessionSource, audio_active: bool) -> Self {
        let keys = RecordingKeys::default();
        let activity = FixedActivity::new(audio_active);
        let settings = RecordingSettings::default();
        let bridge = MediaBridge::new(
            SessionResolver::new(
                Box::new(source.clone()),
                ListenerIdentity::new("com.example.casi/.CasiNotificationListenerService"),
            ),
            ControlDispatcher::new(
                Box::new(keys.clone()),
                Box::new(activity.clone()),
                Box::new(settings.clone()),
                Some(Box::new(PngArtworkEncoder)),
            ),
        );
        Self {
            bridge,
            source,
            keys,
            activity,
            settings,
        }
    }

    pub fn with_sessions(sessions: Vec<FakeSession>) -> Self {
        Self::new(FakeSessionSource::with_sessions(sessions), false)
    }
}

/// Opaque red image of the given size
pub fn solid_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_call_log() {
        let session = FakeSession::new("A", PlaybackState::Playing);
        let clone = session.clone();
        clone.pause();
        assert_eq!(session.calls(), vec![TransportCall::Pause]);
    }

    #[test]
    fn test_source_counts_queries() {
        let source = FakeSessionSource::failing(MediaError::AccessDenied);
        let listener = ListenerIdentity::new("l");
        assert!(source.list_active_sessions(&listener).is_err());
        assert!(source.clone().list_active_sessions(&listener).is_err());
        assert_eq!(source.query_count(), 2);
    }
}
