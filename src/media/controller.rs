//! Control dispatcher.
//!
//! Turns a [`MediaCommand`] plus the resolver's selection into either a
//! transport call on the session or a media-key pair sent through the
//! generic audio-routing capability. Every branch runs synchronously and
//! yields exactly one [`Response`].

use super::command::{MediaCommand, Response};
use super::keys::send_media_button;
use super::metadata::extract_metadata;
use super::session::{
    ArtworkEncoder, AudioActivity, MediaKeyInjector, MediaSession, SettingsNavigator,
};
use super::types::MediaKey;

pub struct ControlDispatcher {
    keys: Box<dyn MediaKeyInjector>,
    audio: Box<dyn AudioActivity>,
    settings: Box<dyn SettingsNavigator>,
    /// `None` disables artwork extraction.
    artwork: Option<Box<dyn ArtworkEncoder>>,
}

impl ControlDispatcher {
    pub fn new(
        keys: Box<dyn MediaKeyInjector>,
        audio: Box<dyn AudioActivity>,
        settings: Box<dyn SettingsNavigator>,
        artwork: Option<Box<dyn ArtworkEncoder>>,
    ) -> Self {
        Self {
            keys,
            audio,
            settings,
            artwork,
        }
    }

    pub fn dispatch(
        &self,
        command: MediaCommand,
        selection: Option<&dyn MediaSession>,
    ) -> Response {
        match command {
            MediaCommand::GetMetadata => match selection {
                Some(session) => {
                    Response::Metadata(extract_metadata(session, self.artwork.as_deref()))
                }
                None => Response::Empty,
            },
            MediaCommand::PlayPause => {
                match selection {
                    Some(session) if session.is_playing() => {
                        log::info!("⏸️ Pausing {}", session.package_name());
                        session.pause();
                    }
                    Some(session) => {
                        log::info!("▶️ Playing {}", session.package_name());
                        session.play();
                    }
                    None => send_media_button(self.keys.as_ref(), MediaKey::PlayPause),
                }
                Response::Empty
            }
            MediaCommand::Next => {
                match selection {
                    Some(session) => session.skip_to_next(),
                    None => send_media_button(self.keys.as_ref(), MediaKey::Next),
                }
                Response::Empty
            }
            MediaCommand::Previous => {
                match selection {
                    Some(session) => session.skip_to_previous(),
                    None => send_media_button(self.keys.as_ref(), MediaKey::Previous),
                }
                Response::Empty
            }
            MediaCommand::IsPlaying => Response::Bool(match selection {
                Some(session) => session.is_playing(),
                None => self.audio.is_audio_active(),
            }),
            MediaCommand::OpenAccessSettings => {
                if let Err(e) = self.settings.open_access_settings() {
                    log::warn!("⚠️ {}", e);
                }
                Response::Empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::error::MediaError;
    use crate::media::metadata::PngArtworkEncoder;
    use crate::media::session::{MockAudioActivity, MockMediaKeyInjector, MockSettingsNavigator};
    use crate::media::types::{KeyAction, PlaybackState};
    use crate::tests::test_data_helpers::{FakeSession, TransportCall};
    use mockall::predicate::eq;

    fn dispatcher(
        keys: MockMediaKeyInjector,
        audio: MockAudioActivity,
        settings: MockSettingsNavigator,
    ) -> ControlDispatcher {
        ControlDispatcher::new(
            Box::new(keys),
            Box::new(audio),
            Box::new(settings),
            Some(Box::new(PngArtworkEncoder)),
        )
    }

    /// Dispatcher whose host capabilities must not be touched.
    fn quiet_dispatcher() -> ControlDispatcher {
        let mut keys = MockMediaKeyInjector::new();
        keys.expect_send_key().never();
        let mut audio = MockAudioActivity::new();
        audio.expect_is_audio_active().never();
        let mut settings = MockSettingsNavigator::new();
        settings.expect_open_access_settings().never();
        dispatcher(keys, audio, settings)
    }

    #[test]
    fn test_play_pause_pauses_playing_session() {
        let session = FakeSession::new("B", PlaybackState::Playing);
        let response = quiet_dispatcher().dispatch(MediaCommand::PlayPause, Some(&session));

        assert_eq!(response, Response::Empty);
        assert_eq!(session.calls(), vec![TransportCall::Pause]);
    }

    #[test]
    fn test_play_pause_plays_non_playing_sessions() {
        for state in [PlaybackState::Paused, PlaybackState::Other] {
            let session = FakeSession::new("A", state);
            quiet_dispatcher().dispatch(MediaCommand::PlayPause, Some(&session));
            assert_eq!(session.calls(), vec![TransportCall::Play]);
        }

        let unknown = FakeSession::without_playback_state("C");
        quiet_dispatcher().dispatch(MediaCommand::PlayPause, Some(&unknown));
        assert_eq!(unknown.calls(), vec![TransportCall::Play]);
    }

    #[test]
    fn test_skip_commands_use_transport_controls() {
        let session = FakeSession::new("A", PlaybackState::Paused);
        let dispatcher = quiet_dispatcher();

        dispatcher.dispatch(MediaCommand::Next, Some(&session));
        dispatcher.dispatch(MediaCommand::Previous, Some(&session));

        assert_eq!(
            session.calls(),
            vec![TransportCall::SkipToNext, TransportCall::SkipToPrevious]
        );
    }

    #[test]
    fn test_transport_commands_fall_back_to_media_keys() {
        let cases = [
            (MediaCommand::PlayPause, MediaKey::PlayPause),
            (MediaCommand::Next, MediaKey::Next),
            (MediaCommand::Previous, MediaKey::Previous),
        ];

        for (command, key) in cases {
            let mut keys = MockMediaKeyInjector::new();
            keys.expect_send_key()
                .with(eq(KeyAction::Down), eq(key))
                .times(1)
                .returning(|_, _| Ok(()));
            keys.expect_send_key()
                .with(eq(KeyAction::Up), eq(key))
                .times(1)
                .returning(|_, _| Ok(()));

            let response =
                dispatcher(keys, MockAudioActivity::new(), MockSettingsNavigator::new())
                    .dispatch(command, None);
            assert_eq!(response, Response::Empty);
        }
    }

    #[test]
    fn test_is_playing_with_session_ignores_audio_routing() {
        let playing = FakeSession::new("A", PlaybackState::Playing);
        let paused = FakeSession::new("B", PlaybackState::Paused);
        let dispatcher = quiet_dispatcher();

        assert_eq!(
            dispatcher.dispatch(MediaCommand::IsPlaying, Some(&playing)),
            Response::Bool(true)
        );
        assert_eq!(
            dispatcher.dispatch(MediaCommand::IsPlaying, Some(&paused)),
            Response::Bool(false)
        );
    }

    #[test]
    fn test_is_playing_without_session_asks_audio_routing() {
        for active in [true, false] {
            let mut audio = MockAudioActivity::new();
            audio.expect_is_audio_active().times(1).return_const(active);
            let response = dispatcher(MockMediaKeyInjector::new(), audio, MockSettingsNavigator::new())
                .dispatch(MediaCommand::IsPlaying, None);
            assert_eq!(response, Response::Bool(active));
        }
    }

    #[test]
    fn test_get_metadata_without_session_is_empty() {
        assert_eq!(
            quiet_dispatcher().dispatch(MediaCommand::GetMetadata, None),
            Response::Empty
        );
    }

    #[test]
    fn test_get_metadata_does_not_touch_transport() {
        let session = FakeSession::new("com.app", PlaybackState::Playing);
        let response = quiet_dispatcher().dispatch(MediaCommand::GetMetadata, Some(&session));

        match response {
            Response::Metadata(metadata) => assert_eq!(metadata.package_name, "com.app"),
            other => panic!("expected metadata, got {:?}", other),
        }
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_open_settings_is_independent_of_selection() {
        for with_session in [false, true] {
            let mut settings = MockSettingsNavigator::new();
            settings
                .expect_open_access_settings()
                .times(1)
                .returning(|| Ok(()));
            let session = FakeSession::new("A", PlaybackState::Playing);
            let selection = with_session.then_some(&session as &dyn MediaSession);

            let response = dispatcher(MockMediaKeyInjector::new(), MockAudioActivity::new(), settings)
                .dispatch(MediaCommand::OpenAccessSettings, selection);

            assert_eq!(response, Response::Empty);
            assert!(session.calls().is_empty());
        }
    }

    #[test]
    fn test_settings_failure_is_not_surfaced() {
        let mut settings = MockSettingsNavigator::new();
        settings
            .expect_open_access_settings()
            .returning(|| Err(MediaError::Settings("no opener".to_string())));

        let response = dispatcher(MockMediaKeyInjector::new(), MockAudioActivity::new(), settings)
            .dispatch(MediaCommand::OpenAccessSettings, None);
        assert_eq!(response, Response::Empty);
    }
}
