//! Windows backend: GlobalSystemMediaTransportControls sessions, media keys
//! through `SendInput`, and audio activity from the default endpoint meter.

use windows::Media::Control::{
    GlobalSystemMediaTransportControlsSession, GlobalSystemMediaTransportControlsSessionManager,
    GlobalSystemMediaTransportControlsSessionPlaybackStatus,
};
use windows::Storage::Streams::{DataReader, IRandomAccessStreamReference};
use windows::Win32::Foundation::E_ACCESSDENIED;

use super::artwork::image_from_bytes;
use crate::media::{
    AudioActivity, KeyAction, ListenerIdentity, MediaError, MediaKey, MediaKeyInjector,
    MediaSession, PlaybackSnapshot, PlaybackState, SessionMetadata, SessionSource,
};

/// 100ns ticks per millisecond in a WinRT `TimeSpan`.
const TICKS_PER_MS: i64 = 10_000;

/// Peak level above which the default endpoint counts as playing.
const AUDIBLE_PEAK: f32 = 1e-4;

fn map_error(e: windows::core::Error) -> MediaError {
    if e.code() == E_ACCESSDENIED {
        MediaError::AccessDenied
    } else {
        MediaError::Backend(e.to_string())
    }
}

fn ticks_to_ms(ticks: i64) -> u64 {
    (ticks.max(0) / TICKS_PER_MS) as u64
}

fn non_empty(value: windows::core::Result<windows::core::HSTRING>) -> Option<String> {
    value
        .ok()
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty())
}

/// Sessions from the system media transport controls manager. The system's
/// current session is moved to the front; the rest keep registration order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmtcSessionSource;

impl SessionSource for SmtcSessionSource {
    fn list_active_sessions(
        &self,
        _listener: &ListenerIdentity,
    ) -> Result<Vec<Box<dyn MediaSession>>, MediaError> {
        let manager = GlobalSystemMediaTransportControlsSessionManager::RequestAsync()
            .and_then(|op| op.get())
            .map_err(map_error)?;
        let sessions = manager.GetSessions().map_err(map_error)?;
        let current = manager
            .GetCurrentSession()
            .ok()
            .and_then(|session| session.SourceAppUserModelId().ok())
            .map(|id| id.to_string());

        let mut result: Vec<SmtcSession> = Vec::new();
        for i in 0..sessions.Size().map_err(map_error)? {
            let session = sessions.GetAt(i).map_err(map_error)?;
            result.push(SmtcSession::new(session));
        }

        if let Some(current) = current {
            if let Some(index) = result.iter().position(|s| s.app_id == current) {
                let session = result.remove(index);
                result.insert(0, session);
            }
        }

        Ok(result
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn MediaSession>)
            .collect())
    }
}

pub struct SmtcSession {
    session: GlobalSystemMediaTransportControlsSession,
    app_id: String,
}

impl SmtcSession {
    fn new(session: GlobalSystemMediaTransportControlsSession) -> Self {
        let app_id = session
            .SourceAppUserModelId()
            .map(|id| id.to_string())
            .unwrap_or_default();
        Self { session, app_id }
    }

    fn transport(&self, name: &str, result: windows::core::Result<bool>) {
        match result {
            Ok(true) => {}
            Ok(false) => log::warn!("⚠️ {} rejected {}", self.app_id, name),
            Err(e) => log::warn!("⚠️ {} failed for {}: {}", name, self.app_id, e),
        }
    }
}

fn read_thumbnail(reference: &IRandomAccessStreamReference) -> windows::core::Result<Vec<u8>> {
    let stream = reference.OpenReadAsync()?.get()?;
    let size = stream.Size()? as u32;
    let reader = DataReader::CreateDataReader(&stream)?;
    reader.LoadAsync(size)?.get()?;
    let mut bytes = vec![0u8; size as usize];
    reader.ReadBytes(&mut bytes)?;
    Ok(bytes)
}

impl MediaSession for SmtcSession {
    fn package_name(&self) -> String {
        self.app_id.clone()
    }

    fn playback_state(&self) -> Option<PlaybackSnapshot> {
        let status = self.session.GetPlaybackInfo().ok()?.PlaybackStatus().ok()?;
        let state = match status {
            GlobalSystemMediaTransportControlsSessionPlaybackStatus::Playing => {
                PlaybackState::Playing
            }
            GlobalSystemMediaTransportControlsSessionPlaybackStatus::Paused => {
                PlaybackState::Paused
            }
            _ => PlaybackState::Other,
        };
        let snapshot = PlaybackSnapshot::new(state);
        let position = self
            .session
            .GetTimelineProperties()
            .and_then(|timeline| timeline.Position());
        Some(match position {
            Ok(position) => snapshot.with_position(ticks_to_ms(position.Duration)),
            Err(_) => snapshot,
        })
    }

    fn metadata(&self) -> Option<SessionMetadata> {
        let properties = self
            .session
            .TryGetMediaPropertiesAsync()
            .and_then(|op| op.get())
            .ok()?;

        let duration_ms = self.session.GetTimelineProperties().ok().and_then(|timeline| {
            let start = timeline.StartTime().ok()?.Duration;
            let end = timeline.EndTime().ok()?.Duration;
            (end > start).then(|| ticks_to_ms(end - start))
        });

        let thumbnail = properties
            .Thumbnail()
            .ok()
            .and_then(|reference| match read_thumbnail(&reference) {
                Ok(bytes) => image_from_bytes(&bytes),
                Err(e) => {
                    log::debug!("Thumbnail unavailable for {}: {}", self.app_id, e);
                    None
                }
            });

        Some(SessionMetadata {
            title: non_empty(properties.Title()),
            artist: non_empty(properties.Artist()),
            duration_ms,
            album_art: thumbnail,
            art: None,
        })
    }

    fn play(&self) {
        self.transport("play", self.session.TryPlayAsync().and_then(|op| op.get()));
    }

    fn pause(&self) {
        self.transport("pause", self.session.TryPauseAsync().and_then(|op| op.get()));
    }

    fn skip_to_next(&self) {
        self.transport(
            "skip next",
            self.session.TrySkipNextAsync().and_then(|op| op.get()),
        );
    }

    fn skip_to_previous(&self) {
        self.transport(
            "skip previous",
            self.session.TrySkipPreviousAsync().and_then(|op| op.get()),
        );
    }
}

/// Media keys through `SendInput`, one input per key transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct SendInputKeys;

fn virtual_key(key: MediaKey) -> u16 {
    match key {
        MediaKey::PlayPause => 0xB3, // VK_MEDIA_PLAY_PAUSE
        MediaKey::Next => 0xB0,      // VK_MEDIA_NEXT_TRACK
        MediaKey::Previous => 0xB1,  // VK_MEDIA_PREV_TRACK
    }
}

impl MediaKeyInjector for SendInputKeys {
    fn send_key(&self, action: KeyAction, key: MediaKey) -> Result<(), MediaError> {
        use windows::Win32::UI::Input::KeyboardAndMouse::{
            SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
            KEYEVENTF_KEYUP, VIRTUAL_KEY,
        };

        let flags = match action {
            KeyAction::Down => KEYBD_EVENT_FLAGS(0),
            KeyAction::Up => KEYEVENTF_KEYUP,
        };
        let input = INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(virtual_key(key)),
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        };

        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };

        if sent == 1 {
            Ok(())
        } else {
            Err(MediaError::KeyInjection(format!(
                "SendInput rejected {:?} {:?}",
                key, action
            )))
        }
    }
}

/// Audio activity from the peak meter of the default render endpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct EndpointPeakActivity;

fn endpoint_peak() -> windows::core::Result<f32> {
    use windows::Win32::Media::Audio::Endpoints::IAudioMeterInformation;
    use windows::Win32::Media::Audio::{
        eMultimedia, eRender, IMMDeviceEnumerator, MMDeviceEnumerator,
    };
    use windows::Win32::System::Com::{
        CoCreateInstance, CoInitializeEx, CLSCTX_ALL, COINIT_MULTITHREADED,
    };

    unsafe {
        // Already-initialized apartments report S_FALSE or RPC_E_CHANGED_MODE; both are fine here
        let _ = CoInitializeEx(None, COINIT_MULTITHREADED);
        let enumerator: IMMDeviceEnumerator =
            CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)?;
        let device = enumerator.GetDefaultAudioEndpoint(eRender, eMultimedia)?;
        let meter: IAudioMeterInformation = device.Activate(CLSCTX_ALL, None)?;
        meter.GetPeakValue()
    }
}

impl AudioActivity for EndpointPeakActivity {
    fn is_audio_active(&self) -> bool {
        match endpoint_peak() {
            Ok(peak) => peak > AUDIBLE_PEAK,
            Err(e) => {
                log::debug!("Audio endpoint meter unavailable: {}", e);
                false
            }
        }
    }
}
