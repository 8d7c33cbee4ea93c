use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use std::cell::RefCell;

use crate::media::{KeyAction, MediaError, MediaKey, MediaKeyInjector};

/// Synthesizes media keys through the display server.
///
/// The `Enigo` connection is opened on first use and kept for later keys so
/// a press and its release go through the same connection.
pub struct EnigoKeyInjector {
    enigo: RefCell<Option<Enigo>>,
}

impl Default for EnigoKeyInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnigoKeyInjector {
    pub fn new() -> Self {
        Self {
            enigo: RefCell::new(None),
        }
    }
}

fn enigo_key(key: MediaKey) -> Key {
    match key {
        MediaKey::PlayPause => Key::MediaPlayPause,
        MediaKey::Next => Key::MediaNextTrack,
        MediaKey::Previous => Key::MediaPrevTrack,
    }
}

fn enigo_direction(action: KeyAction) -> Direction {
    match action {
        KeyAction::Down => Direction::Press,
        KeyAction::Up => Direction::Release,
    }
}

impl MediaKeyInjector for EnigoKeyInjector {
    fn send_key(&self, action: KeyAction, key: MediaKey) -> Result<(), MediaError> {
        let mut slot = self.enigo.borrow_mut();
        if slot.is_none() {
            let enigo = Enigo::new(&Settings::default()).map_err(|e| {
                MediaError::KeyInjection(format!("Failed to initialize Enigo: {:?}", e))
            })?;
            *slot = Some(enigo);
        }
        let Some(enigo) = slot.as_mut() else {
            return Err(MediaError::KeyInjection("Enigo unavailable".to_string()));
        };

        enigo
            .key(enigo_key(key), enigo_direction(action))
            .map_err(|e| MediaError::KeyInjection(format!("{:?} {:?}: {:?}", key, action, e)))
    }
}
