use super::session::MediaKeyInjector;
use super::types::{KeyAction, MediaKey};

/// Sends a press-down/press-up pair for `key`. Best effort: failures are
/// logged, and the release is still attempted if the press fails.
pub fn send_media_button(injector: &dyn MediaKeyInjector, key: MediaKey) {
    log::info!("🎵 No addressable session, sending {:?} media key", key);

    for action in [KeyAction::Down, KeyAction::Up] {
        if let Err(e) = injector.send_key(action, key) {
            log::warn!("⚠️ Media key {:?} {:?} not delivered: {}", key, action, e);
        }
    }
}
