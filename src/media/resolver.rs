//! Picks the session the user most likely wants to control.

use super::error::MediaError;
use super::session::{MediaSession, SessionSource};
use super::types::ListenerIdentity;

pub struct SessionResolver {
    source: Box<dyn SessionSource>,
    listener: ListenerIdentity,
}

impl SessionResolver {
    pub fn new(source: Box<dyn SessionSource>, listener: ListenerIdentity) -> Self {
        Self { source, listener }
    }

    pub fn listener(&self) -> &ListenerIdentity {
        &self.listener
    }

    /// Queries the host once and selects a session. Never fails: a missing
    /// access grant or an unreachable host both resolve to `None`.
    pub fn resolve(&self) -> Option<Box<dyn MediaSession>> {
        match self.source.list_active_sessions(&self.listener) {
            Ok(sessions) => {
                log::debug!("Host reported {} active media session(s)", sessions.len());
                select_session(sessions)
            }
            Err(MediaError::AccessDenied) => {
                log::info!(
                    "Session access not granted for listener '{}', no session selected",
                    self.listener
                );
                None
            }
            Err(e) => {
                log::warn!("⚠️ Could not list media sessions: {}", e);
                None
            }
        }
    }
}

/// First playing session, otherwise the first session in host order.
pub fn select_session(sessions: Vec<Box<dyn MediaSession>>) -> Option<Box<dyn MediaSession>> {
    let index = sessions
        .iter()
        .position(|session| session.is_playing())
        .unwrap_or(0);
    sessions.into_iter().nth(index)
}
