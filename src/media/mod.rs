//! Active media session resolution and control.
//!
//! A method call arrives as a name on the media channel, the resolver picks
//! the session the user most likely means, and the dispatcher either drives
//! that session's transport controls or falls back to generic media keys.
//!
//! Host services are abstracted behind the traits in [`session`]; concrete
//! backends live in [`crate::platform`].

mod bridge;
mod command;
pub mod config;
mod controller;
mod error;
mod keys;
mod metadata;
mod resolver;
pub mod session;
mod types;

pub use bridge::MediaBridge;
pub use command::{MediaCommand, MethodResult, Response};
pub use config::{ArtworkMode, BridgeConfig};
pub use controller::ControlDispatcher;
pub use error::MediaError;
pub use keys::send_media_button;
pub use metadata::{extract_metadata, PngArtworkEncoder};
pub use resolver::{select_session, SessionResolver};
pub use session::{
    ArtworkEncoder, AudioActivity, MediaKeyInjector, MediaSession, SessionSource,
    SettingsNavigator,
};
pub use types::{
    KeyAction, ListenerIdentity, MediaKey, MediaMetadata, PlaybackSnapshot, PlaybackState,
    SessionMetadata,
};
