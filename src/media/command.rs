use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::error::MediaError;
use super::types::MediaMetadata;

/// Every intent the UI layer can send over the media channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCommand {
    GetMetadata,
    PlayPause,
    Next,
    Previous,
    IsPlaying,
    OpenAccessSettings,
}

impl MediaCommand {
    pub const ALL: [MediaCommand; 6] = [
        MediaCommand::GetMetadata,
        MediaCommand::PlayPause,
        MediaCommand::Next,
        MediaCommand::Previous,
        MediaCommand::IsPlaying,
        MediaCommand::OpenAccessSettings,
    ];

    /// Method name used on the channel.
    pub fn method_name(self) -> &'static str {
        match self {
            MediaCommand::GetMetadata => "getMetadata",
            MediaCommand::PlayPause => "playPause",
            MediaCommand::Next => "next",
            MediaCommand::Previous => "previous",
            MediaCommand::IsPlaying => "isPlaying",
            MediaCommand::OpenAccessSettings => "openNotificationSettings",
        }
    }

    /// Settings navigation never looks at the active session.
    pub fn needs_session(self) -> bool {
        !matches!(self, MediaCommand::OpenAccessSettings)
    }
}

impl FromStr for MediaCommand {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaCommand::ALL
            .into_iter()
            .find(|command| command.method_name() == s)
            .ok_or_else(|| MediaError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for MediaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Value produced by the dispatcher for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Void result, or "no metadata" for `getMetadata`.
    Empty,
    Bool(bool),
    Metadata(MediaMetadata),
}

impl Response {
    pub fn into_value(self) -> Value {
        match self {
            Response::Empty => Value::Null,
            Response::Bool(flag) => Value::Bool(flag),
            Response::Metadata(metadata) => match serde_json::to_value(metadata) {
                Ok(value) => value,
                Err(e) => {
                    log::error!("Failed to serialize media metadata: {}", e);
                    Value::Null
                }
            },
        }
    }
}

/// Outcome of a method call on the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResult {
    Success(Value),
    NotImplemented,
}

impl MethodResult {
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, MethodResult::NotImplemented)
    }
}
