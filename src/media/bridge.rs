//! Inbound entry point for the media channel.

use super::command::{MediaCommand, MethodResult, Response};
use super::config::MEDIA_CHANNEL;
use super::controller::ControlDispatcher;
use super::resolver::SessionResolver;
use crate::log_context;
use crate::utils::logger::{log_event, log_operation, log_operation_failed, LogEvent};

/// Resolves the active session fresh for every call and hands it to the
/// dispatcher. Holds no state between calls.
pub struct MediaBridge {
    resolver: SessionResolver,
    dispatcher: ControlDispatcher,
}

impl MediaBridge {
    pub fn new(resolver: SessionResolver, dispatcher: ControlDispatcher) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    pub fn channel(&self) -> &'static str {
        MEDIA_CHANNEL
    }

    /// Handles one method call by name. Unknown names yield
    /// [`MethodResult::NotImplemented`].
    pub fn handle_method_call(&self, method: &str) -> MethodResult {
        match method.parse::<MediaCommand>() {
            Ok(command) => MethodResult::Success(self.execute(command).into_value()),
            Err(e) => {
                log_operation_failed(
                    "MEDIA_CALL",
                    &e.to_string(),
                    &log_context! { "channel" => MEDIA_CHANNEL },
                );
                MethodResult::NotImplemented
            }
        }
    }

    pub fn execute(&self, command: MediaCommand) -> Response {
        let context = log_context! {
            "method" => command,
            "listener" => self.resolver.listener(),
        };

        log_operation("MEDIA_CALL", &context, || {
            let selection = if command.needs_session() {
                self.resolver.resolve()
            } else {
                None
            };

            log_event(LogEvent::Session {
                operation: command.to_string(),
                package_name: selection.as_ref().map(|s| s.package_name()),
                playing: selection.as_ref().map(|s| s.is_playing()).unwrap_or(false),
            });

            self.dispatcher.dispatch(command, selection.as_deref())
        })
    }
}
