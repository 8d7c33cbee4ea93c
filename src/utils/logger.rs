//! Structured logging helpers for the media bridge
//!
//! Every method call on the channel is logged as an operation with a start
//! and a completion (or failure) line, so a single request can be followed
//! end to end in the host's log output.
//!
//! - **Method calls**: always logged at info level
//! - **Session details**: debug level only
//! - **Failures**: always logged with their context

use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

/// Structured log event types
#[derive(Debug, Clone, Serialize)]
pub enum LogEvent {
    Operation {
        name: String,
        phase: OperationPhase,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<LogContext>,
    },
    Session {
        operation: String,
        package_name: Option<String>,
        playing: bool,
    },
}

#[derive(Debug, Clone, Serialize)]
pub enum OperationPhase {
    Start,
    Complete { duration_ms: u64 },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct LogContext {
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

impl LogContext {
    fn from_map(fields: &HashMap<String, String>) -> Option<Self> {
        if fields.is_empty() {
            None
        } else {
            Some(Self {
                fields: fields.clone(),
            })
        }
    }
}

/// Renders an event to a single log line. Returns the level it belongs at.
pub fn format_event(event: &LogEvent) -> (log::Level, String) {
    match event {
        LogEvent::Operation {
            name,
            phase,
            context,
        } => {
            let ctx_str = context
                .as_ref()
                .map(|c| format!(" | {:?}", sorted(&c.fields)))
                .unwrap_or_default();
            match phase {
                OperationPhase::Start => (log::Level::Info, format!("🚀 {} STARTING{}", name, ctx_str)),
                OperationPhase::Complete { duration_ms } => (
                    log::Level::Info,
                    format!("✅ {} COMPLETE in {}ms{}", name, duration_ms, ctx_str),
                ),
                OperationPhase::Failed { error } => (
                    log::Level::Error,
                    format!("❌ {} FAILED: {}{}", name, error, ctx_str),
                ),
            }
        }
        LogEvent::Session {
            operation,
            package_name,
            playing,
        } => {
            let target = package_name.as_deref().unwrap_or("<none>");
            (
                log::Level::Debug,
                format!("🎵 {} | Session: {} | Playing: {}", operation, target, playing),
            )
        }
    }
}

fn sorted(fields: &HashMap<String, String>) -> Vec<(&String, &String)> {
    let mut pairs: Vec<_> = fields.iter().collect();
    pairs.sort();
    pairs
}

pub fn log_event(event: LogEvent) {
    let (level, line) = format_event(&event);
    log::log!(level, "{}", line);
}

/// Log operation start with parameters
#[inline]
pub fn log_operation_start(operation: &str, params: &HashMap<String, String>) {
    log_event(LogEvent::Operation {
        name: operation.to_string(),
        phase: OperationPhase::Start,
        context: LogContext::from_map(params),
    });
}

/// Log operation completion with results
#[inline]
pub fn log_operation_complete(operation: &str, duration_ms: u64, results: &HashMap<String, String>) {
    log_event(LogEvent::Operation {
        name: operation.to_string(),
        phase: OperationPhase::Complete { duration_ms },
        context: LogContext::from_map(results),
    });
}

pub fn log_operation_failed(operation: &str, error: &str, context: &HashMap<String, String>) {
    log_event(LogEvent::Operation {
        name: operation.to_string(),
        phase: OperationPhase::Failed {
            error: error.to_string(),
        },
        context: LogContext::from_map(context),
    });
}

/// Runs `f` between a start and a completion line, with timing
#[inline]
pub fn log_operation<F, R>(name: &str, context: &HashMap<String, String>, f: F) -> R
where
    F: FnOnce() -> R,
{
    if log::log_enabled!(log::Level::Info) {
        let start = Instant::now();
        log_operation_start(name, context);
        let result = f();
        log_operation_complete(name, start.elapsed().as_millis() as u64, &HashMap::new());
        result
    } else {
        f()
    }
}

/// Convenience macro for building a log context map
#[macro_export]
macro_rules! log_context {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut context = ::std::collections::HashMap::<String, String>::new();
        $(context.insert($key.to_string(), $value.to_string());)*
        context
    }};
}
