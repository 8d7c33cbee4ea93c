pub mod media;
pub mod platform;
pub mod utils;

#[cfg(test)]
mod tests;

use media::{BridgeConfig, MediaCommand, MediaError, MethodResult};

pub use media::MediaBridge;

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

fn usage() -> String {
    let methods: Vec<&str> = MediaCommand::ALL.iter().map(|c| c.method_name()).collect();
    format!(
        "usage: casi <method> | casi --list\nmethods: {}",
        methods.join(", ")
    )
}

/// Runs a single method call against the host bridge and prints the result.
pub fn run() -> Result<(), MediaError> {
    init_logging();

    let method = std::env::args()
        .nth(1)
        .ok_or_else(|| MediaError::Usage(usage()))?;

    match method.as_str() {
        "--list" => {
            for command in MediaCommand::ALL {
                println!("{}", command.method_name());
            }
            Ok(())
        }
        "-h" | "--help" => {
            println!("{}", usage());
            Ok(())
        }
        _ => {
            let config = BridgeConfig::from_env();
            let bridge = platform::host_bridge(&config);
            match bridge.handle_method_call(&method) {
                MethodResult::Success(value) => {
                    println!("{}", value);
                    Ok(())
                }
                MethodResult::NotImplemented => {
                    println!("notImplemented");
                    Err(MediaError::UnknownMethod(method))
                }
            }
        }
    }
}
