use crate::media::{MediaError, SettingsNavigator};

/// Opens the host's access-grant screen with the system opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSettingsNavigator;

#[cfg(target_os = "macos")]
const MACOS_PRIVACY_PANE: &[&str] =
    &["x-apple.systempreferences:com.apple.preference.security?Privacy_Automation"];

#[cfg(target_os = "windows")]
const WINDOWS_PRIVACY_PAGE: &[&str] = &["ms-settings:privacy-general"];

/// Program and arguments that open the access settings on this host.
pub fn access_settings_command() -> Option<(&'static str, &'static [&'static str])> {
    #[cfg(target_os = "macos")]
    {
        Some(("open", MACOS_PRIVACY_PANE))
    }

    #[cfg(target_os = "windows")]
    {
        Some(("explorer", WINDOWS_PRIVACY_PAGE))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        // MPRIS has no access gate
        None
    }
}

impl SettingsNavigator for SystemSettingsNavigator {
    fn open_access_settings(&self) -> Result<(), MediaError> {
        let (program, args) = access_settings_command().ok_or_else(|| {
            MediaError::Settings("no access settings screen on this platform".to_string())
        })?;

        log::info!("Opening access settings with {} {:?}", program, args);
        std::process::Command::new(program)
            .args(args)
            .spawn()
            .map(|_| ())
            .map_err(|e| MediaError::Settings(format!("Failed to launch {}: {}", program, e)))
    }
}
