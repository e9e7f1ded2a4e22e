//! Platform detection
//!
//! Detects the operating system and display backend (Wayland, X11, Windows,
//! macOS) at runtime for health reporting.

use std::env;

use crate::model::{BackendKind, PlatformInfo};

/// Detects the current platform and display backend
///
/// On Linux, `$WAYLAND_DISPLAY` takes precedence over `$DISPLAY`; if neither
/// is set the backend is `None`. Windows and macOS map directly to their
/// native backends.
pub fn detect_platform() -> PlatformInfo {
    detect_platform_with_env(|key| env::var(key).ok())
}

/// Platform detection with an injectable environment lookup, for tests
fn detect_platform_with_env<F>(_env_provider: F) -> PlatformInfo
where
    F: Fn(&str) -> Option<String>,
{
    #[cfg(target_os = "linux")]
    {
        PlatformInfo::new("linux".to_string(), detect_linux_backend(&_env_provider))
    }

    #[cfg(target_os = "windows")]
    {
        PlatformInfo::new("windows".to_string(), BackendKind::Windows)
    }

    #[cfg(target_os = "macos")]
    {
        PlatformInfo::new("macos".to_string(), BackendKind::MacOS)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        PlatformInfo::new("unknown".to_string(), BackendKind::None)
    }
}

#[cfg(target_os = "linux")]
fn detect_linux_backend<F>(env_provider: &F) -> BackendKind
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(wayland_display) = env_provider("WAYLAND_DISPLAY") {
        if !wayland_display.is_empty() {
            return BackendKind::Wayland;
        }
    }

    if let Some(x_display) = env_provider("DISPLAY") {
        if !x_display.is_empty() {
            return BackendKind::X11;
        }
    }

    BackendKind::None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn mock_env(vars: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_wayland_takes_precedence() {
        let mut env_vars = HashMap::new();
        env_vars.insert("WAYLAND_DISPLAY".to_string(), "wayland-0".to_string());
        env_vars.insert("DISPLAY".to_string(), ":0".to_string());

        let platform = detect_platform_with_env(mock_env(env_vars));
        assert_eq!(platform.os, "linux");
        assert_eq!(platform.backend, BackendKind::Wayland);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_x11_fallback() {
        let mut env_vars = HashMap::new();
        env_vars.insert("DISPLAY".to_string(), ":0".to_string());

        let platform = detect_platform_with_env(mock_env(env_vars));
        assert_eq!(platform.backend, BackendKind::X11);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_empty_display_vars_mean_no_backend() {
        let mut env_vars = HashMap::new();
        env_vars.insert("WAYLAND_DISPLAY".to_string(), String::new());
        env_vars.insert("DISPLAY".to_string(), String::new());

        let platform = detect_platform_with_env(mock_env(env_vars));
        assert_eq!(platform.backend, BackendKind::None);
    }

    #[test]
    fn test_detect_platform_reports_known_os() {
        let platform = detect_platform();
        assert!(
            platform.os == "linux"
                || platform.os == "windows"
                || platform.os == "macos"
                || platform.os == "unknown"
        );
    }
}
