use thiserror::Error;

/// A launch attempt that the directory could not carry out.
///
/// Recovered locally: the popup stays open and its state is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to launch {app}: {reason}")]
pub struct LaunchError {
    pub app: String,
    pub reason: String,
}

impl LaunchError {
    pub fn new(app: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// The system-wide hotkey capability is missing at startup.
    #[error("Global hotkeys unavailable: {0}")]
    HotkeyUnavailable(String),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("Invalid key combination: {0}")]
    InvalidCombo(String),

    #[error("Failed to register hotkey {combo}: {reason}")]
    HotkeyRegistration { combo: String, reason: String },

    #[error("Hotkey listener already stopped")]
    ListenerStopped,

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error_display() {
        let err = LaunchError::new("Firefox", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "Failed to launch Firefox: No such file or directory"
        );
    }

    #[test]
    fn test_launch_error_converts_transparently() {
        let err: Error = LaunchError::new("Files", "permission denied").into();
        assert!(matches!(err, Error::Launch(_)));
        assert_eq!(err.to_string(), "Failed to launch Files: permission denied");
    }

    #[test]
    fn test_error_display_hotkey_unavailable() {
        let err = Error::HotkeyUnavailable("no X11 display".to_string());
        assert_eq!(err.to_string(), "Global hotkeys unavailable: no X11 display");
    }

    #[test]
    fn test_error_display_invalid_combo() {
        let err = Error::InvalidCombo("Alt+".to_string());
        assert_eq!(err.to_string(), "Invalid key combination: Alt+");
    }

    #[test]
    fn test_error_display_registration() {
        let err = Error::HotkeyRegistration {
            combo: "Alt+Space".to_string(),
            reason: "already grabbed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to register hotkey Alt+Space: already grabbed"
        );
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
