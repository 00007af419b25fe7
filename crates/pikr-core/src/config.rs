//! Runtime configuration.
//!
//! There is no config file; values come from the command line or environment
//! and are validated here before any window or key grab exists.

use crate::dispatch::UiCommand;
use crate::error::{Error, Result};
use crate::hotkey::Combo;
use crate::results::PopupGeometry;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SHOW_HOTKEY: &str = "Alt+Space";

/// Window flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Undecorated, modal, resident popup driven by global hotkeys
    #[default]
    Popup,
    /// Regular decorated window without global hotkeys
    Windowed,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "popup" => Ok(Self::Popup),
            "windowed" | "window" => Ok(Self::Windowed),
            other => Err(Error::Config(format!(
                "unknown mode {other:?} (expected popup or windowed)"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Popup => "popup",
            Self::Windowed => "windowed",
        })
    }
}

/// What happens after an application launched successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterLaunch {
    /// Hide the popup and stay resident
    #[default]
    Hide,
    /// Hide and terminate the launcher process
    Quit,
}

impl FromStr for AfterLaunch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hide" => Ok(Self::Hide),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(Error::Config(format!(
                "unknown after-launch policy {other:?} (expected hide or quit)"
            ))),
        }
    }
}

impl fmt::Display for AfterLaunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hide => "hide",
            Self::Quit => "quit",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub mode: Mode,
    pub show_hotkey: String,
    /// Optional OS-level hide combination, separate from the window-local Escape
    pub hide_hotkey: Option<String>,
    pub after_launch: AfterLaunch,
    pub geometry: PopupGeometry,
    /// Keep the window at this height instead of fitting it to the results
    pub fixed_height: Option<i32>,
    /// Centre the popup on the primary monitor every time it is shown
    pub center: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::for_mode(Mode::Popup)
    }
}

impl LauncherConfig {
    /// Defaults for `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Popup => Self {
                mode,
                show_hotkey: DEFAULT_SHOW_HOTKEY.to_string(),
                hide_hotkey: None,
                after_launch: AfterLaunch::Hide,
                geometry: PopupGeometry::default(),
                fixed_height: None,
                center: true,
            },
            Mode::Windowed => Self {
                mode,
                show_hotkey: DEFAULT_SHOW_HOTKEY.to_string(),
                hide_hotkey: None,
                after_launch: AfterLaunch::Quit,
                geometry: PopupGeometry {
                    width: 600,
                    ..PopupGeometry::default()
                },
                fixed_height: Some(400),
                center: false,
            },
        }
    }

    pub fn uses_global_hotkeys(&self) -> bool {
        self.mode == Mode::Popup
    }

    /// Global combinations to grab and the command each one posts.
    pub fn hotkey_bindings(&self) -> Result<Vec<(Combo, UiCommand)>> {
        if !self.uses_global_hotkeys() {
            return Ok(Vec::new());
        }

        let mut bindings = vec![(self.show_hotkey.parse()?, UiCommand::Show)];
        if let Some(hide) = &self.hide_hotkey {
            let combo: Combo = hide.parse()?;
            if combo == bindings[0].0 {
                return Err(Error::Config(format!(
                    "hide hotkey {combo} is the same as the show hotkey"
                )));
            }
            bindings.push((combo, UiCommand::Hide));
        }
        Ok(bindings)
    }

    /// Reject values the window cannot be built with.
    pub fn validate(&self) -> Result<()> {
        let PopupGeometry {
            width,
            header_height,
            row_height,
        } = self.geometry;

        if width <= 0 {
            return Err(Error::Config(format!("width must be positive, got {width}")));
        }
        if row_height <= 0 {
            return Err(Error::Config(format!(
                "row height must be positive, got {row_height}"
            )));
        }
        if header_height <= 0 {
            return Err(Error::Config(format!(
                "header height must be positive, got {header_height}"
            )));
        }

        if let Some(height) = self.fixed_height
            && height <= 0
        {
            return Err(Error::Config(format!(
                "window height must be positive, got {height}"
            )));
        }

        self.hotkey_bindings().map(|_| ())
    }

    /// Window height for `rows` results on a display `max_height` pixels tall.
    pub fn window_height(&self, rows: usize, max_height: Option<i32>) -> i32 {
        self.fixed_height
            .unwrap_or_else(|| self.geometry.height_for(rows, max_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_defaults() {
        let config = LauncherConfig::default();
        assert_eq!(config.mode, Mode::Popup);
        assert_eq!(config.after_launch, AfterLaunch::Hide);
        assert_eq!(config.geometry.width, 400);
        assert!(config.center);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_windowed_defaults_skip_hotkeys() {
        let config = LauncherConfig::for_mode(Mode::Windowed);
        assert_eq!(config.after_launch, AfterLaunch::Quit);
        assert!(!config.uses_global_hotkeys());
        assert!(config.hotkey_bindings().unwrap().is_empty());
        assert_eq!(config.window_height(0, None), 400);
        assert_eq!(config.window_height(30, Some(1080)), 400);
    }

    #[test]
    fn test_popup_height_follows_results() {
        let config = LauncherConfig::default();
        assert_eq!(config.window_height(0, None), 50);
        assert_eq!(config.window_height(2, None), 162);
    }

    #[test]
    fn test_windowed_ignores_invalid_combo() {
        let config = LauncherConfig {
            show_hotkey: "nonsense+".to_string(),
            ..LauncherConfig::for_mode(Mode::Windowed)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bindings_include_optional_hide() {
        let config = LauncherConfig {
            hide_hotkey: Some("Escape".to_string()),
            ..LauncherConfig::default()
        };
        let bindings = config.hotkey_bindings().unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].1, UiCommand::Show);
        assert_eq!(bindings[1].0.to_string(), "Escape");
        assert_eq!(bindings[1].1, UiCommand::Hide);
    }

    #[test]
    fn test_hide_equal_to_show_rejected() {
        let config = LauncherConfig {
            hide_hotkey: Some("<alt>+<space>".to_string()),
            ..LauncherConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_show_combo_rejected() {
        let config = LauncherConfig {
            show_hotkey: "Alt+Nope".to_string(),
            ..LauncherConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidCombo(_))));
    }

    #[test]
    fn test_non_positive_geometry_rejected() {
        let mut config = LauncherConfig::default();
        config.geometry.width = 0;
        assert!(config.validate().is_err());

        let mut config = LauncherConfig::default();
        config.geometry.row_height = -4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_mode_and_policy() {
        assert_eq!("Popup".parse::<Mode>().unwrap(), Mode::Popup);
        assert_eq!("windowed".parse::<Mode>().unwrap(), Mode::Windowed);
        assert!("floating".parse::<Mode>().is_err());
        assert_eq!("QUIT".parse::<AfterLaunch>().unwrap(), AfterLaunch::Quit);
        assert_eq!(AfterLaunch::Hide.to_string(), "hide");
    }
}
