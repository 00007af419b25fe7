//! Key combination parsing (e.g. "Alt+Space", "<ctrl>+<shift>+a").

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(clippy::struct_excessive_bools)] // one flag per physical modifier key
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub fn is_empty(self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.super_key)
    }
}

/// Non-modifier key of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// ASCII letter (stored lower-case) or digit
    Char(char),
    Space,
    Escape,
    Return,
    Tab,
    /// Function key F1..=F12
    F(u8),
}

impl Key {
    fn parse(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Some(match lower.as_str() {
            "space" => Self::Space,
            "escape" | "esc" => Self::Escape,
            "return" | "enter" => Self::Return,
            "tab" => Self::Tab,
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Self::Char(c),
                    (Some('f'), Some(_)) => {
                        let n: u8 = lower[1..].parse().ok()?;
                        if (1..=12).contains(&n) {
                            Self::F(n)
                        } else {
                            return None;
                        }
                    }
                    _ => return None,
                }
            }
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Self::Space => f.write_str("Space"),
            Self::Escape => f.write_str("Escape"),
            Self::Return => f.write_str("Return"),
            Self::Tab => f.write_str("Tab"),
            Self::F(n) => write!(f, "F{n}"),
        }
    }
}

/// A parsed combination identifier: modifiers plus exactly one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl FromStr for Combo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCombo(s.to_string());

        let mut modifiers = Modifiers::default();
        let mut key = None;

        for raw in s.split('+') {
            // Accept both "Alt" and "<alt>" spellings
            let part = raw.trim().trim_start_matches('<').trim_end_matches('>');
            if part.is_empty() {
                return Err(invalid());
            }

            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "super" | "meta" | "cmd" => modifiers.super_key = true,
                _ => {
                    if key.is_some() {
                        return Err(invalid());
                    }
                    key = Some(Key::parse(part).ok_or_else(invalid)?);
                }
            }
        }

        key.map(|key| Self { modifiers, key }).ok_or_else(invalid)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            alt,
            shift,
            super_key,
        } = self.modifiers;
        for (on, name) in [
            (ctrl, "Ctrl"),
            (alt, "Alt"),
            (shift, "Shift"),
            (super_key, "Super"),
        ] {
            if on {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Combo {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_alt_space() {
        let combo = parse("Alt+Space");
        assert!(combo.modifiers.alt);
        assert!(!combo.modifiers.ctrl);
        assert_eq!(combo.key, Key::Space);
    }

    #[test]
    fn test_parse_angle_bracket_spelling() {
        assert_eq!(parse("<alt>+<space>"), parse("Alt+Space"));
    }

    #[test]
    fn test_parse_bare_escape() {
        let combo = parse("Escape");
        assert!(combo.modifiers.is_empty());
        assert_eq!(combo.key, Key::Escape);
        assert_eq!(parse("esc"), combo);
    }

    #[test]
    fn test_parse_case_and_spaces() {
        let combo = parse("ctrl + SHIFT + a");
        assert!(combo.modifiers.ctrl);
        assert!(combo.modifiers.shift);
        assert_eq!(combo.key, Key::Char('a'));
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse("Super+F12").key, Key::F(12));
        assert!("F13".parse::<Combo>().is_err());
        assert!("F0".parse::<Combo>().is_err());
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!("Ctrl+Alt".parse::<Combo>().is_err());
    }

    #[test]
    fn test_parse_rejects_two_keys() {
        assert!("Alt+a+b".parse::<Combo>().is_err());
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!("".parse::<Combo>().is_err());
        assert!("Alt+".parse::<Combo>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = "Alt+?".parse::<Combo>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid key combination: Alt+?");
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(parse("<shift>+<ctrl>+<k>").to_string(), "Ctrl+Shift+K");
        assert_eq!(parse("alt+space").to_string(), "Alt+Space");
        assert_eq!(parse("super+f1").to_string(), "Super+F1");
    }
}
