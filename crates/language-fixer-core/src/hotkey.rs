use std::{fmt, str::FromStr};

pub const MOD_ALT: u32 = 0x0001;
pub const MOD_CTRL: u32 = 0x0002;
pub const MOD_SHIFT: u32 = 0x0004;
pub const MOD_CMD: u32 = 0x0008;

/// Modifiers that turn a key press into a shortcut rather than typing.
pub const MOD_SHORTCUT: u32 = MOD_CMD | MOD_CTRL;

const MODS_ORDER: &[(u32, &str)] = &[
    (MOD_CMD, "cmd"),
    (MOD_CTRL, "ctrl"),
    (MOD_ALT, "alt"),
    (MOD_SHIFT, "shift"),
];

/// A physical key, named after what it produces on the US QWERTY layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable key, stored lowercase.
    Char(char),
    Space,
    Tab,
    Return,
    Escape,
    Backspace,
    /// Forward delete.
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1`..`F12`.
    F(u8),
}

impl Key {
    /// Keys whose press moves the caret or ends the current input run.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::Delete
                | Self::Left
                | Self::Right
                | Self::Up
                | Self::Down
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch == '+' || ch.is_control() || ch.is_whitespace() {
                return None;
            }
            return Some(Self::Char(ch.to_lowercase().next().unwrap_or(ch)));
        }

        let named = match s {
            "space" => Self::Space,
            "tab" => Self::Tab,
            "return" | "enter" => Self::Return,
            "esc" | "escape" => Self::Escape,
            "backspace" => Self::Backspace,
            "delete" | "del" => Self::Delete,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            _ => {
                let n: u8 = s.strip_prefix('f')?.parse().ok()?;
                return (1..=12).contains(&n).then_some(Self::F(n));
            }
        };
        Some(named)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{ch}"),
            Self::Space => f.write_str("space"),
            Self::Tab => f.write_str("tab"),
            Self::Return => f.write_str("return"),
            Self::Escape => f.write_str("esc"),
            Self::Backspace => f.write_str("backspace"),
            Self::Delete => f.write_str("delete"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Home => f.write_str("home"),
            Self::End => f.write_str("end"),
            Self::PageUp => f.write_str("pageup"),
            Self::PageDown => f.write_str("pagedown"),
            Self::F(n) => write!(f, "f{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyParseError {
    #[error("hotkey is empty")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Modifier mask plus trigger key, e.g. `cmd+alt+h`.
///
/// Equality is exact: extra held modifiers do not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub mods: u32,
    pub key: Key,
}

impl Hotkey {
    pub const fn new(mods: u32, key: Key) -> Self {
        Self { mods, key }
    }

    /// True when pressing this hotkey types nothing into the focused app.
    ///
    /// The listener can not swallow events, and Option alone still produces a
    /// character (`alt+h` types `˙`), so Command or Control is required.
    pub fn is_chorded(&self) -> bool {
        self.mods & MOD_SHORTCUT != 0 || matches!(self.key, Key::F(_))
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(HotkeyParseError::Empty);
        }

        // A trailing "+" names the plus key itself ("cmd++").
        let (head, key_part) = match normalized.strip_suffix("++") {
            Some(head) => (head, "+"),
            None => match normalized.rsplit_once('+') {
                Some((head, key)) => (head, key),
                None => ("", normalized.as_str()),
            },
        };

        let mut mods = 0;
        for part in head.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            mods |= match part {
                "cmd" | "command" | "meta" | "super" => MOD_CMD,
                "ctrl" | "control" => MOD_CTRL,
                "alt" | "option" | "opt" => MOD_ALT,
                "shift" => MOD_SHIFT,
                other => return Err(HotkeyParseError::UnknownModifier(other.to_string())),
            };
        }

        let key_part = key_part.trim();
        let key = if key_part == "+" {
            Key::Char('+')
        } else {
            Key::parse(key_part).ok_or_else(|| HotkeyParseError::UnknownKey(key_part.to_string()))?
        };

        Ok(Self { mods, key })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (mask, label) in MODS_ORDER {
            if self.mods & mask != 0 {
                write!(f, "{label}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}
