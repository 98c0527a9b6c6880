//! Engine-neutral keyboard input.

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A printable key, always lowercase.
    Char(char),
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F1`..`F12`.
    F(u8),
}

impl Key {
    /// Builds a character key, folding letters to lowercase.
    #[must_use]
    pub fn char(c: char) -> Self {
        if c == ' ' {
            Key::Space
        } else {
            Key::Char(c.to_ascii_lowercase())
        }
    }
}

impl FromStr for Key {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lower = name.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() => Key::Char(c),
                    (Some('f'), Some(_)) => match other[1..].parse::<u8>() {
                        Ok(n @ 1..=12) => Key::F(n),
                        _ => return Err(EngineError::InvalidKey(name.to_string())),
                    },
                    _ => return Err(EngineError::InvalidKey(name.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Space => f.write_str("space"),
            Key::Enter => f.write_str("enter"),
            Key::Escape => f.write_str("escape"),
            Key::Tab => f.write_str("tab"),
            Key::Backspace => f.write_str("backspace"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::F(n) => write!(f, "f{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerState {
    Pressed,
    /// Held down long enough for the keyboard to auto-repeat.
    Repeated,
    Released,
}

/// One keyboard transition delivered to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputCommand {
    pub key: Key,
    pub trigger: TriggerState,
}

impl InputCommand {
    #[must_use]
    pub fn new(key: Key, trigger: TriggerState) -> Self {
        Self { key, trigger }
    }

    #[must_use]
    pub fn pressed(key: Key) -> Self {
        Self::new(key, TriggerState::Pressed)
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.trigger == TriggerState::Pressed
    }

    /// Pressed or auto-repeated.
    #[must_use]
    pub fn is_down(&self) -> bool {
        matches!(self.trigger, TriggerState::Pressed | TriggerState::Repeated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("q".parse::<Key>().ok(), Some(Key::Char('q')));
        assert_eq!("Q".parse::<Key>().ok(), Some(Key::Char('q')));
        assert_eq!("escape".parse::<Key>().ok(), Some(Key::Escape));
        assert_eq!("Esc".parse::<Key>().ok(), Some(Key::Escape));
        assert_eq!("space".parse::<Key>().ok(), Some(Key::Space));
        assert_eq!("f1".parse::<Key>().ok(), Some(Key::F(1)));
        assert_eq!("F12".parse::<Key>().ok(), Some(Key::F(12)));
        assert_eq!("5".parse::<Key>().ok(), Some(Key::Char('5')));
        assert_eq!("f".parse::<Key>().ok(), Some(Key::Char('f')));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "f13", "f0", "ctrl", "fx"] {
            assert!(
                matches!(bad.parse::<Key>(), Err(EngineError::InvalidKey(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_display_round_trips_names() {
        for key in [Key::Char('a'), Key::Escape, Key::F(3), Key::Space] {
            assert_eq!(key.to_string().parse::<Key>().ok(), Some(key));
        }
    }

    #[test]
    fn test_trigger_helpers() {
        let repeat = InputCommand::new(Key::char('A'), TriggerState::Repeated);
        assert_eq!(repeat.key, Key::Char('a'));
        assert!(repeat.is_down());
        assert!(!repeat.is_pressed());
        assert!(!InputCommand::new(Key::Enter, TriggerState::Released).is_down());
        assert_eq!(Key::char(' '), Key::Space);
    }
}
