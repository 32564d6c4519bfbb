#![forbid(unsafe_code)]

//! Key input understood by the widgets.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Esc,
    Tab,
    BackTab,
    Left,
    Right,
}

impl Key {
    /// Whether this key activates the focused control.
    #[must_use]
    pub const fn is_activate(self) -> bool {
        matches!(self, Self::Space | Self::Enter)
    }

    /// Whether this is the given character, ignoring ASCII case.
    #[must_use]
    pub fn is_char(self, c: char) -> bool {
        matches!(self, Self::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// Error returned when a key token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    token: String,
}

impl ParseKeyError {
    /// The offending token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key `{}`", self.token)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Parse a key token such as `space`, `esc`, `shift-tab` or `y`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == " " {
            return Ok(Self::Space);
        }
        let token = s.trim();
        let key = match token.to_ascii_lowercase().as_str() {
            "space" => Self::Space,
            "enter" | "return" => Self::Enter,
            "esc" | "escape" => Self::Esc,
            "tab" => Self::Tab,
            "backtab" | "shift-tab" => Self::BackTab,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => {
                        return Err(ParseKeyError {
                            token: token.to_owned(),
                        });
                    }
                }
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_keys() {
        assert_eq!("space".parse(), Ok(Key::Space));
        assert_eq!(" ".parse(), Ok(Key::Space));
        assert_eq!("Enter".parse(), Ok(Key::Enter));
        assert_eq!("escape".parse(), Ok(Key::Esc));
        assert_eq!("shift-tab".parse(), Ok(Key::BackTab));
    }

    #[test]
    fn parses_single_char() {
        assert_eq!("y".parse(), Ok(Key::Char('y')));
        assert!(Key::Char('Y').is_char('y'));
    }

    #[test]
    fn rejects_unknown_token() {
        let err = "launch".parse::<Key>().unwrap_err();
        assert_eq!(err.token(), "launch");
        assert_eq!(err.to_string(), "unknown key `launch`");
    }
}
