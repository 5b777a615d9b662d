//! Keypad keys and label parsing.
//!
//! Maps the calculator's button labels to typed keys so a front-end can
//! forward presses to [`CalculatorSession::press`](crate::CalculatorSession::press)
//! without knowing the session API.

use crate::calculator::is_grammar_char;
use thiserror::Error;

/// Error raised when text does not name a key.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeypadError {
    #[error("no key for '{0}'")]
    UnknownKey(char),
}

/// A single keypad button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A digit, operator, decimal point or parenthesis.
    Token(char),
    /// `=`
    Equals,
    /// Delete the last character.
    Backspace,
    /// `CE`
    ClearEntry,
    /// `C`
    Clear,
    /// `MC`
    MemoryClear,
    /// `MR`
    MemoryRecall,
    /// `M+`
    MemoryAdd,
    /// `M-`
    MemorySubtract,
    /// `MS`
    MemoryStore,
    /// Empty the history panel.
    HistoryClear,
}

impl Key {
    /// Look up a key by its full label.
    ///
    /// Display glyphs are normalized: `x` and `×` become `*`, `÷`
    /// becomes `/`.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = match label {
            "=" => Self::Equals,
            "⌫" | "BS" => Self::Backspace,
            "CE" => Self::ClearEntry,
            "C" => Self::Clear,
            "MC" => Self::MemoryClear,
            "MR" => Self::MemoryRecall,
            "M+" => Self::MemoryAdd,
            "M-" => Self::MemorySubtract,
            "MS" => Self::MemoryStore,
            "HC" => Self::HistoryClear,
            _ => {
                let mut chars = label.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                return Self::from_char(c);
            }
        };
        Some(key)
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | '×' => Some(Self::Token('*')),
            '÷' => Some(Self::Token('/')),
            '=' => Some(Self::Equals),
            '⌫' => Some(Self::Backspace),
            'C' => Some(Self::Clear),
            c if is_grammar_char(c) => Some(Self::Token(c)),
            _ => None,
        }
    }

    /// The canonical label for this key.
    pub fn label(&self) -> String {
        match self {
            Self::Token(c) => c.to_string(),
            Self::Equals => "=".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::Clear => "C".to_string(),
            Self::MemoryClear => "MC".to_string(),
            Self::MemoryRecall => "MR".to_string(),
            Self::MemoryAdd => "M+".to_string(),
            Self::MemorySubtract => "M-".to_string(),
            Self::MemoryStore => "MS".to_string(),
            Self::HistoryClear => "HC".to_string(),
        }
    }

    /// Check if this key appends to the expression.
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Check if this key operates on the memory register.
    pub fn is_memory(&self) -> bool {
        matches!(
            self,
            Self::MemoryClear
                | Self::MemoryRecall
                | Self::MemoryAdd
                | Self::MemorySubtract
                | Self::MemoryStore
        )
    }
}

/// Parse a line of input into key presses.
///
/// Words are separated by whitespace. A word that is a whole label
/// (`MS`, `M+`, `CE`) is one key; any other word is read one character
/// at a time, so `12*3=` is five keys.
pub fn parse_keys(line: &str) -> Result<Vec<Key>, KeypadError> {
    let mut keys = Vec::new();
    for word in line.split_whitespace() {
        if let Some(key) = Key::from_label(word) {
            keys.push(key);
            continue;
        }
        for c in word.chars() {
            keys.push(Key::from_char(c).ok_or(KeypadError::UnknownKey(c))?);
        }
    }
    Ok(keys)
}
