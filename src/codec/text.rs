//! Boolean and string parsing for command arguments.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, FormatError, Result};

/// Parses a boolean argument.
///
/// Only `true`, `True`, `TRUE`, `1`, `false`, `False`, `FALSE` and `0` are accepted.
pub fn parse_bool(text: &str) -> Result<bool> {
    match text {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        _ => Err(FormatError::Boolean(text.to_string()).into()),
    }
}

/// Expands the escapes a shell argument cannot carry.
///
/// `\n` becomes a newline, `\t` a tab, `\s` a space and `\\` a backslash.
/// Replacements run one after another in that order, so an earlier escape
/// wins: `\\s` turns into a backslash and a space.
pub fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\s", " ")
        .replace("\\\\", "\\")
}

/// Character sets a string can be encoded with before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    UsAscii,
    Iso8859_1,
    Utf8,
    /// Big-endian with a leading byte order mark.
    Utf16,
    Utf16Be,
    Utf16Le,
}

impl Charset {
    /// Encodes `text`. Characters the charset cannot represent become `?`.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Charset::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Charset::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Utf16 => {
                let mut bytes = vec![0xfe, 0xff];
                bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        }
    }
}

impl FromStr for Charset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "US-ASCII" | "ASCII" => Ok(Charset::UsAscii),
            "ISO-8859-1" | "ISO8859-1" | "LATIN1" => Ok(Charset::Iso8859_1),
            "UTF-8" | "UTF8" => Ok(Charset::Utf8),
            "UTF-16" | "UTF16" => Ok(Charset::Utf16),
            "UTF-16BE" | "UTF16BE" => Ok(Charset::Utf16Be),
            "UTF-16LE" | "UTF16LE" => Ok(Charset::Utf16Le),
            _ => Err(Error::UnsupportedCharset(s.to_string())),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::UsAscii => write!(f, "US-ASCII"),
            Charset::Iso8859_1 => write!(f, "ISO-8859-1"),
            Charset::Utf8 => write!(f, "UTF-8"),
            Charset::Utf16 => write!(f, "UTF-16"),
            Charset::Utf16Be => write!(f, "UTF-16BE"),
            Charset::Utf16Le => write!(f, "UTF-16LE"),
        }
    }
}
