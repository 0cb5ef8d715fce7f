#![allow(clippy::question_mark)]
use crate::Span;
use std::fmt::{self, Debug, Display};

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

/// Error raised by parsing, value access, or field binding.
#[derive(Debug, Clone)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The span where the error occurs.
    ///
    /// Empty for errors that did not come from the parser.
    pub span: Span,
    /// Line and column information, only available for errors coming from the parser
    pub line_info: Option<(usize, usize)>,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self {
            kind,
            span,
            line_info: None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: Span::default(),
            line_info: None,
        }
    }
}

/// The kinds of error that can occur.
///
/// The parse kinds ([`UnexpectedEof`](Self::UnexpectedEof) through
/// [`TrailingData`](Self::TrailingData)) abort a parse outright. The access
/// kinds ([`TypeMismatch`](Self::TypeMismatch), [`KeyNotFound`](Self::KeyNotFound),
/// [`IndexOutOfBounds`](Self::IndexOutOfBounds), [`Logic`](Self::Logic)) are
/// recoverable: the value they were raised on is unchanged.
#[derive(Clone)]
pub enum ErrorKind {
    /// EOF was reached while a value was still incomplete.
    UnexpectedEof,

    /// An unexpected character was encountered, typically when looking for a
    /// value.
    Unexpected(char),

    /// Wanted one sort of token, but found another.
    Wanted {
        /// Expected token type.
        expected: &'static str,
        /// Actually found token type.
        found: &'static str,
    },

    /// An unterminated string was found where EOF was reached before the
    /// closing quote.
    UnterminatedString,

    /// An invalid character was found as an escape.
    InvalidEscape(char),

    /// An invalid character was found in a `\u` hex escape.
    InvalidHexEscape(char),

    /// A `\u` escape named a code point this implementation cannot encode
    /// (surrogates).
    UnsupportedUnicode(u32),

    /// Extra non-whitespace input remained after a complete value.
    TrailingData,

    /// An accessor was called on a value holding a different type.
    TypeMismatch {
        /// Expected value type.
        expected: &'static str,
        /// Actually found value type.
        found: &'static str,
    },

    /// A map lookup did not find the key.
    KeyNotFound(Box<str>),

    /// A list index was past the end.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The length of the list.
        len: usize,
    },

    /// An iterator or cursor was used in a way its backing value cannot
    /// support.
    Logic(&'static str),

    /// A string's content failed to parse as a number.
    InvalidNumber,

    /// The number cannot be losslessly converted to the requested type.
    OutOfRange(&'static str),

    /// A required field is missing from a map.
    MissingField(&'static str),

    /// Keys were present in a map that were never requested.
    ///
    /// Used when binding a map to a struct with a fixed set of fields.
    UnexpectedKeys {
        /// The unexpected keys.
        keys: Vec<String>,
    },

    /// A custom error raised from a [`FromValue`](crate::FromValue) impl.
    Custom(std::borrow::Cow<'static, str>),
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedEof => "unexpected-eof",
            Self::Unexpected(..) => "unexpected",
            Self::Wanted { .. } => "wanted",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::InvalidHexEscape(..) => "invalid-hex-escape",
            Self::UnsupportedUnicode(..) => "unsupported-unicode",
            Self::TrailingData => "trailing-data",
            Self::TypeMismatch { .. } => "type-mismatch",
            Self::KeyNotFound(..) => "key-not-found",
            Self::IndexOutOfBounds { .. } => "index-out-of-bounds",
            Self::Logic(..) => "logic",
            Self::InvalidNumber => "invalid-number",
            Self::OutOfRange(..) => "out-of-range",
            Self::MissingField(..) => "missing-field",
            Self::UnexpectedKeys { .. } => "unexpected-keys",
            Self::Custom(..) => "custom",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

macro_rules! rtry {
    ($($tt:tt)*) => {
        if let Err(err) = $($tt)* {
            return Err(err);
        }
    };
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => f.write_str("unexpected eof encountered"),
            ErrorKind::Unexpected(c) => {
                rtry!(f.write_str("unexpected character found: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::Wanted { expected, found } => {
                rtry!(f.write_str("expected "));
                rtry!(f.write_str(expected));
                rtry!(f.write_str(", found "));
                f.write_str(found)
            }
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::InvalidEscape(c) => {
                rtry!(f.write_str("invalid escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidHexEscape(c) => {
                rtry!(f.write_str("invalid hex escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::UnsupportedUnicode(c) => {
                rtry!(f.write_str("unsupported unicode escape value: `"));
                rtry!(Display::fmt(c, f));
                f.write_str("`")
            }
            ErrorKind::TrailingData => f.write_str("extra data at end of parsed input"),
            ErrorKind::TypeMismatch { expected, found } => {
                rtry!(f.write_str("expecting "));
                rtry!(f.write_str(expected));
                rtry!(f.write_str(" but "));
                rtry!(f.write_str(found));
                f.write_str(" was found")
            }
            ErrorKind::KeyNotFound(key) => {
                rtry!(f.write_str("key not found: `"));
                rtry!(f.write_str(key));
                f.write_str("`")
            }
            ErrorKind::IndexOutOfBounds { index, len } => {
                rtry!(f.write_str("index "));
                rtry!(Display::fmt(index, f));
                rtry!(f.write_str(" is out of bounds for a list of length "));
                Display::fmt(len, f)
            }
            ErrorKind::Logic(msg) => f.write_str(msg),
            ErrorKind::InvalidNumber => f.write_str("invalid number"),
            ErrorKind::OutOfRange(kind) => {
                rtry!(f.write_str("out of range of '"));
                rtry!(f.write_str(kind));
                f.write_str("'")
            }
            ErrorKind::MissingField(field) => {
                rtry!(f.write_str("missing field '"));
                rtry!(f.write_str(field));
                f.write_str("' in map")
            }
            ErrorKind::UnexpectedKeys { keys } => {
                rtry!(f.write_str("unexpected keys in map: ["));
                let mut first = true;
                for key in keys {
                    if !first {
                        rtry!(f.write_str(", "));
                    }
                    first = false;
                    rtry!(f.write_str("\""));
                    rtry!(f.write_str(key));
                    rtry!(f.write_str("\""));
                }
                f.write_str("]")
            }
            ErrorKind::Custom(message) => f.write_str(message),
        }
    }
}
