// Deliberately avoid `?` operator throughout this module for compile-time
// performance: explicit match/if-let prevents the compiler from generating
// From::from conversion and drop-glue machinery at every call site.
#![allow(clippy::question_mark)]
#![allow(unsafe_code)]

use crate::{
    Span,
    error::{Error, ErrorKind},
    key::HashedKey,
    table::HashTable,
    value::Value,
};

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

// ---------------------------------------------------------------------------
// Lightweight internal error -- zero-sized, no drop glue.
// When a method returns Err(ParseError), the full error details have already
// been written into Parser::error_kind / Parser::error_span.
// ---------------------------------------------------------------------------

#[derive(Copy, Clone)]
struct ParseError;

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser<'a> {
    /// Raw bytes of the input. Always valid UTF-8 (derived from `&str`).
    bytes: &'a [u8],
    cursor: usize,

    // Error context -- populated just before returning ParseError
    error_span: Span,
    error_kind: Option<ErrorKind>,

    // Reusable scratch buffer for string contents with escapes
    string_buf: Vec<u8>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            bytes: input.as_bytes(),
            cursor: 0,
            error_span: Span::new(0, 0),
            error_kind: None,
            string_buf: Vec::new(),
        }
    }

    /// Get a `&str` slice from the underlying bytes.
    /// SAFETY: `self.bytes` is always valid UTF-8, and callers must ensure
    /// `start..end` falls on UTF-8 char boundaries.
    #[inline]
    unsafe fn str_slice(&self, start: usize, end: usize) -> &'a str {
        #[cfg(not(debug_assertions))]
        unsafe {
            std::str::from_utf8_unchecked(&self.bytes[start..end])
        }
        #[cfg(debug_assertions)]
        match std::str::from_utf8(&self.bytes[start..end]) {
            Ok(value) => value,
            Err(err) => panic!(
                "Invalid UTF-8 slice: bytes[{}..{}] is not valid UTF-8: {}",
                start, end, err
            ),
        }
    }

    // -- error helpers ------------------------------------------------------

    #[cold]
    fn set_error(&mut self, start: usize, end: Option<usize>, kind: ErrorKind) -> ParseError {
        self.error_span = Span::new(start as u32, end.unwrap_or(start + 1) as u32);
        self.error_kind = Some(kind);
        ParseError
    }

    fn take_error(&mut self) -> Error {
        let kind = self
            .error_kind
            .take()
            .expect("take_error called without error");
        let span = self.error_span;
        let line_info = Some(self.to_linecol(span.start as usize));
        Error {
            kind,
            span,
            line_info,
        }
    }

    fn to_linecol(&self, offset: usize) -> (usize, usize) {
        let mut line_start = 0;
        let mut line_num = 0;
        for (i, &b) in self.bytes.iter().enumerate() {
            if i >= offset {
                return (line_num, offset - line_start);
            }
            if b == b'\n' {
                line_num += 1;
                line_start = i + 1;
            }
        }
        (line_num, offset - line_start)
    }

    // -- cursor operations --------------------------------------------------

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor += 1;
    }

    #[inline]
    fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek_byte() == Some(b) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_byte(&mut self, b: u8) -> Result<(), ParseError> {
        if self.eat_byte(b) {
            Ok(())
        } else {
            let start = self.cursor;
            let (found_desc, end) = self.scan_token_desc_and_end();
            Err(self.set_error(
                start,
                Some(end),
                ErrorKind::Wanted {
                    expected: byte_describe(b),
                    found: found_desc,
                },
            ))
        }
    }

    /// Read the next character, for error reporting on non-ASCII input.
    fn next_char(&mut self) -> Option<(usize, char)> {
        let i = self.cursor;
        let &b = self.bytes.get(i)?;

        if b < 0x80 {
            self.cursor = i + 1;
            return Some((i, b as char));
        }
        // SAFETY: self.bytes is valid UTF-8
        let remaining = unsafe { std::str::from_utf8_unchecked(&self.bytes[i..]) };
        let ch = remaining.chars().next()?;
        self.cursor = i + ch.len_utf8();
        Some((i, ch))
    }

    fn eat_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) = self.peek_byte() {
            self.advance();
        }
    }

    /// Scan forward from the current position to determine the description
    /// and end position of the "token" at the cursor, for error messages.
    fn scan_token_desc_and_end(&self) -> (&'static str, usize) {
        match self.peek_byte() {
            None => ("eof", self.bytes.len()),
            Some(b'\n' | b'\r') => ("a newline", self.cursor + 1),
            Some(b' ' | b'\t') => {
                let mut end = self.cursor + 1;
                while end < self.bytes.len()
                    && (self.bytes[end] == b' ' || self.bytes[end] == b'\t')
                {
                    end += 1;
                }
                ("whitespace", end)
            }
            Some(b',') => ("a comma", self.cursor + 1),
            Some(b':') => ("a colon", self.cursor + 1),
            Some(b'{') => ("a left brace", self.cursor + 1),
            Some(b'}') => ("a right brace", self.cursor + 1),
            Some(b'[') => ("a left bracket", self.cursor + 1),
            Some(b']') => ("a right bracket", self.cursor + 1),
            Some(b'"') => ("a string", self.cursor + 1),
            Some(b'+' | b'-' | b'0'..=b'9') => {
                let mut end = self.cursor + 1;
                while end < self.bytes.len() && is_number_byte(self.bytes[end]) {
                    end += 1;
                }
                ("a number", end)
            }
            Some(b) if b.is_ascii_alphabetic() => {
                let mut end = self.cursor + 1;
                while end < self.bytes.len() && is_word_byte(self.bytes[end]) {
                    end += 1;
                }
                ("an identifier", end)
            }
            Some(_) => ("a character", self.cursor + 1),
        }
    }

    // -- string parsing -----------------------------------------------------

    /// Advance `self.cursor` past bytes that need no special handling inside
    /// a string, 8 at a time via SWAR (SIMD Within A Register).
    ///
    /// Stops at the first `"` or `\` byte, or past the end of input. Every
    /// other byte, control characters and multi-byte UTF-8 included, is
    /// literal string content here.
    fn skip_string_plain(&mut self) {
        // Quick bail-out for EOF or an immediately-interesting byte.
        // Avoids SWAR setup cost for consecutive specials (e.g. "" or \\).
        if self.cursor >= self.bytes.len() {
            return;
        }
        let b = self.bytes[self.cursor];
        if b == b'"' || b == b'\\' {
            return;
        }
        self.cursor += 1;

        let base = self.cursor;
        let rest = &self.bytes[base..];

        type Chunk = u64;
        const STEP: usize = std::mem::size_of::<Chunk>();
        const ONE: Chunk = Chunk::MAX / 255; // 0x0101_0101_0101_0101
        const HIGH: Chunk = ONE << 7; // 0x8080_8080_8080_8080

        let fill_quote = ONE * Chunk::from(b'"');
        let fill_bslash = ONE * Chunk::from(b'\\');

        let chunks = rest.chunks_exact(STEP);
        let remainder_len = chunks.remainder().len();

        for (i, chunk) in chunks.enumerate() {
            let v = Chunk::from_le_bytes(chunk.try_into().unwrap());

            let eq_quote = (v ^ fill_quote).wrapping_sub(ONE) & !(v ^ fill_quote);
            let eq_bslash = (v ^ fill_bslash).wrapping_sub(ONE) & !(v ^ fill_bslash);

            let masked = (eq_quote | eq_bslash) & HIGH;
            if masked != 0 {
                self.cursor = base + i * STEP + masked.trailing_zeros() as usize / 8;
                return;
            }
        }

        self.cursor = self.bytes.len() - remainder_len;
        self.skip_string_plain_slow();
    }

    #[cold]
    #[inline(never)]
    fn skip_string_plain_slow(&mut self) {
        while let Some(&b) = self.bytes.get(self.cursor) {
            if b == b'"' || b == b'\\' {
                return;
            }
            self.cursor += 1;
        }
    }

    /// Read a quoted string. `start` is the byte offset of the opening
    /// quote; the cursor must be right after it. Borrows the input slice
    /// when the string has no escapes and only falls back to the scratch
    /// buffer once one shows up.
    fn quoted_string(&mut self, start: usize) -> Result<Box<str>, ParseError> {
        let content_start = self.cursor;
        let mut owned = false;
        loop {
            // Fast-scan past plain bytes (8 at a time via SWAR).
            let plain_start = self.cursor;
            self.skip_string_plain();
            if owned && plain_start < self.cursor {
                self.string_buf
                    .extend_from_slice(&self.bytes[plain_start..self.cursor]);
            }

            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.set_error(start, None, ErrorKind::UnterminatedString));
            };
            self.cursor = i + 1;

            if b == b'"' {
                let text: Box<str> = if owned {
                    // SAFETY: string_buf contains valid UTF-8.
                    let s: &str = unsafe { std::str::from_utf8_unchecked(&self.string_buf) };
                    let boxed: Box<str> = s.into();
                    self.string_buf.clear();
                    boxed
                } else {
                    unsafe { self.str_slice(content_start, i) }.into()
                };
                return Ok(text);
            }

            // The scan stops only on quotes and backslashes, so b is '\\'.
            if !owned {
                self.string_buf.clear();
                self.string_buf
                    .extend_from_slice(&self.bytes[content_start..i]);
                owned = true;
            }
            if let Err(e) = self.read_escape(start) {
                return Err(e);
            }
        }
    }

    fn read_escape(&mut self, string_start: usize) -> Result<(), ParseError> {
        let i = self.cursor;
        let Some(&b) = self.bytes.get(i) else {
            return Err(self.set_error(string_start, None, ErrorKind::UnterminatedString));
        };
        self.cursor = i + 1;

        match b {
            b'"' => self.string_buf.push(b'"'),
            b'\\' => self.string_buf.push(b'\\'),
            b'/' => self.string_buf.push(b'/'),
            b'b' => self.string_buf.push(0x08),
            b'f' => self.string_buf.push(0x0C),
            b'n' => self.string_buf.push(b'\n'),
            b'r' => self.string_buf.push(b'\r'),
            b't' => self.string_buf.push(b'\t'),
            b'u' => {
                let ch = match self.read_unicode(string_start, i) {
                    Ok(ch) => ch,
                    Err(e) => return Err(e),
                };
                let mut buf = [0u8; 4];
                let len = ch.encode_utf8(&mut buf).len();
                self.string_buf.extend_from_slice(&buf[..len]);
            }
            _ => {
                // Decode the byte as a char for the error message
                if b < 0x80 {
                    return Err(self.set_error(i, None, ErrorKind::InvalidEscape(b as char)));
                }
                self.cursor = i; // back up
                match self.next_char() {
                    Some((ei, ec)) => {
                        return Err(self.set_error(ei, None, ErrorKind::InvalidEscape(ec)));
                    }
                    None => {
                        return Err(self.set_error(
                            string_start,
                            None,
                            ErrorKind::UnterminatedString,
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Decode the four hex digits of a `\u` escape. Accepts `0-9` and
    /// lowercase `a-f` only. `escape_start` is the offset of the `u`.
    fn read_unicode(&mut self, string_start: usize, escape_start: usize) -> Result<char, ParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.set_error(string_start, None, ErrorKind::UnterminatedString));
            };
            let digit = match b {
                b'0'..=b'9' => (b - b'0') as u32,
                b'a'..=b'f' => (b - b'a' + 10) as u32,
                _ => {
                    if b < 0x80 {
                        self.cursor = i + 1;
                        return Err(self.set_error(
                            i,
                            None,
                            ErrorKind::InvalidHexEscape(b as char),
                        ));
                    }
                    match self.next_char() {
                        Some((ci, ch)) => {
                            return Err(self.set_error(ci, None, ErrorKind::InvalidHexEscape(ch)));
                        }
                        None => {
                            return Err(self.set_error(
                                string_start,
                                None,
                                ErrorKind::UnterminatedString,
                            ));
                        }
                    }
                }
            };
            code = (code << 4) | digit;
            self.cursor = i + 1;
        }
        // Surrogate halves are the only four-digit code points char refuses;
        // this library has no pairing support, so they are reported rather
        // than encoded.
        match char::from_u32(code) {
            Some(ch) => Ok(ch),
            None => Err(self.set_error(
                escape_start,
                Some(self.cursor),
                ErrorKind::UnsupportedUnicode(code),
            )),
        }
    }

    // -- literals and numbers -----------------------------------------------

    /// Consume `literal` byte for byte, erring at the first divergence.
    fn read_literal(&mut self, literal: &'static str) -> Result<(), ParseError> {
        for &expected in literal.as_bytes() {
            let i = self.cursor;
            match self.bytes.get(i) {
                Some(&b) if b == expected => self.cursor = i + 1,
                Some(_) => {
                    let (found_desc, end) = self.scan_token_desc_and_end();
                    return Err(self.set_error(
                        i,
                        Some(end),
                        ErrorKind::Wanted {
                            expected: literal,
                            found: found_desc,
                        },
                    ));
                }
                None => {
                    return Err(self.set_error(self.bytes.len(), None, ErrorKind::UnexpectedEof));
                }
            }
        }
        Ok(())
    }

    fn eat_digits(&mut self) -> bool {
        let mut seen = false;
        while let Some(b'0'..=b'9') = self.peek_byte() {
            self.advance();
            seen = true;
        }
        seen
    }

    /// Read a number token: optional sign, digits, optional fraction,
    /// optional signed exponent. The token text is kept verbatim as the
    /// value's content.
    fn number(&mut self) -> Result<Box<str>, ParseError> {
        let start = self.cursor;
        if let Some(b'+' | b'-') = self.peek_byte() {
            self.advance();
        }
        if !self.eat_digits() {
            return Err(self.number_error(start));
        }
        if self.eat_byte(b'.') {
            if !self.eat_digits() {
                return Err(self.number_error(start));
            }
        }
        if let Some(b'e' | b'E') = self.peek_byte() {
            self.advance();
            if let Some(b'+' | b'-') = self.peek_byte() {
                self.advance();
            }
            if !self.eat_digits() {
                return Err(self.number_error(start));
            }
        }
        // SAFETY: number bytes are ASCII, always valid UTF-8 boundaries
        Ok(unsafe { self.str_slice(start, self.cursor) }.into())
    }

    #[cold]
    fn number_error(&mut self, start: usize) -> ParseError {
        let end = self.cursor.max(start + 1);
        self.set_error(start, Some(end), ErrorKind::InvalidNumber)
    }

    // -- values -------------------------------------------------------------

    fn value(&mut self) -> Result<Value, ParseError> {
        self.eat_whitespace();
        match self.peek_byte() {
            Some(b'[') => self.list_value(),
            Some(b'{') => self.map_value(),
            Some(b'"') => {
                let start = self.cursor;
                self.advance();
                match self.quoted_string(start) {
                    Ok(text) => Ok(Value::String(text)),
                    Err(e) => Err(e),
                }
            }
            Some(b't') => match self.read_literal("true") {
                Ok(()) => Ok(Value::String("true".into())),
                Err(e) => Err(e),
            },
            Some(b'f') => match self.read_literal("false") {
                Ok(()) => Ok(Value::String("false".into())),
                Err(e) => Err(e),
            },
            Some(b'n') => match self.read_literal("null") {
                Ok(()) => Ok(Value::Null),
                Err(e) => Err(e),
            },
            Some(b'+' | b'-' | b'0'..=b'9') => match self.number() {
                Ok(text) => Ok(Value::String(text)),
                Err(e) => Err(e),
            },
            Some(_) => {
                let start = self.cursor;
                match self.next_char() {
                    Some((_, ch)) => Err(self.set_error(start, None, ErrorKind::Unexpected(ch))),
                    None => Err(self.set_error(start, None, ErrorKind::UnexpectedEof)),
                }
            }
            None => Err(self.set_error(self.bytes.len(), None, ErrorKind::UnexpectedEof)),
        }
    }

    fn list_value(&mut self) -> Result<Value, ParseError> {
        self.advance(); // past '['
        let mut elements = Vec::new();
        loop {
            self.eat_whitespace();
            if self.eat_byte(b']') {
                return Ok(Value::List(elements));
            }
            let value = match self.value() {
                Ok(v) => v,
                Err(e) => return Err(e),
            };
            elements.push(value);
            self.eat_whitespace();
            if self.eat_byte(b',') {
                // A closing bracket right after the comma is fine; the loop
                // entry check picks it up, so `[1,2,]` parses.
                continue;
            }
            if self.eat_byte(b']') {
                return Ok(Value::List(elements));
            }
            let start = self.cursor;
            let (found_desc, end) = self.scan_token_desc_and_end();
            return Err(self.set_error(
                start,
                Some(end),
                ErrorKind::Wanted {
                    expected: "a comma or a right bracket",
                    found: found_desc,
                },
            ));
        }
    }

    fn map_value(&mut self) -> Result<Value, ParseError> {
        self.advance(); // past '{'
        let mut table = HashTable::new();
        loop {
            self.eat_whitespace();
            if self.eat_byte(b'}') {
                return Ok(Value::Map(table));
            }
            let key_start = self.cursor;
            if !self.eat_byte(b'"') {
                let (found_desc, end) = self.scan_token_desc_and_end();
                return Err(self.set_error(
                    key_start,
                    Some(end),
                    ErrorKind::Wanted {
                        expected: "a quoted key",
                        found: found_desc,
                    },
                ));
            }
            let key = match self.quoted_string(key_start) {
                Ok(k) => k,
                Err(e) => return Err(e),
            };
            self.eat_whitespace();
            if let Err(e) = self.expect_byte(b':') {
                return Err(e);
            }
            let value = match self.value() {
                Ok(v) => v,
                Err(e) => return Err(e),
            };
            // Repeated keys overwrite in place, so the last pair wins.
            table_set(&mut table, HashedKey::new(&key), value);
            self.eat_whitespace();
            if self.eat_byte(b',') {
                continue;
            }
            if self.eat_byte(b'}') {
                return Ok(Value::Map(table));
            }
            let start = self.cursor;
            let (found_desc, end) = self.scan_token_desc_and_end();
            return Err(self.set_error(
                start,
                Some(end),
                ErrorKind::Wanted {
                    expected: "a comma or a right brace",
                    found: found_desc,
                },
            ));
        }
    }

    fn parse_document(&mut self) -> Result<Value, ParseError> {
        let value = match self.value() {
            Ok(v) => v,
            Err(e) => return Err(e),
        };
        self.eat_whitespace();
        if self.cursor < self.bytes.len() {
            let start = self.cursor;
            let (_, end) = self.scan_token_desc_and_end();
            return Err(self.set_error(start, Some(end), ErrorKind::TrailingData));
        }
        Ok(value)
    }
}

/// Insert-or-assign on a raw table, keeping keys unique the same way
/// [`Value::set`] does.
fn table_set(table: &mut HashTable, key: HashedKey<'_>, value: Value) {
    if let Some(cursor) = table.find(key) {
        if let Some(existing) = table.value_mut(cursor) {
            *existing = value;
            return;
        }
    }
    table.emplace(key, value);
}

fn byte_describe(b: u8) -> &'static str {
    match b {
        b',' => "a comma",
        b':' => "a colon",
        b'{' => "a left brace",
        b'}' => "a right brace",
        b'[' => "a left bracket",
        b']' => "a right bracket",
        b'"' => "a quote",
        _ => "a character",
    }
}

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Parse one complete JSON value from `s`.
///
/// The whole input must be consumed: anything but whitespace after the value
/// is a [`TrailingData`](ErrorKind::TrailingData) error. Numbers and
/// booleans come back as string-tagged values holding their literal text.
pub fn parse(s: &str) -> Result<Value, Error> {
    let mut parser = Parser::new(s);
    match parser.parse_document() {
        Ok(value) => Ok(value),
        Err(_) => Err(parser.take_error()),
    }
}
