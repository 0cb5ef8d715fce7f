//! Digit-at-a-time number rendering and text classification.
//!
//! Values keep numbers as text, so turning a Rust numeric into a value means
//! rendering its digits here, and deciding whether stored text may be written
//! unquoted means running the grammar walk here.

#[cfg(test)]
#[path = "./num_tests.rs"]
mod tests;

/// Appends the decimal digits of `value`, most significant first.
fn push_digits(out: &mut String, value: u64) {
    let div = value / 10;
    if div >= 1 {
        push_digits(out, div);
    }
    out.push((b'0' + (value % 10) as u8) as char);
}

pub(crate) fn push_u64(out: &mut String, value: u64) {
    push_digits(out, value);
}

pub(crate) fn push_i64(out: &mut String, value: i64) {
    if value < 0 {
        out.push('-');
        push_digits(out, value.unsigned_abs());
    } else {
        push_digits(out, value as u64);
    }
}

macro_rules! float_formatter {
    ($name:ident, $whole:ident, $float:ty) => {
        fn $whole(out: &mut String, value: $float) {
            let div = value / 10.0;
            if div >= 1.0 {
                $whole(out, div);
            }
            out.push((b'0' + (value % 10.0) as u8) as char);
        }

        /// Renders `value` as `whole.fraction`: the decimal point is always
        /// emitted, the fraction is `0` when empty and otherwise up to
        /// `DIGITS` digits, stopping once the remainder reaches exactly
        /// zero. `value` must be finite.
        pub(crate) fn $name(out: &mut String, value: $float) {
            debug_assert!(value.is_finite());
            let magnitude = if value < 0.0 {
                out.push('-');
                -value
            } else {
                value
            };
            $whole(out, magnitude.trunc());
            out.push('.');
            let mut fraction = magnitude.fract();
            if fraction == 0.0 {
                out.push('0');
                return;
            }
            for _ in 0..<$float>::DIGITS {
                fraction *= 10.0;
                let digit = fraction.trunc();
                fraction -= digit;
                out.push((b'0' + digit as u8) as char);
                if fraction == 0.0 {
                    break;
                }
            }
        }
    };
}

float_formatter!(push_f64, push_f64_whole, f64);
float_formatter!(push_f32, push_f32_whole, f32);

fn read_sign(bytes: &mut &[u8]) {
    if let [b'+' | b'-', rest @ ..] = *bytes {
        *bytes = rest;
    }
}

fn read_digits(bytes: &mut &[u8]) -> bool {
    let mut seen = false;
    while let [b'0'..=b'9', rest @ ..] = *bytes {
        *bytes = rest;
        seen = true;
    }
    seen
}

/// Whether `text` is exactly one number: optional sign, digits, an optional
/// fraction with at least one digit, an optional signed exponent, and
/// nothing after.
pub(crate) fn is_number(text: &str) -> bool {
    let mut bytes = text.as_bytes();
    read_sign(&mut bytes);
    if !read_digits(&mut bytes) {
        return false;
    }
    if let [b'.', rest @ ..] = bytes {
        bytes = rest;
        if !read_digits(&mut bytes) {
            return false;
        }
    }
    if let [b'e' | b'E', rest @ ..] = bytes {
        bytes = rest;
        read_sign(&mut bytes);
        if !read_digits(&mut bytes) {
            return false;
        }
    }
    bytes.is_empty()
}

pub(crate) fn is_true(text: &str) -> bool {
    text == "true"
}

pub(crate) fn is_false(text: &str) -> bool {
    text == "false"
}

pub(crate) fn parse_i64(text: &str) -> Option<i64> {
    if !is_number(text) {
        return None;
    }
    text.parse().ok()
}

pub(crate) fn parse_u64(text: &str) -> Option<u64> {
    if !is_number(text) {
        return None;
    }
    text.parse().ok()
}

pub(crate) fn parse_f64(text: &str) -> Option<f64> {
    if !is_number(text) {
        return None;
    }
    text.parse().ok()
}
