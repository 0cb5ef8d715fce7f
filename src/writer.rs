//! Compact JSON serialization.
//!
//! Writing never fails: every value tree has a rendering. String content
//! that classifies as a number or boolean is written bare so that numeric
//! values do not come back quoted, while map keys are always quoted, even
//! number-like ones, so the output parses back to the same tree.

use crate::num;
use crate::table::HashTable;
use crate::value::Value;

#[cfg(test)]
#[path = "./writer_tests.rs"]
mod tests;

const HEX: &[u8; 16] = b"0123456789abcdef";

pub(crate) fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::String(text) => write_string(out, text),
        Value::List(elements) => write_list(out, elements),
        Value::Map(table) => write_map(out, table),
    }
}

fn write_string(out: &mut String, text: &str) {
    if num::is_true(text) || num::is_false(text) || num::is_number(text) {
        out.push_str(text);
    } else {
        write_quoted(out, text);
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // The rest of the control range has no short escape. Lowercase
            // hex, which is the only case the escape reader accepts.
            c if (c as u32) < 0x20 => {
                let code = c as u32;
                out.push_str("\\u00");
                out.push(HEX[(code >> 4) as usize] as char);
                out.push(HEX[(code & 0xf) as usize] as char);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_list(out: &mut String, elements: &[Value]) {
    out.push('[');
    let mut first = true;
    for value in elements {
        if !first {
            out.push(',');
        }
        first = false;
        write_value(out, value);
    }
    out.push(']');
}

fn write_map(out: &mut String, table: &HashTable) {
    out.push('{');
    let mut first = true;
    for (key, value) in table {
        if !first {
            out.push(',');
        }
        first = false;
        write_quoted(out, key);
        out.push(':');
        write_value(out, value);
    }
    out.push('}');
}
