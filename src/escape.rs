//! Java string literal escaping.
//!
//! Total mapping from arbitrary text to the body of a Java string literal.
//! The output is pure printable ASCII: quotes and backslashes are escaped,
//! the usual control characters get their short escapes, and everything
//! else outside `0x20..=0x7e` becomes `\uXXXX` per UTF-16 code unit.

use std::fmt::Write;

/// Escapes `text` so it can be placed between double quotes in Java source.
pub fn escape_java(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    // Writing into a String cannot fail.
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
        }
    }
    out
}

/// A complete double-quoted Java string literal for `text`.
pub fn java_literal(text: &str) -> String {
    format!("\"{}\"", escape_java(text))
}
