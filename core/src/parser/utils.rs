//! Small text helpers shared by the tool parsers.

use std::sync::LazyLock;

use regex::Regex;

static TRAILING_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d+)$").expect("valid trailing port regex"));

/// Port digits after the last colon of an address (`0.0.0.0:80` -> `80`).
pub fn trailing_port(address: &str) -> Option<&str> {
    TRAILING_PORT
        .captures(address)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split one CSV row into fields.
///
/// Quoted fields may contain commas and doubled quotes (`""`). Empty fields
/// are kept so column positions stay stable.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    fields.push(field);
    fields
}

/// Decode `\xNN` escapes lsof uses in command names (`Code\x20Helper`).
///
/// Incomplete escapes are kept as-is.
pub fn decode_lsof_escapes(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' || chars.peek() != Some(&'x') {
            result.push(c);
            continue;
        }
        chars.next();

        let mut hex = String::with_capacity(2);
        while hex.len() < 2 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }

        match u8::from_str_radix(&hex, 16) {
            Ok(byte) if hex.len() == 2 => result.push(byte as char),
            _ => {
                result.push_str("\\x");
                result.push_str(&hex);
            }
        }
    }

    result
}
