//! Flat key=value properties grammar.
//!
//! # Responsibilities
//! - Split input into natural lines (`\n`, `\r`, `\r\n`)
//! - Join continuation lines (odd number of trailing backslashes)
//! - Skip blank lines and `#` / `!` comments
//! - Split key from value on the first unescaped `=`, `:` or whitespace
//! - Resolve escapes, including `\uXXXX` and surrogate pairs
//!
//! # Design Decisions
//! - Input is decoded as UTF-8, falling back to ISO-8859-1 byte-per-char
//! - Duplicate keys keep their first position and their last value
//! - Comment lines never continue

use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// A grammar violation in properties text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based natural line where the offending logical line starts.
    pub line: usize,
    pub reason: String,
}

/// Ordered key/value pairs parsed from one properties source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair. A repeated key replaces the value in place.
    pub fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decode raw file bytes into text.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Parse raw bytes read from a properties file.
pub fn parse_bytes(bytes: &[u8]) -> Result<Properties, ParseError> {
    parse_str(&decode(bytes))
}

/// Parse properties text.
pub fn parse_str(input: &str) -> Result<Properties, ParseError> {
    let mut props = Properties::new();
    let mut lines = NaturalLines::new(input);

    while let Some((start_line, raw)) = lines.next() {
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical, start_line)?;
        props.insert(key, value);
    }

    Ok(props)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str, line_no: usize) -> Result<(String, String), ParseError> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut key_end = len;
    let mut value_start = len;
    let mut has_separator = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            _ => {}
        }
    }

    let mut j = value_start;
    while j < len && is_blank(chars[j]) {
        j += 1;
    }
    if !has_separator && j < len && matches!(chars[j], '=' | ':') {
        j += 1;
        while j < len && is_blank(chars[j]) {
            j += 1;
        }
    }

    let key = unescape(&chars[..key_end], line_no)?;
    let value = unescape(&chars[j..], line_no)?;
    Ok((key, value))
}

fn unescape(chars: &[char], line_no: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(chars.len());
    // Consecutive \uXXXX units are decoded together so surrogate pairs combine.
    let mut units: Vec<u16> = Vec::new();
    let mut iter = chars.iter().copied();

    while let Some(c) = iter.next() {
        if c != '\\' {
            flush_units(&mut units, &mut out);
            out.push(c);
            continue;
        }
        let Some(escaped) = iter.next() else {
            break;
        };
        if escaped == 'u' {
            let mut code: u16 = 0;
            for _ in 0..4 {
                let digit = iter
                    .next()
                    .and_then(|h| h.to_digit(16))
                    .ok_or_else(|| ParseError {
                        line: line_no,
                        reason: "Malformed \\uxxxx encoding".to_string(),
                    })?;
                code = code * 16 + digit as u16;
            }
            units.push(code);
            continue;
        }
        flush_units(&mut units, &mut out);
        out.push(match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{000C}',
            other => other,
        });
    }
    flush_units(&mut units, &mut out);

    Ok(out)
}

fn flush_units(units: &mut Vec<u16>, out: &mut String) {
    if units.is_empty() {
        return;
    }
    out.extend(
        char::decode_utf16(units.drain(..)).map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER)),
    );
}

struct NaturalLines<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> NaturalLines<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input, line: 0 }
    }
}

impl<'a> Iterator for NaturalLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        self.line += 1;

        match self.rest.find(|c: char| c == '\n' || c == '\r') {
            Some(pos) => {
                let line = &self.rest[..pos];
                let skip = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + skip..];
                Some((self.line, line))
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some((self.line, line))
            }
        }
    }
}
