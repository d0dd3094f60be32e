//! Grouping-aware scanning over JSX source text.
//!
//! Both the occurrence finder and the fragment splitter walk the text with a
//! [`GroupingState`], so commas, colons and braces inside nested calls,
//! arrays, objects or string literals never end a fragment or an occurrence.

use log::{debug, warn};
use std::ops::Range;

/// How an inline style occurrence is delimited in markup and what replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePattern {
    /// Attribute carrying the literal object, written as `style={{ ... }}`.
    pub attribute: String,
    /// Attribute written in place of the occurrence.
    pub reference_attribute: String,
}

impl Default for StylePattern {
    fn default() -> Self {
        StylePattern {
            attribute: "style".to_string(),
            reference_attribute: "className".to_string(),
        }
    }
}

impl StylePattern {
    pub fn new(attribute: impl Into<String>, reference_attribute: impl Into<String>) -> Self {
        StylePattern {
            attribute: attribute.into(),
            reference_attribute: reference_attribute.into(),
        }
    }

    /// Renders the reference attribute for a generated identifier.
    pub fn reference(&self, identifier: &str) -> String {
        format!("{}=\"{}\"", self.reference_attribute, identifier)
    }
}

/// One inline style occurrence found in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOccurrence {
    /// Byte span of the whole attribute, name through closing braces.
    pub span: Range<usize>,
    /// Byte span of the object body between the inner braces.
    pub body: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// Inside a string literal or a nested group, or a bracket itself.
    Nested,
    /// Depth zero, outside any string literal.
    TopLevel,
    /// A closing bracket with no opener before it.
    Unmatched,
}

/// Bracket depth and string-literal state while walking JS expression text.
#[derive(Debug, Default)]
struct GroupingState {
    depth: usize,
    quote: Option<u8>,
    escaped: bool,
}

impl GroupingState {
    fn feed(&mut self, byte: u8) -> Token {
        if let Some(quote) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if byte == b'\\' {
                self.escaped = true;
            } else if byte == quote {
                self.quote = None;
            }
            return Token::Nested;
        }
        match byte {
            b'\'' | b'"' | b'`' => {
                self.quote = Some(byte);
                Token::Nested
            }
            b'(' | b'[' | b'{' => {
                self.depth += 1;
                Token::Nested
            }
            b')' | b']' | b'}' => {
                if self.depth == 0 {
                    Token::Unmatched
                } else {
                    self.depth -= 1;
                    Token::Nested
                }
            }
            _ if self.depth == 0 => Token::TopLevel,
            _ => Token::Nested,
        }
    }
}

fn skip_whitespace(bytes: &[u8], mut index: usize) -> usize {
    while index < bytes.len() && bytes[index].is_ascii_whitespace() {
        index += 1;
    }
    index
}

/// Splits `text` on every `separator` that sits outside brackets and strings.
///
/// Always returns at least one (possibly empty) piece.
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let mut state = GroupingState::default();
    let mut pieces = Vec::new();
    let mut start = 0;

    for (i, &byte) in text.as_bytes().iter().enumerate() {
        let token = state.feed(byte);
        if byte == separator && token == Token::TopLevel {
            pieces.push(&text[start..i]);
            start = i + 1;
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Index just past the `}` closing the group opened at `open`.
fn skip_group(bytes: &[u8], open: usize) -> Option<usize> {
    let mut state = GroupingState::default();
    for (offset, &byte) in bytes.get(open + 1..)?.iter().enumerate() {
        if state.feed(byte) == Token::Unmatched {
            return (byte == b'}').then_some(open + 1 + offset + 1);
        }
    }
    None
}

/// Index just past the `>` ending the tag that starts at `open`, and whether
/// the tag closes itself (`<br />`).
fn skip_tag(bytes: &[u8], open: usize) -> Option<(usize, bool)> {
    let mut quote: Option<u8> = None;
    let mut index = open + 1;
    while index < bytes.len() {
        let byte = bytes[index];
        if let Some(q) = quote {
            if byte == q {
                quote = None;
            }
            index += 1;
            continue;
        }
        match byte {
            b'\'' | b'"' => quote = Some(byte),
            b'{' => {
                index = skip_group(bytes, index)?;
                continue;
            }
            b'>' => return Some((index + 1, bytes[index - 1] == b'/')),
            _ => {}
        }
        index += 1;
    }
    None
}

/// Byte index of the `>` that closes the element or fragment opened at
/// `open`.
///
/// Tags are matched by nesting depth. Attribute strings, `{...}` expressions
/// and JSX text are stepped over, so a `>` inside any of them or code after
/// the element never ends it.
pub fn find_root_element_end(markup: &str, open: usize) -> Option<usize> {
    let bytes = markup.as_bytes();
    if bytes.get(open) != Some(&b'<') {
        return None;
    }
    let mut depth = 0usize;
    let mut index = open;
    while index < bytes.len() {
        match bytes[index] {
            b'{' if depth > 0 => index = skip_group(bytes, index)?,
            b'<' if bytes.get(index + 1) == Some(&b'/') => {
                let end = skip_tag(bytes, index)?.0;
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(end - 1);
                }
                index = end;
            }
            b'<' if matches!(bytes.get(index + 1), Some(b) if *b == b'>' || b.is_ascii_alphabetic()) => {
                let (end, self_closing) = skip_tag(bytes, index)?;
                if !self_closing {
                    depth += 1;
                } else if depth == 0 {
                    return Some(end - 1);
                }
                index = end;
            }
            _ => index += 1,
        }
    }
    None
}

/// Finds every non-overlapping inline style occurrence in `markup`, in
/// source order.
///
/// An attribute whose value is not a literal object (`style={theme.card}`),
/// or whose braces never close, is skipped and left for the caller to copy
/// through untouched.
pub fn find_style_occurrences(markup: &str, pattern: &StylePattern) -> Vec<StyleOccurrence> {
    let mut found = Vec::new();
    if pattern.attribute.is_empty() {
        return found;
    }

    let bytes = markup.as_bytes();
    let mut cursor = 0;
    while let Some(offset) = markup[cursor..].find(pattern.attribute.as_str()) {
        let start = cursor + offset;
        let after_name = start + pattern.attribute.len();

        let at_boundary = start > 0 && bytes[start - 1].is_ascii_whitespace();
        if !at_boundary {
            cursor = after_name;
            continue;
        }

        match match_occurrence(bytes, start, after_name) {
            Some(occurrence) => {
                cursor = occurrence.span.end;
                found.push(occurrence);
            }
            None => cursor = after_name,
        }
    }
    found
}

/// Matches `={{ body }}` right after an attribute name.
fn match_occurrence(bytes: &[u8], start: usize, after_name: usize) -> Option<StyleOccurrence> {
    let mut i = skip_whitespace(bytes, after_name);
    if bytes.get(i) != Some(&b'=') {
        return None;
    }
    i = skip_whitespace(bytes, i + 1);
    if bytes.get(i) != Some(&b'{') {
        return None;
    }
    i = skip_whitespace(bytes, i + 1);
    if bytes.get(i) != Some(&b'{') {
        debug!("Skipping non-literal style expression at byte {}", start);
        return None;
    }

    let body_start = i + 1;
    let mut state = GroupingState::default();
    for (offset, &byte) in bytes[body_start..].iter().enumerate() {
        if state.feed(byte) != Token::Unmatched {
            continue;
        }
        let body_end = body_start + offset;
        if byte != b'}' {
            warn!("Mismatched bracket in inline style at byte {}", start);
            return None;
        }
        let close = skip_whitespace(bytes, body_end + 1);
        if bytes.get(close) != Some(&b'}') {
            warn!("Inline style at byte {} is not a plain object literal", start);
            return None;
        }
        return Some(StyleOccurrence {
            span: start..close + 1,
            body: body_start..body_end,
        });
    }

    warn!("Unterminated inline style at byte {}", start);
    None
}
