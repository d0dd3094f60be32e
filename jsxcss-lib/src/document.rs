//! The input document and isolation of the markup a component returns.

use crate::parser::scanner::find_root_element_end;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Raw JSX source, read once per run.
#[derive(Debug, Clone)]
pub struct Document {
    path: Option<PathBuf>,
    source: String,
}

impl Document {
    pub fn from_source(source: impl Into<String>) -> Self {
        Document {
            path: None,
            source: source.into(),
        }
    }

    /// Reads the whole file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        Ok(Document {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The root markup element returned by the component.
    ///
    /// Looks after the first `return` keyword when there is one, otherwise
    /// through the whole text, and spans from the first `<` that opens an
    /// element or fragment to the `>` of its matching closing tag.
    pub fn component_markup(&self) -> Result<&str> {
        let region_start = find_return_keyword(&self.source).unwrap_or(0);
        let region = &self.source[region_start..];

        let open = region
            .char_indices()
            .find(|&(i, c)| c == '<' && opens_element(&region[i + 1..]))
            .map(|(i, _)| i)
            .ok_or_else(|| Error::NoExtractableMarkup("no opening tag found".to_string()))?;
        let close = find_root_element_end(region, open)
            .ok_or_else(|| Error::NoExtractableMarkup("root element is never closed".to_string()))?;

        Ok(&region[open..=close])
    }
}

fn opens_element(rest: &str) -> bool {
    match rest.chars().next() {
        Some(c) => c == '>' || c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Byte offset just past the first standalone `return`.
fn find_return_keyword(source: &str) -> Option<usize> {
    const KEYWORD: &str = "return";
    let bytes = source.as_bytes();
    let mut cursor = 0;
    while let Some(offset) = source[cursor..].find(KEYWORD) {
        let start = cursor + offset;
        let end = start + KEYWORD.len();
        let before_ok = start == 0 || !is_identifier_byte(bytes[start - 1]);
        let after_ok = bytes
            .get(end)
            .map(|&b| b.is_ascii_whitespace() || b == b'(')
            .unwrap_or(false);
        if before_ok && after_ok {
            return Some(end);
        }
        cursor = end;
    }
    None
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}
