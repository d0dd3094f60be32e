//! Turns the body of one inline style object into a [`StyleDeclaration`].

use crate::parser::keys::normalize_key;
use crate::parser::scanner::split_top_level;
use crate::style::declaration::StyleDeclaration;
use log::debug;

/// Properties whose unit-less numbers mean pixels.
const PIXEL_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "top",
    "left",
    "right",
    "bottom",
    "padding",
    "padding-top",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "margin",
    "margin-top",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "gap",
    "border-radius",
    "font-size",
];

const QUOTES: &[char] = &['\'', '"'];

/// Properties holding shadow lists, copied verbatim.
const SHADOW_PROPERTIES: &[&str] = &["box-shadow", "text-shadow"];

/// Parses the text between the braces of `style={{ ... }}`.
///
/// Fragments without a colon (spreads, shorthand properties) are dropped.
/// A fragment with nothing after its colon is kept with an empty value.
pub fn parse_style_block(block: &str) -> StyleDeclaration {
    let pairs = split_top_level(block, b',').into_iter().filter_map(|fragment| {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return None;
        }
        match fragment.split_once(':') {
            Some((key, value)) => Some((key, value)),
            None => {
                debug!("Dropping style fragment without a colon: {}", fragment);
                None
            }
        }
    });
    parse_style_pairs(pairs)
}

/// Builds a declaration from already separated key/value nodes.
pub fn parse_style_pairs<'a, I>(pairs: I) -> StyleDeclaration
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut declaration = StyleDeclaration::new();
    for (raw_key, raw_value) in pairs {
        let property = normalize_key(strip_quotes(raw_key.trim()));
        let value = coerce_value(&property, strip_quotes(raw_value.trim()));
        declaration.insert(property, value);
    }
    declaration
}

/// Applies unit inference to one value of `property`.
pub fn coerce_value(property: &str, value: &str) -> String {
    if SHADOW_PROPERTIES.contains(&property) {
        return value.to_string();
    }
    if is_unitless_number(value) && PIXEL_PROPERTIES.contains(&property) {
        return format!("{}px", value);
    }
    value.to_string()
}

/// Removes one leading and one trailing quote character.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix(QUOTES).unwrap_or(raw);
    raw.strip_suffix(QUOTES).unwrap_or(raw)
}

fn is_unitless_number(value: &str) -> bool {
    value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
