//! Reads an emitted stylesheet back through LightningCSS.
//!
//! The read-back proves the generated text is a structurally valid
//! stylesheet and gives tests an owned view of what a browser would see.
//! Minification goes through the same parser.

use crate::{Error, Result};
use lightningcss::printer::PrinterOptions;
use lightningcss::rules::{style::StyleRule, CssRule};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet as LightningStyleSheet};
use lightningcss::traits::ToCss;
use std::fmt;

/// A fully-owned view of a parsed stylesheet.
#[derive(Debug, Default)]
pub struct OwnedStylesheet {
    /// Number of `@import` rules.
    pub imports: usize,
    /// Number of `@font-face` rules.
    pub font_faces: usize,
    /// Style rules in source order. Rules nested in `@media` are flattened in.
    pub rules: Vec<OwnedRule>,
}

#[derive(Debug, Clone)]
pub struct OwnedRule {
    /// e.g. ".style_0", "html", "#root"
    pub selectors: Vec<String>,
    pub declarations: Vec<OwnedDeclaration>,
}

#[derive(Debug, Clone)]
pub struct OwnedDeclaration {
    pub property: String,
    pub value: String,
    /// Declared with `!important`.
    pub important: bool,
}

impl OwnedStylesheet {
    /// All rules listing `selector`, in source order.
    pub fn rules_for<'a>(&'a self, selector: &'a str) -> impl Iterator<Item = &'a OwnedRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.selectors.iter().any(|s| s == selector))
    }
}

impl OwnedRule {
    pub fn value(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value.as_str())
    }
}

fn stylesheet_error<E: fmt::Display>(err: E) -> Error {
    Error::Stylesheet(err.to_string())
}

/// Parse a raw CSS string (LightningCSS) and convert it to a fully-owned stylesheet.
pub fn read_back(css_text: &str) -> Result<OwnedStylesheet> {
    let sheet = LightningStyleSheet::parse(css_text, ParserOptions::default())
        .map_err(stylesheet_error)?;

    let mut owned = OwnedStylesheet::default();
    for rule in &sheet.rules.0 {
        match rule {
            CssRule::Style(style_rule) => owned.rules.push(convert_style_rule(style_rule)),
            CssRule::Media(media_rule) => {
                for inner_rule in &media_rule.rules.0 {
                    if let CssRule::Style(sr) = inner_rule {
                        owned.rules.push(convert_style_rule(sr));
                    }
                }
            }
            CssRule::Import(_) => owned.imports += 1,
            CssRule::FontFace(_) => owned.font_faces += 1,
            _ => {}
        }
    }
    Ok(owned)
}

/// Parses, minifies and reprints `css_text`.
pub fn minify(css_text: &str) -> Result<String> {
    let mut sheet = LightningStyleSheet::parse(css_text, ParserOptions::default())
        .map_err(stylesheet_error)?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(stylesheet_error)?;
    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(stylesheet_error)?;
    Ok(printed.code)
}

/// Copies a single StyleRule's selectors + declarations into an OwnedRule.
fn convert_style_rule(style_rule: &StyleRule<'_>) -> OwnedRule {
    let selectors = style_rule
        .selectors
        .0
        .iter()
        .filter_map(|selector| selector.to_css_string(PrinterOptions::default()).ok())
        .collect();

    let block = &style_rule.declarations;
    let normal = block.declarations.iter().map(|p| (p, false));
    let important = block.important_declarations.iter().map(|p| (p, true));

    let declarations = normal
        .chain(important)
        .filter_map(|(property, important)| {
            let value = property
                .value_to_css_string(PrinterOptions::default())
                .ok()?;
            Some(OwnedDeclaration {
                property: property.property_id().name().to_string(),
                value,
                important,
            })
        })
        .collect();

    OwnedRule {
        selectors,
        declarations,
    }
}
