//! Serializes registered rule sets, plus the configured preamble, into
//! stylesheet text.
//!
//! Section order is fixed: font imports, custom properties, breakpoint
//! rules, base reset rules, the root-container rule, then one rule per
//! rule set in registration order.

use crate::config::{Config, CssVariablesConfig, FontsConfig, MediaQueriesConfig, StyleTable};
use crate::parser::keys::normalize_key;
use crate::parser::scanner::split_top_level;
use crate::style::index::RuleSet;
use regex::Regex;
use std::sync::OnceLock;

const GOOGLE_FONTS_URL: &str = "https://fonts.googleapis.com/css2";

/// Family names that are never fetched from a font service.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
    "-apple-system",
    "BlinkMacSystemFont",
    "inherit",
    "initial",
    "unset",
];

pub fn emit_stylesheet(
    rule_sets: &[RuleSet],
    fonts: &[String],
    config: &Config,
    root_identifier: &str,
) -> String {
    let mut css = String::new();
    css.push_str(&font_imports(fonts, &config.fonts));
    css.push_str(&custom_properties(&config.css_variables));
    css.push_str(&breakpoint_rules(&config.media_queries));

    if config.base_styles.enabled {
        for (selector, table) in &config.base_styles.styles {
            write_table_rule(&mut css, selector, table);
        }
    }

    if config.root_container.enabled {
        let selector = format!(".{}", root_identifier);
        write_table_rule(&mut css, &selector, &config.root_container.styles);
    }

    for rule_set in rule_sets {
        let selector = format!(".{}", rule_set.identifier);
        write_rule(&mut css, &selector, rule_set.declaration.iter());
    }
    css
}

/// `fontFamily: '...'` (or a quoted `font-family` key) with a string literal
/// value, in any object literal of the markup.
fn font_family_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"['"]?\b(?:fontFamily|font-family)['"]?\s*:\s*(?:'([^']*)'|"([^"]*)"|`([^`$]*)`)"#)
            .expect("font-family pattern is valid")
    })
}

/// Primary font family named anywhere in `markup`, first-seen order, no
/// duplicates.
///
/// Reads the markup text itself, so families inside style blocks the
/// rewriter leaves untouched still get an import.
pub fn collect_font_families(markup: &str) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();
    for captures in font_family_pattern().captures_iter(markup) {
        let Some(value) = captures.get(1).or_else(|| captures.get(2)).or_else(|| captures.get(3)) else {
            continue;
        };
        let Some(first) = split_top_level(value.as_str(), b',').into_iter().next() else {
            continue;
        };
        let family = first.trim().trim_matches(|c: char| c == '\'' || c == '"').trim();
        if family.is_empty() || GENERIC_FAMILIES.contains(&family) {
            continue;
        }
        if !families.iter().any(|known| known == family) {
            families.push(family.to_string());
        }
    }
    families
}

fn font_imports(fonts: &[String], config: &FontsConfig) -> String {
    let mut css = String::new();

    let google = &config.google_fonts;
    if google.enabled && !fonts.is_empty() {
        let families: Vec<String> = fonts
            .iter()
            .map(|font| {
                let name = font.split_whitespace().collect::<Vec<_>>().join("+");
                if google.weights.is_empty() {
                    format!("family={}", name)
                } else {
                    format!("family={}:wght@{}", name, google.weights.join(";"))
                }
            })
            .collect();
        css.push_str(&format!(
            "@import url('{}?{}&display={}');\n\n",
            GOOGLE_FONTS_URL,
            families.join("&"),
            google.display
        ));
    }

    if config.local_fonts.enabled {
        for font in &config.local_fonts.fonts {
            css.push_str("@font-face {\n");
            css.push_str(&format!("  font-family: '{}';\n", font.family));
            css.push_str(&format!("  src: {};\n", font.src));
            css.push_str(&format!("  font-weight: {};\n", font.weight));
            css.push_str(&format!(
                "  font-style: {};\n",
                font.style.as_deref().unwrap_or("normal")
            ));
            css.push_str(&format!(
                "  font-display: {};\n",
                font.display.as_deref().unwrap_or("swap")
            ));
            css.push_str("}\n\n");
        }
    }
    css
}

fn custom_properties(config: &CssVariablesConfig) -> String {
    if !config.enabled {
        return String::new();
    }
    let mut css = String::from(":root {\n");
    for (name, value) in &config.colors {
        css.push_str(&format!("  {}-color-{}: {};\n", config.prefix, name, value));
    }
    for (name, value) in &config.spacing {
        css.push_str(&format!("  {}-spacing-{}: {};\n", config.prefix, name, value));
    }
    css.push_str("}\n\n");
    css
}

fn breakpoint_rules(config: &MediaQueriesConfig) -> String {
    if !config.enabled {
        return String::new();
    }
    let mut css = String::new();
    for width in config.breakpoints.values() {
        css.push_str(&format!("@media (min-width: {}) {{\n", width));
        css.push_str("  .container {\n");
        css.push_str(&format!("    max-width: {};\n", width));
        css.push_str("  }\n");
        css.push_str("}\n\n");
    }
    css
}

fn write_table_rule(css: &mut String, selector: &str, table: &StyleTable) {
    let entries: Vec<(String, &str)> = table
        .iter()
        .map(|(k, v)| (normalize_key(k), v.as_str()))
        .collect();
    write_rule(css, selector, entries.iter().map(|(k, v)| (k.as_str(), *v)));
}

fn write_rule<'a>(css: &mut String, selector: &str, entries: impl Iterator<Item = (&'a str, &'a str)>) {
    css.push_str(&format!("{} {{\n", selector));
    for (property, value) in entries {
        css.push_str(&format!("  {}: {};\n", property, value));
    }
    css.push_str("}\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocalFont;
    use crate::style::declaration::StyleDeclaration;
    use pretty_assertions::assert_eq;

    fn rule_set(identifier: &str, pairs: &[(&str, &str)]) -> RuleSet {
        RuleSet {
            identifier: identifier.to_string(),
            declaration: pairs.iter().copied().collect::<StyleDeclaration>(),
        }
    }

    fn bare_config() -> Config {
        let mut config = Config::default();
        config.fonts.google_fonts.enabled = false;
        config.css_variables.enabled = false;
        config.media_queries.enabled = false;
        config.base_styles.enabled = false;
        config.root_container.enabled = false;
        config
    }

    #[test]
    fn test_rule_sets_only() {
        let sets = vec![
            rule_set("style_0", &[("width", "10px"), ("color", "red")]),
            rule_set("style_1", &[]),
        ];
        let css = emit_stylesheet(&sets, &[], &bare_config(), "style_0");
        assert_eq!(
            css,
            ".style_0 {\n  width: 10px;\n  color: red;\n}\n\n.style_1 {\n}\n\n"
        );
    }

    #[test]
    fn test_empty_index_with_bare_config() {
        assert_eq!(emit_stylesheet(&[], &[], &bare_config(), "style_0"), "");
    }

    #[test]
    fn test_root_container_rule() {
        let mut config = bare_config();
        config.root_container.enabled = true;
        let css = emit_stylesheet(&[rule_set("style_0", &[("gap", "1px")])], &[], &config, "style_0");
        assert_eq!(
            css,
            ".style_0 {\n  min-height: 100vh;\n  position: relative;\n  display: flex;\n  flex-direction: column;\n}\n\n.style_0 {\n  gap: 1px;\n}\n\n"
        );
    }

    #[test]
    fn test_section_order() {
        let sets = vec![rule_set("style_0", &[("font-family", "Poppins")])];
        let fonts = collect_font_families("<p style={{ fontFamily: 'Poppins' }}>x</p>");
        let css = emit_stylesheet(&sets, &fonts, &Config::default(), "style_0");

        let positions: Vec<usize> = [
            "@import url(",
            ":root {",
            "@media (min-width: 640px)",
            "* {",
            "html, body, #root {",
            ".style_0 {\n  min-height",
            ".style_0 {\n  font-family: Poppins;",
        ]
        .iter()
        .map(|needle| css.find(needle).unwrap())
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
        assert!(css.contains("  -webkit-font-smoothing: antialiased;\n"));
        assert!(css.contains("  --app-spacing-container: 1200px;\n"));
        assert!(css.contains("@media (min-width: 1536px) {\n  .container {\n    max-width: 1536px;\n  }\n}\n\n"));
    }

    #[test]
    fn test_google_fonts_import() {
        let fonts = vec!["Poppins".to_string(), "Open Sans".to_string()];
        let css = font_imports(&fonts, &FontsConfig::default());
        assert_eq!(
            css,
            "@import url('https://fonts.googleapis.com/css2?family=Poppins:wght@400;500;600&family=Open+Sans:wght@400;500;600&display=swap');\n\n"
        );
        assert_eq!(font_imports(&[], &FontsConfig::default()), "");
    }

    #[test]
    fn test_local_fonts() {
        let mut config = FontsConfig::default();
        config.google_fonts.enabled = false;
        config.local_fonts.enabled = true;
        config.local_fonts.fonts.push(LocalFont {
            family: "Brand".to_string(),
            src: "url('/fonts/brand.woff2') format('woff2')".to_string(),
            weight: "400".to_string(),
            style: None,
            display: Some("block".to_string()),
        });
        assert_eq!(
            font_imports(&[], &config),
            "@font-face {\n  font-family: 'Brand';\n  src: url('/fonts/brand.woff2') format('woff2');\n  font-weight: 400;\n  font-style: normal;\n  font-display: block;\n}\n\n"
        );
    }

    #[test]
    fn test_collect_font_families() {
        let markup = r#"<div style={{ fontFamily: 'Poppins' }}>
  <p style={{ fontFamily: '"Segoe UI", Roboto, sans-serif' }}>a</p>
  <p style={{ 'font-family': "Poppins, serif" }}>b</p>
  <p style={{ fontFamily: 'system-ui', color: 'red' }}>c</p>
  <p style={{ fontFamily: theme.font }}>d</p>
</div>"#;
        assert_eq!(collect_font_families(markup), vec!["Poppins", "Segoe UI"]);
    }

    #[test]
    fn test_fonts_found_outside_rewritten_blocks() {
        // The first block never closes, so it is not rewritten.
        let markup = "<div style={{ ...base, fontFamily: 'Inter' }>
  <p style={{ fontFamily: 'Lora' }}>x</p>
</div>";
        assert_eq!(collect_font_families(markup), vec!["Inter", "Lora"]);
        let css = font_imports(&collect_font_families(markup), &FontsConfig::default());
        assert!(css.contains("family=Inter:wght@"));
    }
}
