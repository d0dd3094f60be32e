//! Static configuration for a conversion run.
//!
//! Every section falls back to its default, so a TOML file only needs the
//! keys it changes. The defaults reproduce the stock output: reset rules, a
//! flex root container, Google Fonts imports, five breakpoints and a small
//! set of custom properties.

use crate::parser::scanner::StylePattern;
use crate::style::corrections::DEFAULT_CENTERING_THRESHOLD;
use crate::style::index::DEFAULT_CLASS_PREFIX;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Ordered property table, camelCase keys as they would appear in JSX.
pub type StyleTable = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub markup: MarkupConfig,
    pub corrections: CorrectionConfig,
    pub base_styles: BaseStylesConfig,
    pub root_container: RootContainerConfig,
    pub fonts: FontsConfig,
    pub media_queries: MediaQueriesConfig,
    pub css_variables: CssVariablesConfig,
    pub transforms: TransformsConfig,
    pub animations: AnimationsConfig,
    pub output: OutputConfig,
}

/// How inline styles are found and what replaces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub style_attribute: String,
    pub reference_attribute: String,
    pub class_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    pub enabled: bool,
    /// Absolute offsets strictly above this many pixels are centered.
    pub centering_threshold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStylesConfig {
    pub enabled: bool,
    /// Selector => properties.
    pub styles: IndexMap<String, StyleTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootContainerConfig {
    pub enabled: bool,
    pub styles: StyleTable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub google_fonts: GoogleFontsConfig,
    pub local_fonts: LocalFontsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleFontsConfig {
    pub enabled: bool,
    pub weights: Vec<String>,
    pub display: String,
    /// Accepted for compatibility; nothing reads it.
    pub preload: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalFontsConfig {
    pub enabled: bool,
    pub fonts: Vec<LocalFont>,
}

/// One `@font-face` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalFont {
    pub family: String,
    pub src: String,
    pub weight: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaQueriesConfig {
    pub enabled: bool,
    /// Breakpoint name => min-width.
    pub breakpoints: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssVariablesConfig {
    pub enabled: bool,
    pub prefix: String,
    pub colors: IndexMap<String, String>,
    pub spacing: IndexMap<String, String>,
}

/// Accepted and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformsConfig {
    pub enabled: bool,
    pub support_3d: bool,
    pub support_perspective: bool,
}

/// Accepted and ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationsConfig {
    pub enabled: bool,
    pub default_duration: String,
    pub default_timing: String,
}

/// Names of the generated files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub stylesheet: String,
    pub component: String,
    pub app: String,
    pub component_name: String,
    pub minify: bool,
}

fn table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            style_attribute: "style".to_string(),
            reference_attribute: "className".to_string(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            centering_threshold: DEFAULT_CENTERING_THRESHOLD,
        }
    }
}

impl Default for BaseStylesConfig {
    fn default() -> Self {
        let mut styles = IndexMap::new();
        styles.insert(
            "*".to_string(),
            table(&[
                ("margin", "0"),
                ("padding", "0"),
                ("boxSizing", "border-box"),
                ("WebkitFontSmoothing", "antialiased"),
                ("MozOsxFontSmoothing", "grayscale"),
                ("textRendering", "optimizeLegibility"),
            ]),
        );
        styles.insert(
            "html, body, #root".to_string(),
            table(&[
                ("width", "100%"),
                ("height", "100%"),
                ("margin", "0"),
                ("padding", "0"),
                ("position", "relative"),
                ("lineHeight", "1.5"),
                (
                    "fontFamily",
                    "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif",
                ),
            ]),
        );
        Self {
            enabled: true,
            styles,
        }
    }
}

impl Default for RootContainerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            styles: table(&[
                ("minHeight", "100vh"),
                ("position", "relative"),
                ("display", "flex"),
                ("flexDirection", "column"),
            ]),
        }
    }
}

impl Default for GoogleFontsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weights: vec!["400".to_string(), "500".to_string(), "600".to_string()],
            display: "swap".to_string(),
            preload: true,
        }
    }
}

impl Default for MediaQueriesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            breakpoints: table(&[
                ("sm", "640px"),
                ("md", "768px"),
                ("lg", "1024px"),
                ("xl", "1280px"),
                ("2xl", "1536px"),
            ]),
        }
    }
}

impl Default for CssVariablesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: "--app".to_string(),
            colors: table(&[("primary", "#000000"), ("secondary", "#ffffff")]),
            spacing: table(&[("base", "4px"), ("container", "1200px")]),
        }
    }
}

impl Default for TransformsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            support_3d: true,
            support_perspective: true,
        }
    }
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_duration: "300ms".to_string(),
            default_timing: "ease-in-out".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stylesheet: "styles.css".to_string(),
            component: "ConvertedComponent.jsx".to_string(),
            app: "App.js".to_string(),
            component_name: "ConvertedComponent".to_string(),
            minify: false,
        }
    }
}

impl MarkupConfig {
    pub fn pattern(&self) -> StylePattern {
        StylePattern::new(&self.style_attribute, &self.reference_attribute)
    }
}

impl Config {
    /// Checks the values that would otherwise produce broken output.
    pub fn validate(&self) -> Result<()> {
        if self.markup.style_attribute.trim().is_empty() {
            return Err(Error::Config("style_attribute must not be empty".to_string()));
        }
        if self.markup.reference_attribute.trim().is_empty() {
            return Err(Error::Config(
                "reference_attribute must not be empty".to_string(),
            ));
        }
        let prefix = &self.markup.class_prefix;
        let valid_start = prefix
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        if !valid_start || !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(Error::Config(format!(
                "class_prefix must be a CSS identifier, got {:?}",
                prefix
            )));
        }
        if self.css_variables.enabled && !self.css_variables.prefix.starts_with("--") {
            return Err(Error::Config(format!(
                "css_variables.prefix must start with \"--\", got {:?}",
                self.css_variables.prefix
            )));
        }
        if let Some((name, _)) = self
            .media_queries
            .breakpoints
            .iter()
            .find(|(_, width)| width.trim().is_empty())
        {
            return Err(Error::Config(format!("breakpoint {} has no width", name)));
        }

        let names = [
            &self.output.stylesheet,
            &self.output.component,
            &self.output.app,
        ];
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(Error::Config("output file names must not be empty".to_string()));
        }
        let distinct: HashSet<&String> = names.iter().copied().collect();
        if distinct.len() != names.len() {
            return Err(Error::Config("output file names must be distinct".to_string()));
        }
        if self.output.component_name.trim().is_empty() {
            return Err(Error::Config("component_name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Loads `path` when given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Serializes the configuration, including every default, as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}
