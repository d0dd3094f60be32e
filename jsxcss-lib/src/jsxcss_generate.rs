use crate::config::{Config, OutputConfig};
use crate::document::Document;
use crate::rewrite::Rewriter;
use crate::style::emit::{collect_font_families, emit_stylesheet};
use crate::style::index::EquivalenceIndex;
use crate::style::owned_css;
use crate::writer::{self, Artifact};
use crate::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

pub mod jsx_to_css {
    use super::*;

    /// Everything one run produces, rendered but not yet written.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Conversion {
        pub stylesheet: String,
        pub component: String,
        pub app: String,
        /// Inline style occurrences replaced in the markup.
        pub occurrences: usize,
        /// Distinct rule sets generated for them.
        pub rule_sets: usize,
    }

    impl Conversion {
        /// The three files, named as configured.
        pub fn artifacts(&self, output: &OutputConfig) -> Vec<Artifact> {
            vec![
                Artifact::new(&output.stylesheet, &self.stylesheet),
                Artifact::new(&output.component, &self.component),
                Artifact::new(&output.app, &self.app),
            ]
        }
    }

    /// Runs the full transform over `document` with a fresh index.
    pub fn generate(document: &Document, config: &Config) -> Result<Conversion> {
        let markup = document.component_markup()?;
        if let Some(path) = document.path() {
            debug!("Converting {} ({} bytes of markup)", path.display(), markup.len());
        }

        let mut index = EquivalenceIndex::with_prefix(&config.markup.class_prefix);
        let rewriter = Rewriter::new(config.markup.pattern(), &config.corrections);
        let rewritten = rewriter.rewrite(markup, &mut index);

        let fonts = collect_font_families(markup);
        let root_identifier = index.identifier_for(0);
        let mut stylesheet = emit_stylesheet(index.all(), &fonts, config, &root_identifier);

        if config.output.minify {
            stylesheet = owned_css::minify(&stylesheet)?;
        } else {
            match owned_css::read_back(&stylesheet) {
                Ok(sheet) => debug!("Stylesheet reads back as {} style rules", sheet.rules.len()),
                Err(e) => warn!("Generated stylesheet does not parse cleanly: {}", e),
            }
        }

        info!(
            "Replaced {} inline styles with {} classes",
            rewritten.occurrences,
            index.len()
        );

        Ok(Conversion {
            stylesheet,
            component: render_component(&rewritten.text, &config.output),
            app: render_app(&config.output),
            occurrences: rewritten.occurrences,
            rule_sets: index.len(),
        })
    }
}

/// Loads `input`, converts it and writes the three files into `out_dir`.
///
/// Nothing is written unless every step before the write succeeded.
pub fn run(input: &Path, out_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let document = Document::load(input)?;
    let conversion = jsx_to_css::generate(&document, config)?;
    writer::write_all(out_dir, &conversion.artifacts(&config.output))
}

fn render_component(markup: &str, output: &OutputConfig) -> String {
    format!(
        "import React from 'react';\nimport './{}';\n\nexport default function {}() {{\n  return (\n{}\n  );\n}}\n",
        output.stylesheet,
        output.component_name,
        markup.trim()
    )
}

fn render_app(output: &OutputConfig) -> String {
    let module = Path::new(&output.component)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(output.component_name.as_str());
    format!(
        "import React from 'react';\nimport {name} from './{module}';\n\nexport default function App() {{\n  return <{name} />;\n}}\n",
        name = output.component_name,
        module = module
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CARD: &str = r#"export default function Card() {
  return (
    <div style={{ width: 403, background: 'white' }}>
      <span style={{ background: 'white', width: 403 }}>Count</span>
    </div>
  );
}
"#;

    #[test]
    fn test_generate_card() {
        let conversion =
            jsx_to_css::generate(&Document::from_source(CARD), &Config::default()).unwrap();
        assert_eq!(conversion.occurrences, 2);
        assert_eq!(conversion.rule_sets, 1);
        assert_eq!(
            conversion.component,
            r#"import React from 'react';
import './styles.css';

export default function ConvertedComponent() {
  return (
<div className="style_0">
      <span className="style_0">Count</span>
    </div>
  );
}
"#
        );
        assert!(conversion
            .stylesheet
            .ends_with(".style_0 {\n  width: 403px;\n  background: white;\n}\n\n"));
    }

    #[test]
    fn test_app_wrapper() {
        let mut output = OutputConfig::default();
        assert_eq!(
            render_app(&output),
            "import React from 'react';\nimport ConvertedComponent from './ConvertedComponent';\n\nexport default function App() {\n  return <ConvertedComponent />;\n}\n"
        );
        output.component = "Landing.tsx".to_string();
        output.component_name = "Landing".to_string();
        assert!(render_app(&output).contains("import Landing from './Landing';"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let doc = Document::from_source(CARD);
        let config = Config::default();
        let first = jsx_to_css::generate(&doc, &config).unwrap();
        let second = jsx_to_css::generate(&doc, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_minified() {
        let mut config = Config::default();
        config.output.minify = true;
        let conversion = jsx_to_css::generate(&Document::from_source(CARD), &config).unwrap();
        assert!(!conversion.stylesheet.contains("\n  "));
        assert!(conversion.stylesheet.contains(".style_0"));
    }

    #[test]
    fn test_artifact_names() {
        let conversion =
            jsx_to_css::generate(&Document::from_source(CARD), &Config::default()).unwrap();
        let names: Vec<String> = conversion
            .artifacts(&OutputConfig::default())
            .into_iter()
            .map(|a| a.file_name)
            .collect();
        assert_eq!(names, vec!["styles.css", "ConvertedComponent.jsx", "App.js"]);
    }
}
