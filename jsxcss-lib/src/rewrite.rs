//! Replaces each inline style occurrence with a reference to a generated
//! rule set.

use crate::config::CorrectionConfig;
use crate::parser::declaration::parse_style_block;
use crate::parser::scanner::{find_style_occurrences, StylePattern};
use crate::style::corrections::apply_corrections;
use crate::style::index::EquivalenceIndex;

/// Markup after rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    /// Number of occurrences replaced.
    pub occurrences: usize,
}

pub struct Rewriter<'a> {
    pattern: StylePattern,
    corrections: &'a CorrectionConfig,
}

impl<'a> Rewriter<'a> {
    pub fn new(pattern: StylePattern, corrections: &'a CorrectionConfig) -> Self {
        Rewriter {
            pattern,
            corrections,
        }
    }

    /// Parses, corrects and registers every occurrence in `markup`, in source
    /// order, and splices in the reference attributes.
    ///
    /// Markup without any occurrence comes back unchanged.
    pub fn rewrite(&self, markup: &str, index: &mut EquivalenceIndex) -> Rewritten {
        let occurrences = find_style_occurrences(markup, &self.pattern);

        let mut text = String::with_capacity(markup.len());
        let mut copied = 0;
        for occurrence in &occurrences {
            let mut declaration = parse_style_block(&markup[occurrence.body.clone()]);
            if self.corrections.enabled {
                apply_corrections(&mut declaration, self.corrections.centering_threshold);
            }
            let identifier = index.register(declaration);

            text.push_str(&markup[copied..occurrence.span.start]);
            text.push_str(&self.pattern.reference(identifier));
            copied = occurrence.span.end;
        }
        text.push_str(&markup[copied..]);

        Rewritten {
            text,
            occurrences: occurrences.len(),
        }
    }
}
