use crate::style::declaration::StyleDeclaration;
use log::debug;
use std::collections::HashMap;

/// Default prefix of generated rule-set identifiers.
pub const DEFAULT_CLASS_PREFIX: &str = "style_";

/// A generated class name and the declaration it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub identifier: String,
    pub declaration: StyleDeclaration,
}

/// Append-only registry of distinct declarations for one conversion run.
///
/// No two rule sets hold equal declarations. Identifiers are handed out
/// sequentially (`style_0`, `style_1`, ...) and never change once issued.
#[derive(Debug, Clone)]
pub struct EquivalenceIndex {
    prefix: String,
    rule_sets: Vec<RuleSet>,
    /// Content hash => positions in `rule_sets`. Only narrows the scan; the
    /// final decision is always a full comparison.
    by_hash: HashMap<u64, Vec<usize>>,
}

impl Default for EquivalenceIndex {
    fn default() -> Self {
        EquivalenceIndex::with_prefix(DEFAULT_CLASS_PREFIX)
    }
}

impl EquivalenceIndex {
    pub fn new() -> Self {
        EquivalenceIndex::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        EquivalenceIndex {
            prefix: prefix.into(),
            rule_sets: Vec::new(),
            by_hash: HashMap::new(),
        }
    }

    /// Identifier that the `slot`-th distinct declaration receives.
    pub fn identifier_for(&self, slot: usize) -> String {
        format!("{}{}", self.prefix, slot)
    }

    /// Returns the identifier of an equal, earlier declaration, or registers
    /// `declaration` under the next identifier.
    pub fn register(&mut self, declaration: StyleDeclaration) -> &str {
        let hash = declaration.content_hash();
        let existing = self.by_hash.get(&hash).and_then(|slots| {
            slots
                .iter()
                .copied()
                .find(|&slot| self.rule_sets[slot].declaration == declaration)
        });

        let slot = match existing {
            Some(slot) => slot,
            None => {
                let slot = self.rule_sets.len();
                let identifier = self.identifier_for(slot);
                debug!(
                    "Registered {} with {} properties",
                    identifier,
                    declaration.len()
                );
                self.rule_sets.push(RuleSet {
                    identifier,
                    declaration,
                });
                self.by_hash.entry(hash).or_default().push(slot);
                slot
            }
        };
        &self.rule_sets[slot].identifier
    }

    /// All rule sets in registration order.
    pub fn all(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    pub fn len(&self) -> usize {
        self.rule_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_sets.is_empty()
    }
}
