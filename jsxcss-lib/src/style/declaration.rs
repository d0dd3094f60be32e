use indexmap::IndexMap;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A canonical property => value mapping parsed from one inline style.
///
/// Entries keep their source order so output is deterministic, but two
/// declarations compare equal whenever they hold the same pairs in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    entries: IndexMap<String, String>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        StyleDeclaration {
            entries: IndexMap::new(),
        }
    }

    /// Sets `property`. A property already present keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(property.into(), value.into())
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hash of the entries that ignores their order, consistent with `==`.
    pub fn content_hash(&self) -> u64 {
        let mut pairs: Vec<(&String, &String)> = self.entries.iter().collect();
        pairs.sort_unstable();
        let mut hasher = DefaultHasher::new();
        pairs.hash(&mut hasher);
        hasher.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDeclaration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declaration = StyleDeclaration::new();
        for (k, v) in iter {
            declaration.insert(k, v);
        }
        declaration
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (property, value) in self.iter() {
            writeln!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order() {
        let a: StyleDeclaration = [("width", "10px"), ("color", "red")].into_iter().collect();
        let b: StyleDeclaration = [("color", "red"), ("width", "10px")].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn test_different_values_differ() {
        let a: StyleDeclaration = [("width", "10px")].into_iter().collect();
        let b: StyleDeclaration = [("width", "11px")].into_iter().collect();
        let c: StyleDeclaration = [("width", "10px"), ("height", "1px")].into_iter().collect();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut decl: StyleDeclaration = [("left", "288px"), ("top", "0")].into_iter().collect();
        decl.insert("left", "50%");
        let keys: Vec<&str> = decl.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["left", "top"]);
        assert_eq!(decl.get("left"), Some("50%"));
        assert_eq!(decl.to_string(), "left: 50%;\ntop: 0;\n");
    }
}
