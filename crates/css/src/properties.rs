//! Property allow-list
//!
//! The set of property names whose values are eligible for color rewriting,
//! and which survive pruning.

use rustc_hash::FxHashSet;

/// Properties recognized by default
pub const DEFAULT_PROPERTIES: [&str; 9] = [
    "color",
    "background-color",
    "border-color",
    "outline-color",
    "box-shadow",
    "text-shadow",
    "column-rule-color",
    "caret-color",
    "fill",
];

/// Case-sensitive set of property names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAllowList {
    names: FxHashSet<String>,
}

impl PropertyAllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a property name, ignoring surrounding whitespace
    pub fn contains(&self, property: &str) -> bool {
        self.names.contains(property.trim())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names ordered longest first, then alphabetically.
    ///
    /// Used to build regex alternations where a longer name must win over a
    /// shorter one sharing a prefix.
    pub fn names_longest_first(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names
    }
}

impl Default for PropertyAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTIES)
    }
}
