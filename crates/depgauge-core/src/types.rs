//! Common value types shared by the graph and the registry.
//!
//! This module contains small types embedded in several node kinds,
//! avoiding circular dependencies between `graph` and `registry`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Source Location
// ============================================================================

/// Location of a declaration in a source file.
///
/// - `file`: path as reported by the parser
/// - `line`: 1-indexed line number
/// - `col`: 1-indexed column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// File path.
    pub file: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub col: u32,
}

impl SourceLocation {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        SourceLocation {
            file: file.into(),
            line,
            col,
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Declaration modifier.
///
/// Only the modifiers the metrics need are modelled; visibility and the like
/// belong to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Abstract class or method.
    Abstract,
    /// Final class, method or property.
    Final,
    /// Static member.
    Static,
}

/// Set of modifiers on a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    modifiers: Vec<Modifier>,
}

impl Modifiers {
    /// Create an empty modifier set.
    pub fn new() -> Self {
        Modifiers::default()
    }

    /// Builder: add a modifier.
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    /// Add a modifier (no duplicates).
    pub fn insert(&mut self, modifier: Modifier) {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
    }

    /// Check if a specific modifier is present.
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Shorthand for `has(Modifier::Abstract)`.
    pub fn is_abstract(&self) -> bool {
        self.has(Modifier::Abstract)
    }

    /// Shorthand for `has(Modifier::Final)`.
    pub fn is_final(&self) -> bool {
        self.has(Modifier::Final)
    }

    /// Iterate the modifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Modifiers::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}
