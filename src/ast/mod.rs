//! Abstract Syntax Tree (AST) types
//!
//! This module defines the node types for destructuring patterns and the
//! small expression subset that can appear inside them (default values and
//! computed property keys). Node shapes follow ESTree where it makes sense.

mod expr;
mod pattern;

pub use expr::*;
pub use pattern::*;

use crate::error::SourceLocation;

/// A span in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start location
    pub start: SourceLocation,
    /// End location
    pub end: SourceLocation,
}

impl Span {
    /// Create a new span
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }
}

/// A JavaScript identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
    /// Span in source
    pub span: Span,
}

impl Identifier {
    /// Create a new identifier
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Create an identifier without a source position
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self::new(name, Span::default())
    }
}

/// Property key in object patterns and object literals
#[derive(Debug, Clone)]
pub enum PropertyKey {
    /// Identifier key
    Identifier(Identifier),
    /// String literal key
    String(String),
    /// Number literal key
    Number(f64),
    /// Computed key [expr]
    Computed(Box<Expression>),
}

impl PropertyKey {
    /// Whether the key is an expression evaluated at destructuring time
    pub fn is_computed(&self) -> bool {
        matches!(self, PropertyKey::Computed(_))
    }

    /// The property name of a non-computed key
    pub fn static_name(&self) -> Option<String> {
        match self {
            PropertyKey::Identifier(id) => Some(id.name.clone()),
            PropertyKey::String(s) => Some(s.clone()),
            PropertyKey::Number(n) => Some(crate::runtime::number_to_string(*n)),
            PropertyKey::Computed(_) => None,
        }
    }
}
