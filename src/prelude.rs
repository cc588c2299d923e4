//! Prelude module for convenient imports
//!
//! This module provides the most commonly used types and traits for
//! compiling destructuring patterns. Import everything from this module for
//! quick access:
//!
//! ```no_run
//! use quickbind::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let pattern = parse_pattern("[a, , b]")?;
//!     assert_eq!(pattern.bound_names().len(), 2);
//!     Ok(())
//! }
//! ```

// Pattern model and parsing
pub use crate::ast::{ArrayElement, ArrayPattern, Expression, Identifier, ObjectPattern, Pattern, PropertyBinding, PropertyKey, Target};
pub use crate::parser::{parse_expression, parse_pattern};

// Compilation
pub use crate::config::CompileOptions;
pub use crate::destructuring::{
    binding_strategy_for, compile, compile_with_options, BindingStrategy, DestructuringFlavor, TargetEmitter,
};

// Runtime
pub use crate::runtime::{Evaluator, Interpreter, ObjectKind, ObjectRef, PropertySource, SourceIterator, Value};

// Scopes
pub use crate::scope::{AssignmentEmitter, BindingKind, DeclarationEmitter, Scope, ScopeArena, ScopeKind};

// Error handling
pub use crate::error::{Error, ErrorKind, Result, SourceLocation};
