//! Quickbind: destructuring pattern compilation for JavaScript engines
//!
//! Quickbind walks array and object destructuring patterns against a source
//! value and turns them into binding operations. The walk is shared by
//! every context a pattern can appear in; where the bindings land is decided
//! by a [`TargetEmitter`](destructuring::TargetEmitter), and how embedded
//! expressions are evaluated is decided by an [`Evaluator`](runtime::Evaluator).
//!
//! # Quick Start
//!
//! ```no_run
//! use quickbind::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let arena = ScopeArena::new();
//!     let global = arena.alloc(ScopeKind::Global, None);
//!     let mut interp = Interpreter::new();
//!
//!     let pattern = parse_pattern("{a, b: [c = 3], ...rest}")?;
//!     let source = interp.evaluate(&parse_expression("{a: 1, b: [], z: 26}")?)?;
//!     let mut emitter = DeclarationEmitter::new(global, BindingKind::Const);
//!     compile(&pattern, DestructuringFlavor::Declaration, source, &mut interp, &mut emitter)?;
//!
//!     println!("{:?}", global.resolve_value("rest"));
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! Source → [`lexer`] → [`parser`] → [`ast`] → [`destructuring`] → [`scope`]
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Syntax** | [`lexer`], [`parser`], [`ast`] |
//! | **Compilation** | [`destructuring`], [`config`], [`error`](Error) |
//! | **Runtime** | [`runtime`], [`scope`] |
//! | **Locale** | [`intl`] |
// Clippy configuration for Quickbind.
//
// - should_implement_trait: Keyword::from_str returns Option, not Result
// - enum_variant_names: error and token variants follow JS naming conventions
#![allow(clippy::should_implement_trait)]
#![allow(clippy::enum_variant_names)]

pub mod ast;
pub mod config;
pub mod destructuring;
pub mod error;
pub mod intl;
pub mod lexer;
pub mod parser;
pub mod prelude;
pub mod runtime;
pub mod scope;

pub use config::CompileOptions;
pub use destructuring::{compile, compile_with_options, BindingStrategy, DestructuringFlavor, TargetEmitter};
pub use error::{Error, ErrorKind, Result};
pub use runtime::{Evaluator, Interpreter, Value};
