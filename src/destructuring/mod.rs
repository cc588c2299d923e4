//! Destructuring compilation
//!
//! This module turns a [`Pattern`](crate::ast::Pattern) plus a source value
//! into a sequence of binding operations. The same walk serves declarations,
//! destructured formal parameters, and destructuring assignment; the
//! [`DestructuringFlavor`] only selects the [`BindingStrategy`] passed to the
//! [`TargetEmitter`], which owns all scope mutation.
//!
//! ```no_run
//! use quickbind::destructuring::{compile, DestructuringFlavor};
//! use quickbind::parser::{parse_expression, parse_pattern};
//! use quickbind::runtime::{Evaluator, Interpreter};
//! use quickbind::scope::{BindingKind, DeclarationEmitter, ScopeArena, ScopeKind};
//!
//! fn main() -> quickbind::Result<()> {
//!     let arena = ScopeArena::new();
//!     let global = arena.alloc(ScopeKind::Global, None);
//!     let mut interp = Interpreter::new();
//!
//!     let pattern = parse_pattern("[a, , b = 2, ...rest]")?;
//!     let source = interp.evaluate(&parse_expression("[1, 0, undefined, 4, 5]")?)?;
//!     let mut emitter = DeclarationEmitter::new(global, BindingKind::Let);
//!     compile(&pattern, DestructuringFlavor::Declaration, source, &mut interp, &mut emitter)?;
//!     Ok(())
//! }
//! ```

mod compiler;
mod emitter;
mod flavor;
mod guard;

pub use compiler::{compile, compile_with_options};
pub use emitter::TargetEmitter;
pub use flavor::{binding_strategy_for, BindingStrategy, DestructuringFlavor};
pub use guard::IteratorGuard;
