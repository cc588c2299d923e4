//! Runtime environment for destructuring
//!
//! This module provides the value model, the iteration protocol, and the
//! [`Evaluator`] contract through which the compiler reaches the engine.
//! [`Interpreter`] is a stock evaluator for the expression subset found in
//! patterns.

mod evaluator;
mod interpreter;
mod iter;
mod value;

pub use evaluator::{Evaluator, PropertySource};
pub use interpreter::Interpreter;
pub use iter::{ArrayIterator, SourceIterator, StringIterator, VecIterator};
pub use value::{
    array_index, number_to_string, IterableFactory, NativeFn, Object, ObjectKind, ObjectRef,
    Property, Value,
};
