//! The seam between the destructuring walk and a binding back end

use super::flavor::BindingStrategy;
use crate::ast::Identifier;
use crate::error::Result;
use crate::runtime::Value;

/// Materializes the bindings produced by a destructuring compilation
///
/// The compiler only ever calls `declare` for declaring strategies and
/// only `assign` for [`BindingStrategy::AssignToExistingReference`]. An
/// error returned from either call aborts the compilation.
pub trait TargetEmitter {
    /// Introduce `name` bound to `value` in the scope selected by `strategy`
    fn declare(&mut self, name: &Identifier, strategy: BindingStrategy, value: Value) -> Result<()>;

    /// Write `value` through the existing reference `name` resolves to
    fn assign(&mut self, name: &Identifier, value: Value) -> Result<()>;
}
