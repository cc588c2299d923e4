//! Destructuring flavors and the scope strategy each one selects

use std::fmt;

/// The syntactic context a pattern is compiled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestructuringFlavor {
    /// `let`/`const`/`var` declarations, catch parameters, for-in/of heads
    Declaration,

    /// A destructured formal parameter whose bindings live in the
    /// function's var scope rather than the per-parameter scope that
    /// sibling default expressions are evaluated in
    FormalParameterInVarScope,

    /// Destructuring assignment; every name must already resolve
    Assignment,
}

/// How the targets of a pattern reach their bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingStrategy {
    /// Declare each name in the innermost declarative scope
    DeclareInNearestDeclarativeScope,
    /// Declare each name in the scope hosting the function body's `var`s
    DeclareInEnclosingVarScope,
    /// Write each name through an existing mutable reference
    AssignToExistingReference,
}

impl BindingStrategy {
    /// Whether targets are introduced with `declare`
    pub fn declares(self) -> bool {
        !matches!(self, BindingStrategy::AssignToExistingReference)
    }
}

/// Map a flavor to the strategy used for its targets
pub fn binding_strategy_for(flavor: DestructuringFlavor) -> BindingStrategy {
    match flavor {
        DestructuringFlavor::Declaration => BindingStrategy::DeclareInNearestDeclarativeScope,
        DestructuringFlavor::FormalParameterInVarScope => BindingStrategy::DeclareInEnclosingVarScope,
        DestructuringFlavor::Assignment => BindingStrategy::AssignToExistingReference,
    }
}

impl From<DestructuringFlavor> for BindingStrategy {
    fn from(flavor: DestructuringFlavor) -> Self {
        binding_strategy_for(flavor)
    }
}

impl fmt::Display for DestructuringFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestructuringFlavor::Declaration => write!(f, "declaration"),
            DestructuringFlavor::FormalParameterInVarScope => write!(f, "formal parameter"),
            DestructuringFlavor::Assignment => write!(f, "assignment"),
        }
    }
}
