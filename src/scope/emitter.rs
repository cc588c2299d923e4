//! Target emitters backed by the scope tree

use rustc_hash::FxHashSet as HashSet;
use tracing::{debug, trace};

use super::{Binding, BindingKind, Scope, ScopeId};
use crate::ast::Identifier;
use crate::destructuring::{BindingStrategy, TargetEmitter};
use crate::error::{Error, Result};
use crate::runtime::Value;

/// Declares pattern targets into the scope tree
///
/// Create one per compilation: a name declared twice into the same scope
/// by the same emitter is a duplicate binding.
pub struct DeclarationEmitter<'a> {
    scope: &'a Scope<'a>,
    kind: BindingKind,
    declared: HashSet<(ScopeId, String)>,
}

impl<'a> DeclarationEmitter<'a> {
    /// Declare `kind` bindings relative to `scope`
    pub fn new(scope: &'a Scope<'a>, kind: BindingKind) -> Self {
        Self {
            scope,
            kind,
            declared: HashSet::default(),
        }
    }

    /// The scope a declaration under `strategy` lands in
    pub fn target_scope(&self, strategy: BindingStrategy) -> Result<&'a Scope<'a>> {
        match strategy {
            BindingStrategy::DeclareInNearestDeclarativeScope if self.kind == BindingKind::Var => {
                Ok(self.scope.var_scope())
            }
            BindingStrategy::DeclareInNearestDeclarativeScope => Ok(self.scope),
            BindingStrategy::DeclareInEnclosingVarScope => Ok(self.scope.var_scope()),
            BindingStrategy::AssignToExistingReference => Err(Error::InternalError(
                "declaration emitter cannot assign to existing references".to_string(),
            )),
        }
    }
}

impl TargetEmitter for DeclarationEmitter<'_> {
    fn declare(&mut self, name: &Identifier, strategy: BindingStrategy, value: Value) -> Result<()> {
        let scope = self.target_scope(strategy)?;
        let duplicate = || Error::DuplicateBinding {
            name: name.name.clone(),
        };

        if !self.declared.insert((scope.id(), name.name.clone())) {
            return Err(duplicate());
        }

        match scope.get(&name.name) {
            Some(existing) if existing.kind.is_lexical() || self.kind.is_lexical() => Err(duplicate()),
            Some(_) => {
                trace!(name = %name.name, scope = %scope.id(), "redeclare");
                scope.set_value(&name.name, value);
                Ok(())
            }
            None => {
                trace!(name = %name.name, scope = %scope.id(), kind = ?self.kind, "declare");
                scope.define(name.name.clone(), Binding { value, kind: self.kind });
                Ok(())
            }
        }
    }

    fn assign(&mut self, name: &Identifier, _value: Value) -> Result<()> {
        Err(Error::InternalError(format!(
            "cannot assign '{}' through a declaration emitter",
            name.name
        )))
    }
}

/// Writes pattern targets through existing references
pub struct AssignmentEmitter<'a> {
    scope: &'a Scope<'a>,
    strict: bool,
}

impl<'a> AssignmentEmitter<'a> {
    /// Resolve names starting at `scope`
    ///
    /// In strict mode an unresolvable name is a `ReferenceNotFound` error;
    /// otherwise it becomes a `var` on the root scope.
    pub fn new(scope: &'a Scope<'a>, strict: bool) -> Self {
        Self { scope, strict }
    }
}

impl TargetEmitter for AssignmentEmitter<'_> {
    fn declare(&mut self, name: &Identifier, _strategy: BindingStrategy, _value: Value) -> Result<()> {
        Err(Error::InternalError(format!(
            "cannot declare '{}' through an assignment emitter",
            name.name
        )))
    }

    fn assign(&mut self, name: &Identifier, value: Value) -> Result<()> {
        let Some(scope) = self.scope.lookup(&name.name) else {
            if self.strict {
                return Err(Error::ReferenceNotFound {
                    name: name.name.clone(),
                });
            }
            debug!(name = %name.name, "creating implicit global");
            self.scope.root().define(
                name.name.clone(),
                Binding {
                    value,
                    kind: BindingKind::Var,
                },
            );
            return Ok(());
        };

        if scope.get(&name.name).is_some_and(|b| b.kind == BindingKind::Const) {
            return Err(Error::AssignToConst {
                name: name.name.clone(),
            });
        }
        trace!(name = %name.name, scope = %scope.id(), "assign");
        scope.set_value(&name.name, value);
        Ok(())
    }
}
