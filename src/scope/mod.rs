//! Scope tree for the stock target emitters
//!
//! Scopes are allocated in a [`ScopeArena`] and link to their parent by
//! reference, so a scope chain is walked without any lookups by id.
//! Bindings keep declaration order.

mod emitter;

pub use emitter::{AssignmentEmitter, DeclarationEmitter};

use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use typed_arena::Arena;

use crate::runtime::Value;

/// Scope identifier, unique within one arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scope kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Global scope
    Global,
    /// Function body scope; hosts the function's `var`s
    Function,
    /// Transient scope that parameter default expressions are evaluated in
    Parameter,
    /// Block scope
    Block,
}

impl ScopeKind {
    /// Whether `var` declarations land in scopes of this kind
    pub fn is_var_scope(self) -> bool {
        matches!(self, ScopeKind::Global | ScopeKind::Function)
    }
}

/// How a binding was introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `var` binding, hoisted to the nearest var scope
    Var,
    /// `let` binding
    Let,
    /// `const` binding; assignments fail
    Const,
    /// Formal parameter
    Parameter,
}

impl BindingKind {
    /// `let` and `const` bindings cannot be redeclared in the same scope
    pub fn is_lexical(self) -> bool {
        matches!(self, BindingKind::Let | BindingKind::Const)
    }
}

/// A binding in a scope
#[derive(Debug, Clone)]
pub struct Binding {
    /// Current value
    pub value: Value,
    /// How the binding was introduced
    pub kind: BindingKind,
}

/// A scope in the scope tree
pub struct Scope<'a> {
    id: ScopeId,
    kind: ScopeKind,
    parent: Option<&'a Scope<'a>>,
    bindings: RefCell<IndexMap<String, Binding>>,
}

impl<'a> Scope<'a> {
    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&'a Scope<'a>> {
        self.parent
    }

    /// The nearest enclosing scope (or this one) hosting `var`s
    pub fn var_scope(&'a self) -> &'a Scope<'a> {
        let mut scope = self;
        while !scope.kind.is_var_scope() {
            match scope.parent {
                Some(parent) => scope = parent,
                None => break,
            }
        }
        scope
    }

    /// The outermost scope of the chain
    pub fn root(&'a self) -> &'a Scope<'a> {
        let mut scope = self;
        while let Some(parent) = scope.parent {
            scope = parent;
        }
        scope
    }

    /// The innermost scope in the chain that binds `name`
    pub fn lookup(&'a self, name: &str) -> Option<&'a Scope<'a>> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if current.contains(name) {
                return Some(current);
            }
            scope = current.parent;
        }
        None
    }

    /// Resolve `name` along the scope chain and read its value
    pub fn resolve_value(&'a self, name: &str) -> Option<Value> {
        self.lookup(name)
            .and_then(|scope| scope.get(name))
            .map(|binding| binding.value)
    }

    /// Whether this scope itself binds `name`
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// This scope's own binding for `name`
    pub fn get(&self, name: &str) -> Option<Binding> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Names bound in this scope, in declaration order
    pub fn binding_names(&self) -> Vec<String> {
        self.bindings.borrow().keys().cloned().collect()
    }

    /// Insert or replace a binding in this scope
    pub fn define(&self, name: impl Into<String>, binding: Binding) {
        self.bindings.borrow_mut().insert(name.into(), binding);
    }

    /// Overwrite the value of an existing binding; false if `name` is unbound here
    pub fn set_value(&self, name: &str, value: Value) -> bool {
        match self.bindings.borrow_mut().get_mut(name) {
            Some(binding) => {
                binding.value = value;
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("parent", &self.parent.map(|p| p.id))
            .field("bindings", &self.bindings.borrow())
            .finish()
    }
}

/// Arena owning every scope of a scope tree
pub struct ScopeArena<'a> {
    scopes: Arena<Scope<'a>>,
    next_id: Cell<u32>,
}

impl<'a> ScopeArena<'a> {
    pub fn new() -> Self {
        Self {
            scopes: Arena::new(),
            next_id: Cell::new(0),
        }
    }

    /// Allocate a new scope under `parent`
    pub fn alloc(&'a self, kind: ScopeKind, parent: Option<&'a Scope<'a>>) -> &'a Scope<'a> {
        let id = ScopeId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.scopes.alloc(Scope {
            id,
            kind,
            parent,
            bindings: RefCell::new(IndexMap::new()),
        })
    }

    /// Number of scopes allocated so far
    pub fn len(&self) -> usize {
        self.next_id.get() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ScopeArena<'_> {
    fn default() -> Self {
        Self::new()
    }
}
