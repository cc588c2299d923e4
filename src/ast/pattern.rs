//! Pattern AST node types for destructuring

use rustc_hash::FxHashSet as HashSet;

use super::*;

/// A destructuring pattern
///
/// Element and property order is fixed at construction and defines the
/// observable evaluation order during compilation.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Array destructuring pattern [a, b, c]
    Array(ArrayPattern),

    /// Object destructuring pattern {a, b, c}
    Object(ObjectPattern),
}

impl Pattern {
    /// Get the span of this pattern
    pub fn span(&self) -> Span {
        match self {
            Pattern::Array(a) => a.span,
            Pattern::Object(o) => o.span,
        }
    }

    /// The rest target, if any
    pub fn rest(&self) -> Option<&Target> {
        match self {
            Pattern::Array(a) => a.rest.as_deref(),
            Pattern::Object(o) => o.rest.as_deref(),
        }
    }

    /// Whether the pattern ends in a rest target
    pub fn has_rest(&self) -> bool {
        self.rest().is_some()
    }

    /// Get all bound identifiers in this pattern, left to right
    pub fn bound_names(&self) -> Vec<&Identifier> {
        let mut names = Vec::new();
        self.collect_bound_names(&mut names);
        names
    }

    /// The first name bound more than once, if any
    ///
    /// The model never deduplicates; declaration contexts use this to
    /// reject patterns such as `[a, a]` before compiling them.
    pub fn first_duplicate_name(&self) -> Option<&Identifier> {
        let mut seen = HashSet::default();
        self.bound_names()
            .into_iter()
            .find(|id| !seen.insert(id.name.as_str()))
    }

    fn collect_bound_names<'a>(&'a self, names: &mut Vec<&'a Identifier>) {
        match self {
            Pattern::Array(arr) => {
                for elem in &arr.elements {
                    if let ArrayElement::Binding(binding) = elem {
                        binding.target.collect_bound_names(names);
                    }
                }
                if let Some(rest) = &arr.rest {
                    rest.collect_bound_names(names);
                }
            }
            Pattern::Object(obj) => {
                for prop in &obj.properties {
                    prop.target.collect_bound_names(names);
                }
                if let Some(rest) = &obj.rest {
                    rest.collect_bound_names(names);
                }
            }
        }
    }
}

/// What a pattern slot binds to
#[derive(Debug, Clone)]
pub enum Target {
    /// A single identifier
    Name(Identifier),
    /// A nested sub-pattern
    Pattern(Box<Pattern>),
}

impl Target {
    /// Create a name target
    pub fn name(name: impl Into<String>) -> Self {
        Target::Name(Identifier::synthetic(name))
    }

    /// Get the span of this target
    pub fn span(&self) -> Span {
        match self {
            Target::Name(id) => id.span,
            Target::Pattern(p) => p.span(),
        }
    }

    fn collect_bound_names<'a>(&'a self, names: &mut Vec<&'a Identifier>) {
        match self {
            Target::Name(id) => names.push(id),
            Target::Pattern(p) => p.collect_bound_names(names),
        }
    }
}

impl From<Pattern> for Target {
    fn from(pattern: Pattern) -> Self {
        Target::Pattern(Box::new(pattern))
    }
}

/// Array destructuring pattern
#[derive(Debug, Clone)]
pub struct ArrayPattern {
    /// Pattern elements in order
    pub elements: Vec<ArrayElement>,
    /// Rest element, always last
    pub rest: Option<Box<Target>>,
    /// Span in source
    pub span: Span,
}

impl ArrayPattern {
    /// Create an array pattern without a rest element
    pub fn new(elements: Vec<ArrayElement>) -> Self {
        Self {
            elements,
            rest: None,
            span: Span::default(),
        }
    }

    /// Set the rest element
    pub fn with_rest(mut self, rest: Target) -> Self {
        self.rest = Some(Box::new(rest));
        self
    }
}

/// A slot in an array pattern
#[derive(Debug, Clone)]
pub enum ArrayElement {
    /// Elided slot `[, b]`: consumes one iteration step, binds nothing
    Hole(Span),
    /// Binding slot, possibly with a default
    Binding(BindingElement),
}

impl ArrayElement {
    /// Whether this slot is elided
    pub fn is_hole(&self) -> bool {
        matches!(self, ArrayElement::Hole(_))
    }

    /// A hole without a source position
    pub fn hole() -> Self {
        ArrayElement::Hole(Span::default())
    }

    /// A binding slot without a default
    pub fn target(target: Target) -> Self {
        ArrayElement::Binding(BindingElement {
            target,
            default: None,
            span: Span::default(),
        })
    }

    /// A binding slot with a default value
    pub fn with_default(target: Target, default: Expression) -> Self {
        ArrayElement::Binding(BindingElement {
            target,
            default: Some(default),
            span: Span::default(),
        })
    }
}

/// Binding slot of an array pattern
#[derive(Debug, Clone)]
pub struct BindingElement {
    /// What the slot binds
    pub target: Target,
    /// Default used when the slot receives undefined
    pub default: Option<Expression>,
    /// Span in source
    pub span: Span,
}

/// Object destructuring pattern
#[derive(Debug, Clone)]
pub struct ObjectPattern {
    /// Property bindings in order
    pub properties: Vec<PropertyBinding>,
    /// Rest property, always last
    pub rest: Option<Box<Target>>,
    /// Span in source
    pub span: Span,
}

impl ObjectPattern {
    /// Create an object pattern without a rest property
    pub fn new(properties: Vec<PropertyBinding>) -> Self {
        Self {
            properties,
            rest: None,
            span: Span::default(),
        }
    }

    /// Set the rest property
    pub fn with_rest(mut self, rest: Target) -> Self {
        self.rest = Some(Box::new(rest));
        self
    }
}

/// A property binding {key: target = default}
#[derive(Debug, Clone)]
pub struct PropertyBinding {
    /// Property key
    pub key: PropertyKey,
    /// What the property value binds
    pub target: Target,
    /// Default used when the property value is undefined
    pub default: Option<Expression>,
    /// Is this a shorthand property {a}?
    pub shorthand: bool,
    /// Span in source
    pub span: Span,
}

impl PropertyBinding {
    /// Shorthand property `{name}` binding a same-named identifier
    pub fn shorthand(name: impl Into<String>) -> Self {
        let id = Identifier::synthetic(name);
        Self {
            key: PropertyKey::Identifier(id.clone()),
            target: Target::Name(id),
            default: None,
            shorthand: true,
            span: Span::default(),
        }
    }

    /// Property `{key: target}`
    pub fn new(key: PropertyKey, target: Target) -> Self {
        Self {
            key,
            target,
            default: None,
            shorthand: false,
            span: Span::default(),
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: Expression) -> Self {
        self.default = Some(default);
        self
    }
}
