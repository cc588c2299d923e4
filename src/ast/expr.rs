//! Expression AST node types
//!
//! Only the expressions that matter to destructuring are modeled: default
//! values and computed keys are opaque to the compiler and handed to an
//! [`Evaluator`](crate::runtime::Evaluator).

use super::*;

/// A JavaScript expression
#[derive(Debug, Clone)]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),

    /// Literal value
    Literal(Literal),

    /// Array literal [1, 2, 3]
    Array(ArrayExpression),

    /// Object literal {a: 1, b: 2}
    Object(ObjectExpression),

    /// Call expression func(args)
    Call(Box<CallExpression>),
}

impl Expression {
    /// Get the span of this expression
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(id) => id.span,
            Expression::Literal(lit) => lit.span,
            Expression::Array(a) => a.span,
            Expression::Object(o) => o.span,
            Expression::Call(c) => c.span,
        }
    }

    /// Build a literal expression without a source position
    pub fn literal(value: LiteralValue) -> Self {
        Expression::Literal(Literal {
            value,
            span: Span::default(),
        })
    }

    /// Build a zero-argument call of a named function
    pub fn call(callee: impl Into<String>) -> Self {
        Expression::Call(Box::new(CallExpression {
            callee: Identifier::synthetic(callee),
            arguments: Vec::new(),
            span: Span::default(),
        }))
    }

    /// Build an identifier reference
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::synthetic(name))
    }
}

/// A literal value
#[derive(Debug, Clone)]
pub struct Literal {
    /// The literal value
    pub value: LiteralValue,
    /// Span in source
    pub span: Span,
}

/// Literal value types
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// null
    Null,
    /// true or false
    Boolean(bool),
    /// Number
    Number(f64),
    /// String
    String(String),
}

/// Array expression
#[derive(Debug, Clone)]
pub struct ArrayExpression {
    /// Array elements
    pub elements: Vec<Expression>,
    /// Span in source
    pub span: Span,
}

/// Object expression
#[derive(Debug, Clone)]
pub struct ObjectExpression {
    /// Object properties in source order
    pub properties: Vec<(PropertyKey, Expression)>,
    /// Span in source
    pub span: Span,
}

/// Call expression
#[derive(Debug, Clone)]
pub struct CallExpression {
    /// Callee name
    pub callee: Identifier,
    /// Arguments
    pub arguments: Vec<Expression>,
    /// Span in source
    pub span: Span,
}
