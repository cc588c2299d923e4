//! Error types for the destructuring engine

use std::fmt;
use thiserror::Error;

/// Source location in JavaScript code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: u32,
    /// Column number (1-indexed)
    pub column: u32,
    /// Byte offset in source
    pub offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Format a source context with caret pointer for errors
pub fn format_error_context(source: &str, location: &SourceLocation) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let line_idx = (location.line.saturating_sub(1)) as usize;

    if line_idx >= lines.len() {
        return String::new();
    }

    let width = format!("{}", location.line).len().max(3);
    let pointer_offset = (location.column.saturating_sub(1)) as usize;

    format!(
        "{:>width$} | {}\n{:>width$} | {}^\n",
        location.line,
        lines[line_idx],
        "",
        " ".repeat(pointer_offset),
        width = width
    )
}

/// Main error type
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Lexer error - invalid token or character
    #[error("SyntaxError: {message} at {location}{}", if source_context.is_empty() { String::new() } else { format!("\n{}", source_context) })]
    LexerError {
        message: String,
        location: SourceLocation,
        source_context: String,
    },

    /// Parser error - invalid pattern syntax
    #[error("SyntaxError: {message} at {location}{}", if source_context.is_empty() { String::new() } else { format!("\n{}", source_context) })]
    ParseError {
        message: String,
        location: SourceLocation,
        source_context: String,
    },

    /// The source of an array pattern has no iteration protocol
    #[error("TypeError: {value} is not iterable")]
    NotIterable { value: String },

    /// The source of an object pattern is undefined or null
    #[error("TypeError: Cannot destructure {}'{value}' as it is {value}", property.as_ref().map(|p| format!("property '{}' of ", p)).unwrap_or_default())]
    NotCoercible {
        value: String,
        property: Option<String>,
    },

    /// A name was declared twice into the same scope
    #[error("SyntaxError: Identifier '{name}' has already been declared")]
    DuplicateBinding { name: String },

    /// Assignment to a name that resolves nowhere
    #[error("ReferenceError: {name} is not defined")]
    ReferenceNotFound { name: String },

    /// Assignment to a const binding
    #[error("TypeError: Assignment to constant variable '{name}'")]
    AssignToConst { name: String },

    /// A name that cannot denote a writable reference in an assignment pattern
    #[error("SyntaxError: Invalid destructuring assignment target '{name}'")]
    AssignmentTargetUnresolvable { name: String },

    /// Failure raised while evaluating an embedded expression
    #[error("{kind}: {message}")]
    EvaluationFailure { kind: ErrorKind, message: String },

    /// Internal engine error
    #[error("InternalError: {0}")]
    InternalError(String),

    /// Resource limit exceeded
    #[error("ResourceLimitError: {kind}: {message}")]
    ResourceLimitError {
        kind: ResourceLimitKind,
        message: String,
    },

    /// Invalid compile options
    #[error("ConfigError: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IOError: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

/// Resource limit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceLimitKind {
    /// Pattern nesting depth limit exceeded
    StackDepthLimit,
}

impl fmt::Display for ResourceLimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLimitKind::StackDepthLimit => write!(f, "StackDepthLimit"),
        }
    }
}

/// JavaScript error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorKind {
    /// TypeError - wrong type for operation
    TypeError,
    /// ReferenceError - undefined variable
    ReferenceError,
    /// RangeError - value out of range
    RangeError,
    /// SyntaxError - invalid syntax at runtime
    SyntaxError,
    /// Generic Error - user-thrown Error objects
    GenericError,
    /// InternalError - internal engine error
    InternalError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeError => write!(f, "TypeError"),
            ErrorKind::ReferenceError => write!(f, "ReferenceError"),
            ErrorKind::RangeError => write!(f, "RangeError"),
            ErrorKind::SyntaxError => write!(f, "SyntaxError"),
            ErrorKind::GenericError => write!(f, "Error"),
            ErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

impl Error {
    /// Create a new lexer error with source context
    pub fn lexer_error_with_context(
        message: impl Into<String>,
        location: SourceLocation,
        source: &str,
    ) -> Self {
        Error::LexerError {
            message: message.into(),
            source_context: format_error_context(source, &location),
            location,
        }
    }

    /// Create a new parse error with source context
    pub fn parse_error_with_context(
        message: impl Into<String>,
        location: SourceLocation,
        source: &str,
    ) -> Self {
        Error::ParseError {
            message: message.into(),
            source_context: format_error_context(source, &location),
            location,
        }
    }

    /// Create a TypeError raised by an embedded expression
    pub fn type_error(message: impl Into<String>) -> Self {
        Error::EvaluationFailure {
            kind: ErrorKind::TypeError,
            message: message.into(),
        }
    }

    /// Create a ReferenceError raised by an embedded expression
    pub fn reference_error(message: impl Into<String>) -> Self {
        Error::EvaluationFailure {
            kind: ErrorKind::ReferenceError,
            message: message.into(),
        }
    }

    /// Create a generic `Error` as thrown by user code
    pub fn thrown(message: impl Into<String>) -> Self {
        Error::EvaluationFailure {
            kind: ErrorKind::GenericError,
            message: message.into(),
        }
    }

    /// Create a stack depth limit exceeded error
    pub fn stack_depth_exceeded(depth: usize, limit: usize) -> Self {
        Error::ResourceLimitError {
            kind: ResourceLimitKind::StackDepthLimit,
            message: format!(
                "Pattern nesting depth limit exceeded: {} levels, limit was {}",
                depth, limit
            ),
        }
    }

    /// The JavaScript error class this error surfaces as
    pub fn js_kind(&self) -> ErrorKind {
        match self {
            Error::LexerError { .. }
            | Error::ParseError { .. }
            | Error::DuplicateBinding { .. }
            | Error::AssignmentTargetUnresolvable { .. } => ErrorKind::SyntaxError,
            Error::NotIterable { .. } | Error::NotCoercible { .. } | Error::AssignToConst { .. } => {
                ErrorKind::TypeError
            }
            Error::ReferenceNotFound { .. } => ErrorKind::ReferenceError,
            Error::EvaluationFailure { kind, .. } => *kind,
            Error::ResourceLimitError { .. } => ErrorKind::RangeError,
            Error::InternalError(_) | Error::ConfigError(_) | Error::IoError { .. } => {
                ErrorKind::InternalError
            }
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Standardized error message templates
pub mod messages {
    pub const IS_NOT_DEFINED: &str = "is not defined";
    pub const NOT_A_FUNCTION: &str = "is not a function";
    pub const REST_NOT_LAST: &str = "Rest element must be last element";
    pub const INVALID_REST_TARGET: &str = "`...` must be followed by an identifier in an object pattern";
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token";

    /// Format a "X is not defined" error message
    pub fn not_defined(name: &str) -> String {
        format!("{} {}", name, IS_NOT_DEFINED)
    }

    /// Format a "X is not a function" error message
    pub fn not_a_function(name: &str) -> String {
        format!("{} {}", name, NOT_A_FUNCTION)
    }

    /// Format a "Unexpected token X" error message
    pub fn unexpected_token(found: &str) -> String {
        format!("{} {}", UNEXPECTED_TOKEN, found)
    }
}
