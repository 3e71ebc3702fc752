//! Error handling for gaviz
//!
//! Provides error types for the layers this workspace owns:
//! - Parse errors (reported by the external expression parser)
//! - Evaluation errors (reported by the external evaluator)
//! - Tree errors (display-tree construction guards)
//!
//! All error types use `thiserror` for ergonomic error handling. Scene
//! errors live in `gaviz-scene` next to the GL code that produces them.

use thiserror::Error;

/// Expression parse error
///
/// Produced by the external parser collaborator. Only a human-readable
/// message and the offending span are carried; there are no structured
/// error codes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input could not be parsed
    #[error("Parse error at offset {offset}: {message}")]
    Syntax {
        /// Byte offset into the source text where parsing failed.
        offset: usize,
        /// The parser's description of the failure.
        message: String,
    },

    /// The input was empty or contained only whitespace
    #[error("Empty expression")]
    EmptyInput,

    /// Generic parse error
    #[error("Parse error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Expression evaluation error
///
/// Produced by the external evaluator collaborator when an annotated AST
/// cannot be computed from the given bindings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// An operator is not supported by the evaluator
    #[error("Unsupported operator: {operator}")]
    UnsupportedOperator {
        /// The display symbol of the operator.
        operator: String,
    },

    /// Division by a zero-norm value
    #[error("Division by zero in '{context}'")]
    DivisionByZero {
        /// The sub-expression text where the division occurred.
        context: String,
    },

    /// Generic evaluation error
    #[error("Evaluation error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Display-tree construction error
///
/// Tree construction itself never fails for valid collaborator output;
/// these variants exist to fail fast on malformed input rather than
/// recurse forever or panic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Recursion exceeded the depth cap, indicating a malformed (cyclic
    /// or absurdly nested) structure from a collaborator
    #[error("Expression nesting exceeds depth limit of {limit}")]
    DepthExceeded {
        /// The configured depth cap.
        limit: usize,
    },
}

/// Main error type for gaviz
///
/// A unified error type that can represent any error from the layers
/// above. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation error
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// Display-tree error
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is an evaluation error
    pub fn is_eval_error(&self) -> bool {
        matches!(self, Error::Eval(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
