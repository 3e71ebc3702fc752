//! # gaviz Core
//!
//! Core types and interfaces for the gaviz expression visualizer:
//! the multivector value model, value decoding (classification and
//! spanning-vector decomposition), the annotated AST data model, and the
//! collaborator interfaces for the external parser and evaluator.

pub mod ast;
pub mod decode;
pub mod error;
pub mod interop;
pub mod multivector;

pub use ast::{AstKind, AstNode, BinaryOperator, UnaryOperator, ValueKind, ValueNode};
pub use decode::{decode, DecodedValue, ValueClass};
pub use error::{Error, EvalError, ParseError, Result, TreeError};
pub use interop::{find_identifiers, Bindings, Evaluator, ExpressionParser};
pub use multivector::Multivector;
