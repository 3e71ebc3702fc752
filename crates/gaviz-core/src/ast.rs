//! Expression AST data model
//!
//! Two mirror trees cross the collaborator boundary: the plain syntax tree
//! the parser produces ([`AstNode`]) and the annotated tree the evaluator
//! returns ([`ValueNode`]), which carries a computed [`Multivector`] at every
//! node. Both are trees by construction — operands are exclusively owned via
//! `Box`, there is no sharing and no cycles.
//!
//! Every node records its source span as byte offsets `[start, end]`
//! (inclusive) into the original expression text, so the UI can show the
//! literal notation the user typed.

use crate::multivector::Multivector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators the expression language supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Geometric product
    Mul,
    /// Inner (dot) product
    Dot,
    /// Outer (wedge) product
    Wedge,
    /// Division (geometric product with the inverse)
    Div,
}

impl BinaryOperator {
    /// The display symbol, as it appears in source notation
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Dot => ".",
            BinaryOperator::Wedge => "^",
            BinaryOperator::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Unary plus (identity)
    Pos,
    /// Negation
    Neg,
}

impl UnaryOperator {
    /// The display symbol, as it appears in source notation
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Pos => "+",
            UnaryOperator::Neg => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One node of the parsed (unannotated) expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    /// Byte offset of the first source character this node spans.
    pub start: usize,
    /// Byte offset of the last source character this node spans (inclusive).
    pub end: usize,
    /// The node's syntactic kind and owned operands.
    #[serde(rename = "type")]
    pub kind: AstKind,
}

/// Syntactic kind of an [`AstNode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstKind {
    /// A binary operation over two exclusively owned operands
    BinaryOp {
        /// The operator.
        op: BinaryOperator,
        /// Left operand.
        left: Box<AstNode>,
        /// Right operand.
        right: Box<AstNode>,
    },
    /// A unary operation over one exclusively owned operand
    UnaryOp {
        /// The operator.
        op: UnaryOperator,
        /// The operand.
        operand: Box<AstNode>,
    },
    /// A named identifier (resolved from the binding map at evaluation)
    Identifier {
        /// The identifier name.
        name: String,
    },
    /// A numeric literal
    Literal {
        /// The literal value.
        value: f64,
    },
}

impl AstNode {
    /// Total number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        match &self.kind {
            AstKind::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            AstKind::UnaryOp { operand, .. } => 1 + operand.node_count(),
            AstKind::Identifier { .. } | AstKind::Literal { .. } => 1,
        }
    }
}

/// One node of the annotated expression tree
///
/// Mirrors [`AstNode`] exactly, with the evaluator's computed value
/// attached. Recreated wholesale on every evaluation pass; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueNode {
    /// Byte offset of the first source character this node spans.
    pub start: usize,
    /// Byte offset of the last source character this node spans (inclusive).
    pub end: usize,
    /// The computed algebraic value at this node.
    pub value: Multivector,
    /// The node's kind and owned, annotated operands.
    #[serde(rename = "type")]
    pub kind: ValueKind,
}

/// Syntactic kind of a [`ValueNode`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueKind {
    /// A binary operation
    BinaryOp {
        /// The operator.
        op: BinaryOperator,
        /// Left annotated operand.
        left: Box<ValueNode>,
        /// Right annotated operand.
        right: Box<ValueNode>,
    },
    /// A unary operation
    UnaryOp {
        /// The operator.
        op: UnaryOperator,
        /// The annotated operand.
        operand: Box<ValueNode>,
    },
    /// A named identifier
    Identifier {
        /// The identifier name.
        name: String,
    },
    /// A numeric literal
    Literal {
        /// The literal value.
        value: f64,
    },
}

impl ValueNode {
    /// Total number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ValueKind::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            ValueKind::UnaryOp { operand, .. } => 1 + operand.node_count(),
            ValueKind::Identifier { .. } | ValueKind::Literal { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: usize, end: usize) -> AstNode {
        AstNode {
            start,
            end,
            kind: AstKind::Identifier {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_node_count() {
        // a + b
        let ast = AstNode {
            start: 0,
            end: 4,
            kind: AstKind::BinaryOp {
                op: BinaryOperator::Add,
                left: Box::new(ident("a", 0, 0)),
                right: Box::new(ident("b", 4, 4)),
            },
        };
        assert_eq!(ast.node_count(), 3);
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(BinaryOperator::Wedge.symbol(), "^");
        assert_eq!(BinaryOperator::Add.to_string(), "+");
        assert_eq!(UnaryOperator::Neg.symbol(), "-");
    }

    #[test]
    fn test_ast_serde_round_trip() {
        let ast = AstNode {
            start: 0,
            end: 4,
            kind: AstKind::BinaryOp {
                op: BinaryOperator::Add,
                left: Box::new(ident("a", 0, 0)),
                right: Box::new(ident("b", 4, 4)),
            },
        };
        let json = serde_json::to_string(&ast).unwrap();
        let back: AstNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ast);
    }
}
