//! Collaborator interfaces
//!
//! The parser and the algebraic evaluator are external collaborators; this
//! module defines the seams they plug into plus the one AST query the
//! embedding layer needs upstream of evaluation (identifier discovery, used
//! to seed bindings for free variables).

use crate::ast::{AstKind, AstNode, ValueNode};
use crate::error::{EvalError, ParseError};
use crate::multivector::Multivector;
use std::collections::HashMap;

/// Variable bindings for evaluation: identifier name → algebraic value
pub type Bindings = HashMap<String, Multivector>;

/// The expression parser seam
///
/// Consumes the raw source text and produces a syntax tree with per-node
/// source spans. Grammar and notation are entirely the implementation's
/// concern.
pub trait ExpressionParser {
    /// Parse `text` into an AST
    fn parse(&self, text: &str) -> Result<AstNode, ParseError>;
}

/// The algebraic evaluator seam
///
/// Given an AST and a binding for every free identifier, returns the same
/// tree annotated with a computed value at every node. Implementations may
/// tolerate missing bindings (treating them as zero) or report them as an
/// [`EvalError`]; the display layer degrades zero values to undrawable
/// either way.
pub trait Evaluator {
    /// Evaluate `ast` under `bindings` into an annotated tree
    fn evaluate(&self, ast: &AstNode, bindings: &Bindings) -> Result<ValueNode, EvalError>;
}

/// Collect every identifier occurrence in the AST, depth-first.
///
/// Duplicates are preserved; callers that need the distinct set de-duplicate
/// themselves (matching how bindings are seeded upstream).
pub fn find_identifiers(ast: &AstNode) -> Vec<String> {
    let mut identifiers = Vec::new();
    collect_identifiers(ast, &mut identifiers);
    identifiers
}

fn collect_identifiers(ast: &AstNode, identifiers: &mut Vec<String>) {
    match &ast.kind {
        AstKind::Identifier { name } => identifiers.push(name.clone()),
        AstKind::BinaryOp { left, right, .. } => {
            collect_identifiers(left, identifiers);
            collect_identifiers(right, identifiers);
        }
        AstKind::UnaryOp { operand, .. } => {
            collect_identifiers(operand, identifiers);
        }
        AstKind::Literal { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOperator;

    fn ident(name: &str) -> AstNode {
        AstNode {
            start: 0,
            end: 0,
            kind: AstKind::Identifier {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_find_identifiers_depth_first_with_duplicates() {
        // (a + b) + a
        let ast = AstNode {
            start: 0,
            end: 10,
            kind: AstKind::BinaryOp {
                op: BinaryOperator::Add,
                left: Box::new(AstNode {
                    start: 0,
                    end: 6,
                    kind: AstKind::BinaryOp {
                        op: BinaryOperator::Add,
                        left: Box::new(ident("a")),
                        right: Box::new(ident("b")),
                    },
                }),
                right: Box::new(ident("a")),
            },
        };
        assert_eq!(find_identifiers(&ast), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_find_identifiers_ignores_literals() {
        let ast = AstNode {
            start: 0,
            end: 0,
            kind: AstKind::Literal { value: 3.0 },
        };
        assert!(find_identifiers(&ast).is_empty());
    }
}
