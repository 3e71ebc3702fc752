//! Display-tree adapter
//!
//! Walks the annotated AST and produces one [`DisplayNode`] per AST node.
//! The display tree is rebuilt wholesale on every evaluation pass (every
//! keystroke) and never mutated in place, so node identity cannot come from
//! object identity or tree position. Instead each node's `id` is a
//! structural hash built bottom-up from the node's kind and the ids of its
//! operands — re-parsing an identical sub-expression at a different text
//! offset yields the same id, and selection state keyed on ids survives
//! edits elsewhere in the expression.

use gaviz_core::ast::{ValueKind, ValueNode};
use gaviz_core::decode::{decode, DecodedValue};
use gaviz_core::{BinaryOperator, UnaryOperator};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Depth cap for tree construction.
///
/// The AST is a tree by construction of the parser, so this only trips on a
/// malformed collaborator; hitting it degrades to an error sentinel instead
/// of overflowing the stack.
pub const MAX_TREE_DEPTH: usize = 256;

/// Kind of a display node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DisplayKind {
    /// A binary operation
    BinaryOp {
        /// The operator.
        op: BinaryOperator,
    },
    /// A unary operation
    UnaryOp {
        /// The operator.
        op: UnaryOperator,
    },
    /// An identifier leaf
    Identifier,
    /// A literal leaf
    Literal,
    /// Sentinel for a parse/evaluation failure or a malformed tree
    Error {
        /// Human-readable error text from the collaborator.
        message: String,
    },
}

/// UI-facing projection of one annotated AST node
///
/// Read-only and recreated per evaluation pass. `label` is the exact source
/// substring the node spans, so the user sees their own notation, not a
/// re-synthesized form. Children are ordered left before right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayNode {
    /// Stable structural identifier (see module docs).
    pub id: String,
    /// The exact source text this node spans.
    pub label: String,
    /// The node's kind.
    pub kind: DisplayKind,
    /// The node's decoded algebraic value.
    pub value: DecodedValue,
    /// Child display nodes, operand order preserved.
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    /// Total number of nodes in this subtree (including self)
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DisplayNode::node_count).sum::<usize>()
    }

    /// Depth-first search for a node by id
    pub fn find(&self, id: &str) -> Option<&DisplayNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// True for the error sentinel
    pub fn is_error(&self) -> bool {
        matches!(self.kind, DisplayKind::Error { .. })
    }
}

/// Build the display tree for an annotated AST.
///
/// Returns `None` only for a missing AST (unparsable input with no error
/// payload). Construction itself always succeeds: a malformed tree degrades
/// to an error sentinel rather than panicking.
pub fn build_tree(ast: Option<&ValueNode>, source: &str) -> Option<DisplayNode> {
    let node = ast?;
    Some(match convert(node, source, 0) {
        Ok(display) => display,
        Err(message) => {
            warn!(message, "display tree construction degraded to sentinel");
            error_node(&message)
        }
    })
}

/// Build the display tree from a collaborator result.
///
/// An error payload becomes a sentinel display node carrying the message,
/// so the UI always has a tree to show.
pub fn build_tree_result(
    result: Result<&ValueNode, &str>,
    source: &str,
) -> Option<DisplayNode> {
    match result {
        Ok(node) => build_tree(Some(node), source),
        Err(message) => Some(error_node(message)),
    }
}

/// The sentinel display node for a parse/evaluation failure
pub fn error_node(message: &str) -> DisplayNode {
    DisplayNode {
        id: "error".to_string(),
        label: message.to_string(),
        kind: DisplayKind::Error {
            message: message.to_string(),
        },
        value: DecodedValue::Other,
        children: Vec::new(),
    }
}

fn convert(node: &ValueNode, source: &str, depth: usize) -> Result<DisplayNode, String> {
    if depth >= MAX_TREE_DEPTH {
        return Err(format!(
            "expression nesting exceeds depth limit of {}",
            MAX_TREE_DEPTH
        ));
    }

    let label = span_label(source, node.start, node.end);
    let value = decode(&node.value);

    match &node.kind {
        ValueKind::BinaryOp { op, left, right } => {
            let left = convert(left, source, depth + 1)?;
            let right = convert(right, source, depth + 1)?;
            let id = format!("bin:{}({},{})", op.symbol(), left.id, right.id);
            Ok(DisplayNode {
                id,
                label,
                kind: DisplayKind::BinaryOp { op: *op },
                value,
                children: vec![left, right],
            })
        }
        ValueKind::UnaryOp { op, operand } => {
            let operand = convert(operand, source, depth + 1)?;
            let id = format!("un:{}({})", op.symbol(), operand.id);
            Ok(DisplayNode {
                id,
                label,
                kind: DisplayKind::UnaryOp { op: *op },
                value,
                children: vec![operand],
            })
        }
        ValueKind::Identifier { name } => Ok(DisplayNode {
            id: format!("id:{}", name),
            label,
            kind: DisplayKind::Identifier,
            value,
            children: Vec::new(),
        }),
        ValueKind::Literal { value: literal } => Ok(DisplayNode {
            id: format!("lit:{}", literal),
            label,
            kind: DisplayKind::Literal,
            value,
            children: Vec::new(),
        }),
    }
}

/// The exact source substring over the inclusive `[start, end]` span.
///
/// Collaborator offsets are trusted but not blindly: out-of-range or
/// non-boundary spans fall back to the widest valid slice rather than
/// panicking mid-keystroke.
fn span_label(source: &str, start: usize, end: usize) -> String {
    if source.is_empty() || start > end {
        return String::new();
    }
    let end_exclusive = end.saturating_add(1).min(source.len());
    let start = start.min(end_exclusive);
    match source.get(start..end_exclusive) {
        Some(slice) => slice.to_string(),
        // span does not land on char boundaries; widen to the nearest ones
        None => {
            let mut lo = start;
            while lo > 0 && !source.is_char_boundary(lo) {
                lo -= 1;
            }
            let mut hi = end_exclusive;
            while hi < source.len() && !source.is_char_boundary(hi) {
                hi += 1;
            }
            source[lo..hi].to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaviz_core::{BinaryOperator, Multivector};

    fn ident(name: &str, start: usize, end: usize, value: Multivector) -> ValueNode {
        ValueNode {
            start,
            end,
            value,
            kind: ValueKind::Identifier {
                name: name.to_string(),
            },
        }
    }

    fn sum(source: &str) -> ValueNode {
        // "a + b" with a=(1,0,0), b=(0,1,0)
        assert_eq!(source, "a + b");
        ValueNode {
            start: 0,
            end: 4,
            value: Multivector::vector(1.0, 1.0, 0.0),
            kind: ValueKind::BinaryOp {
                op: BinaryOperator::Add,
                left: Box::new(ident("a", 0, 0, Multivector::vector(1.0, 0.0, 0.0))),
                right: Box::new(ident("b", 4, 4, Multivector::vector(0.0, 1.0, 0.0))),
            },
        }
    }

    #[test]
    fn test_build_tree_matches_ast_shape() {
        let source = "a + b";
        let ast = sum(source);
        let tree = build_tree(Some(&ast), source).unwrap();

        assert_eq!(tree.node_count(), ast.node_count());
        assert_eq!(tree.label, "a + b");
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.children[0].label, "a");
        assert_eq!(tree.children[1].label, "b");
    }

    #[test]
    fn test_ids_are_structural_not_positional() {
        let source = "a + b";
        let tree = build_tree(Some(&sum(source)), source).unwrap();
        assert_eq!(tree.id, "bin:+(id:a,id:b)");

        // same identifier at a different offset gets the same id
        let shifted = ident("a", 10, 10, Multivector::zero());
        let shifted_tree = build_tree(Some(&shifted), "0 + 2 * 3 +a").unwrap();
        assert_eq!(shifted_tree.id, tree.children[0].id);
    }

    #[test]
    fn test_identical_subexpressions_share_ids() {
        // (a + a): both leaves must carry the same id within one tree
        let source = "a + a";
        let ast = ValueNode {
            start: 0,
            end: 4,
            value: Multivector::vector(2.0, 0.0, 0.0),
            kind: ValueKind::BinaryOp {
                op: BinaryOperator::Add,
                left: Box::new(ident("a", 0, 0, Multivector::vector(1.0, 0.0, 0.0))),
                right: Box::new(ident("a", 4, 4, Multivector::vector(1.0, 0.0, 0.0))),
            },
        };
        let tree = build_tree(Some(&ast), source).unwrap();
        assert_eq!(tree.children[0].id, tree.children[1].id);
    }

    #[test]
    fn test_none_ast_yields_no_tree() {
        assert!(build_tree(None, "").is_none());
    }

    #[test]
    fn test_error_payload_becomes_sentinel() {
        let tree = build_tree_result(Err("unexpected token '}'"), "}").unwrap();
        assert!(tree.is_error());
        assert_eq!(tree.label, "unexpected token '}'");
        assert!(tree.children.is_empty());
        assert_eq!(tree.value, DecodedValue::Other);
    }

    #[test]
    fn test_depth_cap_degrades_to_sentinel() {
        // a pathological chain deeper than the cap
        let mut node = ident("x", 0, 0, Multivector::zero());
        for _ in 0..(MAX_TREE_DEPTH + 4) {
            node = ValueNode {
                start: 0,
                end: 1,
                value: Multivector::zero(),
                kind: ValueKind::UnaryOp {
                    op: UnaryOperator::Neg,
                    operand: Box::new(node),
                },
            };
        }
        let tree = build_tree(Some(&node), "-x").unwrap();
        assert!(tree.is_error());
    }

    #[test]
    fn test_span_label_survives_bad_offsets() {
        assert_eq!(span_label("a + b", 0, 400), "a + b");
        assert_eq!(span_label("", 3, 9), "");
        assert_eq!(span_label("αβ", 1, 1), "α"); // mid-char span widens
    }
}
