//! # gaviz Display Tree
//!
//! Turns the evaluator's annotated AST into the interactive tree the UI
//! shows, and tracks which tree nodes the user has toggled into the 3D
//! scene. Display nodes carry stable, structurally derived identifiers so
//! selections survive incidental re-parses as the user types.

pub mod display;
pub mod selection;

pub use display::{build_tree, build_tree_result, error_node, DisplayKind, DisplayNode};
pub use selection::{SceneIntent, SelectionTracker, Toggle};
