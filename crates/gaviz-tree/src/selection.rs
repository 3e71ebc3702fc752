//! Selection tracking
//!
//! Maintains the set of display-node ids the user has toggled "active" for
//! 3D visualization and emits the scene mutation each toggle implies. The
//! tracker owns selection state exclusively; the scene registry never infers
//! it on its own.

use crate::display::DisplayNode;
use gaviz_core::decode::DecodedValue;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A scene mutation implied by a selection change
///
/// Plain data; the caller routes it to the scene registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneIntent {
    /// Add a named entity for a newly activated node
    Add {
        /// Entity name (the node's label).
        name: String,
        /// The value to draw.
        value: DecodedValue,
    },
    /// Remove the entity of a deactivated node
    Remove {
        /// Entity name.
        name: String,
    },
}

/// Result of a toggle request
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    /// Whether the node is active after the call.
    pub activated: bool,
    /// The scene mutation to apply, if any.
    pub intent: Option<SceneIntent>,
}

/// Tracks which display nodes are active in the 3D scene
///
/// Ids are kept both as a set (membership) and in activation order (list
/// UIs). A node is eligible only if its decoded value is drawable; toggling
/// an ineligible node is a no-op, not an error.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    active: HashSet<String>,
    order: Vec<String>,
}

impl SelectionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a display node in or out of the active set.
    ///
    /// Activation emits an `Add` intent named by the node's label;
    /// deactivation emits the matching `Remove`. Toggling the same node
    /// twice restores the prior state.
    pub fn toggle(&mut self, node: &DisplayNode) -> Toggle {
        if !node.value.is_drawable() {
            debug!(id = %node.id, "toggle ignored: value is not drawable");
            return Toggle {
                activated: false,
                intent: None,
            };
        }

        if self.active.remove(&node.id) {
            self.order.retain(|id| id != &node.id);
            debug!(id = %node.id, "deactivated");
            Toggle {
                activated: false,
                intent: Some(SceneIntent::Remove {
                    name: node.label.clone(),
                }),
            }
        } else {
            self.active.insert(node.id.clone());
            self.order.push(node.id.clone());
            debug!(id = %node.id, "activated");
            Toggle {
                activated: true,
                intent: Some(SceneIntent::Add {
                    name: node.label.clone(),
                    value: node.value,
                }),
            }
        }
    }

    /// Whether the given id is currently active
    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    /// Active ids in activation order
    pub fn active_ids(&self) -> &[String] {
        &self.order
    }

    /// Number of active nodes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing is active
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop an id without emitting an intent.
    ///
    /// Used when reconciling against a rebuilt tree: the caller already
    /// knows the entity is being removed.
    pub fn forget(&mut self, id: &str) -> bool {
        if self.active.remove(id) {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }

    /// Clear all selections without emitting intents
    pub fn clear(&mut self) {
        self.active.clear();
        self.order.clear();
    }
}
