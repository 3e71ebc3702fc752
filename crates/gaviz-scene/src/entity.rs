//! Scene entities
//!
//! A scene entity is one named, exclusively owned group of drawable
//! primitives plus the raw target direction(s) that produced them. The name
//! is the external identity the user manipulates; renaming is delete +
//! recreate by design.

use crate::primitives::RenderableMesh;
use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Handle for one GPU-resident (or uploadable) mesh.
///
/// Allocated by the registry; unique for the registry's lifetime so stale
/// removals can never alias a live buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u64);

/// A 2D-overlay text label anchored at a world position.
///
/// Labels carry no GPU resources; the embedding UI projects and draws them
/// each frame, mirroring the split between the GL scene and the label
/// overlay in the original environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    /// The text to show.
    pub text: String,
    /// World-space anchor.
    pub position: Vec3,
    /// Render in the small/secondary style.
    pub small: bool,
}

impl TextLabel {
    /// A primary label at `position`
    pub fn new(text: impl Into<String>, position: Vec3) -> Self {
        Self {
            text: text.into(),
            position,
            small: false,
        }
    }

    /// A small secondary label
    pub fn small(text: impl Into<String>, position: Vec3) -> Self {
        Self {
            text: text.into(),
            position,
            small: true,
        }
    }
}

/// One primitive of an entity: a mesh plus its GPU handle
#[derive(Debug, Clone)]
pub struct ScenePrimitive {
    /// The registry-assigned mesh handle.
    pub id: MeshId,
    /// CPU-side mesh data (kept for re-upload when a renderer attaches).
    pub mesh: RenderableMesh,
}

/// A named visual entity in the scene
#[derive(Debug, Clone)]
pub struct SceneEntity {
    /// External identity; unique within the registry.
    pub name: String,
    /// The raw target direction(s) this entity was built from
    /// (one for vectors, two for bivectors, none for scalars).
    pub targets: Vec<DVec3>,
    /// Owned drawable primitives.
    pub primitives: Vec<ScenePrimitive>,
    /// The entity's text label.
    pub label: TextLabel,
}

impl SceneEntity {
    /// Handles of every primitive this entity owns
    pub fn mesh_ids(&self) -> impl Iterator<Item = MeshId> + '_ {
        self.primitives.iter().map(|p| p.id)
    }
}
