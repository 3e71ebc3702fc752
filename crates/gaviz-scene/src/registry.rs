//! Scene object registry
//!
//! The single owner of the retained scene: a name-keyed collection of
//! entities, the reference grid, and (optionally) the GL renderer holding
//! their GPU resources. Every mutation goes through the registry exactly
//! once per request; the render loop only reads.
//!
//! GPU discipline: an entity's buffers are released before the entity is
//! detached, and buffers are only ever resident for currently registered
//! entities. The registry works headless too — without an attached
//! renderer all lifecycle logic is identical, just with no uploads — which
//! is also how the lifecycle tests run.

use crate::entity::{MeshId, SceneEntity, ScenePrimitive, TextLabel};
use crate::error::{Result, SceneError};
use crate::grid::GridGroup;
use crate::primitives::{arrow_mesh, parallelogram_mesh, ARROW_COLOR, PLANE_COLOR};
use crate::renderer::MeshRenderer;
use gaviz_core::decode::DecodedValue;
use glam::{DVec3, Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The grid currently installed in the scene
struct GridSlot {
    size: u32,
    primitive: ScenePrimitive,
    labels: Vec<TextLabel>,
}

/// Summary counters for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStats {
    /// Number of registered entities.
    pub entity_count: usize,
    /// Number of live primitives (entities plus grid).
    pub primitive_count: usize,
    /// Number of meshes resident on the GPU (0 when headless).
    pub gpu_resident: usize,
}

/// The scene-graph lifecycle manager
pub struct SceneRegistry {
    entities: Vec<SceneEntity>,
    grid: Option<GridSlot>,
    renderer: Option<MeshRenderer>,
    next_mesh_id: u64,
}

impl SceneRegistry {
    /// Create an empty, headless registry
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            grid: None,
            renderer: None,
            next_mesh_id: 0,
        }
    }

    /// Add a named entity built from a decoded value.
    ///
    /// Fails with [`SceneError::DuplicateName`] if the name is taken
    /// (use [`update`](Self::update) to replace) and with
    /// [`SceneError::Undrawable`] for values the selection layer should
    /// have filtered. Scalars register with a label only — no geometry —
    /// matching how the original scene treated direction-free values.
    pub fn add(&mut self, name: &str, value: &DecodedValue) -> Result<()> {
        if self.has(name) {
            return Err(SceneError::DuplicateName {
                name: name.to_string(),
            });
        }
        if !value.is_drawable() {
            return Err(SceneError::Undrawable {
                name: name.to_string(),
            });
        }

        let entity = self.build_entity(name, value);
        self.install(entity)
    }

    /// Add a named entity from explicit coordinates (manual vector entry)
    pub fn add_with_position(&mut self, name: &str, position: DVec3) -> Result<()> {
        self.add(name, &DecodedValue::Vector(position))
    }

    /// Replace an entity's geometry: atomic remove-then-add.
    ///
    /// The registry keeps only insertion order; callers that present a
    /// positionally stable list track positions themselves.
    pub fn update(&mut self, name: &str, value: &DecodedValue) -> Result<()> {
        if !value.is_drawable() {
            return Err(SceneError::Undrawable {
                name: name.to_string(),
            });
        }
        self.remove(name);
        self.add(name, value)
    }

    /// Remove a named entity, releasing its GPU resources first.
    ///
    /// A missing name is a no-op, not an error: toggle events can
    /// legitimately race ahead of a stale UI.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.entities.iter().position(|e| e.name == name) else {
            debug!(name, "remove: no such entity, ignoring");
            return false;
        };

        let entity = &self.entities[index];
        if let Some(renderer) = self.renderer.as_mut() {
            for id in entity.primitives.iter().map(|p| p.id) {
                renderer.remove_mesh(id);
            }
        }
        self.entities.remove(index);
        debug!(name, "entity removed");
        true
    }

    /// Whether a name is registered
    pub fn has(&self, name: &str) -> bool {
        self.entities.iter().any(|e| e.name == name)
    }

    /// Registered names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no entities are registered
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by name
    pub fn entity(&self, name: &str) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// All entities in insertion order
    pub fn entities(&self) -> &[SceneEntity] {
        &self.entities
    }

    /// Every overlay label currently in the scene (entities + grid)
    pub fn labels(&self) -> Vec<&TextLabel> {
        let mut labels: Vec<&TextLabel> = self.entities.iter().map(|e| &e.label).collect();
        if let Some(grid) = &self.grid {
            labels.extend(grid.labels.iter());
        }
        labels
    }

    /// Install a grid group, replacing any prior grid.
    ///
    /// The swap happens inside this single call: there is one grid slot,
    /// so the scene never holds two grids, and the replacement is
    /// uploaded before the old grid is released — a failed upload leaves
    /// the existing grid fully intact, never zero grids where one
    /// existed.
    pub fn install_grid(&mut self, group: GridGroup) -> Result<()> {
        let primitive = ScenePrimitive {
            id: self.alloc_mesh_id(),
            mesh: group.mesh,
        };
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.upload_mesh(primitive.id, &primitive.mesh)?;
        }

        if let (Some(old), Some(renderer)) = (self.grid.take(), self.renderer.as_mut()) {
            renderer.remove_mesh(old.primitive.id);
        }
        debug!(size = group.size, "grid installed");
        self.grid = Some(GridSlot {
            size: group.size,
            primitive,
            labels: group.labels,
        });
        Ok(())
    }

    /// Side length of the installed grid, if any
    pub fn grid_size(&self) -> Option<u32> {
        self.grid.as_ref().map(|g| g.size)
    }

    /// Whether a grid is installed
    pub fn has_grid(&self) -> bool {
        self.grid.is_some()
    }

    /// Number of live scene primitives (entities plus grid)
    pub fn live_primitive_count(&self) -> usize {
        let entity_primitives: usize = self.entities.iter().map(|e| e.primitives.len()).sum();
        entity_primitives + usize::from(self.grid.is_some())
    }

    /// Summary counters
    pub fn stats(&self) -> SceneStats {
        SceneStats {
            entity_count: self.entities.len(),
            primitive_count: self.live_primitive_count(),
            gpu_resident: self
                .renderer
                .as_ref()
                .map(MeshRenderer::resident_count)
                .unwrap_or(0),
        }
    }

    /// Remove every entity and the grid, releasing all GPU resources
    pub fn clear(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear_all_meshes();
        }
        self.entities.clear();
        self.grid = None;
        debug!("scene cleared");
    }

    /// Attach a renderer and upload the current scene contents.
    ///
    /// Called when the 3D view mounts; detaching (view unmount) releases
    /// everything GPU-side while the CPU scene stays intact.
    pub fn attach_renderer(&mut self, mut renderer: MeshRenderer) -> Result<()> {
        for entity in &self.entities {
            for primitive in &entity.primitives {
                renderer.upload_mesh(primitive.id, &primitive.mesh)?;
            }
        }
        if let Some(grid) = &self.grid {
            renderer.upload_mesh(grid.primitive.id, &grid.primitive.mesh)?;
        }
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Drop the attached renderer (and with it every GPU resource)
    pub fn detach_renderer(&mut self) {
        // MeshRenderer::drop deletes all buffers and programs
        self.renderer = None;
    }

    /// Whether a renderer is attached
    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Draw the scene with the given view/projection. Headless: no-op.
    pub fn render(&self, view: &Mat4, projection: &Mat4) {
        if let Some(renderer) = &self.renderer {
            renderer.render(view, projection);
        }
    }

    fn alloc_mesh_id(&mut self) -> MeshId {
        let id = MeshId(self.next_mesh_id);
        self.next_mesh_id += 1;
        id
    }

    fn build_entity(&mut self, name: &str, value: &DecodedValue) -> SceneEntity {
        let mut primitives = Vec::new();
        let mut targets = Vec::new();
        let label_anchor;

        match value {
            DecodedValue::Scalar(_) => {
                // direction-free: label at the origin, no geometry
                label_anchor = Vec3::ZERO;
            }
            DecodedValue::Vector(v) => {
                targets.push(*v);
                let tip = v.as_vec3();
                primitives.push(ScenePrimitive {
                    id: self.alloc_mesh_id(),
                    mesh: arrow_mesh(tip, ARROW_COLOR),
                });
                label_anchor = tip;
            }
            DecodedValue::Bivector { v1, v2 } => {
                targets.push(*v1);
                targets.push(*v2);
                let (a, b) = (v1.as_vec3(), v2.as_vec3());
                primitives.push(ScenePrimitive {
                    id: self.alloc_mesh_id(),
                    mesh: arrow_mesh(a, ARROW_COLOR),
                });
                primitives.push(ScenePrimitive {
                    id: self.alloc_mesh_id(),
                    mesh: arrow_mesh(b, ARROW_COLOR),
                });
                primitives.push(ScenePrimitive {
                    id: self.alloc_mesh_id(),
                    mesh: parallelogram_mesh(a, b, PLANE_COLOR),
                });
                label_anchor = a + b;
            }
            // add/update reject Other before building; degrade to label-only
            // rather than panic if that ever changes
            DecodedValue::Other => {
                label_anchor = Vec3::ZERO;
            }
        }

        SceneEntity {
            name: name.to_string(),
            targets,
            primitives,
            label: TextLabel::new(name, label_anchor),
        }
    }

    fn install(&mut self, entity: SceneEntity) -> Result<()> {
        if let Some(renderer) = self.renderer.as_mut() {
            let mut uploaded = Vec::new();
            for primitive in &entity.primitives {
                if let Err(err) = renderer.upload_mesh(primitive.id, &primitive.mesh) {
                    // roll back: no partially uploaded entities
                    warn!(name = %entity.name, %err, "upload failed, rolling back entity");
                    for id in uploaded {
                        renderer.remove_mesh(id);
                    }
                    return Err(err);
                }
                uploaded.push(primitive.id);
            }
        }
        debug!(name = %entity.name, primitives = entity.primitives.len(), "entity added");
        self.entities.push(entity);
        Ok(())
    }
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}
