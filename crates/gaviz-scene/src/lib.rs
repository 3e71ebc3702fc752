//! # gaviz Scene
//!
//! The retained 3D scene for the expression visualizer: a name-keyed entity
//! registry with an explicit GPU resource lifecycle, primitive mesh builders
//! for the decoded value kinds, the reference grid, an orbit camera, and a
//! glow-based renderer.
//!
//! The registry is the only component allowed to mutate the scene; the
//! render driver (external) only reads. Everything works headless — GPU
//! uploads happen only while a renderer is attached, which keeps the
//! lifecycle logic testable without a GL context.

pub mod camera;
pub mod entity;
pub mod error;
pub mod grid;
pub mod primitives;
pub mod registry;
pub mod renderer;
pub mod shaders;

pub use camera::OrbitCamera;
pub use entity::{MeshId, SceneEntity, ScenePrimitive, TextLabel};
pub use error::{Result, SceneError};
pub use grid::{GridController, GridGroup, DEFAULT_GRID_SIZE};
pub use primitives::{MeshMaterial, MeshTopology, RenderableMesh};
pub use registry::{SceneRegistry, SceneStats};
pub use renderer::{LightingParams, MeshRenderer};
