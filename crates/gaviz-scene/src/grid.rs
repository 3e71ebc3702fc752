//! Reference grid
//!
//! The XY reference grid with its Z axis line and axis captions. The
//! controller regenerates the grid when the size changes and swaps it into
//! the registry atomically, within one call — the scene never holds two
//! grids, and never drops to zero across a caller-visible boundary, even
//! when the replacement fails to upload.

use crate::entity::TextLabel;
use crate::error::Result;
use crate::primitives::{grid_mesh, RenderableMesh};
use crate::registry::SceneRegistry;
use glam::Vec3;
use tracing::debug;

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: u32 = 12;

/// A freshly built grid, ready to install
pub struct GridGroup {
    /// Side length (also the number of divisions: unit spacing).
    pub size: u32,
    /// Grid lines plus the Z axis segment.
    pub mesh: RenderableMesh,
    /// Axis captions at the half-size extents.
    pub labels: Vec<TextLabel>,
}

impl GridGroup {
    /// Build a grid of the given side length
    pub fn new(size: u32) -> Self {
        let half = size as f32 / 2.0;
        Self {
            size,
            mesh: grid_mesh(size),
            labels: vec![
                TextLabel::new("X", Vec3::new(half, 0.0, 0.0)),
                TextLabel::new("Y", Vec3::new(0.0, half, 0.0)),
                TextLabel::new("Z", Vec3::new(0.0, 0.0, half)),
            ],
        }
    }
}

/// Regenerates the reference grid on size changes
#[derive(Debug, Default)]
pub struct GridController {
    size: Option<u32>,
}

impl GridController {
    /// Create a controller with no grid installed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the default-size grid if none exists yet
    pub fn ensure_default(&mut self, registry: &mut SceneRegistry) -> Result<()> {
        if self.size.is_none() {
            self.set_size(registry, DEFAULT_GRID_SIZE)?;
        }
        Ok(())
    }

    /// Set the grid size, replacing the prior grid atomically.
    ///
    /// No-op when the size is unchanged.
    pub fn set_size(&mut self, registry: &mut SceneRegistry, size: u32) -> Result<()> {
        if self.size == Some(size) {
            return Ok(());
        }
        debug!(from = ?self.size, to = size, "regenerating grid");
        registry.install_grid(GridGroup::new(size))?;
        self.size = Some(size);
        Ok(())
    }

    /// The current grid size, if a grid has been installed
    pub fn size(&self) -> Option<u32> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_leaves_exactly_one_grid() {
        let mut registry = SceneRegistry::new();
        let mut controller = GridController::new();

        controller.set_size(&mut registry, 12).unwrap();
        assert_eq!(registry.grid_size(), Some(12));

        controller.set_size(&mut registry, 20).unwrap();
        assert!(registry.has_grid());
        assert_eq!(registry.grid_size(), Some(20));
        // exactly one grid primitive is live
        assert_eq!(registry.live_primitive_count(), 1);
    }

    #[test]
    fn test_unchanged_size_is_noop() {
        let mut registry = SceneRegistry::new();
        let mut controller = GridController::new();
        controller.set_size(&mut registry, 12).unwrap();
        controller.set_size(&mut registry, 12).unwrap();
        assert_eq!(registry.grid_size(), Some(12));
        assert_eq!(registry.live_primitive_count(), 1);
    }

    #[test]
    fn test_ensure_default_once() {
        let mut registry = SceneRegistry::new();
        let mut controller = GridController::new();
        controller.ensure_default(&mut registry).unwrap();
        assert_eq!(controller.size(), Some(DEFAULT_GRID_SIZE));

        // a later explicit size wins and ensure_default stays quiet
        controller.set_size(&mut registry, 16).unwrap();
        controller.ensure_default(&mut registry).unwrap();
        assert_eq!(registry.grid_size(), Some(16));
    }

    #[test]
    fn test_grid_group_labels() {
        let group = GridGroup::new(12);
        let texts: Vec<&str> = group.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["X", "Y", "Z"]);
        assert_eq!(group.labels[0].position, Vec3::new(6.0, 0.0, 0.0));
        // axis captions render in the regular label style
        assert!(group.labels.iter().all(|l| !l.small));
    }
}
