use glam::{Quat, Vec3};
use crate::api::types::EntityId;

/// Fat Entity: one struct per scene object, pose mirrored from physics.
/// Game code owns the rules; the scene only tracks what the renderer needs.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Hidden entities are kept in the scene but not packed for rendering.
    pub visible: bool,
    /// Position in world space (Y up).
    pub pos: Vec3,
    pub rotation: Quat,
    /// Game-defined model index, resolved to a mesh on the TypeScript side.
    pub model: u32,
}

impl Entity {
    /// Create a new visible entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            model: 0,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Collision-only entities (cushions) are spawned hidden.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_model(mut self, model: u32) -> Self {
        self.model = model;
        self
    }
}
