//! The physics surface game logic is written against.
//!
//! Everything is keyed by `EntityId`, so games never hold backend handles and
//! can run their rules against a scripted double in tests.

use glam::{Quat, Vec3};

use crate::api::types::EntityId;
use crate::core::body::{BodyDesc, ColliderMaterial};
use crate::core::sleep::SleepState;

/// A collision event between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// `true` when the collision just started, `false` when it ended.
    pub started: bool,
}

impl CollisionPair {
    pub fn involves(&self, id: EntityId) -> bool {
        self.entity_a == id || self.entity_b == id
    }
}

/// Rigid-body world as seen by game code.
///
/// Queries on an entity without a body return `None`, except `sleep_state`,
/// which reports a missing body as `Sleeping` (it cannot move).
pub trait PhysicsAdapter {
    /// Create a body for `id`, replacing any existing one.
    fn add_body(&mut self, id: EntityId, desc: &BodyDesc, material: ColliderMaterial);

    /// Remove the body for `id`. Returns `false` if there was none.
    fn remove_body(&mut self, id: EntityId) -> bool;

    fn has_body(&self, id: EntityId) -> bool;

    /// Advance the simulation by one fixed step.
    fn step(&mut self, dt: f32);

    fn position(&self, id: EntityId) -> Option<Vec3>;

    fn pose(&self, id: EntityId) -> Option<(Vec3, Quat)>;

    fn velocity(&self, id: EntityId) -> Option<Vec3>;

    fn angular_velocity(&self, id: EntityId) -> Option<Vec3>;

    fn sleep_state(&self, id: EntityId) -> SleepState;

    /// Apply an instantaneous impulse at a world-space point. Wakes the body.
    fn apply_impulse(&mut self, id: EntityId, impulse: Vec3, world_point: Vec3);

    /// Teleport the body. Wakes it.
    fn set_position(&mut self, id: EntityId, position: Vec3);

    /// Zero linear and angular velocity.
    fn stop(&mut self, id: EntityId);

    /// Drain collision pairs gathered since the last call.
    fn take_collisions(&mut self) -> Vec<CollisionPair> {
        Vec::new()
    }
}
