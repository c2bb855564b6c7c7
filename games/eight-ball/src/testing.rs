//! Scripted physics double: bodies move only by their velocity, and sleep
//! state is whatever the test says it is.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use pool_engine::{
    BodyDesc, BodyType, ColliderMaterial, EntityId, PhysicsAdapter, Scene, SleepState,
};

use crate::balls::{BallRegistry, RackLayout, BALL_COUNT};

#[derive(Debug, Clone)]
struct ScriptedBody {
    body_type: BodyType,
    pos: Vec3,
    rot: Quat,
    lin: Vec3,
    ang: Vec3,
    sleep: SleepState,
}

#[derive(Debug, Default)]
pub struct ScriptedPhysics {
    bodies: BTreeMap<EntityId, ScriptedBody>,
    pub impulses: Vec<(EntityId, Vec3, Vec3)>,
    pub steps: u32,
}

impl ScriptedPhysics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, id: EntityId, pos: Vec3) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
        }
    }

    pub fn set_motion(&mut self, id: EntityId, lin: Vec3, ang: Vec3) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.lin = lin;
            body.ang = ang;
            body.sleep = SleepState::Awake;
        }
    }

    pub fn set_sleeping(&mut self, id: EntityId, sleeping: bool) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.sleep = if sleeping { SleepState::Sleeping } else { SleepState::Awake };
        }
    }

    /// Stop everything and put it to sleep.
    pub fn settle_all(&mut self) {
        for body in self.bodies.values_mut() {
            body.lin = Vec3::ZERO;
            body.ang = Vec3::ZERO;
            body.sleep = SleepState::Sleeping;
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl PhysicsAdapter for ScriptedPhysics {
    fn add_body(&mut self, id: EntityId, desc: &BodyDesc, _material: ColliderMaterial) {
        let sleep = if desc.velocity == Vec3::ZERO {
            SleepState::Sleeping
        } else {
            SleepState::Awake
        };
        self.bodies.insert(
            id,
            ScriptedBody {
                body_type: desc.body_type,
                pos: desc.position,
                rot: Quat::IDENTITY,
                lin: desc.velocity,
                ang: Vec3::ZERO,
                sleep,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) -> bool {
        self.bodies.remove(&id).is_some()
    }

    fn has_body(&self, id: EntityId) -> bool {
        self.bodies.contains_key(&id)
    }

    fn step(&mut self, dt: f32) {
        self.steps += 1;
        for body in self.bodies.values_mut() {
            if body.body_type == BodyType::Dynamic {
                body.pos += body.lin * dt;
            }
        }
    }

    fn position(&self, id: EntityId) -> Option<Vec3> {
        self.bodies.get(&id).map(|b| b.pos)
    }

    fn pose(&self, id: EntityId) -> Option<(Vec3, Quat)> {
        self.bodies.get(&id).map(|b| (b.pos, b.rot))
    }

    fn velocity(&self, id: EntityId) -> Option<Vec3> {
        self.bodies.get(&id).map(|b| b.lin)
    }

    fn angular_velocity(&self, id: EntityId) -> Option<Vec3> {
        self.bodies.get(&id).map(|b| b.ang)
    }

    fn sleep_state(&self, id: EntityId) -> SleepState {
        match self.bodies.get(&id) {
            Some(body) if body.body_type == BodyType::Dynamic => body.sleep,
            _ => SleepState::Sleeping,
        }
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec3, world_point: Vec3) {
        self.impulses.push((id, impulse, world_point));
        if let Some(body) = self.bodies.get_mut(&id) {
            body.lin += impulse;
            body.sleep = SleepState::Awake;
        }
    }

    fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = position;
            body.sleep = SleepState::Awake;
        }
    }

    fn stop(&mut self, id: EntityId) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.lin = Vec3::ZERO;
            body.ang = Vec3::ZERO;
        }
    }
}

/// A standard rack on the scripted double. Ball `id` gets `EntityId(id + 1)`.
pub fn rack() -> (BallRegistry, ScriptedPhysics, Scene) {
    let mut physics = ScriptedPhysics::new();
    let mut scene = Scene::new();
    let entities: [EntityId; BALL_COUNT] = std::array::from_fn(|i| EntityId(i as u32 + 1));
    let registry = BallRegistry::create_rack(&RackLayout::default(), entities, &mut physics, &mut scene);
    (registry, physics, scene)
}
