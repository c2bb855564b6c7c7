use std::collections::HashMap;
use std::sync::Mutex;

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Point3, Vector3};
use rapier3d::prelude::*;

use crate::api::physics::{CollisionPair, PhysicsAdapter};
use crate::api::types::EntityId;
use crate::core::body::{BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CombineRule};
use crate::core::sleep::{SleepConfig, SleepState, SleepTracker};

// ---------------------------------------------------------------------------
// Conversion helpers (private), glam <-> nalgebra
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

fn na_to_vec3(v: &Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn na_iso_to_pose(iso: &Isometry3<f32>) -> (Vec3, Quat) {
    let pos = Vec3::new(iso.translation.x, iso.translation.y, iso.translation.z);
    let q = &iso.rotation.quaternion().coords;
    (pos, Quat::from_xyzw(q.x, q.y, q.z, q.w))
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

impl CombineRule {
    fn to_rapier(self) -> CoefficientCombineRule {
        match self {
            CombineRule::Average => CoefficientCombineRule::Average,
            CombineRule::Min => CoefficientCombineRule::Min,
            CombineRule::Multiply => CoefficientCombineRule::Multiply,
            CombineRule::Max => CoefficientCombineRule::Max,
        }
    }
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_x, half_y, half_z } => {
                ColliderBuilder::cuboid(half_x, half_y, half_z)
            }
        }
    }
}

/// Rapier handles owned by one entity.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handles: Vec<ColliderHandle>,
}

#[derive(Debug, Clone)]
struct BodyEntry {
    body: PhysicsBody,
    body_type: BodyType,
    sleep: SleepTracker,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        self.collisions
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.collisions.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Rapier 3D world keyed by `EntityId`, with per-body sleep hysteresis.
///
/// Rapier's own island sleeping is left on; the `SleepTracker` decides what
/// game code sees and freezes a body the step it falls asleep.
pub struct PhysicsWorld {
    gravity: Vector3<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
    entries: HashMap<EntityId, BodyEntry>,
    sleep_config: SleepConfig,
    collisions: Vec<CollisionPair>,
}

impl PhysicsWorld {
    /// Create a world with Y-up gravity (e.g. `Vec3::new(0.0, -9.8, 0.0)`).
    pub fn new(gravity: Vec3) -> Self {
        Self::with_sleep(gravity, SleepConfig::default())
    }

    pub fn with_sleep(gravity: Vec3, sleep_config: SleepConfig) -> Self {
        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
            entries: HashMap::new(),
            sleep_config,
            collisions: Vec::new(),
        }
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders in the simulation.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn gravity(&self) -> Vec3 {
        na_to_vec3(&self.gravity)
    }

    fn rigid_body(&self, id: EntityId) -> Option<&RigidBody> {
        let entry = self.entries.get(&id)?;
        self.bodies.get(entry.body.body_handle)
    }

    fn rigid_body_mut(&mut self, id: EntityId) -> Option<(&mut RigidBody, &mut SleepTracker)> {
        let entry = self.entries.get_mut(&id)?;
        let rb = self.bodies.get_mut(entry.body.body_handle)?;
        Some((rb, &mut entry.sleep))
    }

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(EntityId(body.user_data as u32))
    }

    fn drain_events(&mut self) {
        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };
            if let (Some(a), Some(b)) = (self.collider_to_entity(h1), self.collider_to_entity(h2)) {
                self.collisions.push(CollisionPair {
                    entity_a: a,
                    entity_b: b,
                    started,
                });
            }
        }
    }

    fn update_sleep(&mut self, dt: f32) {
        for entry in self.entries.values_mut() {
            if entry.body_type != BodyType::Dynamic {
                continue;
            }
            let Some(rb) = self.bodies.get_mut(entry.body.body_handle) else {
                continue;
            };
            // Airborne bodies (a ball dropping into a pocket) never sleep.
            let supported = entry.body.collider_handles.iter().any(|&handle| {
                self.narrow_phase
                    .contact_pairs_with(handle)
                    .any(|pair| pair.has_any_active_contact)
            });
            if !supported {
                entry.sleep.wake();
                continue;
            }

            let linear = rb.linvel().norm();
            let angular = rb.angvel().norm();
            // Rapier wakes a frozen body on contact. A real hit restarts the
            // sleepy countdown; a resting neighbour does not.
            if entry.sleep.is_sleeping() && !rb.is_sleeping() {
                entry.sleep.contact(linear, angular);
            }
            entry.sleep.observe(linear, angular, dt);
            if entry.sleep.is_sleeping() && !rb.is_sleeping() {
                rb.set_linvel(Vector3::zeros(), false);
                rb.set_angvel(Vector3::zeros(), false);
                rb.sleep();
            }
        }
    }
}

impl PhysicsAdapter for PhysicsWorld {
    /// The EntityId is stored in the body's `user_data` for collision lookups.
    fn add_body(&mut self, id: EntityId, desc: &BodyDesc, material: ColliderMaterial) {
        self.remove_body(id);

        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec3_to_na(desc.position))
            .linvel(vec3_to_na(desc.velocity))
            .gravity_scale(desc.gravity_scale)
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(id.0 as u128)
            .build();
        let body_handle = self.bodies.insert(rb);

        let shapes = std::iter::once((desc.collider, Vec3::ZERO)).chain(desc.compound.iter().copied());
        let mut collider_handles = Vec::with_capacity(1 + desc.compound.len());
        for (shape, offset) in shapes {
            let collider = shape
                .build_collider()
                .translation(vec3_to_na(offset))
                .restitution(material.restitution)
                .restitution_combine_rule(material.restitution_combine.to_rapier())
                .friction(material.friction)
                .friction_combine_rule(material.friction_combine.to_rapier())
                .density(material.density)
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .build();
            collider_handles.push(self.colliders.insert_with_parent(
                collider,
                body_handle,
                &mut self.bodies,
            ));
        }

        let sleep = SleepTracker::new(self.sleep_config);
        self.entries.insert(
            id,
            BodyEntry {
                body: PhysicsBody {
                    body_handle,
                    collider_handles,
                },
                body_type: desc.body_type,
                sleep,
            },
        );
    }

    fn remove_body(&mut self, id: EntityId) -> bool {
        let Some(entry) = self.entries.remove(&id) else {
            return false;
        };
        self.bodies.remove(
            entry.body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        true
    }

    fn has_body(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );
        self.drain_events();
        self.update_sleep(dt);
    }

    fn position(&self, id: EntityId) -> Option<Vec3> {
        self.rigid_body(id).map(|rb| na_to_vec3(rb.translation()))
    }

    fn pose(&self, id: EntityId) -> Option<(Vec3, Quat)> {
        self.rigid_body(id).map(|rb| na_iso_to_pose(rb.position()))
    }

    fn velocity(&self, id: EntityId) -> Option<Vec3> {
        self.rigid_body(id).map(|rb| na_to_vec3(rb.linvel()))
    }

    fn angular_velocity(&self, id: EntityId) -> Option<Vec3> {
        self.rigid_body(id).map(|rb| na_to_vec3(rb.angvel()))
    }

    fn sleep_state(&self, id: EntityId) -> SleepState {
        match self.entries.get(&id) {
            Some(entry) if entry.body_type == BodyType::Dynamic => entry.sleep.state(),
            _ => SleepState::Sleeping,
        }
    }

    fn apply_impulse(&mut self, id: EntityId, impulse: Vec3, world_point: Vec3) {
        if let Some((rb, sleep)) = self.rigid_body_mut(id) {
            sleep.wake();
            rb.apply_impulse_at_point(
                vec3_to_na(impulse),
                Point3::new(world_point.x, world_point.y, world_point.z),
                true,
            );
        }
    }

    fn set_position(&mut self, id: EntityId, position: Vec3) {
        if let Some((rb, sleep)) = self.rigid_body_mut(id) {
            sleep.wake();
            rb.set_translation(vec3_to_na(position), true);
        }
    }

    fn stop(&mut self, id: EntityId) {
        if let Some((rb, _)) = self.rigid_body_mut(id) {
            rb.set_linvel(Vector3::zeros(), false);
            rb.set_angvel(Vector3::zeros(), false);
        }
    }

    fn take_collisions(&mut self) -> Vec<CollisionPair> {
        std::mem::take(&mut self.collisions)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
