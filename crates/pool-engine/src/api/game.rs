use glam::Vec3;

use crate::api::types::{EntityId, GameEvent, SoundEvent};
use crate::core::scene::Scene;
use crate::core::sleep::SleepConfig;
use crate::input::queue::InputQueue;
#[cfg(feature = "physics")]
use crate::api::physics::PhysicsAdapter;
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use crate::core::body::{BodyDesc, ColliderMaterial};
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsWorld;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World extent along X, in meters. Forwarded to the renderer header.
    pub world_width: f32,
    /// World extent along Z, in meters.
    pub world_depth: f32,
    /// Maximum number of render instances (default: 64).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 64).
    pub max_events: usize,
    /// Gravity vector, Y up. Default: Earth gravity.
    pub gravity: Vec3,
    /// Sleep thresholds applied to every dynamic body.
    pub sleep: SleepConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 4.0,
            world_depth: 3.0,
            max_instances: 64,
            max_sounds: 32,
            max_events: 64,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            sleep: SleepConfig::default(),
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. The game owns the ordering of physics, rules and timers
    /// inside the step, so it advances `ctx.physics` itself.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Fixed step length the runner advances by.
    pub fixed_dt: f32,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            sounds: Vec::new(),
            events: Vec::new(),
            fixed_dt: config.fixed_dt,
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::with_sleep(config.gravity, config.sleep),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a sound event to be forwarded to TypeScript.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }

    /// Spawn an entity with a physics body. The entity's position is set from the BodyDesc.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        self.physics.add_body(id, desc, material);
        self.scene.spawn(entity.with_pos(desc.position));
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    #[cfg(feature = "physics")]
    pub fn despawn(&mut self, id: EntityId) {
        self.scene.despawn(id);
        self.physics.remove_body(id);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
