pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::physics::{PhysicsAdapter, CollisionPair};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use components::entity::Entity;
pub use core::body::{BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CombineRule};
pub use core::scene::Scene;
pub use core::schedule::{Scheduler, TaskHandle};
pub use core::sleep::{SleepConfig, SleepState, SleepTracker};
pub use core::time::FixedTimestep;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_render_buffer;

#[cfg(feature = "physics")]
pub use core::physics::{PhysicsWorld, PhysicsBody};
