pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;
pub mod level;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{category, CollisionLayers, SimConfig, Tuning};
pub use api::simulation::Simulation;
pub use api::snapshot::{EntityDetail, EntityView, Snapshot};
pub use api::state::GameState;
pub use api::types::{pack_events, EntityId, GameEvent, SimEvent};
pub use api::world::World;
pub use components::data::{DoorData, GeometryKind, HitboxData, PlayerData, ZombieData, ZombieState};
pub use components::entity::{Entity, EntityData, EntityKind};
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, CollisionFilter, CollisionPair,
    PhysicsBody, PhysicsWorld,
};
pub use crate::core::scene::Scene;
pub use crate::core::time::{FixedTimestep, FrameClock, FrameTime, Millis};
pub use error::{SimError, SimResult};
pub use input::intent::{Action, InputEdges, InputIntent};
pub use input::queue::{InputEvent, InputQueue};
