//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (grid order for enemies, spawn order for shots)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod formation;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::CollisionResult;
pub use difficulty::accelerate;
pub use rect::Rect;
pub use state::{
    Enemy, EnemyShot, Formation, GameEvent, GamePhase, GameState, PlayArea, Player, PlayerShot,
    VerticalDrift,
};
pub use tick::{TickInput, tick};
