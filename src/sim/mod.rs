//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod run;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod ticker;
pub mod timers;

pub use collision::{Aabb, overlapping};
pub use spawner::Spawner;
pub use state::{
    CarriedStats, Entity, EntityId, EntityKind, EntitySet, GameEvent, GamePhase, GameState,
    Player, RunInit, RunState, RunSummary,
};
pub use tick::{TickInput, tick};
pub use ticker::{TickerMode, TickerState, default_banner};
pub use timers::{RepeatingTimer, ScheduledEvent, Scheduler, TimerEvent};
