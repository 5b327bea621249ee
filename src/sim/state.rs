//! Game state and core simulation types
//!
//! Everything one tick reads or writes lives in [`GameState`].

use std::collections::HashMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use super::ticker::TickerState;
use super::timers::Scheduler;
use crate::consts::*;
use crate::error::ConfigError;
use crate::tuning::{Tuning, Viewport};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Host is still loading assets
    Boot,
    /// Title screen, waiting for a tap
    Title,
    /// Active gameplay (the only phase with per-tick simulation)
    Playing,
    /// Boss hit with lives left; frozen until the player acknowledges
    RespawnPause { prompt_shown: bool },
    /// Goal reached; summary is finalized after a short delay
    Victory,
    /// Run lost (out of bounds or out of lives)
    Defeat,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Score and lives for the active run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub wealth: f64,
    pub coins_collected: u32,
    pub multiplier: f64,
    pub highest_multiplier: f64,
    pub lives: u32,
    pub goal: f64,
    /// Coins spawned since the last (re)start of play
    pub spawn_count: u32,
}

impl RunState {
    /// Fresh run with default stats
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wealth: 0.0,
            coins_collected: 0,
            multiplier: 1.0,
            highest_multiplier: 1.0,
            lives: tuning.starting_lives,
            goal: tuning.goal,
            spawn_count: 0,
        }
    }

    /// Run resumed with stats carried over from a previous life
    pub fn from_carry(carry: &CarriedStats, tuning: &Tuning) -> Result<Self, ConfigError> {
        carry.validate(tuning)?;
        Ok(Self {
            wealth: carry.wealth,
            coins_collected: carry.coins_collected,
            multiplier: carry.multiplier,
            highest_multiplier: carry.highest_multiplier,
            lives: carry.lives,
            goal: tuning.goal,
            spawn_count: 0,
        })
    }

    /// Wealth still missing to reach the goal (never negative)
    pub fn to_goal(&self) -> f64 {
        (self.goal - self.wealth).max(0.0)
    }

    pub fn goal_reached(&self) -> bool {
        self.wealth >= self.goal
    }

    /// Fold the current multiplier into the run's best
    pub fn record_highest_multiplier(&mut self) {
        self.highest_multiplier = self.highest_multiplier.max(self.multiplier);
    }

    pub fn carry(&self) -> CarriedStats {
        CarriedStats {
            lives: self.lives,
            wealth: self.wealth,
            coins_collected: self.coins_collected,
            multiplier: self.multiplier,
            highest_multiplier: self.highest_multiplier,
        }
    }

    /// Payload for the end-of-run screen
    pub fn summary(&self, goal_reached: bool) -> RunSummary {
        RunSummary {
            coins: self.coins_collected,
            wealth: self.wealth,
            highest_multiplier: self.highest_multiplier,
            goal_reached,
            goal: self.goal,
            lives: self.lives,
            to_goal: self.to_goal(),
        }
    }
}

/// Stats carried across a respawn. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarriedStats {
    pub lives: u32,
    pub wealth: f64,
    pub coins_collected: u32,
    pub multiplier: f64,
    pub highest_multiplier: f64,
}

impl CarriedStats {
    pub fn validate(&self, tuning: &Tuning) -> Result<(), ConfigError> {
        if self.lives == 0 || self.lives > tuning.starting_lives {
            return Err(ConfigError::InvalidLives {
                lives: self.lives,
                max: tuning.starting_lives,
            });
        }
        if !self.wealth.is_finite() || self.wealth < 0.0 {
            return Err(ConfigError::InvalidWealth(self.wealth));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ConfigError::InvalidMultiplier(self.multiplier));
        }
        if !self.highest_multiplier.is_finite() || self.highest_multiplier < self.multiplier {
            return Err(ConfigError::HighestBelowCurrent {
                highest: self.highest_multiplier,
                current: self.multiplier,
            });
        }
        Ok(())
    }
}

/// Parameters for starting (or resuming) play
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInit {
    /// Give the player an initial flap
    #[serde(default)]
    pub start_flap: bool,
    /// Stats from the previous life; `None` starts a fresh run
    #[serde(default)]
    pub carry: Option<CarriedStats>,
}

impl RunInit {
    /// Fresh run started by a tap
    pub fn fresh() -> Self {
        Self {
            start_flap: true,
            carry: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Terminal summary handed to the end-of-run screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub coins: u32,
    pub wealth: f64,
    pub highest_multiplier: f64,
    pub goal_reached: bool,
    pub goal: f64,
    pub lives: u32,
    pub to_goal: f64,
}

/// Handle into an entity set
pub type EntityId = u32;

/// What an entity is, with its per-kind data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Coin {
        /// Index into the tuning coin table
        kind: usize,
        value: u32,
        special: bool,
    },
    Boss,
}

/// A scrolling coin or boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Horizontal drift (negative, leftward)
    pub vel_x: f32,
    /// Sprite height as a fraction of viewport height
    pub scale: f32,
    /// Rendered size in pixels
    pub size: Vec2,
    /// Collision box size in pixels (centered on `pos`)
    pub hitbox: Vec2,
}

impl Entity {
    pub fn is_special(&self) -> bool {
        matches!(self.kind, EntityKind::Coin { special: true, .. })
    }

    /// True once the sprite has fully scrolled past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.x < -self.size.x
    }
}

/// Tracked entities of one kind, addressable by handle
///
/// Dense storage with an id→slot index; removal is a swap-remove.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    items: Vec<Entity>,
    slots: HashMap<EntityId, usize>,
}

impl EntitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) {
        if let Some(&slot) = self.slots.get(&entity.id) {
            self.items[slot] = entity;
            return;
        }
        self.slots.insert(entity.id, self.items.len());
        self.items.push(entity);
    }

    /// Remove by handle in O(1). Returns `None` if already gone.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.remove(&id)?;
        let removed = self.items.swap_remove(slot);
        if let Some(moved) = self.items.get(slot) {
            self.slots.insert(moved.id, slot);
        }
        Some(removed)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&slot| &self.items[slot])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.slots.clear();
    }

    /// Handles sorted ascending, for deterministic iteration
    pub fn sorted_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.items.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel_y: f32,
    /// Collision box size (the full sprite)
    pub hitbox: Vec2,
}

impl Player {
    /// Player at its starting spot for a viewport
    pub fn spawn(viewport: Viewport) -> Self {
        let side = viewport.height * PLAYER_SCALE;
        Self {
            pos: Vec2::new(viewport.width * PLAYER_X_FRACTION, viewport.height / 2.0),
            vel_y: 0.0,
            hitbox: Vec2::splat(side),
        }
    }

    pub fn flap(&mut self, jump_velocity: f32) {
        self.vel_y = jump_velocity;
    }

    /// Integrate gravity (semi-implicit Euler)
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel_y += gravity * dt;
        self.pos.y += self.vel_y * dt;
    }

    /// Above the top or below the bottom of the viewport
    pub fn out_of_bounds(&self, viewport: Viewport) -> bool {
        self.pos.y < 0.0 || self.pos.y > viewport.height
    }
}

/// Something the host may want to react to (sound, effects, screens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began
    RunStarted { lives: u32 },
    /// Play resumed after a respawn acknowledgment
    RunResumed { lives: u32 },
    CoinSpawned { id: EntityId, kind: usize, special: bool },
    BossSpawned { id: EntityId },
    CoinCollected {
        id: EntityId,
        kind: usize,
        special: bool,
        value_added: f64,
    },
    MultiplierDoubled { multiplier: f64, message: String },
    BossHit { id: EntityId, lives_remaining: u32 },
    /// "N lives remaining - tap to proceed"
    RespawnPrompt { lives_remaining: u32 },
    /// Wealth crossed the goal; victory finalizes after a delay
    GoalReached { wealth: f64 },
    /// Terminal summary for the end-of-run screen
    RunFinished(RunSummary),
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub run: RunState,
    pub player: Player,
    /// Tracked coins
    pub coins: EntitySet,
    /// Tracked bosses
    pub bosses: EntitySet,
    pub spawner: Spawner,
    /// Pending one-shot transitions
    pub scheduler: Scheduler,
    pub ticker: TickerState,
    /// Monotonic simulation clock (microseconds)
    pub clock_us: u64,
    /// Unrounded simulated time; `clock_us` is derived from it so per-tick
    /// rounding never accumulates
    pub elapsed_secs: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once a terminal phase has been finalized
    pub summary: Option<RunSummary>,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a game in the Boot phase with validated tuning
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Result<Self, ConfigError> {
        tuning.validate()?;
        tuning.validate_viewport(viewport)?;
        Ok(Self::build(seed, tuning, viewport))
    }

    /// Default tuning and viewport
    pub fn with_seed(seed: u64) -> Self {
        Self::build(seed, Tuning::default(), Viewport::default())
    }

    fn build(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            run: RunState::new(&tuning),
            player: Player::spawn(viewport),
            coins: EntitySet::new(),
            bosses: EntitySet::new(),
            spawner: Spawner::new(&tuning),
            scheduler: Scheduler::new(),
            ticker: TickerState::new(viewport.width, tuning.ticker_speed),
            clock_us: 0,
            elapsed_secs: 0.0,
            time_ticks: 0,
            summary: None,
            events: Vec::new(),
            phase: GamePhase::Boot,
            tuning,
            viewport,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Host reported a new viewport size
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.tuning.validate_viewport(viewport)?;
        self.viewport = viewport;
        Ok(())
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
