//! Wealth Flap - a side-scrolling coin-collecting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, scoring, run state)
//! - `game`: Host adapter (fixed timestep accumulator, latched input)
//! - `format`: Money and multiplier display strings
//! - `tuning`: Data-driven game balance
//! - `audio`: Named sound cues the host engine plays

pub mod audio;
pub mod error;
pub mod format;
pub mod game;
pub mod sim;
pub mod tuning;

pub use audio::SoundCue;
pub use error::ConfigError;
pub use format::{format_money, format_multiplier};
pub use game::Game;
pub use tuning::{CoinSpec, RoundingPolicy, Tuning, Viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the host adapter (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Wealth needed to win (1 billion)
    pub const GOAL: f64 = 1_000_000_000.0;
    pub const STARTING_LIVES: u32 = 3;

    /// Spawner intervals
    pub const COIN_SPAWN_INTERVAL_MS: u64 = 1000;
    pub const BOSS_SPAWN_INTERVAL_MS: u64 = 10_000;

    /// Delays before scheduled transitions fire
    pub const VICTORY_DELAY_MS: u64 = 1000;
    pub const BOSS_HIT_DELAY_MS: u64 = 2000;
    pub const SPECIAL_TICKER_MS: u64 = 3000;

    /// Player physics (pixels, pixels/s, pixels/s²)
    pub const GRAVITY: f32 = 600.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = -300.0;
    /// Player horizontal position as a fraction of viewport width
    pub const PLAYER_X_FRACTION: f32 = 0.2;
    /// Player sprite height as a fraction of viewport height
    pub const PLAYER_SCALE: f32 = 0.15;

    /// Coins drift left and spawn just off the right edge
    pub const COIN_VELOCITY_X: f32 = -200.0;
    pub const COIN_SPAWN_OFFSET_X: f32 = 50.0;
    pub const COIN_SCALE: f32 = 0.08;
    pub const COIN_MARGIN: f32 = 50.0;

    /// Bosses are bigger, faster, with a reduced hitbox
    pub const BOSS_VELOCITY_X: f32 = -250.0;
    pub const BOSS_SPAWN_OFFSET_X: f32 = 100.0;
    pub const BOSS_SCALE: f32 = 0.2;
    pub const BOSS_HITBOX_FRACTION: f32 = 0.4;
    pub const BOSS_MARGIN_TOP: f32 = 50.0;
    pub const BOSS_MARGIN_BOTTOM: f32 = 100.0;

    /// Ticker scroll speed (pixels/s)
    pub const DEFAULT_TICKER_SPEED: f32 = 100.0;
    /// Approximate advance of one ticker glyph (bold 20px sans)
    pub const TICKER_GLYPH_WIDTH: f32 = 11.0;

    /// Default viewport when the host has not reported one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;
}

/// Convert seconds to the nearest whole microsecond of simulation clock
#[inline]
pub fn secs_to_micros(secs: f64) -> u64 {
    if secs.is_nan() || secs <= 0.0 {
        return 0;
    }
    (secs * 1_000_000.0).round() as u64
}

/// Convert milliseconds to microseconds of simulation clock
#[inline]
pub const fn millis_to_micros(ms: u64) -> u64 {
    ms * 1000
}
