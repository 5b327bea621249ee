//! Host adapter
//!
//! Turns variable frame deltas into fixed simulation ticks and latches
//! one-shot pointer input until a tick consumes it.

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{GameEvent, GamePhase, GameState, RunSummary, TickInput, tick};
use crate::tuning::{Tuning, Viewport};

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Result<Self, ConfigError> {
        Ok(Self::from_state(GameState::new(seed, tuning, viewport)?))
    }

    /// Default tuning and viewport
    pub fn with_seed(seed: u64) -> Self {
        Self::from_state(GameState::with_seed(seed))
    }

    fn from_state(state: GameState) -> Self {
        log::info!("Game initialized with seed: {}", state.seed);
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Pointer down; consumed by the next simulation tick
    pub fn tap(&mut self) {
        self.input.tap = true;
    }

    /// Idle/demo mode
    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.input.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.input.autopilot = enabled;
    }

    /// Run simulation ticks for a frame of `frame_dt` seconds.
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        // A bad host timestamp must not poison the accumulator
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.tap = false;
        }
        substeps
    }

    pub fn resize(&mut self, viewport: Viewport) -> Result<(), ConfigError> {
        self.state.resize(viewport)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        self.state.summary.as_ref()
    }

    /// Drain events for sound cues and effects
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }
}
