//! Run lifecycle: start, respawn, victory, defeat, restart
//!
//! Phase changes outside the per-tick simulation live here, including the
//! handlers for scheduled timer events.

use super::state::{GameEvent, GamePhase, GameState, Player, RunInit, RunState};
use super::timers::TimerEvent;
use crate::error::ConfigError;

impl GameState {
    /// Begin play from `init`, either fresh or with carried stats.
    ///
    /// Entities, timers and the ticker start over; a malformed carry payload
    /// is rejected before anything changes.
    pub fn start_run(&mut self, init: RunInit) -> Result<(), ConfigError> {
        let run = match &init.carry {
            Some(carry) => RunState::from_carry(carry, &self.tuning)?,
            None => RunState::new(&self.tuning),
        };
        let resumed = init.carry.is_some();

        self.run = run;
        self.coins.clear();
        self.bosses.clear();
        self.spawner.reset();
        self.scheduler.clear();
        self.summary = None;
        self.ticker.reset(self.viewport.width, self.tuning.ticker_speed);
        self.player = Player::spawn(self.viewport);
        if init.start_flap {
            self.player.flap(self.tuning.jump_velocity);
        }
        self.phase = GamePhase::Playing;

        let lives = self.run.lives;
        if resumed {
            log::info!(
                "Run resumed: lives={}, wealth={}, x{}",
                lives,
                self.run.wealth,
                self.run.multiplier
            );
            self.events.push(GameEvent::RunResumed { lives });
        } else {
            log::info!("Run started with {} lives", lives);
            self.events.push(GameEvent::RunStarted { lives });
        }
        Ok(())
    }

    /// Start a new run after the end-of-run summary was shown
    pub fn restart_run(&mut self) -> bool {
        if !self.phase.is_terminal() || self.summary.is_none() {
            log::warn!("Restart ignored in phase {:?}", self.phase);
            return false;
        }
        self.start_run(RunInit::fresh()).is_ok()
    }

    /// Player tapped through the respawn prompt: resume with carried stats
    pub fn acknowledge_respawn(&mut self) -> bool {
        if self.phase != (GamePhase::RespawnPause { prompt_shown: true }) {
            return false;
        }
        let init = RunInit {
            start_flap: true,
            carry: Some(self.run.carry()),
        };
        match self.start_run(init) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Respawn rejected: {}", err);
                false
            }
        }
    }

    /// Goal reached: freeze and finalize after the victory delay
    pub(crate) fn begin_victory(&mut self) {
        log::info!("Goal reached with wealth {}", self.run.wealth);
        self.phase = GamePhase::Victory;
        self.ticker.freeze();
        self.scheduler.schedule(
            self.clock_us,
            self.tuning.victory_delay_ms,
            TimerEvent::FinalizeVictory,
        );
        self.events.push(GameEvent::GoalReached {
            wealth: self.run.wealth,
        });
    }

    /// Player left the screen: the run ends immediately with no lives
    pub(crate) fn fall_out_of_bounds(&mut self) {
        log::info!("Player left the playfield at y={:.0}", self.player.pos.y);
        self.run.lives = 0;
        self.phase = GamePhase::Defeat;
        self.ticker.freeze();
        self.finalize(false);
    }

    /// Emit the terminal summary once
    fn finalize(&mut self, goal_reached: bool) {
        if self.summary.is_some() {
            return;
        }
        self.run.record_highest_multiplier();
        let summary = self.run.summary(goal_reached);
        log::info!(
            "Run finished ({}): wealth={}, coins={}, best x{}",
            if goal_reached { "victory" } else { "defeat" },
            summary.wealth,
            summary.coins,
            summary.highest_multiplier
        );
        self.summary = Some(summary.clone());
        self.events.push(GameEvent::RunFinished(summary));
    }

    /// Handle a due scheduled event. Stale events for a phase that has since
    /// moved on are dropped.
    pub(crate) fn on_timer(&mut self, event: TimerEvent) {
        match (event, self.phase) {
            (
                TimerEvent::ShowRespawnPrompt,
                GamePhase::RespawnPause {
                    prompt_shown: false,
                },
            ) => {
                self.run.record_highest_multiplier();
                self.phase = GamePhase::RespawnPause { prompt_shown: true };
                self.events.push(GameEvent::RespawnPrompt {
                    lives_remaining: self.run.lives,
                });
            }
            (TimerEvent::FinalizeVictory, GamePhase::Victory) => self.finalize(true),
            (TimerEvent::FinalizeDefeat, GamePhase::Defeat) => self.finalize(false),
            (event, phase) => {
                log::debug!("Dropped stale timer {:?} in phase {:?}", event, phase);
            }
        }
    }
}
