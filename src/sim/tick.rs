//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Order
//! within a tick is fixed: timers → spawn → move → collisions →
//! terminal checks → ticker.

use super::state::{Entity, GamePhase, GameState, RunInit};
use crate::secs_to_micros;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer down / tap this tick
    pub tap: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Boot {
        log::info!("Boot complete");
        state.phase = GamePhase::Title;
    }

    let prev_us = state.clock_us;
    state.elapsed_secs += dt.max(0.0) as f64;
    state.clock_us = secs_to_micros(state.elapsed_secs).max(prev_us);
    let dt_us = state.clock_us - prev_us;
    state.time_ticks += 1;

    let mut tap = input.tap;
    if input.autopilot {
        tap |= autopilot_wants_tap(state);
    }
    if tap {
        handle_tap(state);
    }

    for event in state.scheduler.take_due(state.clock_us) {
        state.on_timer(event);
    }

    if state.phase == GamePhase::Playing {
        state.run_spawner(dt_us);

        state.player.integrate(state.tuning.gravity, dt);
        state.move_entities(dt);
        state.cleanup_offscreen();
        state.apply_compounding(dt);

        state.resolve_overlaps();

        // A coin collected this tick can still win the run this tick
        if state.phase == GamePhase::Playing && state.run.goal_reached() {
            state.begin_victory();
        } else if state.phase == GamePhase::Playing && state.player.out_of_bounds(state.viewport)
        {
            state.fall_out_of_bounds();
        }
    }

    state
        .ticker
        .update(state.clock_us, dt, &state.run, &state.tuning, state.viewport);
}

/// A tap means something different in every phase
fn handle_tap(state: &mut GameState) {
    match state.phase {
        GamePhase::Title => {
            if let Err(err) = state.start_run(RunInit::fresh()) {
                log::warn!("Could not start run: {}", err);
            }
        }
        GamePhase::Playing => state.player.flap(state.tuning.jump_velocity),
        GamePhase::RespawnPause { prompt_shown: true } => {
            state.acknowledge_respawn();
        }
        GamePhase::Victory | GamePhase::Defeat if state.summary.is_some() => {
            state.restart_run();
        }
        _ => {}
    }
}

/// Demo AI: chase the nearest safe coin ahead and keep clear of the edges
fn autopilot_wants_tap(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Title | GamePhase::RespawnPause { prompt_shown: true } => return true,
        GamePhase::Victory | GamePhase::Defeat => return state.summary.is_some(),
        _ => return false,
    }

    let player = &state.player;
    let height = state.viewport.height;

    // Boss in the lane ahead: aim for whichever side of it is closer
    let threat = state.bosses.iter().find(|b| {
        let dx = b.pos.x - player.pos.x;
        dx > 0.0 && dx < 250.0 && (b.pos.y - player.pos.y).abs() < b.size.y
    });

    let target_y = match threat {
        Some(boss) if boss.pos.y >= player.pos.y => boss.pos.y - boss.size.y * 1.2,
        Some(boss) => boss.pos.y + boss.size.y * 1.2,
        None => state
            .coins
            .iter()
            .filter(|c| c.pos.x > player.pos.x - c.size.x)
            .min_by(|a, b| {
                // Specials are worth a detour
                let score = |e: &&Entity| {
                    e.pos.x - player.pos.x - if e.is_special() { 150.0 } else { 0.0 }
                };
                score(a)
                    .partial_cmp(&score(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|c| c.pos.y)
            .unwrap_or(height / 2.0),
    };
    let target_y = target_y.clamp(height * 0.15, height * 0.85);

    // Flap only when below target and already falling
    player.pos.y > target_y && player.vel_y > 0.0
}
