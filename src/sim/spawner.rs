//! Coin and boss spawning
//!
//! Two repeating timers feed new entities into the tracked sets. All
//! randomness comes from the seeded game RNG.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind, GameEvent, GameState};
use super::timers::RepeatingTimer;
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn timers for the current play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    pub coin_timer: RepeatingTimer,
    pub boss_timer: RepeatingTimer,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            coin_timer: RepeatingTimer::from_millis(tuning.coin_interval_ms),
            boss_timer: RepeatingTimer::from_millis(tuning.boss_interval_ms),
        }
    }

    /// Fresh spawn cycle (timers restart from zero)
    pub fn reset(&mut self) {
        self.coin_timer.reset();
        self.boss_timer.reset();
    }

    /// Advance both timers, returning (coins, bosses) due
    pub fn advance(&mut self, dt_us: u64) -> (u32, u32) {
        (self.coin_timer.advance(dt_us), self.boss_timer.advance(dt_us))
    }
}

impl GameState {
    /// Run the spawn timers for one tick
    pub(crate) fn run_spawner(&mut self, dt_us: u64) {
        let (coins, bosses) = self.spawner.advance(dt_us);
        for _ in 0..coins {
            self.spawn_coin();
        }
        for _ in 0..bosses {
            self.spawn_boss();
        }
    }

    /// Spawn one coin just past the right edge
    pub fn spawn_coin(&mut self) {
        self.run.spawn_count += 1;

        let height = self.viewport.height;
        let y = self.rng.random_range(COIN_MARGIN..=(height - COIN_MARGIN).max(COIN_MARGIN));
        let kind = self.rng.random_range(0..self.tuning.coins.len());
        let Some((name, value, chance)) = self
            .tuning
            .coin(kind)
            .map(|spec| (spec.name.clone(), spec.value, spec.special_chance))
        else {
            return;
        };
        let special = self.rng.random_range(1..=chance) == 1;

        let side = height * COIN_SCALE;
        let id = self.next_entity_id();
        self.coins.insert(Entity {
            id,
            kind: EntityKind::Coin {
                kind,
                value,
                special,
            },
            pos: Vec2::new(self.viewport.width + COIN_SPAWN_OFFSET_X, y),
            vel_x: self.tuning.coin_velocity_x,
            scale: COIN_SCALE,
            size: Vec2::splat(side),
            hitbox: Vec2::splat(side),
        });

        log::debug!(
            "Spawned coin {} ({}) at y={:.0}{}",
            id,
            name,
            y,
            if special { " [special]" } else { "" }
        );
        self.events.push(GameEvent::CoinSpawned { id, kind, special });
    }

    /// Spawn one boss just past the right edge
    pub fn spawn_boss(&mut self) {
        let height = self.viewport.height;
        let y = self
            .rng
            .random_range(BOSS_MARGIN_TOP..=(height - BOSS_MARGIN_BOTTOM).max(BOSS_MARGIN_TOP));

        // Visual size is generous, the hitbox is a centered fraction of it
        let side = height * BOSS_SCALE;
        let id = self.next_entity_id();
        self.bosses.insert(Entity {
            id,
            kind: EntityKind::Boss,
            pos: Vec2::new(self.viewport.width + BOSS_SPAWN_OFFSET_X, y),
            vel_x: self.tuning.boss_velocity_x,
            scale: BOSS_SCALE,
            size: Vec2::splat(side),
            hitbox: Vec2::splat(side * BOSS_HITBOX_FRACTION),
        });

        log::debug!("Spawned boss {} at y={:.0}", id, y);
        self.events.push(GameEvent::BossSpawned { id });
    }

    /// Scroll coins and bosses left
    pub(crate) fn move_entities(&mut self, dt: f32) {
        for entity in self.coins.iter_mut().chain(self.bosses.iter_mut()) {
            entity.pos.x += entity.vel_x * dt;
        }
    }

    /// Drop entities that scrolled past the left edge
    pub(crate) fn cleanup_offscreen(&mut self) {
        let gone: Vec<_> = self
            .coins
            .iter()
            .chain(self.bosses.iter())
            .filter(|e| e.is_offscreen())
            .map(|e| (e.id, e.kind))
            .collect();
        for (id, kind) in gone {
            match kind {
                EntityKind::Coin { .. } => self.coins.remove(id),
                EntityKind::Boss => self.bosses.remove(id),
            };
        }
    }
}
