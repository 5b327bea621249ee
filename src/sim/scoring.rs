//! Collision resolution: coins pay out, bosses cost lives
//!
//! Hosts that do their own overlap detection can call [`GameState::collect_coin`]
//! and [`GameState::hit_boss`] directly; the tick driver calls
//! [`GameState::resolve_overlaps`].

use super::collision::overlapping;
use super::state::{EntityId, EntityKind, GameEvent, GamePhase, GameState};
use super::timers::TimerEvent;

impl GameState {
    /// Consume a coin: pay `value * multiplier`, count it, and double the
    /// multiplier if it was special.
    ///
    /// A special coin pays at the multiplier in force when it is touched and
    /// only then doubles it, so the doubling applies from the next coin on.
    /// Hosts that expect a special coin to pay at the doubled multiplier
    /// (double, then pay) will see half that payout here.
    ///
    /// Returns `false` if the coin is already gone (each coin pays once).
    pub fn collect_coin(&mut self, id: EntityId) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(coin) = self.coins.remove(id) else {
            return false;
        };
        let EntityKind::Coin {
            kind,
            value,
            special,
        } = coin.kind
        else {
            return false;
        };

        let value_added = self.tuning.rounding.apply(value as f64 * self.run.multiplier);
        self.run.wealth += value_added;
        self.run.coins_collected += 1;

        log::debug!(
            "Coin {} collected: +{} at x{} (wealth {})",
            id,
            value_added,
            self.run.multiplier,
            self.run.wealth
        );
        self.events.push(GameEvent::CoinCollected {
            id,
            kind,
            special,
            value_added,
        });

        if special {
            self.run.multiplier *= 2.0;
            let message = self
                .tuning
                .coin(kind)
                .map(|spec| spec.special_message.clone())
                .unwrap_or_default();
            self.ticker
                .start_special(&message, self.clock_us, self.tuning.special_ticker_ms);
            log::info!("Special coin! Multiplier now x{}", self.run.multiplier);
            self.events.push(GameEvent::MultiplierDoubled {
                multiplier: self.run.multiplier,
                message,
            });
        }
        true
    }

    /// Apply one boss hit: a life is lost and play freezes.
    ///
    /// With lives left the run pauses for a respawn prompt; otherwise it is
    /// lost. A run already at the goal goes to victory instead. Returns
    /// `false` if no hit was applied.
    pub fn hit_boss(&mut self, id: EntityId) -> bool {
        if self.phase != GamePhase::Playing || !self.bosses.contains(id) {
            return false;
        }
        if self.run.goal_reached() {
            self.begin_victory();
            return false;
        }

        self.run.lives = self.run.lives.saturating_sub(1);
        self.ticker.freeze();
        self.events.push(GameEvent::BossHit {
            id,
            lives_remaining: self.run.lives,
        });

        let delay = self.tuning.boss_hit_delay_ms;
        if self.run.lives > 0 {
            log::info!("Boss hit, {} lives remaining", self.run.lives);
            self.run.record_highest_multiplier();
            self.phase = GamePhase::RespawnPause {
                prompt_shown: false,
            };
            self.scheduler
                .schedule(self.clock_us, delay, TimerEvent::ShowRespawnPrompt);
        } else {
            log::info!("Boss hit, no lives left");
            self.phase = GamePhase::Defeat;
            self.scheduler
                .schedule(self.clock_us, delay, TimerEvent::FinalizeDefeat);
        }
        true
    }

    /// Wealth interest while playing (no-op when the rate is zero)
    pub(crate) fn apply_compounding(&mut self, dt: f32) {
        let rate = self.tuning.compound_rate_per_sec;
        if rate > 0.0 {
            self.run.wealth += self.run.wealth * rate * dt as f64;
        }
    }

    /// Resolve this tick's overlaps: every touched coin, then at most one boss.
    ///
    /// Coins that reach the goal win the run before any boss contact counts.
    pub fn resolve_overlaps(&mut self) {
        let bounds = self.player.aabb();
        for id in overlapping(&bounds, &self.coins) {
            self.collect_coin(id);
        }
        if self.run.goal_reached() {
            self.begin_victory();
            return;
        }
        if let Some(&id) = overlapping(&bounds, &self.bosses).first() {
            self.hit_boss(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::sim::state::{Entity, RunInit};
    use crate::tuning::RoundingPolicy;

    fn playing_state() -> GameState {
        let mut state = GameState::with_seed(42);
        state.phase = GamePhase::Title;
        state
            .start_run(RunInit::default())
            .expect("default init is valid");
        state
    }

    fn place_coin(state: &mut GameState, kind: usize, value: u32, special: bool) -> EntityId {
        let id = state.next_entity_id();
        state.coins.insert(Entity {
            id,
            kind: EntityKind::Coin {
                kind,
                value,
                special,
            },
            pos: state.player.pos,
            vel_x: -200.0,
            scale: 0.08,
            size: Vec2::splat(48.0),
            hitbox: Vec2::splat(48.0),
        });
        id
    }

    fn place_boss(state: &mut GameState) -> EntityId {
        let id = state.next_entity_id();
        state.bosses.insert(Entity {
            id,
            kind: EntityKind::Boss,
            pos: state.player.pos,
            vel_x: -250.0,
            scale: 0.2,
            size: Vec2::splat(120.0),
            hitbox: Vec2::splat(48.0),
        });
        id
    }

    #[test]
    fn test_regular_coin_pays_value_times_multiplier() {
        let mut state = playing_state();
        state.run.multiplier = 4.0;
        let id = place_coin(&mut state, 0, 10, false);
        assert!(state.collect_coin(id));
        assert_eq!(state.run.wealth, 40.0);
        assert_eq!(state.run.coins_collected, 1);
        assert_eq!(state.run.multiplier, 4.0);
        assert!(!state.ticker.is_special());
    }

    #[test]
    fn test_coin_consumed_once() {
        let mut state = playing_state();
        let id = place_coin(&mut state, 0, 10, false);
        assert!(state.collect_coin(id));
        assert!(!state.collect_coin(id));
        assert_eq!(state.run.coins_collected, 1);
        assert_eq!(state.run.wealth, 10.0);
    }

    #[test]
    fn test_special_coin_doubles_after_paying() {
        let mut state = playing_state();
        let id = place_coin(&mut state, 1, 20, true);
        assert!(state.collect_coin(id));
        assert_eq!(state.run.wealth, 20.0);
        assert_eq!(state.run.multiplier, 2.0);
        assert!(state.ticker.is_special());
        assert_eq!(state.ticker.special_message, "Promotion! Multiplier Doubled!");
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::MultiplierDoubled { multiplier, .. } if *multiplier == 2.0
        )));
    }

    #[test]
    fn test_rounding_policy_applies() {
        let mut state = playing_state();
        state.tuning.rounding = RoundingPolicy::Floor;
        state.run.multiplier = 1.5;
        let id = place_coin(&mut state, 0, 5, false);
        state.collect_coin(id);
        assert_eq!(state.run.wealth, 7.0);
    }

    #[test]
    fn test_boss_hit_with_lives_left_pauses() {
        let mut state = playing_state();
        state.run.multiplier = 8.0;
        let id = place_boss(&mut state);
        assert!(state.hit_boss(id));
        assert_eq!(state.run.lives, 2);
        assert_eq!(state.run.highest_multiplier, 8.0);
        assert_eq!(
            state.phase,
            GamePhase::RespawnPause {
                prompt_shown: false
            }
        );
        assert!(state.scheduler.is_pending(TimerEvent::ShowRespawnPrompt));
        assert_eq!(state.ticker.scroll_speed, 0.0);
        // Frozen: a second hit is ignored
        assert!(!state.hit_boss(id));
        assert_eq!(state.run.lives, 2);
    }

    #[test]
    fn test_last_life_schedules_defeat() {
        let mut state = playing_state();
        state.run.lives = 1;
        let id = place_boss(&mut state);
        assert!(state.hit_boss(id));
        assert_eq!(state.run.lives, 0);
        assert_eq!(state.phase, GamePhase::Defeat);
        assert!(state.scheduler.is_pending(TimerEvent::FinalizeDefeat));
    }

    #[test]
    fn test_resolve_overlaps_one_boss_per_tick() {
        let mut state = playing_state();
        place_boss(&mut state);
        place_boss(&mut state);
        place_coin(&mut state, 0, 10, false);
        place_coin(&mut state, 1, 20, false);
        state.resolve_overlaps();
        assert_eq!(state.run.coins_collected, 2);
        assert_eq!(state.run.wealth, 30.0);
        assert_eq!(state.run.lives, 2);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_goal_coin_beats_boss_on_last_life() {
        let mut state = playing_state();
        state.run.lives = 1;
        state.run.wealth = 999_999_999.0;
        place_coin(&mut state, 0, 5, false);
        place_boss(&mut state);
        state.resolve_overlaps();

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.run.lives, 1);
        assert_eq!(state.run.wealth, 1_000_000_004.0);
        assert!(state.scheduler.is_pending(TimerEvent::FinalizeVictory));
        assert!(!state.scheduler.is_pending(TimerEvent::FinalizeDefeat));

        state.on_timer(TimerEvent::FinalizeVictory);
        let summary = state.summary.clone().expect("victory finalized");
        assert!(summary.goal_reached);
        assert_eq!(summary.lives, 1);
        assert_eq!(summary.to_goal, 0.0);
    }

    #[test]
    fn test_goal_coin_beats_boss_with_lives_left() {
        let mut state = playing_state();
        state.run.wealth = 999_999_990.0;
        place_coin(&mut state, 1, 20, false);
        place_boss(&mut state);
        state.resolve_overlaps();

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.run.lives, 3);
        assert!(!state.scheduler.is_pending(TimerEvent::ShowRespawnPrompt));
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::BossHit { .. })));
    }

    #[test]
    fn test_hit_boss_at_goal_starts_victory() {
        let mut state = playing_state();
        state.run.wealth = state.run.goal;
        let id = place_boss(&mut state);
        assert!(!state.hit_boss(id));
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.run.lives, 3);
    }

    #[test]
    fn test_compounding() {
        let mut state = playing_state();
        state.run.wealth = 100.0;
        state.apply_compounding(1.0);
        assert_eq!(state.run.wealth, 100.0);
        state.tuning.compound_rate_per_sec = 0.5;
        state.apply_compounding(1.0);
        assert_eq!(state.run.wealth, 150.0);
    }

    proptest! {
        #[test]
        fn wealth_and_multiplier_follow_collection_rules(
            coins in prop::collection::vec((0usize..2, any::<bool>()), 1..40)
        ) {
            let mut state = playing_state();
            for (kind, special) in coins {
                let value = state.tuning.coins[kind].value;
                let before = state.run.clone();
                let id = place_coin(&mut state, kind, value, special);
                prop_assert!(state.collect_coin(id));

                prop_assert_eq!(state.run.wealth, before.wealth + value as f64 * before.multiplier);
                prop_assert_eq!(state.run.coins_collected, before.coins_collected + 1);
                let expected = if special { before.multiplier * 2.0 } else { before.multiplier };
                prop_assert_eq!(state.run.multiplier, expected);
                prop_assert!(state.run.multiplier >= 1.0);
            }
        }
    }
}
