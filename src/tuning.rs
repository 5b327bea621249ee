//! Data-driven game balance
//!
//! Every number the simulation uses can be overridden from JSON. Missing
//! fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Viewport dimensions reported by the host engine (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// How `value * multiplier` is turned into a wealth increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    #[default]
    Exact,
    Floor,
    Round,
}

impl RoundingPolicy {
    pub fn apply(&self, amount: f64) -> f64 {
        match self {
            RoundingPolicy::Exact => amount,
            RoundingPolicy::Floor => amount.floor(),
            RoundingPolicy::Round => amount.round(),
        }
    }
}

/// One collectible coin kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSpec {
    /// Texture key the host renders (also the identity of the kind)
    pub name: String,
    /// Base value before the multiplier
    pub value: u32,
    /// A coin is special on a 1-in-N draw
    pub special_chance: u32,
    /// Ticker banner shown when a special coin of this kind is collected
    pub special_message: String,
}

/// Game balance and rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Name shown at the head of the ticker banner
    pub player_name: String,
    pub goal: f64,
    pub starting_lives: u32,

    // === Spawning ===
    pub coin_interval_ms: u64,
    pub boss_interval_ms: u64,
    pub coins: Vec<CoinSpec>,
    pub coin_velocity_x: f32,
    pub boss_velocity_x: f32,

    // === Player ===
    pub gravity: f32,
    pub jump_velocity: f32,

    // === Scoring ===
    pub rounding: RoundingPolicy,
    /// Wealth growth per second while playing (0 disables compounding)
    pub compound_rate_per_sec: f64,

    // === Transitions ===
    pub victory_delay_ms: u64,
    pub boss_hit_delay_ms: u64,
    pub special_ticker_ms: u64,

    // === Ticker ===
    pub ticker_speed: f32,
    pub ticker_glyph_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_name: "VIKTOR".to_string(),
            goal: GOAL,
            starting_lives: STARTING_LIVES,

            coin_interval_ms: COIN_SPAWN_INTERVAL_MS,
            boss_interval_ms: BOSS_SPAWN_INTERVAL_MS,
            coins: vec![
                CoinSpec {
                    name: "coin1".to_string(),
                    value: 10,
                    special_chance: 10,
                    special_message: "Good Investment! Multiplier Doubled!".to_string(),
                },
                CoinSpec {
                    name: "coin2".to_string(),
                    value: 20,
                    special_chance: 20,
                    special_message: "Promotion! Multiplier Doubled!".to_string(),
                },
            ],
            coin_velocity_x: COIN_VELOCITY_X,
            boss_velocity_x: BOSS_VELOCITY_X,

            gravity: GRAVITY,
            jump_velocity: PLAYER_JUMP_VELOCITY,

            rounding: RoundingPolicy::Exact,
            compound_rate_per_sec: 0.0,

            victory_delay_ms: VICTORY_DELAY_MS,
            boss_hit_delay_ms: BOSS_HIT_DELAY_MS,
            special_ticker_ms: SPECIAL_TICKER_MS,

            ticker_speed: DEFAULT_TICKER_SPEED,
            ticker_glyph_width: TICKER_GLYPH_WIDTH,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: goal={}, lives={}, {} coin kinds",
            tuning.goal,
            tuning.starting_lives,
            tuning.coins.len()
        );
        Ok(tuning)
    }

    /// Reject tuning that would break scoring or spawning invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goal.is_nan() || self.goal <= 0.0 {
            return Err(ConfigError::NonPositive { field: "goal" });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NonPositive {
                field: "starting_lives",
            });
        }
        if self.coin_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "coin_interval_ms",
            });
        }
        if self.boss_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "boss_interval_ms",
            });
        }
        if self.special_ticker_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "special_ticker_ms",
            });
        }
        if self.ticker_glyph_width.is_nan() || self.ticker_glyph_width <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "ticker_glyph_width",
            });
        }
        if self.coins.is_empty() {
            return Err(ConfigError::EmptyCoinTable);
        }
        for (i, coin) in self.coins.iter().enumerate() {
            if coin.special_chance == 0 {
                return Err(ConfigError::ZeroSpecialChance {
                    name: coin.name.clone(),
                });
            }
            if self.coins[..i].iter().any(|c| c.name == coin.name) {
                return Err(ConfigError::DuplicateCoinKind {
                    name: coin.name.clone(),
                });
            }
        }
        if !self.compound_rate_per_sec.is_finite() || self.compound_rate_per_sec < 0.0 {
            return Err(ConfigError::InvalidCompounding(self.compound_rate_per_sec));
        }
        Ok(())
    }

    /// Check that the spawn bands fit inside a viewport
    pub fn validate_viewport(&self, viewport: Viewport) -> Result<(), ConfigError> {
        if !viewport.width.is_finite() || viewport.width <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "viewport.width",
            });
        }
        if !viewport.height.is_finite() || viewport.height <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "viewport.height",
            });
        }
        let min = BOSS_MARGIN_TOP;
        let max = viewport.height - BOSS_MARGIN_BOTTOM;
        if max < min {
            return Err(ConfigError::EmptySpawnBand {
                min,
                max,
                height: viewport.height,
            });
        }
        Ok(())
    }

    /// Look up a coin kind by index into the coin table
    pub fn coin(&self, kind: usize) -> Option<&CoinSpec> {
        self.coins.get(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!(tuning.validate_viewport(Viewport::default()).is_ok());
        assert_eq!(tuning.goal, 1_000_000_000.0);
        assert_eq!(tuning.coins.len(), 2);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "goal": 10000, "rounding": "floor" }"#).unwrap();
        assert_eq!(tuning.goal, 10_000.0);
        assert_eq!(tuning.rounding, RoundingPolicy::Floor);
        assert_eq!(tuning.starting_lives, STARTING_LIVES);
    }

    #[test]
    fn test_rejects_bad_tuning() {
        assert!(matches!(
            Tuning::from_json(r#"{ "coins": [] }"#),
            Err(ConfigError::EmptyCoinTable)
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "starting_lives": 0 }"#),
            Err(ConfigError::NonPositive { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "compound_rate_per_sec": -0.5 }"#),
            Err(ConfigError::InvalidCompounding(_))
        ));
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_zero_special_chance() {
        let mut tuning = Tuning::default();
        tuning.coins[0].special_chance = 0;
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::ZeroSpecialChance { .. })
        ));
    }

    #[test]
    fn test_rejects_tiny_viewport() {
        let tuning = Tuning::default();
        let viewport = Viewport {
            width: 320.0,
            height: 120.0,
        };
        assert!(matches!(
            tuning.validate_viewport(viewport),
            Err(ConfigError::EmptySpawnBand { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_viewport() {
        let tuning = Tuning::default();
        for viewport in [
            Viewport {
                width: 800.0,
                height: f32::NAN,
            },
            Viewport {
                width: f32::INFINITY,
                height: 600.0,
            },
            Viewport {
                width: 800.0,
                height: f32::INFINITY,
            },
        ] {
            assert!(matches!(
                tuning.validate_viewport(viewport),
                Err(ConfigError::NonPositive { .. })
            ));
        }
    }

    #[test]
    fn test_rounding_policy() {
        assert_eq!(RoundingPolicy::Exact.apply(2.5), 2.5);
        assert_eq!(RoundingPolicy::Floor.apply(2.5), 2.0);
        assert_eq!(RoundingPolicy::Round.apply(2.5), 3.0);
    }
}
