//! Named sound cues
//!
//! Playback and mixing belong to the host engine. The simulation only says
//! which cue an event should trigger.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types, keyed by the asset name the host loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Background music loop (starts with each run)
    BackgroundMusic,
    /// Ordinary coin collected
    CoinRegular,
    /// Special coin collected
    CoinSpecial,
    /// Player ran into a boss
    BossHit,
    /// Run ended (win or lose)
    GameOver,
}

impl SoundCue {
    /// Asset key for the host's audio loader
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::BackgroundMusic => "bgm",
            SoundCue::CoinRegular => "coin_regular",
            SoundCue::CoinSpecial => "coin_special",
            SoundCue::BossHit => "boss_hit",
            SoundCue::GameOver => "game_over",
        }
    }

    /// Whether the host should loop the cue
    pub fn looping(&self) -> bool {
        matches!(self, SoundCue::BackgroundMusic)
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::RunStarted { .. } | GameEvent::RunResumed { .. } => {
                Some(SoundCue::BackgroundMusic)
            }
            GameEvent::CoinCollected { special: true, .. } => Some(SoundCue::CoinSpecial),
            GameEvent::CoinCollected { .. } => Some(SoundCue::CoinRegular),
            GameEvent::BossHit { .. } => Some(SoundCue::BossHit),
            GameEvent::RunFinished(_) => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}
