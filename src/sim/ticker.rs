//! Scrolling news-style ticker
//!
//! Shows run stats by default; a special coin swaps in a celebratory banner
//! for a fixed window, after which the stats banner comes back.

use serde::{Deserialize, Serialize};

use super::state::RunState;
use crate::format::{format_money, format_multiplier};
use crate::millis_to_micros;
use crate::tuning::{Tuning, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickerMode {
    #[default]
    Default,
    Special,
}

/// Ticker display state (derived from run state every tick)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerState {
    pub mode: TickerMode,
    pub special_message: String,
    /// Clock time the special banner stops showing
    pub special_expires_us: u64,
    /// Left edge of the text, in pixels
    pub scroll_x: f32,
    /// Pixels per second
    pub scroll_speed: f32,
    /// Text rendered this tick
    pub text: String,
    /// Scrolling halted for a pause or end of run
    pub frozen: bool,
}

impl TickerState {
    pub fn new(viewport_width: f32, speed: f32) -> Self {
        Self {
            mode: TickerMode::Default,
            special_message: String::new(),
            special_expires_us: 0,
            scroll_x: viewport_width,
            scroll_speed: speed,
            text: String::new(),
            frozen: false,
        }
    }

    /// Start a fresh default period at the right edge
    pub fn reset(&mut self, viewport_width: f32, speed: f32) {
        *self = Self::new(viewport_width, speed);
    }

    /// Show `message` for `duration_ms` starting at `now_us`
    pub fn start_special(&mut self, message: &str, now_us: u64, duration_ms: u64) {
        self.mode = TickerMode::Special;
        self.special_message = message.to_string();
        self.special_expires_us = now_us + millis_to_micros(duration_ms);
    }

    /// Halt scrolling until the next reset
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.scroll_speed = 0.0;
    }

    pub fn is_special(&self) -> bool {
        self.mode == TickerMode::Special
    }

    /// Refresh text and advance the scroll position
    pub fn update(
        &mut self,
        now_us: u64,
        dt: f32,
        run: &RunState,
        tuning: &Tuning,
        viewport: Viewport,
    ) {
        if self.mode == TickerMode::Special && now_us >= self.special_expires_us {
            self.mode = TickerMode::Default;
            self.scroll_x = viewport.width;
            if !self.frozen {
                self.scroll_speed = tuning.ticker_speed;
            }
        }

        self.text = match self.mode {
            TickerMode::Special => self.special_message.clone(),
            TickerMode::Default => default_banner(run, tuning),
        };

        self.scroll_x -= self.scroll_speed * dt;
        if self.scroll_x + text_width(&self.text, tuning.ticker_glyph_width) < 0.0 {
            self.scroll_x = viewport.width;
        }
    }
}

/// Stats banner: wealth, distance to goal, coins and multiplier
pub fn default_banner(run: &RunState, tuning: &Tuning) -> String {
    format!(
        "{} • Wealth: {} • To Goal: {} • Coins: {} • Multiplier: x{}",
        tuning.player_name,
        format_money(run.wealth),
        format_money(run.to_goal()),
        run.coins_collected,
        format_multiplier(run.multiplier)
    )
}

/// Rendered width estimate for the ticker font
pub fn text_width(text: &str, glyph_width: f32) -> f32 {
    text.chars().count() as f32 * glyph_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (TickerState, RunState, Tuning, Viewport) {
        let tuning = Tuning::default();
        let viewport = Viewport::default();
        (
            TickerState::new(viewport.width, tuning.ticker_speed),
            RunState::new(&tuning),
            tuning,
            viewport,
        )
    }

    #[test]
    fn test_default_banner() {
        let (_, mut run, tuning, _) = setup();
        run.wealth = 1_500_000.0;
        run.coins_collected = 12;
        run.multiplier = 4.0;
        assert_eq!(
            default_banner(&run, &tuning),
            "VIKTOR • Wealth: $1.50M • To Goal: $998.50M • Coins: 12 • Multiplier: x4"
        );
    }

    #[test]
    fn test_special_window_is_exact() {
        let (mut ticker, mut run, tuning, viewport) = setup();
        ticker.start_special("Promotion! Multiplier Doubled!", 0, 3000);

        ticker.update(2_999_999, 0.0, &run, &tuning, viewport);
        assert!(ticker.is_special());
        assert_eq!(ticker.text, "Promotion! Multiplier Doubled!");

        run.coins_collected = 3;
        ticker.update(3_000_000, 0.0, &run, &tuning, viewport);
        assert!(!ticker.is_special());
        assert_eq!(ticker.text, default_banner(&run, &tuning));
        assert_eq!(ticker.scroll_x, viewport.width);
    }

    #[test]
    fn test_scroll_and_wrap() {
        let (mut ticker, run, tuning, viewport) = setup();
        ticker.update(0, 1.0, &run, &tuning, viewport);
        assert_eq!(ticker.scroll_x, viewport.width - tuning.ticker_speed);

        // Push the text fully past the left edge
        ticker.scroll_x = -text_width(&ticker.text, tuning.ticker_glyph_width);
        ticker.update(0, 0.1, &run, &tuning, viewport);
        assert_eq!(ticker.scroll_x, viewport.width);
    }

    #[test]
    fn test_freeze_survives_special_expiry() {
        let (mut ticker, run, tuning, viewport) = setup();
        ticker.start_special("Good Investment! Multiplier Doubled!", 0, 3000);
        ticker.freeze();
        ticker.update(4_000_000, 0.5, &run, &tuning, viewport);
        assert!(!ticker.is_special());
        assert_eq!(ticker.scroll_speed, 0.0);
        assert_eq!(ticker.scroll_x, viewport.width);

        ticker.reset(viewport.width, tuning.ticker_speed);
        assert!(!ticker.frozen);
        assert_eq!(ticker.scroll_speed, tuning.ticker_speed);
    }
}
