//! Wealth Flap entry point
//!
//! Rendering and audio belong to the host engine. Natively this runs a
//! headless autopilot game and prints the end-of-run summary as JSON.
//!
//! Usage: `wealth-flap [seed] [tuning.json]`

use wealth_flap::sim::GameEvent;
use wealth_flap::{ConfigError, Game, SoundCue, Tuning, Viewport, format_money};

/// 60 fps host frames
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after ten minutes of game time
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn main() {
    env_logger::init();
    log::info!("Wealth Flap (headless) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(20_240_611);
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Io { path, source })?;
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    let mut game = Game::new(seed, tuning, Viewport::default())?;
    game.set_autopilot(true);

    for frame in 0..MAX_FRAMES {
        game.update(FRAME_DT);

        for event in game.take_events() {
            if let Some(cue) = SoundCue::for_event(&event) {
                log::debug!("frame {}: play {}", frame, cue.as_str());
            }
            match event {
                GameEvent::MultiplierDoubled { multiplier, message } => {
                    log::info!("{} (x{})", message, multiplier);
                }
                GameEvent::RespawnPrompt { lives_remaining } => {
                    log::info!(
                        "{} {} remaining",
                        lives_remaining,
                        if lives_remaining == 1 { "life" } else { "lives" }
                    );
                }
                GameEvent::RunFinished(summary) => {
                    log::info!(
                        "{}: {} after {} coins",
                        if summary.goal_reached { "Victory!" } else { "Game Over" },
                        format_money(summary.wealth),
                        summary.coins
                    );
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                    return Ok(());
                }
                _ => {}
            }
        }
    }

    log::warn!("No result after {} frames", MAX_FRAMES);
    println!("{}", game.state.ticker.text);
    Ok(())
}
