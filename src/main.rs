//! Alien Defense - headless native runner
//!
//! Usage: `alien-defense [--config cfg.json] [--seed N] [--max-ticks N]`
//!
//! Plays one session with a simple autopilot, paced by the fixed-step clock
//! against simulated 60 Hz frames, and prints a JSON summary at the end.

use std::path::PathBuf;

use alien_defense::audio::AudioManager;
use alien_defense::sim::{EntityKind, GameState, PlayerIntent, SimulationClock, tick};
use alien_defense::GameConfig;
use clap::Parser;
use serde::Serialize;

/// Simulated display refresh interval
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "alien-defense")]
#[command(about = "Play one headless Alien Defense session with an autopilot")]
struct Args {
    /// JSON config file; missing keys take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session seed
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Stop after this many ticks if the player is still alive
    #[arg(long, default_value_t = 40 * 60 * 5)]
    max_ticks: u64,

    /// Master volume for logged sound cues (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,

    /// Effects volume for logged sound cues (0.0 - 1.0)
    #[arg(long, default_value_t = 1.0)]
    sfx_volume: f32,

    /// Drop all sound cues
    #[arg(long)]
    mute: bool,
}

/// Drives the player toward the most threatening alien and fires on a cadence
#[derive(Debug, Default)]
struct Autopilot {
    held_fire: bool,
}

impl Autopilot {
    fn intent(&mut self, state: &GameState) -> PlayerIntent {
        let Some(player) = state.registry.player() else {
            return PlayerIntent::default();
        };
        let player_x = player.rect.center().x;

        // Lowest alien is the closest threat
        let target = state
            .registry
            .live(EntityKind::Alien)
            .max_by_key(|a| (a.rect.bottom(), a.id))
            .map(|a| a.rect.center().x);

        let move_dir = match target {
            Some(x) if x < player_x - 8 => -1,
            Some(x) if x > player_x + 8 => 1,
            _ => 0,
        };

        // Release every other tick so each press registers
        self.held_fire = !self.held_fire && target.is_some();

        let rocket_under_alien = state.registry.rocket().is_some_and(|rocket| {
            state
                .registry
                .live(EntityKind::Alien)
                .any(|a| a.rect.bottom() >= rocket.rect.top())
        });

        PlayerIntent {
            move_dir,
            fire_bullet: self.held_fire,
            fire_rocket: state.time_ticks % 120 == 0,
            fire_laser: state.time_ticks % 400 == 200,
            explode_rocket: rocket_under_alien,
        }
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    score: u64,
    ticks: u64,
    game_over: bool,
    live_entities: usize,
}

fn load_config(path: Option<&PathBuf>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match GameConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!(
                "Using default config, {} was rejected: {e}",
                path.display()
            );
            GameConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Alien Defense (headless) starting...");

    let args = Args::parse();
    let config = load_config(args.config.as_ref());
    let seed = args.seed;
    let max_ticks = args.max_ticks;

    log::info!(
        "Running at {} ticks/s ({:.3}s per tick), seed {seed}",
        config.tick_rate,
        config.tick_dt()
    );
    let mut clock = SimulationClock::new(config.tick_rate, config.max_substeps);
    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start session: {e}");
            std::process::exit(1);
        }
    };

    let mut audio = AudioManager::new();
    audio.set_master_volume(args.volume);
    audio.set_sfx_volume(args.sfx_volume);
    audio.set_muted(args.mute);
    let mut pilot = Autopilot::default();

    while !state.is_session_over() && state.tick_count() < max_ticks {
        for _ in 0..clock.advance(FRAME_DT) {
            let intent = pilot.intent(&state);
            tick(&mut state, &intent);

            for cue in audio.cues(state.events()) {
                log::trace!("tick {}: play {}", state.tick_count(), cue.effect.file_name());
            }
            if state.is_session_over() || state.tick_count() >= max_ticks {
                break;
            }
        }
    }
    if !state.is_session_over() {
        state.quit();
        tick(&mut state, &PlayerIntent::default());
    }

    let summary = Summary {
        seed,
        score: state.score(),
        ticks: state.tick_count(),
        game_over: state.is_session_over(),
        live_entities: state.live_entities().len(),
    };
    log::info!("Session ended after {} ticks, score {}", summary.ticks, summary.score);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_numbers_are_rejected() {
        assert!(Args::try_parse_from(["alien-defense", "--seed", "12x"]).is_err());
        assert!(Args::try_parse_from(["alien-defense", "--max-ticks", "-3"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["alien-defense"]).unwrap();
        assert_eq!(args.seed, 0x5eed);
        assert_eq!(args.max_ticks, 12_000);
        assert!(args.config.is_none());
        assert!(!args.mute);

        let args = Args::try_parse_from(["alien-defense", "--seed", "42", "--mute"]).unwrap();
        assert_eq!(args.seed, 42);
        assert!(args.mute);
    }
}
