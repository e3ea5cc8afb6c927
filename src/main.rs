//! Fruit Slicer entry point
//!
//! Headless driver: plays rounds with a simple autoplay bot at the fixed
//! tick rate and prints the leaderboard. A windowed frontend drives the
//! same `Session` with real input instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;

use fruit_slicer::audio::AudioManager;
use fruit_slicer::consts::*;
use fruit_slicer::highscores::{format_date, now_ms};
use fruit_slicer::sim::{GameEvent, GameMode, ObjectKind, RoundState, TickInput};
use fruit_slicer::{FileLedger, Session, SessionPhase, Settings};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMode {
    Pointer,
    Keyboard,
}

impl From<CliMode> for GameMode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Pointer => GameMode::Pointer,
            CliMode::Keyboard => GameMode::Keyboard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fruit-slicer")]
#[command(about = "Deterministic fruit-slicing rounds with an autoplay bot")]
struct Cli {
    #[arg(long, value_enum, default_value_t = CliMode::Pointer)]
    mode: CliMode,
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Name written to the score ledger (defaults to the saved settings)
    #[arg(long)]
    player: Option<String>,
    #[arg(long, default_value = FileLedger::DEFAULT_FILE)]
    ledger: PathBuf,
    #[arg(long, default_value = Settings::DEFAULT_FILE)]
    settings: PathBuf,
    /// Directory holding images/ and musique/
    #[arg(long, default_value = ".")]
    assets: PathBuf,
    /// Stop after this many ticks even if the round is still running
    #[arg(long, default_value_t = 2_000)]
    max_ticks: u32,
    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    /// Every Nth tick the bot holds back (0 = never)
    #[arg(long, default_value_t = 4)]
    miss_every: u32,
    /// Empty the ledger before playing
    #[arg(long)]
    clear_scores: bool,
}

/// Pick the next input: the first eligible fruit in catalogue order.
/// Bombs are never targeted; in pointer mode a tap that would also land on
/// a bomb is skipped.
///
/// Works in play-area coordinates. A windowed frontend builds pointer input
/// with `TickInput::pointer_from_screen` and draws `FrameSnapshot`s through
/// `assets::SpriteSet`.
fn bot_input(round: &RoundState) -> TickInput {
    // Speed factor the coming tick will use
    let speed = if round.is_slow_motion() { 0.0 } else { NORMAL_SPEED_FACTOR };
    let next_box = |pos: Vec2, vel: Vec2| pos + vel * speed;

    let bombs: Vec<(Vec2, f32)> = round
        .objects
        .iter()
        .filter(|o| o.kind == ObjectKind::Hazard && o.is_eligible())
        .map(|o| (next_box(o.position, o.velocity), o.bounding_size))
        .collect();

    for obj in round.objects.iter() {
        if obj.kind == ObjectKind::Hazard || !obj.is_eligible() {
            continue;
        }
        match round.mode {
            GameMode::Pointer => {
                let aim = next_box(obj.position, obj.velocity) + Vec2::splat(obj.bounding_size / 2.0);
                let hits_bomb = bombs.iter().any(|(pos, size)| {
                    aim.cmpgt(*pos).all() && aim.cmplt(*pos + Vec2::splat(*size)).all()
                });
                if hits_bomb {
                    continue;
                }
                return TickInput {
                    pointer: aim,
                    pointer_pressed: true,
                    ..Default::default()
                };
            }
            GameMode::Keyboard => {
                // Fruits come before the bomb in catalogue order, so a shared letter hits the fruit
                return TickInput {
                    pressed_symbol: obj.symbol,
                    ..Default::default()
                };
            }
        }
    }
    TickInput::default()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = Settings::load(&cli.settings);
    if let Some(player) = &cli.player {
        settings.player_name = player.clone();
    }
    let seed = cli.seed.unwrap_or_else(|| now_ms() as u64);
    log::info!("Fruit Slicer starting (seed {seed})");

    let audio = AudioManager::new(&cli.assets, &settings);
    let ledger = FileLedger::new(&cli.ledger);
    let mut session = Session::new(settings, ledger, audio, seed, cli.mode.into());

    if cli.clear_scores {
        session
            .clear_scores()
            .with_context(|| format!("clearing {}", cli.ledger.display()))?;
    }

    for round in 1..=cli.rounds {
        session.start_round();
        let mut ticks = 0;
        let mut impacts = 0;
        while session.phase() == SessionPhase::Playing && ticks < cli.max_ticks {
            let input = if cli.miss_every > 0 && ticks % cli.miss_every == 0 {
                TickInput::default()
            } else {
                bot_input(session.round())
            };
            for event in session.step(&input) {
                match event {
                    GameEvent::FruitMissed { identifier } => log::debug!("Missed {identifier}"),
                    GameEvent::HazardExploded { identifier } => log::info!("{identifier} exploded"),
                    GameEvent::ImpactSound => impacts += 1,
                    _ => {}
                }
            }
            ticks += 1;
        }
        // Keep the backend queue from growing; nothing plays headless
        session.audio_mut().drain();

        let state = session.round();
        println!(
            "Round {round}: {} ticks ({} left on the clock), score {}, lives {}, {} slices{}",
            ticks,
            session.timer().format_time(),
            state.score,
            state.lives,
            impacts,
            if state.terminated { "" } else { " (stopped)" }
        );
    }

    let now = now_ms();
    let records = session
        .scores()
        .with_context(|| format!("reading {}", cli.ledger.display()))?;
    println!("\nTop scores:");
    for (rank, record) in records.iter().take(10).enumerate() {
        println!(
            "{:>2}. {:<12} {:<7} {:<4} {:>5}  {}/{}  {}",
            rank + 1,
            record.player,
            record.mode,
            record.outcome.as_str(),
            record.score,
            record.attempts,
            record.max_attempts,
            format_date(record.timestamp, now)
        );
    }

    session
        .settings()
        .save(&cli.settings)
        .with_context(|| format!("writing {}", cli.settings.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fruit_slicer::sim::tick;

    #[test]
    fn test_keyboard_bot_letter_shared_with_bomb_hits_fruit() {
        let mut round = RoundState::new(8, GameMode::Keyboard, "Bot");
        let bomb = round
            .objects
            .iter()
            .position(|o| o.kind == ObjectKind::Hazard)
            .unwrap();
        round.objects[bomb].symbol = Some('A');

        let input = bot_input(&round);
        assert_eq!(input.pressed_symbol, Some('A'));
        tick(&mut round, &input);

        assert!(round.objects[0].resolved);
        assert!(!round.objects[bomb].resolved);
        assert_eq!((round.lives, round.score), (3, 1));
    }

    #[test]
    fn test_pointer_bot_taps_first_fruit() {
        let mut round = RoundState::new(8, GameMode::Pointer, "Bot");
        for obj in round.objects.iter_mut().skip(1) {
            obj.airborne = false;
        }
        let input = bot_input(&round);
        assert!(input.pointer_pressed);
        tick(&mut round, &input);
        assert!(round.objects[0].resolved);
        assert_eq!(round.score, 1);
    }
}
