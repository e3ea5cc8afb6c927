//! Fruit Slicer - A falling-fruit arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, resolution, round state)
//! - `session`: Menu/playing/game-over flow wiring the collaborators to the core
//! - `highscores`: Persisted score ledger
//! - `settings`: Player preferences
//! - `timer`: Round countdown
//! - `assets` / `audio`: Sprite and sound lookup with placeholder fallbacks.
//!   `SpriteSet` is for windowed frontends drawing a `FrameSnapshot`; the
//!   headless binary never loads images.

pub mod assets;
pub mod audio;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;
pub mod timer;

pub use highscores::{FileLedger, MemoryLedger, Outcome, RoundResult, ScoreLedger, ScoreRecord};
pub use session::{GameOverAction, Session, SessionPhase};
pub use settings::Settings;
pub use timer::RoundTimer;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second). Gravity and spawn velocities are tuned for it.
    pub const TICK_RATE: u32 = 12;

    /// Play area dimensions (below the HUD bar)
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 500.0;
    /// Height of the timer/mode bar drawn above the play area
    pub const HUD_HEIGHT: f32 = 80.0;

    /// Downward acceleration added to vy every tick
    pub const GRAVITY: f32 = 1.2;
    /// Displacement multiplier outside of slow motion
    pub const NORMAL_SPEED_FACTOR: f32 = 0.3;
    /// Maximum downward velocity
    pub const TERMINAL_FALL_SPEED: f32 = 35.0;

    /// Ticks an object stays out of play before it is thrown again
    pub const SPAWN_DELAY_TICKS: u32 = 15;
    /// Freeze duration after slicing the ice cube
    pub const SLOW_DURATION_SECONDS: u32 = 3;
    pub const SLOW_DURATION_TICKS: u32 = SLOW_DURATION_SECONDS * TICK_RATE;

    pub const MAX_COMBO: u32 = 10;
    pub const MAX_LIVES: i32 = 3;
    /// Lives taken by slicing the bomb
    pub const HAZARD_PENALTY: i32 = 3;

    /// Hit-box side lengths
    pub const POINTER_OBJECT_SIZE: f32 = 60.0;
    pub const LETTER_OBJECT_SIZE: f32 = 70.0;

    /// Horizontal margin kept clear when choosing a spawn x
    pub const SPAWN_INSET: f32 = 100.0;
    /// Spawn velocity ranges (inclusive)
    pub const SPAWN_VX_RANGE: (i32, i32) = (-10, 10);
    pub const SPAWN_VY_RANGE: (i32, i32) = (-80, -60);

    /// Length of a timed round
    pub const ROUND_SECONDS: u32 = 90;
}
