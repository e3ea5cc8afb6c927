//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick rate only
//! - Seeded RNG only
//! - Stable iteration order (catalogue order)
//! - No I/O, rendering or audio dependencies

pub mod object;
pub mod physics;
pub mod resolve;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod view;

pub use object::{ActiveObject, FruitKind, ObjectKind, VisualState};
pub use resolve::{HitOutcome, Resolver};
pub use spawner::{CatalogueEntry, KEYBOARD_SYMBOLS, active_identifiers, spawn};
pub use state::{DEFAULT_PLAYER_NAME, GameEvent, GameMode, RoundState};
pub use tick::{TickInput, tick};
pub use view::{FrameSnapshot, Hud, ObjectView};
