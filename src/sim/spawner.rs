//! Spawn catalogue and object throwing
//!
//! The catalogue is the list of identifiers that stay in rotation for a
//! mode. Every identifier owns exactly one object at a time.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::object::{ActiveObject, FruitKind, VisualState};
use super::state::GameMode;
use crate::consts::*;

/// Keys used in keyboard mode (home row)
pub const KEYBOARD_SYMBOLS: [char; 9] = ['A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L'];

/// One slot in the spawn catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEntry {
    pub identifier: String,
    pub fruit: FruitKind,
    pub symbol: Option<char>,
}

impl CatalogueEntry {
    fn pointer(fruit: FruitKind) -> Self {
        Self {
            identifier: fruit.name().to_string(),
            fruit,
            symbol: None,
        }
    }

    fn keyed(fruit: FruitKind, symbol: char) -> Self {
        Self {
            identifier: format!("{}#{}", fruit.name(), symbol),
            fruit,
            symbol: Some(symbol),
        }
    }
}

/// Hit-box size for a mode
pub fn bounding_size(mode: GameMode) -> f32 {
    match mode {
        GameMode::Pointer => POINTER_OBJECT_SIZE,
        GameMode::Keyboard => LETTER_OBJECT_SIZE,
    }
}

/// Identifiers in rotation for `mode`, in stable order.
///
/// Pointer mode: the four harmless fruits, then the bomb and the ice cube.
/// Keyboard mode: one harmless fruit per key (cycling the base fruits), then
/// the bomb and the ice cube each bound to a random key.
pub fn active_identifiers(mode: GameMode, rng: &mut Pcg32) -> Vec<CatalogueEntry> {
    match mode {
        GameMode::Pointer => FruitKind::HARMLESS
            .iter()
            .copied()
            .chain([FruitKind::Bomb, FruitKind::IceCube])
            .map(CatalogueEntry::pointer)
            .collect(),
        GameMode::Keyboard => {
            let mut entries: Vec<CatalogueEntry> = KEYBOARD_SYMBOLS
                .iter()
                .enumerate()
                .map(|(i, &symbol)| {
                    let fruit = FruitKind::HARMLESS[i % FruitKind::HARMLESS.len()];
                    CatalogueEntry::keyed(fruit, symbol)
                })
                .collect();
            for special in [FruitKind::Bomb, FruitKind::IceCube] {
                let symbol = *KEYBOARD_SYMBOLS.choose(rng).unwrap_or(&KEYBOARD_SYMBOLS[0]);
                entries.push(CatalogueEntry::keyed(special, symbol));
            }
            entries
        }
    }
}

/// Throw a fresh object for a catalogue entry from the bottom edge
pub fn spawn(entry: &CatalogueEntry, size: f32, rng: &mut Pcg32) -> ActiveObject {
    let max_x = (PLAY_WIDTH - SPAWN_INSET - size).max(SPAWN_INSET);
    let x = rng.random_range(SPAWN_INSET..=max_x);
    let vx = rng.random_range(SPAWN_VX_RANGE.0..=SPAWN_VX_RANGE.1) as f32;
    let vy = rng.random_range(SPAWN_VY_RANGE.0..=SPAWN_VY_RANGE.1) as f32;

    ActiveObject {
        identifier: entry.identifier.clone(),
        fruit: entry.fruit,
        kind: entry.fruit.kind(),
        position: Vec2::new(x, PLAY_HEIGHT),
        velocity: Vec2::new(vx, vy),
        bounding_size: size,
        airborne: true,
        resolved: false,
        symbol: entry.symbol,
        visual: VisualState::Whole,
        idle_ticks: 0,
    }
}
