//! Read-only snapshot handed to the renderer each frame

use glam::Vec2;
use serde::Serialize;

use super::object::{FruitKind, VisualState};
use super::state::{GameMode, RoundState};

/// One visible object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectView {
    pub identifier: String,
    pub fruit: FruitKind,
    pub position: Vec2,
    pub bounding_size: f32,
    pub visual: VisualState,
    /// Letter drawn on the object in keyboard mode
    pub symbol: Option<char>,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub combo: u32,
    pub lives: i32,
    pub mode: GameMode,
    pub slow_motion: bool,
    /// Airborne object count, present when the debug overlay is on
    pub debug_airborne: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub objects: Vec<ObjectView>,
    pub hud: Hud,
}

impl RoundState {
    /// Everything the renderer needs; airborne objects only
    pub fn snapshot(&self) -> FrameSnapshot {
        let objects = self
            .objects
            .iter()
            .filter(|o| o.airborne)
            .map(|o| ObjectView {
                identifier: o.identifier.clone(),
                fruit: o.fruit,
                position: o.position,
                bounding_size: o.bounding_size,
                visual: o.visual,
                symbol: o.symbol,
            })
            .collect();

        FrameSnapshot {
            objects,
            hud: Hud {
                score: self.score,
                combo: self.combo,
                lives: self.lives,
                mode: self.mode,
                slow_motion: self.is_slow_motion(),
                debug_airborne: self.debug.then(|| self.airborne_count()),
            },
        }
    }
}
