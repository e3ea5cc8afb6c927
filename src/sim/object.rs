//! Thrown game objects
//!
//! One `ActiveObject` per catalogue identifier. Objects are owned by the
//! round's object table and replaced in place when they are thrown again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay role of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Scores on hit, costs a life on miss
    NormalFruit,
    /// The ice cube: scores and freezes the play area on hit, free to miss
    SlowingFruit,
    /// The bomb: costs three lives on hit, free to miss
    Hazard,
}

/// Concrete thing being thrown (drives sprite lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Melon,
    Orange,
    Pomegranate,
    Guava,
    Bomb,
    IceCube,
}

impl FruitKind {
    /// Harmless fruits, in catalogue order
    pub const HARMLESS: [FruitKind; 4] = [
        FruitKind::Melon,
        FruitKind::Orange,
        FruitKind::Pomegranate,
        FruitKind::Guava,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FruitKind::Melon => "melon",
            FruitKind::Orange => "orange",
            FruitKind::Pomegranate => "pomegranate",
            FruitKind::Guava => "guava",
            FruitKind::Bomb => "bomb",
            FruitKind::IceCube => "ice_cube",
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            FruitKind::Bomb => ObjectKind::Hazard,
            FruitKind::IceCube => ObjectKind::SlowingFruit,
            _ => ObjectKind::NormalFruit,
        }
    }
}

/// What the renderer should show for an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisualState {
    #[default]
    Whole,
    /// Sliced fruit ("half" sprite)
    Struck,
    /// Bomb that was hit
    Exploded,
}

/// A thrown object's kinematic and gameplay state
///
/// `position` is the top-left corner of the square hit-box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveObject {
    /// Stable key within the round ("melon", or "melon#A" in keyboard mode)
    pub identifier: String,
    pub fruit: FruitKind,
    pub kind: ObjectKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Side length of the square hit-box
    pub bounding_size: f32,
    /// In flight and subject to physics/resolution
    pub airborne: bool,
    /// A successful hit has been applied
    pub resolved: bool,
    /// Key bound to this object in keyboard mode
    pub symbol: Option<char>,
    pub visual: VisualState,
    /// Ticks spent out of play, drives respawn
    #[serde(default)]
    pub idle_ticks: u32,
}

impl ActiveObject {
    /// Can still be hit this tick
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.airborne && !self.resolved
    }

    /// Strict point-in-box test against the on-screen rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        let max = self.position + Vec2::splat(self.bounding_size);
        self.position.x < point.x
            && point.x < max.x
            && self.position.y < point.y
            && point.y < max.y
    }

    /// Take the object out of play; it will be thrown again after the spawn delay
    pub fn ground(&mut self) {
        self.airborne = false;
        self.idle_ticks = 0;
    }

    /// Mark as hit and switch to the matching sprite.
    /// Returns false if the object was not eligible (already resolved or out of play).
    pub fn strike(&mut self) -> bool {
        if !self.is_eligible() {
            return false;
        }
        self.resolved = true;
        self.visual = match self.kind {
            ObjectKind::Hazard => VisualState::Exploded,
            _ => VisualState::Struck,
        };
        true
    }
}
