//! Hit detection and outcome application
//!
//! Two input strategies share one outcome path:
//! - pointer: a pressed pointer inside an object's box hits it; several
//!   objects can be hit in the same tick
//! - keyboard: a key press hits the first eligible object bound to that key,
//!   in catalogue order, and nothing else that tick

use glam::Vec2;

use super::object::{ActiveObject, ObjectKind};
use super::state::{GameEvent, GameMode, RoundState};
use super::tick::TickInput;
use crate::consts::*;

/// Input strategy for one tick
#[derive(Debug, Clone, PartialEq)]
pub enum Resolver {
    Pointer { position: Vec2, pressed: bool },
    Keyboard { symbol: Option<char>, consumed: bool },
}

impl Resolver {
    /// Sample the tick's input for the active mode
    pub fn from_input(mode: GameMode, input: &TickInput) -> Self {
        match mode {
            GameMode::Pointer => Resolver::Pointer {
                position: input.pointer,
                pressed: input.pointer_pressed,
            },
            GameMode::Keyboard => Resolver::Keyboard {
                symbol: input.pressed_symbol.map(|c| c.to_ascii_uppercase()),
                consumed: false,
            },
        }
    }

    /// Whether this input hits `obj`. Ineligible objects never match.
    pub fn try_match(&mut self, obj: &ActiveObject) -> bool {
        if !obj.is_eligible() {
            return false;
        }
        match self {
            Resolver::Pointer { position, pressed } => *pressed && obj.contains_point(*position),
            Resolver::Keyboard { symbol, consumed } => {
                if *consumed || symbol.is_none() || obj.symbol != *symbol {
                    return false;
                }
                *consumed = true;
                true
            }
        }
    }
}

/// What a successful hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Sliced { points: u64 },
    Frozen { points: u64 },
    Exploded,
}

impl RoundState {
    /// Apply a successful hit on the object at `index`.
    /// Returns `None` (and changes nothing) if the object was already resolved.
    pub fn resolve_hit(&mut self, index: usize) -> Option<HitOutcome> {
        if self.terminated {
            return None;
        }
        let obj = self.objects.get_mut(index)?;
        if !obj.strike() {
            return None;
        }
        let kind = obj.kind;
        let identifier = obj.identifier.clone();

        let outcome = match kind {
            ObjectKind::Hazard => {
                self.lives -= HAZARD_PENALTY;
                self.combo = 1;
                log::debug!("{} exploded, lives now {}", identifier, self.lives);
                self.events.push(GameEvent::HazardExploded { identifier });
                HitOutcome::Exploded
            }
            ObjectKind::SlowingFruit => {
                self.slow_motion_ticks = SLOW_DURATION_TICKS;
                let points = self.award_combo();
                self.events.push(GameEvent::SlowMotionStarted {
                    ticks: SLOW_DURATION_TICKS,
                });
                self.events.push(GameEvent::ImpactSound);
                HitOutcome::Frozen { points }
            }
            ObjectKind::NormalFruit => {
                let points = self.award_combo();
                log::debug!("sliced {} for {} (combo {})", identifier, points, self.combo);
                self.events.push(GameEvent::ImpactSound);
                HitOutcome::Sliced { points }
            }
        };

        self.check_lives();
        Some(outcome)
    }

    /// Penalize the object at `index` for leaving play unhit.
    /// Only harmless fruits cost a life; the bomb and the ice cube are free to miss.
    pub fn apply_miss(&mut self, index: usize) -> bool {
        if self.terminated {
            return false;
        }
        let Some(obj) = self.objects.get(index) else {
            return false;
        };
        if obj.resolved || obj.kind != ObjectKind::NormalFruit {
            return false;
        }
        let identifier = obj.identifier.clone();
        self.lives -= 1;
        self.combo = 1;
        self.events.push(GameEvent::FruitMissed { identifier });
        self.check_lives();
        true
    }

    /// Score the current combo, then raise it
    fn award_combo(&mut self) -> u64 {
        let points = self.combo as u64;
        self.score += points;
        self.combo = (self.combo + 1).min(MAX_COMBO);
        self.max_score_reached = self.max_score_reached.max(self.score);
        points
    }

    fn check_lives(&mut self) {
        if self.lives <= 0 {
            self.end_round();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::object::VisualState;

    fn pointer_round() -> RoundState {
        RoundState::new(5, GameMode::Pointer, "Tester")
    }

    fn index_of(state: &RoundState, id: &str) -> usize {
        state
            .objects
            .iter()
            .position(|o| o.identifier == id)
            .unwrap()
    }

    #[test]
    fn test_combo_scoring_sequence() {
        let mut state = pointer_round();
        let melon = index_of(&state, "melon");
        let orange = index_of(&state, "orange");

        assert_eq!(state.resolve_hit(melon), Some(HitOutcome::Sliced { points: 1 }));
        assert_eq!((state.score, state.combo), (1, 2));
        assert_eq!(state.resolve_hit(orange), Some(HitOutcome::Sliced { points: 2 }));
        assert_eq!((state.score, state.combo), (3, 3));
    }

    #[test]
    fn test_combo_caps_at_max() {
        let mut state = pointer_round();
        state.combo = MAX_COMBO;
        let melon = index_of(&state, "melon");
        state.resolve_hit(melon);
        assert_eq!(state.score, MAX_COMBO as u64);
        assert_eq!(state.combo, MAX_COMBO);
    }

    #[test]
    fn test_double_resolution_is_noop() {
        let mut state = pointer_round();
        let melon = index_of(&state, "melon");
        state.resolve_hit(melon);
        let (score, combo, lives) = (state.score, state.combo, state.lives);
        assert_eq!(state.resolve_hit(melon), None);
        assert_eq!((state.score, state.combo, state.lives), (score, combo, lives));
        // A resolved fruit leaving play is not a miss either
        assert!(!state.apply_miss(melon));
        assert_eq!(state.lives, lives);
    }

    #[test]
    fn test_hazard_costs_three_lives_and_resets_combo() {
        let mut state = pointer_round();
        state.combo = 6;
        state.lives = 2;
        let bomb = index_of(&state, "bomb");
        assert_eq!(state.resolve_hit(bomb), Some(HitOutcome::Exploded));
        assert_eq!(state.combo, 1);
        assert!(state.terminated);
        assert_eq!(state.lives, 0);
        assert_eq!(state.objects[bomb].visual, VisualState::Exploded);
        assert!(!state.drain_events().contains(&GameEvent::ImpactSound));
    }

    #[test]
    fn test_ice_starts_slow_motion_and_scores() {
        let mut state = pointer_round();
        let ice = index_of(&state, "ice_cube");
        assert_eq!(state.resolve_hit(ice), Some(HitOutcome::Frozen { points: 1 }));
        assert_eq!(state.slow_motion_ticks, 36);
        assert_eq!(state.combo, 2);
        let events = state.drain_events();
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::ImpactSound).count(),
            1
        );
    }

    #[test]
    fn test_miss_asymmetry() {
        let mut state = pointer_round();
        state.combo = 4;
        let bomb = index_of(&state, "bomb");
        let ice = index_of(&state, "ice_cube");
        assert!(!state.apply_miss(bomb));
        assert!(!state.apply_miss(ice));
        assert_eq!((state.lives, state.combo), (3, 4));

        let guava = index_of(&state, "guava");
        assert!(state.apply_miss(guava));
        assert_eq!((state.lives, state.combo), (2, 1));
    }

    #[test]
    fn test_keyboard_resolver_matches_first_only() {
        let mut state = RoundState::new(9, GameMode::Keyboard, "Tester");
        let input = TickInput {
            pressed_symbol: Some('a'),
            ..Default::default()
        };
        let mut resolver = Resolver::from_input(GameMode::Keyboard, &input);
        let matched: Vec<usize> = (0..state.objects.len())
            .filter(|&i| resolver.try_match(&state.objects[i]))
            .collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(state.objects[matched[0]].symbol, Some('A'));
        state.resolve_hit(matched[0]);
        assert!(state.objects[matched[0]].resolved);
    }

    #[test]
    fn test_pointer_resolver_requires_press() {
        let state = pointer_round();
        let obj = &state.objects[0];
        let inside = obj.position + Vec2::splat(obj.bounding_size / 2.0);
        let mut idle = Resolver::Pointer {
            position: inside,
            pressed: false,
        };
        assert!(!idle.try_match(obj));
        let mut pressed = Resolver::Pointer {
            position: inside,
            pressed: true,
        };
        assert!(pressed.try_match(obj));
    }
}
