//! Fixed timestep simulation tick
//!
//! Core game loop: one call per frame at `TICK_RATE`.

use glam::Vec2;

use super::physics;
use super::resolve::Resolver;
use super::state::RoundState;
use crate::consts::*;

/// Input sampled once at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in play-area coordinates
    pub pointer: Vec2,
    /// Primary button held this tick
    pub pointer_pressed: bool,
    /// Letter typed this tick (keyboard mode)
    pub pressed_symbol: Option<char>,
    /// The round timer has run out
    pub time_up: bool,
}

impl TickInput {
    /// Pointer input from window coordinates; the HUD bar sits above the play area
    pub fn pointer_from_screen(screen: Vec2, pressed: bool) -> Self {
        Self {
            pointer: screen - Vec2::new(0.0, HUD_HEIGHT),
            pointer_pressed: pressed,
            ..Default::default()
        }
    }
}

/// Advance the round by one tick
pub fn tick(state: &mut RoundState, input: &TickInput) {
    if state.terminated {
        return;
    }
    if input.time_up {
        state.end_round();
        return;
    }

    state.elapsed_ticks += 1;

    // Slow motion freezes displacement while it counts down
    if state.slow_motion_ticks > 0 {
        state.speed_factor = 0.0;
        state.slow_motion_ticks -= 1;
    } else {
        state.speed_factor = NORMAL_SPEED_FACTOR;
    }
    let speed_factor = state.speed_factor;

    let mut resolver = Resolver::from_input(state.mode, input);

    for index in 0..state.objects.len() {
        if state.terminated {
            break;
        }
        let obj = &mut state.objects[index];

        if !obj.airborne {
            obj.idle_ticks += 1;
            if obj.idle_ticks >= SPAWN_DELAY_TICKS {
                state.respawn(index);
            }
            continue;
        }

        physics::advance(obj, GRAVITY, speed_factor);
        physics::reflect_horizontal(obj, PLAY_WIDTH);

        if physics::is_off_bottom(obj, PLAY_HEIGHT) {
            obj.ground();
            state.apply_miss(index);
            continue;
        }

        if resolver.try_match(obj) {
            state.resolve_hit(index);
        }
    }
}
