//! Per-tick kinematics for thrown objects

use super::object::ActiveObject;
use crate::consts::*;

/// Advance one object by one tick.
///
/// Displacement is scaled by `speed_factor` (0 while frozen); gravity always
/// accumulates into `velocity.y`, capped at the terminal fall speed.
pub fn advance(obj: &mut ActiveObject, gravity: f32, speed_factor: f32) {
    obj.position += obj.velocity * speed_factor;
    obj.velocity.y = (obj.velocity.y + gravity).min(TERMINAL_FALL_SPEED);
}

/// Elastic bounce off the left/right edges of the play area
pub fn reflect_horizontal(obj: &mut ActiveObject, width: f32) {
    let max_x = width - obj.bounding_size;
    if obj.position.x < 0.0 {
        obj.position.x = 0.0;
        obj.velocity.x = obj.velocity.x.abs();
    } else if obj.position.x > max_x {
        obj.position.x = max_x;
        obj.velocity.x = -obj.velocity.x.abs();
    }
}

/// Fell past the bottom edge
#[inline]
pub fn is_off_bottom(obj: &ActiveObject, height: f32) -> bool {
    obj.position.y > height
}
