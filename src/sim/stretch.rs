//! Stretch-launch controller
//!
//! Dragging away from the ragdoll's head arms a slingshot. Power grows with
//! drag distance up to a cap; releasing leaves the armed impulse on the body
//! and the next integration step applies it.

use glam::Vec2;

use super::state::Player;
use crate::tuning::Tuning;

/// Start a drag at `point`. Power restarts from zero.
pub fn begin(player: &mut Player, point: Vec2) {
    let to_point = point - player.head();
    player.is_stretching = true;
    player.launch_pending = false;
    player.stretch_angle = to_point.y.atan2(to_point.x);
    player.stretch_power = 0.0;
}

/// Re-aim and re-measure the drag. No-op unless a drag is in progress.
pub fn update(player: &mut Player, point: Vec2, tuning: &Tuning) {
    if !player.is_stretching {
        return;
    }
    let to_point = point - player.head();
    player.stretch_angle = to_point.y.atan2(to_point.x);
    player.stretch_power =
        (to_point.length() / tuning.stretch_divisor).min(tuning.max_stretch_power);
}

/// Release the drag. Returns the released power, or `None` if no drag was
/// in progress.
pub fn end(player: &mut Player) -> Option<f32> {
    if !player.is_stretching {
        return None;
    }
    player.is_stretching = false;
    player.launch_pending = player.stretch_power > 0.0;
    Some(player.stretch_power)
}
