//! Demo pilot
//!
//! Steers toward the next unresolved ring with simple deadzone control. Used
//! by the headless runner and by tests that need a full round flown.

use super::collision::ring_world_position;
use super::state::{Controls, GameState};

/// Don't correct offsets smaller than this
pub const STEER_DEADZONE: f32 = 0.5;

/// Control flags that bring the next pending ring toward the plane
pub fn autopilot_controls(state: &GameState) -> Controls {
    let Some((_, ring)) = state.pending_rings().next() else {
        return Controls::default();
    };

    let target = ring_world_position(ring, state.world_offset, state.distance_traveled);
    // Plane sits at x = 0, y = altitude
    let dx = target.x;
    let dy = target.y - state.altitude();

    Controls {
        up: dy > STEER_DEADZONE,
        down: dy < -STEER_DEADZONE,
        left: dx < -STEER_DEADZONE,
        right: dx > STEER_DEADZONE,
    }
}
