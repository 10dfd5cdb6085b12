//! Per-frame flight model
//!
//! The airplane never moves; the world scrolls around it. A step is planned
//! from a read-only view of the state and then committed in one go, so no
//! part of the update observes a half-written frame.

use glam::Vec3;

use super::state::{Controls, GameState};
use crate::consts::*;
use crate::lerp;

/// Everything a frame changes, computed before anything is written
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub distance_traveled: f32,
    pub world_offset: Vec3,
    /// Unclamped; clamping happens on commit
    pub altitude: f32,
    pub rotation: Vec3,
}

/// Target (pitch, bank) for the given controls
pub fn target_attitude(controls: &Controls) -> (f32, f32) {
    let pitch = controls.vertical() * PITCH_ANGLE;
    // Right is applied after left, so it wins the bank target when both are held
    let bank = if controls.right {
        -BANK_ANGLE
    } else if controls.left {
        BANK_ANGLE
    } else {
        0.0
    };
    (pitch, bank)
}

/// Plan the next frame from the current state
///
/// Smoothing is a fixed per-frame lerp, so it converges faster at higher
/// frame rates.
pub fn plan_motion(state: &GameState, dt: f32) -> MotionStep {
    let controls = &state.controls;
    let mut world_offset = state.world_offset;

    let altitude_change = controls.vertical() * CLIMB_SPEED * dt;
    // Lowering the world makes the plane appear to climb
    world_offset.y -= altitude_change;

    let strafe = STRAFE_SPEED * dt;
    if controls.left {
        world_offset.x += strafe;
    }
    if controls.right {
        world_offset.x -= strafe;
    }

    let (pitch, bank) = target_attitude(controls);
    let current = state.airplane_rotation;
    let rotation = Vec3::new(
        lerp(current.x, pitch, ROTATION_SMOOTHING),
        current.y,
        lerp(current.z, bank, ROTATION_SMOOTHING),
    );

    MotionStep {
        distance_traveled: state.distance_traveled + state.forward_speed * dt,
        world_offset,
        altitude: state.altitude() + altitude_change,
        rotation,
    }
}

/// Commit a planned step
pub fn apply_motion(state: &mut GameState, step: MotionStep) {
    state.distance_traveled = step.distance_traveled;
    state.world_offset = step.world_offset;
    state.set_altitude(step.altitude);
    state.airplane_rotation = step.rotation;
}

/// Plan and commit one frame
pub fn update_motion(state: &mut GameState, dt: f32) {
    let step = plan_motion(state, dt);
    apply_motion(state, step);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Control;
    use proptest::prelude::*;

    const DT: f32 = 0.1;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_forward_distance_accumulates() {
        let mut state = GameState::new(1);
        update_motion(&mut state, DT);
        update_motion(&mut state, DT);
        assert!(close(state.distance_traveled, 3.0));
    }

    #[test]
    fn test_climb_inverts_world_offset() {
        let mut state = GameState::new(1);
        state.set_control(Control::Up, true);
        update_motion(&mut state, DT);
        assert!(close(state.altitude(), 5.5));
        assert!(close(state.world_offset.y, -0.5));
    }

    #[test]
    fn test_up_and_down_cancel() {
        let mut state = GameState::new(1);
        state.set_control(Control::Up, true);
        state.set_control(Control::Down, true);
        update_motion(&mut state, DT);
        assert_eq!(state.altitude(), 5.0);
        assert_eq!(state.world_offset.y, 0.0);
        assert_eq!(state.airplane_rotation.x, 0.0);
    }

    #[test]
    fn test_left_and_right_sum() {
        let mut state = GameState::new(1);
        state.set_control(Control::Left, true);
        update_motion(&mut state, DT);
        assert!(close(state.world_offset.x, 2.0));

        state.set_control(Control::Right, true);
        update_motion(&mut state, DT);
        assert!(close(state.world_offset.x, 2.0));
    }

    #[test]
    fn test_rotation_smoothing() {
        let mut state = GameState::new(1);
        state.set_control(Control::Up, true);
        state.set_control(Control::Left, true);
        update_motion(&mut state, DT);
        assert!(close(state.airplane_rotation.x, 0.02));
        assert!(close(state.airplane_rotation.z, 0.03));

        state.controls.clear();
        update_motion(&mut state, DT);
        assert!(close(state.airplane_rotation.x, 0.018));
        assert!(close(state.airplane_rotation.z, 0.027));
    }

    #[test]
    fn test_world_offset_keeps_scrolling_at_ceiling() {
        let mut state = GameState::new(1);
        state.set_altitude(19.9);
        state.set_control(Control::Up, true);
        update_motion(&mut state, 1.0);
        assert_eq!(state.altitude(), 20.0);
        assert!(close(state.world_offset.y, -5.0));
    }

    fn controls_strategy() -> impl Strategy<Value = Controls> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right)| Controls {
                up,
                down,
                left,
                right,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_altitude_stays_in_band(
            frames in prop::collection::vec((controls_strategy(), 0.0f32..0.5), 1..200)
        ) {
            let mut state = GameState::new(3);
            for (controls, dt) in frames {
                state.controls = controls;
                update_motion(&mut state, dt);
                prop_assert!(state.altitude() >= MIN_ALTITUDE);
                prop_assert!(state.altitude() <= MAX_ALTITUDE);
            }
        }
    }
}
