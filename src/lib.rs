//! Skyways - a 3D arcade flying game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (motion, ring collisions, scoring, events)
//! - `audio`: Sound effect collaborator
//! - `claim`: Token reward claim boundary
//! - `settings`: Player preferences
//! - `web`: Browser bindings (wasm32 only)

pub mod audio;
pub mod claim;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{AudioManager, AudioSink, SilentAudio};
pub use claim::{AccountId, ClaimError, ClaimMessage, ClaimReceipt, ClaimRequest};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Ring torus radius
    pub const RING_RADIUS: f32 = 5.0;
    /// Ring tube thickness
    pub const RING_THICKNESS: f32 = 0.5;
    /// Extra margin shaved off the inner radius for the success test
    pub const RING_INNER_BUFFER: f32 = 0.3;
    /// Plane width used for the success indicator (lenient, true width is 5.0)
    pub const PLANE_MAX_WIDTH: f32 = 3.0;
    /// Distance past the ring tube that still counts as clipping it
    pub const RING_HIT_MARGIN: f32 = 0.2;
    /// Depth window around the ring plane, as a multiple of thickness
    pub const RING_DEPTH_FACTOR: f32 = 1.5;

    /// Layout: distance between consecutive rings
    pub const RING_SPACING: f32 = 50.0;
    pub const MAX_HORIZONTAL_OFFSET: f32 = 15.0;
    pub const MAX_VERTICAL_OFFSET: f32 = 8.0;
    /// Base height added to every ring's vertical offset
    pub const RING_BASE_HEIGHT: f32 = 5.0;
    pub const MAX_TILT_X: f32 = PI / 6.0;
    pub const MAX_TILT_Z: f32 = PI / 6.0;
    pub const TOTAL_RINGS: usize = 7;
    pub const START_Z: f32 = -50.0;

    /// Forward scroll speed (units/s)
    pub const FORWARD_SPEED: f32 = 15.0;
    /// Sideways world scroll speed (units/s)
    pub const STRAFE_SPEED: f32 = 20.0;
    /// Climb/descend speed (units/s)
    pub const CLIMB_SPEED: f32 = 5.0;

    pub const MIN_ALTITUDE: f32 = 0.0;
    pub const MAX_ALTITUDE: f32 = 20.0;
    pub const DEFAULT_ALTITUDE: f32 = 5.0;

    /// Target pitch while climbing/descending (radians)
    pub const PITCH_ANGLE: f32 = 0.2;
    /// Target bank while strafing (radians)
    pub const BANK_ANGLE: f32 = 0.3;
    /// Per-frame lerp factor toward the target orientation
    pub const ROTATION_SMOOTHING: f32 = 0.1;

    /// No ring is evaluated before this much forward distance
    pub const GRACE_DISTANCE: f32 = 10.0;
    /// Points awarded for flying cleanly through a ring
    pub const RING_POINTS: u32 = 10;
    /// Delay between the last ring resolving and the round ending (seconds)
    pub const COMPLETION_DELAY: f32 = 1.5;

    /// Longest frame the simulation will accept (seconds); longer hitches are cut
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Max simulation steps per frame
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Log a failed fire-and-forget step (audio, storage) and carry on
pub fn warn_on_err<T, E: std::fmt::Debug>(what: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{} failed: {:?}", what, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_on_err_swallows_failure() {
        assert_eq!(warn_on_err("storage write", Ok::<u32, String>(3)), Some(3));
        assert_eq!(
            warn_on_err("audio schedule", Err::<u32, _>("InvalidStateError")),
            None
        );
    }
}
