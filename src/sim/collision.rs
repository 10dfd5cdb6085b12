//! Ring passage geometry
//!
//! The tricky part of Skyways: rings are tilted tori scrolling past a plane
//! that never moves on X/Z. Each frame the plane is carried into the ring's
//! own frame (rotation + translation, inverted) where the test reduces to a
//! radial distance from the ring axis and a depth gap along it.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::config::RingConfig;
use super::layout::RingSpec;

/// Terminal classification of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingOutcome {
    /// Clean pass through the inner area (scores)
    Success,
    /// Clipped the ring tube
    Hit,
    /// Crossed the ring plane outside the ring
    Miss,
}

impl RingOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RingOutcome::Success => "success",
            RingOutcome::Hit => "hit",
            RingOutcome::Miss => "miss",
        }
    }

    #[inline]
    pub fn scores(&self) -> bool {
        *self == RingOutcome::Success
    }
}

/// The plane's position as seen from a ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingProbe {
    /// Plane position in ring-local coordinates
    pub local: Vec3,
    /// Distance from the ring's central axis
    pub radial: f32,
    /// Separation from the ring plane along its axis
    pub z_gap: f32,
}

impl RingProbe {
    pub fn from_local(local: Vec3) -> Self {
        Self {
            local,
            radial: local.x.hypot(local.y),
            z_gap: local.z.abs(),
        }
    }
}

/// Where a ring currently sits after world scrolling
///
/// X/Y follow the world offset; Z scrolls toward the camera with distance.
#[inline]
pub fn ring_world_position(ring: &RingSpec, world_offset: Vec3, distance_traveled: f32) -> Vec3 {
    let mut pos = ring.position + world_offset;
    pos.z = ring.position.z + distance_traveled;
    pos
}

/// Transform a world point into the frame of a ring placed at `ring_pos`
pub fn plane_in_ring_space(ring: &RingSpec, ring_pos: Vec3, point: Vec3) -> Vec3 {
    let ring_matrix = Mat4::from_rotation_translation(ring.orientation(), ring_pos);
    ring_matrix.inverse().transform_point3(point)
}

/// Measure the plane against a ring for the current frame
///
/// The plane sits at the logical origin on X/Z; only altitude moves it.
pub fn probe_ring(
    ring: &RingSpec,
    world_offset: Vec3,
    distance_traveled: f32,
    altitude: f32,
) -> RingProbe {
    let ring_pos = ring_world_position(ring, world_offset, distance_traveled);
    let plane_pos = Vec3::new(0.0, altitude, 0.0);
    RingProbe::from_local(plane_in_ring_space(ring, ring_pos, plane_pos))
}

/// Classify a probe, or `None` while the plane hasn't reached the ring plane
pub fn classify(probe: &RingProbe, config: &RingConfig) -> Option<RingOutcome> {
    if probe.z_gap > config.depth_tolerance() {
        return None;
    }

    let outcome = if probe.radial < config.inner_radius() {
        RingOutcome::Success
    } else if probe.radial < config.hit_radius() {
        RingOutcome::Hit
    } else {
        RingOutcome::Miss
    };
    Some(outcome)
}
