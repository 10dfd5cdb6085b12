//! Ring geometry and layout tuning
//!
//! Defaults come from `crate::consts`; both structs serialize so a level can
//! be described as data.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ring dimensions and the radii derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: f32,
    pub thickness: f32,
    pub inner_radius_buffer: f32,
    pub plane_max_width: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: RING_RADIUS,
            thickness: RING_THICKNESS,
            inner_radius_buffer: RING_INNER_BUFFER,
            plane_max_width: PLANE_MAX_WIDTH,
        }
    }
}

impl RingConfig {
    /// Radial distance under which a pass counts as clean
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.radius - self.thickness - self.inner_radius_buffer
    }

    /// Radial distance under which the plane clips the ring tube
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.radius + RING_HIT_MARGIN
    }

    /// Radius of the success indicator overlay (visual only)
    #[inline]
    pub fn success_area_radius(&self) -> f32 {
        self.inner_radius() - (self.plane_max_width / 2.0) * 0.5
    }

    /// Half-depth of the window around the ring plane where classification happens
    #[inline]
    pub fn depth_tolerance(&self) -> f32 {
        self.thickness * RING_DEPTH_FACTOR
    }
}

/// Procedural layout ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub ring_spacing: f32,
    /// Horizontal offsets are drawn from `[0, max]`, never negative
    pub max_horizontal_offset: f32,
    pub max_vertical_offset: f32,
    pub base_height: f32,
    pub max_tilt_x: f32,
    pub max_tilt_z: f32,
    pub total_rings: usize,
    pub start_z: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ring_spacing: RING_SPACING,
            max_horizontal_offset: MAX_HORIZONTAL_OFFSET,
            max_vertical_offset: MAX_VERTICAL_OFFSET,
            base_height: RING_BASE_HEIGHT,
            max_tilt_x: MAX_TILT_X,
            max_tilt_z: MAX_TILT_Z,
            total_rings: TOTAL_RINGS,
            start_z: START_Z,
        }
    }
}
