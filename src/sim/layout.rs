//! Procedural ring placement
//!
//! A layout is a pure function of its seed: each ring property is hashed from
//! `seed + index * k` with a distinct `k` per property, so there is no RNG state
//! shared between calls.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::config::LayoutConfig;

/// Per-property seed multipliers (decorrelate position and tilt)
const X_SALT: f64 = 1.1;
const Y_SALT: f64 = 2.2;
const TILT_X_SALT: f64 = 3.3;
const TILT_Z_SALT: f64 = 4.4;

/// Only the low bits of a seed feed the hash; above this the per-ring salts
/// would vanish in `f64` rounding
pub const LAYOUT_SEED_MASK: u64 = (1 << 42) - 1;

/// Design-space placement of a single ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    pub position: Vec3,
    /// Euler angles (radians), applied in XYZ order
    pub rotation: Vec3,
}

impl RingSpec {
    /// Ring orientation as a quaternion
    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Hash-like pseudo-random value in `[0, 1)`
#[inline]
pub fn seeded_random(x: f64) -> f64 {
    let x = x.sin() * 10000.0;
    x - x.floor()
}

/// Generate `config.total_rings` rings for the given seed
pub fn generate_ring_layout(seed: u64, config: &LayoutConfig) -> Vec<RingSpec> {
    let seed = (seed & LAYOUT_SEED_MASK) as f64;
    (0..config.total_rings)
        .map(|i| {
            let fi = i as f64;
            let x = seeded_random(seed + fi * X_SALT) as f32 * config.max_horizontal_offset;
            let y = seeded_random(seed + fi * Y_SALT) as f32 * config.max_vertical_offset
                + config.base_height;
            let z = config.start_z - i as f32 * config.ring_spacing;

            let tilt_x = seeded_random(seed + fi * TILT_X_SALT) as f32 * config.max_tilt_x;
            let tilt_z = seeded_random(seed + fi * TILT_Z_SALT) as f32 * config.max_tilt_z;

            RingSpec {
                position: Vec3::new(x, y, z),
                rotation: Vec3::new(tilt_x, 0.0, tilt_z),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_random_unit_range() {
        for i in 0..1000 {
            let v = seeded_random(i as f64 * 0.37);
            assert!((0.0..1.0).contains(&v), "value {} out of range", v);
        }
    }

    #[test]
    fn test_forward_positions_evenly_spaced() {
        let config = LayoutConfig::default();
        let layout = generate_ring_layout(42, &config);
        assert_eq!(layout.len(), 7);
        for (i, ring) in layout.iter().enumerate() {
            assert_eq!(ring.position.z, -50.0 - i as f32 * 50.0);
        }
    }

    #[test]
    fn test_rings_only_tilt_about_x_and_z() {
        let layout = generate_ring_layout(7, &LayoutConfig::default());
        assert!(layout.iter().all(|r| r.rotation.y == 0.0));
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = LayoutConfig::default();
        let a = generate_ring_layout(1_700_000_000_000, &config);
        let b = generate_ring_layout(1_700_000_000_001, &config);
        assert_ne!(a, b);
    }

    #[test]
    fn test_large_seeds_still_vary_per_ring() {
        let layout = generate_ring_layout(u64::MAX - 12345, &LayoutConfig::default());
        assert_ne!(layout[0].position.x, layout[1].position.x);
        assert_ne!(layout[1].position.y, layout[2].position.y);
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_layout(seed in any::<u32>()) {
            let config = LayoutConfig::default();
            let a = generate_ring_layout(seed as u64, &config);
            let b = generate_ring_layout(seed as u64, &config);
            prop_assert_eq!(a, b);
        }

        /// Horizontal offsets are one-sided: `[0, max]`, never to the left
        #[test]
        fn prop_offsets_within_ranges(seed in any::<u32>()) {
            let config = LayoutConfig::default();
            for ring in generate_ring_layout(seed as u64, &config) {
                prop_assert!(ring.position.x >= 0.0);
                prop_assert!(ring.position.x <= config.max_horizontal_offset);
                prop_assert!(ring.position.y >= config.base_height);
                prop_assert!(ring.position.y <= config.base_height + config.max_vertical_offset);
                prop_assert!(ring.rotation.x >= 0.0 && ring.rotation.x <= config.max_tilt_x);
                prop_assert!(ring.rotation.z >= 0.0 && ring.rotation.z <= config.max_tilt_z);
            }
        }
    }
}
