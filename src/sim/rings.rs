//! Ring passage and scoring
//!
//! Every ring starts `Pending` and resolves exactly once to success, hit or
//! miss. Any resolution counts toward `rings_passed`; only a success scores.

use super::collision::{RingOutcome, RingProbe, classify, probe_ring};
use super::state::{GameState, RingStatus};
use crate::consts::*;

/// A ring resolved this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPassage {
    pub ring_index: usize,
    pub outcome: RingOutcome,
    /// Points awarded (0 unless the pass was clean)
    pub points: u32,
    /// Score after this passage
    pub score: u32,
    pub probe: RingProbe,
}

/// Resolve a single pending ring from a probe
///
/// Returns `None` and leaves the ring untouched if it is already passed or
/// the plane is not yet within the ring's depth window.
pub fn resolve_ring(state: &mut GameState, ring_index: usize, probe: RingProbe) -> Option<RingPassage> {
    if state.ring_status.get(ring_index)?.is_passed() {
        return None;
    }
    let outcome = classify(&probe, &state.ring_config)?;

    state.ring_status[ring_index] = RingStatus::Resolved(outcome);
    state.rings_passed += 1;

    let points = if outcome.scores() { RING_POINTS } else { 0 };
    state.score += points;

    log::info!(
        "Ring {}: {} | radial={:.2} zGap={:.2}",
        ring_index,
        outcome.as_str(),
        probe.radial,
        probe.z_gap
    );

    Some(RingPassage {
        ring_index,
        outcome,
        points,
        score: state.score,
        probe,
    })
}

/// Check every pending ring against the plane's current position
pub fn check_rings(state: &mut GameState) -> Vec<RingPassage> {
    if state.distance_traveled < GRACE_DISTANCE {
        return Vec::new();
    }

    let probes: Vec<(usize, RingProbe)> = state
        .pending_rings()
        .map(|(i, ring)| {
            let probe = probe_ring(
                ring,
                state.world_offset,
                state.distance_traveled,
                state.altitude(),
            );
            (i, probe)
        })
        .collect();

    probes
        .into_iter()
        .filter_map(|(i, probe)| resolve_ring(state, i, probe))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::RingSpec;
    use glam::Vec3;

    /// State whose ring 0 sits `dx` to the side of the plane, at the plane's depth
    fn state_with_ring_at(dx: f32) -> GameState {
        let mut state = GameState::new(1);
        state.ring_layout[0] = RingSpec {
            position: Vec3::new(dx, 5.0, -50.0),
            rotation: Vec3::ZERO,
        };
        state.distance_traveled = 50.0;
        state
    }

    #[test]
    fn test_success_scores() {
        let mut state = state_with_ring_at(2.0);
        let passages = check_rings(&mut state);
        assert_eq!(passages.len(), 1);
        let p = passages[0];
        assert_eq!(p.ring_index, 0);
        assert_eq!(p.outcome, RingOutcome::Success);
        assert_eq!(p.points, 10);
        assert_eq!(state.score, 10);
        assert_eq!(state.rings_passed, 1);
        assert!(state.ring_status[0].is_passed());
    }

    #[test]
    fn test_hit_counts_but_does_not_score() {
        let mut state = state_with_ring_at(4.5);
        let passages = check_rings(&mut state);
        assert_eq!(passages[0].outcome, RingOutcome::Hit);
        assert_eq!(passages[0].points, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.rings_passed, 1);
    }

    #[test]
    fn test_miss_consumes_ring() {
        let mut state = state_with_ring_at(12.0);
        let passages = check_rings(&mut state);
        assert_eq!(passages[0].outcome, RingOutcome::Miss);
        assert_eq!(state.ring_status[0], RingStatus::Resolved(RingOutcome::Miss));
        assert_eq!(state.rings_passed, 1);
    }

    #[test]
    fn test_pending_outside_depth_window() {
        let mut state = state_with_ring_at(2.0);
        state.distance_traveled = 49.0;
        assert!(check_rings(&mut state).is_empty());
        assert_eq!(state.ring_status[0], RingStatus::Pending);

        // Next frame brings it into the window
        state.distance_traveled = 49.9;
        assert_eq!(check_rings(&mut state).len(), 1);
    }

    #[test]
    fn test_ring_never_resolves_twice() {
        let mut state = state_with_ring_at(2.0);
        assert_eq!(check_rings(&mut state).len(), 1);
        for _ in 0..5 {
            assert!(check_rings(&mut state).is_empty());
        }
        assert_eq!(state.score, 10);
        assert_eq!(state.rings_passed, 1);
    }

    #[test]
    fn test_grace_distance() {
        let mut state = GameState::new(1);
        state.ring_layout[0] = RingSpec {
            position: Vec3::new(0.0, 5.0, -5.0),
            rotation: Vec3::ZERO,
        };
        state.distance_traveled = 5.0;
        assert!(check_rings(&mut state).is_empty());
        assert_eq!(state.rings_passed, 0);
    }
}
