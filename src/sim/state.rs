//! Game state and core simulation types
//!
//! Everything scoped to a round lives in `GameState`; a reset replaces it
//! wholesale. Listeners and the reseeding RNG live one level up in `Game`.

use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collision::RingOutcome;
use super::config::{LayoutConfig, RingConfig};
use super::layout::{RingSpec, generate_ring_layout};
use crate::consts::*;

/// Coarse round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    Ready,
    /// Active flight
    Playing,
    /// Round suspended, resumes on start
    Paused,
    /// All rings resolved
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Ended => "ended",
        }
    }
}

/// A single logical control flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown control: {0:?}")]
pub struct UnknownControl(pub String);

impl FromStr for Control {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Control::Up),
            "down" => Ok(Control::Down),
            "left" => Ok(Control::Left),
            "right" => Ok(Control::Right),
            _ => Err(UnknownControl(s.to_string())),
        }
    }
}

/// Raw input intent, set by whatever translates keys/touches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controls {
    pub fn set(&mut self, control: Control, active: bool) {
        match control {
            Control::Up => self.up = active,
            Control::Down => self.down = active,
            Control::Left => self.left = active,
            Control::Right => self.right = active,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// +1 climbing, -1 descending, 0 when neither or both are held
    pub fn vertical(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Per-ring progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingStatus {
    #[default]
    Pending,
    Resolved(RingOutcome),
}

impl RingStatus {
    #[inline]
    pub fn is_passed(&self) -> bool {
        matches!(self, RingStatus::Resolved(_))
    }
}

/// One-shot countdown from the last ring resolving to the round ending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionTimer {
    pub remaining: f32,
}

impl CompletionTimer {
    pub fn new() -> Self {
        Self {
            remaining: COMPLETION_DELAY,
        }
    }

    /// Advance by `dt`; returns true once the delay has elapsed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

impl Default for CompletionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the current ring layout was generated from
    pub seed: u64,
    pub ring_config: RingConfig,
    pub layout_config: LayoutConfig,
    pub phase: GamePhase,

    /// Airplane visual position (fixed in view)
    pub airplane_position: Vec3,
    /// Smoothed visual orientation (x = pitch, z = bank)
    pub airplane_rotation: Vec3,

    /// Scroll applied to all world geometry
    pub world_offset: Vec3,
    /// Clamped to `[MIN_ALTITUDE, MAX_ALTITUDE]`; written only via `set_altitude`
    altitude: f32,
    pub forward_speed: f32,
    pub distance_traveled: f32,

    pub controls: Controls,

    pub rings_passed: u32,
    pub score: u32,
    pub ring_layout: Vec<RingSpec>,
    /// Indexed like `ring_layout`
    pub ring_status: Vec<RingStatus>,

    /// Pending end-of-round countdown, dropped on reset
    pub completion: Option<CompletionTimer>,
}

impl GameState {
    /// Fresh round with the default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, RingConfig::default(), LayoutConfig::default())
    }

    pub fn with_config(seed: u64, ring_config: RingConfig, layout_config: LayoutConfig) -> Self {
        let ring_layout = generate_ring_layout(seed, &layout_config);
        let ring_status = vec![RingStatus::Pending; ring_layout.len()];
        Self {
            seed,
            ring_config,
            layout_config,
            phase: GamePhase::Ready,
            airplane_position: Vec3::new(0.0, DEFAULT_ALTITUDE, 0.0),
            airplane_rotation: Vec3::ZERO,
            world_offset: Vec3::ZERO,
            altitude: DEFAULT_ALTITUDE,
            forward_speed: FORWARD_SPEED,
            distance_traveled: 0.0,
            controls: Controls::default(),
            rings_passed: 0,
            score: 0,
            ring_layout,
            ring_status,
            completion: None,
        }
    }

    #[inline]
    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    /// Write altitude, clamped to the legal band; non-finite values are ignored
    pub fn set_altitude(&mut self, altitude: f32) {
        if !altitude.is_finite() {
            log::warn!("Ignoring non-finite altitude {}", altitude);
            return;
        }
        let clamped = altitude.clamp(MIN_ALTITUDE, MAX_ALTITUDE);
        if clamped != self.altitude {
            log::debug!("Altitude changed: {:.2} -> {:.2}", self.altitude, clamped);
        }
        self.altitude = clamped;
    }

    pub fn set_control(&mut self, control: Control, active: bool) {
        self.controls.set(control, active);
    }

    /// Number of rings in the current layout
    #[inline]
    pub fn total_rings(&self) -> usize {
        self.ring_layout.len()
    }

    /// Rings still waiting to be resolved
    pub fn pending_rings(&self) -> impl Iterator<Item = (usize, &RingSpec)> {
        self.ring_layout
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.ring_status[*i].is_passed())
    }

    pub fn all_rings_resolved(&self) -> bool {
        self.rings_passed as usize >= self.total_rings()
    }

    /// Swap in a new layout; ring progress is index-keyed and kept
    pub fn replace_layout(&mut self, seed: u64) {
        self.seed = seed;
        self.ring_layout = generate_ring_layout(seed, &self.layout_config);
        self.ring_status.resize(self.ring_layout.len(), RingStatus::Pending);
    }
}
