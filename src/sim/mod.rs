//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, one update per rendered frame
//! - Seeded ring layouts only
//! - Stable iteration order (by ring index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod config;
pub mod events;
pub mod game;
pub mod layout;
pub mod motion;
pub mod rings;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_controls;
pub use collision::{RingOutcome, RingProbe, classify, plane_in_ring_space, probe_ring, ring_world_position};
pub use config::{LayoutConfig, RingConfig};
pub use events::{EventBus, EventTopic, GameEvent, ListenerId, UnknownTopic};
pub use game::Game;
pub use layout::{RingSpec, generate_ring_layout, seeded_random};
pub use motion::{MotionStep, apply_motion, plan_motion};
pub use rings::{RingPassage, check_rings};
pub use state::{
    CompletionTimer, Control, Controls, GamePhase, GameState, RingStatus, UnknownControl,
};
pub use tick::{FrameReport, substeps, tick};
