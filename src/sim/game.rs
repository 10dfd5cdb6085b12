//! Game store and phase control
//!
//! `Game` owns the round state, the listener registry and the RNG that hands
//! out fresh layout seeds. It is explicitly constructed, so independent games
//! can coexist (tests run many side by side).

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::config::{LayoutConfig, RingConfig};
use super::events::{EventBus, EventTopic, GameEvent, ListenerId};
use super::state::{Control, GamePhase, GameState};
use super::tick::{FrameReport, tick};
use crate::audio::AudioSink;
use crate::claim::{ClaimError, ClaimRequest};

#[derive(Debug)]
pub struct Game {
    state: GameState,
    events: EventBus,
    /// Draws the seed for each regenerated layout
    seeder: Pcg32,
}

impl Game {
    /// Create a game in the `Ready` phase; `seed` fixes the first layout and
    /// every layout after it
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, RingConfig::default(), LayoutConfig::default())
    }

    pub fn with_config(seed: u64, ring_config: RingConfig, layout_config: LayoutConfig) -> Self {
        Self {
            state: GameState::with_config(seed, ring_config, layout_config),
            events: EventBus::new(),
            seeder: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and tests; prefer the operations below
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn rings_passed(&self) -> u32 {
        self.state.rings_passed
    }

    // === Events ===

    pub fn subscribe<F>(&mut self, topic: EventTopic, listener: F) -> ListenerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe(topic, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn dispatch(&mut self, event: GameEvent) {
        self.events.emit(event);
    }

    // === Phase control ===

    /// Begin (or resume) flying. Returns false if the phase doesn't allow it.
    pub fn start(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Ready | GamePhase::Paused => {
                self.state.phase = GamePhase::Playing;
                log::info!("Game started (seed {})", self.state.seed);
                self.events.emit(GameEvent::GameStarted);
                true
            }
            GamePhase::Playing | GamePhase::Ended => false,
        }
    }

    /// Suspend updates without touching any other state
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        log::info!("Game paused");
        true
    }

    /// Start over with a freshly drawn layout seed
    pub fn reset(&mut self) {
        let seed = self.seeder.next_u64();
        self.reset_with_seed(seed);
    }

    /// Start over with a specific layout seed
    ///
    /// All round fields are rebuilt, which also cancels a pending end-of-round
    /// countdown. Listeners are kept.
    pub fn reset_with_seed(&mut self, seed: u64) {
        if self.state.completion.is_some() {
            log::info!("Reset cancelled pending round completion");
        }
        self.state = GameState::with_config(seed, self.state.ring_config, self.state.layout_config);
        log::info!("Game reset (seed {})", seed);
        self.events.emit(GameEvent::GameReset);
    }

    /// Swap in a new layout without touching score or ring progress
    pub fn regenerate_ring_layout(&mut self) -> u64 {
        let seed = self.seeder.next_u64();
        self.state.replace_layout(seed);
        seed
    }

    // === Per-frame ===

    pub fn set_control(&mut self, control: Control, active: bool) {
        self.state.set_control(control, active);
    }

    /// Render-loop entry point: advance by `dt` seconds
    pub fn frame(&mut self, dt: f32, audio: &dyn AudioSink) -> FrameReport {
        tick(&mut self.state, &mut self.events, audio, dt)
    }

    /// Build a reward claim for the current score
    pub fn claim_request(&self, account_id: &str) -> Result<ClaimRequest, ClaimError> {
        ClaimRequest::new(account_id, self.state.score)
    }
}
