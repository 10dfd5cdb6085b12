//! Per-frame simulation step
//!
//! Core game loop: flight model, then ring checks, then event fan-out and the
//! end-of-round countdown. Runs only while the round is playing.

use super::events::{EventBus, GameEvent};
use super::motion::update_motion;
use super::rings::{RingPassage, check_rings};
use super::state::{CompletionTimer, GamePhase, GameState};
use crate::audio::AudioSink;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub passages: Vec<RingPassage>,
    /// The round ended on this frame
    pub ended: bool,
}

/// Advance the game by one rendered frame of `dt` seconds
///
/// Frames with a non-finite or negative `dt` are dropped. Long frames are cut
/// to `MAX_FRAME_DT` and split into substeps short enough that no ring can be
/// stepped over without passing through its depth window.
pub fn tick(
    state: &mut GameState,
    events: &mut EventBus,
    audio: &dyn AudioSink,
    dt: f32,
) -> FrameReport {
    if state.phase != GamePhase::Playing {
        return FrameReport::default();
    }
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Dropping frame with invalid dt {}", dt);
        return FrameReport::default();
    }

    let dt = dt.min(MAX_FRAME_DT);
    let steps = substeps(state, dt);
    let step_dt = dt / steps as f32;

    let mut report = FrameReport::default();
    for _ in 0..steps {
        step(state, events, audio, step_dt, &mut report);
        if report.ended {
            break;
        }
    }
    report
}

/// Number of substeps keeping forward travel per step at or under half the
/// ring depth tolerance
pub fn substeps(state: &GameState, dt: f32) -> u32 {
    let max_travel = state.ring_config.depth_tolerance() * 0.5;
    let travel = state.forward_speed.abs() * dt;
    if max_travel <= 0.0 || !travel.is_finite() {
        return 1;
    }
    ((travel / max_travel).ceil() as u32).clamp(1, MAX_SUBSTEPS)
}

/// One simulation step: motion, rings, events, completion countdown
fn step(
    state: &mut GameState,
    events: &mut EventBus,
    audio: &dyn AudioSink,
    dt: f32,
    report: &mut FrameReport,
) {
    update_motion(state, dt);

    let passages = check_rings(state);
    for passage in &passages {
        events.emit(GameEvent::RingPassed {
            ring_index: passage.ring_index,
            points: passage.points,
        });
        if passage.outcome.scores() {
            events.emit(GameEvent::ScoreChanged {
                new_score: passage.score,
                points_added: passage.points,
            });
            audio.play_success();
        }
    }
    report.passages.extend(passages);

    if let Some(timer) = state.completion.as_mut() {
        if timer.advance(dt) {
            finish_round(state, events);
            report.ended = true;
        }
    } else if state.all_rings_resolved() {
        log::info!("All rings processed! Game complete!");
        state.completion = Some(CompletionTimer::new());
    }
}

/// Close out the round once the completion delay has elapsed
fn finish_round(state: &mut GameState, events: &mut EventBus) {
    log::info!(
        "Round over: score {} ({} rings)",
        state.score,
        state.rings_passed
    );
    state.completion = None;
    state.controls.clear();
    state.phase = GamePhase::Ended;
    events.emit(GameEvent::GameEnded);
}
