//! Sound effects
//!
//! The simulation only knows the `AudioSink` contract. In the browser the
//! success chime is synthesized with the Web Audio API; natively it is logged.
//! Playback is fire-and-forget: failures are logged, never returned.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

#[cfg(target_arch = "wasm32")]
use crate::warn_on_err;

use crate::settings::Settings;

/// Sound collaborator used by the frame loop
pub trait AudioSink {
    /// Clean pass through a ring
    fn play_success(&self);
}

/// Discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_success(&self) {}
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: Self::create_context(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Create a manager using the player's volume preferences
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    fn create_context() -> Option<AudioContext> {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        ctx
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            warn_on_err("Audio resume", ctx.resume());
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), JsValue> {
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        Ok((osc, gain))
    }

    /// One note of the chime, starting at `t`
    fn schedule_note(&self, ctx: &AudioContext, freq: f32, t: f64, vol: f32) -> Result<(), JsValue> {
        let (osc, gain) = self.create_osc(ctx, freq, OscillatorType::Triangle)?;
        gain.gain().set_value_at_time(vol * 0.3, t)?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.3)?;
        osc.start_with_when(t)?;
        osc.stop_with_when(t + 0.35)?;
        Ok(())
    }

    /// Ring success - bright rising arpeggio
    fn play_chime(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [660.0, 880.0, 1320.0].iter().enumerate() {
            let t = ctx.current_time() + i as f64 * 0.07;
            if warn_on_err("Success chime", self.schedule_note(ctx, *freq, t, vol)).is_none() {
                return;
            }
        }
    }
}

impl AudioSink for AudioManager {
    #[cfg(target_arch = "wasm32")]
    fn play_success(&self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            self.resume();
        }
        self.play_chime(ctx, vol);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_success(&self) {
        if self.effective_volume() > 0.0 {
            log::debug!("Playing success sound");
        }
    }
}
