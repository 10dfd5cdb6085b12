//! Browser bindings
//!
//! The page owns rendering, input translation and the `requestAnimationFrame`
//! loop; it calls `frame(dt)` once per displayed frame and sets control flags.
//! Game events reach JS callbacks as plain objects.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::claim::{ClaimMessage, submit_claim};
use crate::settings::Settings;
use crate::sim::{Control, EventTopic, Game, GameEvent, ListenerId, UnknownControl, UnknownTopic};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

fn event_to_js(event: &GameEvent) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(event).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Game instance exposed to the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    audio: AudioManager,
    settings: Rc<RefCell<Settings>>,
}

#[wasm_bindgen]
impl WebGame {
    /// New game seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        log::info!("Skyways starting with seed {}", seed);
        WebGame {
            game: Game::new(seed),
            audio: AudioManager::from_settings(&settings),
            settings: Rc::new(RefCell::new(settings)),
        }
    }

    pub fn start(&mut self) -> bool {
        self.audio.resume();
        self.game.start()
    }

    pub fn pause(&mut self) -> bool {
        self.game.pause()
    }

    pub fn reset(&mut self) {
        self.game.reset_with_seed(js_sys::Date::now() as u64);
    }

    /// Set a control flag by name (`up`, `down`, `left`, `right`)
    pub fn set_control(&mut self, control: &str, active: bool) -> Result<(), JsValue> {
        let control: Control = control
            .parse()
            .map_err(|e: UnknownControl| JsValue::from_str(&e.to_string()))?;
        self.game.set_control(control, active);
        Ok(())
    }

    /// Render-loop tick; `dt` in seconds
    pub fn frame(&mut self, dt: f32) -> bool {
        self.game.frame(dt, &self.audio).ended
    }

    /// Register a callback for an event topic; returns an id for `off`
    pub fn on(&mut self, topic: &str, callback: js_sys::Function) -> Result<u32, JsValue> {
        let topic: EventTopic = topic
            .parse()
            .map_err(|e: UnknownTopic| JsValue::from_str(&e.to_string()))?;
        let id = self.game.subscribe(topic, move |event| {
            let result = event_to_js(event).and_then(|payload| callback.call1(&JsValue::NULL, &payload));
            if let Err(err) = result {
                log::warn!("Listener for {} failed: {:?}", topic.as_str(), err);
            }
        });
        Ok(id.raw())
    }

    pub fn off(&mut self, id: u32) -> bool {
        self.game.unsubscribe(ListenerId::from_raw(id))
    }

    // === HUD state ===

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn rings_passed(&self) -> u32 {
        self.game.rings_passed()
    }

    pub fn total_rings(&self) -> u32 {
        self.game.state().total_rings() as u32
    }

    pub fn distance_traveled(&self) -> f32 {
        self.game.state().distance_traveled
    }

    pub fn forward_speed(&self) -> f32 {
        self.game.state().forward_speed
    }

    pub fn altitude(&self) -> f32 {
        self.game.state().altitude()
    }

    pub fn world_offset(&self) -> Vec<f32> {
        self.game.state().world_offset.to_array().to_vec()
    }

    pub fn airplane_rotation(&self) -> Vec<f32> {
        self.game.state().airplane_rotation.to_array().to_vec()
    }

    pub fn success_area_radius(&self) -> f32 {
        self.game.state().ring_config.success_area_radius()
    }

    /// Ring layout and per-ring status as a JS array
    pub fn rings(&self) -> Result<JsValue, JsValue> {
        let state = self.game.state();
        let rings: Vec<_> = state
            .ring_layout
            .iter()
            .zip(&state.ring_status)
            .map(|(ring, status)| {
                serde_json::json!({
                    "position": ring.position,
                    "rotation": ring.rotation,
                    "status": status,
                })
            })
            .collect();
        let json = serde_json::to_string(&rings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&json)
    }

    // === Settings ===

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.borrow_mut().toggle_mute();
        self.audio.set_muted(muted);
        self.settings.borrow().save();
        muted
    }

    pub fn saved_account_id(&self) -> Option<String> {
        self.settings.borrow().account_id.clone()
    }

    /// Claim the current score; resolves to `{type, text}` for success and
    /// for claim failures alike
    pub fn claim_tokens(&self, account_id: String) -> js_sys::Promise {
        let request = self.game.claim_request(&account_id);
        let settings = self.settings.clone();
        let endpoint = settings.borrow().claim_endpoint.clone();

        wasm_bindgen_futures::future_to_promise(async move {
            let result = match request {
                Ok(request) => submit_claim(&endpoint, &request).await,
                Err(err) => Err(err),
            };
            match &result {
                Ok(receipt) => {
                    log::info!("Claim succeeded: {}", receipt.transaction_id);
                    let mut s = settings.borrow_mut();
                    s.account_id = Some(account_id.trim().to_string());
                    s.save();
                }
                Err(err) => log::warn!("Claim failed: {}", err),
            }

            let message = ClaimMessage::from_result(&result);
            let json = serde_json::to_string(&message).map_err(|e| JsValue::from_str(&e.to_string()))?;
            js_sys::JSON::parse(&json)
        })
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
