//! Browser bindings
//!
//! JS owns the timers and the HTTP transport. It calls `advance` from its
//! animation loop with the elapsed milliseconds and a send callback. The
//! callback receives each encoded frame as a `Uint8Array` plus a numeric
//! ticket; returning a Promise marks the send as in flight until JS calls
//! `send_complete` with that ticket.

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::clock::{Delivery, FrameSink, SendTicket, SimulationClock};
use crate::codec::FrameCodec;
use crate::error::MatrixError;
use crate::session::{FlappySession, ParticleToy};
use crate::settings::{Config, GameConfig, ParticleSettings};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // only fails when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Totem matrix bindings ready");
}

fn to_js(e: MatrixError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_config(json: Option<String>) -> Result<Config, JsValue> {
    match json {
        Some(json) => Config::from_json(&json).map_err(to_js),
        None => Ok(Config::default()),
    }
}

fn parse_codec(name: &str) -> Result<FrameCodec, JsValue> {
    FrameCodec::from_str(name)
        .ok_or_else(|| to_js(MatrixError::Config(format!("unknown codec '{}'", name))))
}

/// Wraps the JS send callback
struct JsSink<'a> {
    callback: &'a js_sys::Function,
}

impl FrameSink for JsSink<'_> {
    fn send(&mut self, ticket: SendTicket, frame: &[u8]) -> Delivery {
        let bytes = js_sys::Uint8Array::from(frame);
        match self
            .callback
            .call2(&JsValue::NULL, &bytes, &JsValue::from(ticket.id()))
        {
            Ok(ret) if ret.is_instance_of::<js_sys::Promise>() => Delivery::InFlight,
            Ok(_) => Delivery::Completed,
            Err(e) => {
                // transport failures stay on the JS side
                log::warn!("Frame send callback threw: {:?}", e);
                Delivery::Completed
            }
        }
    }
}

/// Particle toy exported to JS
#[wasm_bindgen]
pub struct ParticleToyHandle {
    clock: SimulationClock<ParticleToy>,
}

#[wasm_bindgen]
impl ParticleToyHandle {
    /// Build from an optional JSON config (see `Config`)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ParticleToyHandle, JsValue> {
        let config = parse_config(config_json)?;
        log::info!("Particle toy using {} codec", config.codec.as_str());
        Ok(Self {
            clock: SimulationClock::new(ParticleToy::from_config(&config), config.codec),
        })
    }

    /// Pointer in buffer coordinates (0..64)
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.clock.sim_mut().set_pointer(Some(Vec2::new(x, y)));
    }

    pub fn release_pointer(&mut self) {
        self.clock.sim_mut().set_pointer(None);
    }

    /// Replace the particle settings from JSON
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: ParticleSettings =
            serde_json::from_str(json).map_err(|e| to_js(e.into()))?;
        self.clock.sim_mut().set_settings(settings);
        Ok(())
    }

    pub fn set_codec(&mut self, name: &str) -> Result<(), JsValue> {
        self.clock.set_codec(parse_codec(name)?);
        Ok(())
    }

    /// Returns the number of frames handed to `sink`
    pub fn advance(&mut self, elapsed_ms: f64, sink: &js_sys::Function) -> u32 {
        let mut sink = JsSink { callback: sink };
        self.clock.advance(elapsed_ms, &mut sink).frames_sent
    }

    /// `ticket` is the one the send callback received
    pub fn send_complete(&mut self, ticket: u32, sink: &js_sys::Function) -> u32 {
        self.clock
            .send_complete(SendTicket::from_id(ticket), &mut JsSink { callback: sink })
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    /// Current frame as packed RGB bytes, for an on-page preview
    pub fn preview_rgb(&self) -> Vec<u8> {
        self.clock.frame().as_rgb_bytes().to_vec()
    }
}

/// Flappy game exported to JS
#[wasm_bindgen]
pub struct FlappyHandle {
    clock: SimulationClock<FlappySession>,
}

#[wasm_bindgen]
impl FlappyHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<FlappyHandle, JsValue> {
        let config = parse_config(config_json)?;
        log::info!("Flappy using {} codec", config.codec.as_str());
        Ok(Self {
            clock: SimulationClock::new(FlappySession::from_config(&config), config.codec),
        })
    }

    /// Start the game or flap
    pub fn activate(&mut self) {
        self.clock.sim_mut().activate();
    }

    /// Replace the game tunables from JSON
    pub fn set_settings_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| to_js(e.into()))?;
        self.clock.sim_mut().set_config(config);
        Ok(())
    }

    pub fn set_codec(&mut self, name: &str) -> Result<(), JsValue> {
        self.clock.set_codec(parse_codec(name)?);
        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.clock.sim().game().state().score
    }

    pub fn advance(&mut self, elapsed_ms: f64, sink: &js_sys::Function) -> u32 {
        let mut sink = JsSink { callback: sink };
        self.clock.advance(elapsed_ms, &mut sink).frames_sent
    }

    /// `ticket` is the one the send callback received
    pub fn send_complete(&mut self, ticket: u32, sink: &js_sys::Function) -> u32 {
        self.clock
            .send_complete(SendTicket::from_id(ticket), &mut JsSink { callback: sink })
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn preview_rgb(&self) -> Vec<u8> {
        self.clock.frame().as_rgb_bytes().to_vec()
    }
}
