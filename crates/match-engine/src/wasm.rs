//! WASM bindings for the browser page
//!
//! The page owns an `RpsGame` and hands it an object of callbacks; every
//! engine notification becomes a call on that object. All callbacks are
//! optional.

#![cfg(feature = "wasm")]

use log::debug;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::{
    Catalog, MatchConfig, MatchEngine, MatchOutcome, Piece, PlayerType, Presenter, RoundOutcome,
    Seat, SeededRng,
};

#[derive(Serialize)]
struct Control<'a> {
    piece: &'a str,
    asset: &'a str,
}

/// Forwards notifications to JavaScript functions on a callbacks object.
struct JsPresenter {
    callbacks: JsValue,
    catalog: Catalog,
}

impl JsPresenter {
    fn call(&self, name: &str, args: &[JsValue]) {
        let Ok(value) = js_sys::Reflect::get(&self.callbacks, &JsValue::from_str(name)) else {
            return;
        };
        let Some(function) = value.dyn_ref::<js_sys::Function>() else {
            return;
        };
        let args: js_sys::Array = args.iter().collect();
        if let Err(e) = function.apply(&self.callbacks, &args) {
            debug!("{} callback threw: {:?}", name, e);
        }
    }
}

impl Presenter for JsPresenter {
    fn on_controls(&mut self, seat: Seat, catalog: &Catalog) {
        let controls: Vec<Control> = catalog
            .iter()
            .map(|(piece, asset)| Control { piece: piece.as_str(), asset })
            .collect();
        let controls = serde_wasm_bindgen::to_value(&controls).unwrap_or(JsValue::NULL);
        self.call("onControls", &[JsValue::from(seat.number()), controls]);
    }

    fn on_hand_revealed(&mut self, seat: Seat, piece: Option<&Piece>) {
        let (piece, asset) = match piece {
            Some(piece) => (
                JsValue::from_str(piece.as_str()),
                self.catalog
                    .asset(piece)
                    .map(JsValue::from_str)
                    .unwrap_or(JsValue::NULL),
            ),
            None => (JsValue::NULL, JsValue::NULL),
        };
        self.call("onHandRevealed", &[JsValue::from(seat.number()), piece, asset]);
    }

    fn on_message(&mut self, text: &str) {
        self.call("onMessage", &[JsValue::from_str(text)]);
    }

    fn on_round_resolved(&mut self, round: u32, outcome: RoundOutcome) {
        let outcome = serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL);
        self.call("onRoundResolved", &[JsValue::from(round), outcome]);
    }

    fn on_match_finished(&mut self, outcome: MatchOutcome) {
        let outcome = serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL);
        self.call("onMatchFinished", &[outcome]);
    }
}

fn random_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    for byte in seed.iter_mut() {
        *byte = (js_sys::Math::random() * 256.0) as u8;
    }
    seed
}

fn parse_seat(number: u8) -> Result<Seat, JsError> {
    Seat::from_number(number).ok_or_else(|| JsError::new(&format!("Unknown seat: {}", number)))
}

/// A match bound to the page's callbacks.
#[wasm_bindgen]
pub struct RpsGame {
    engine: MatchEngine<JsPresenter, SeededRng>,
}

#[wasm_bindgen]
impl RpsGame {
    /// Create a game and run its first progression step.
    ///
    /// # Arguments
    /// * `config_json` - JSON `MatchConfig`; defaults when absent
    /// * `seed` - 32-byte seed for computer picks; random when absent
    /// * `callbacks` - object with optional `onControls`, `onHandRevealed`,
    ///   `onMessage`, `onRoundResolved` and `onMatchFinished` functions
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        seed: Option<Vec<u8>>,
        callbacks: JsValue,
    ) -> Result<RpsGame, JsError> {
        let config = match config_json {
            Some(json) => MatchConfig::from_json(&json)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?,
            None => MatchConfig::default(),
        };
        let seed: [u8; 32] = match seed {
            Some(bytes) => bytes
                .as_slice()
                .try_into()
                .map_err(|_| JsError::new("Seed must be exactly 32 bytes"))?,
            None => random_seed(),
        };

        let presenter = JsPresenter {
            callbacks,
            catalog: config.catalog.clone(),
        };
        let engine = MatchEngine::seeded(config, presenter, &seed)
            .map_err(|e| JsError::new(&e.to_string()))?;

        Ok(RpsGame { engine })
    }

    /// Commit a piece for seat 1 or 2. Returns the rounds this resolved.
    pub fn commit(&mut self, seat: u8, piece: &str) -> Result<JsValue, JsError> {
        let seat = parse_seat(seat)?;
        let resolved = self
            .engine
            .commit(seat, piece)
            .map_err(|e| JsError::new(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&resolved)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = requestProgress)]
    pub fn request_progress(&mut self) -> Result<JsValue, JsError> {
        let resolved = self
            .engine
            .request_progress()
            .map_err(|e| JsError::new(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&resolved)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Write a line to the message log.
    pub fn announce(&mut self, text: &str) {
        self.engine.announce(text);
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.engine.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    pub fn status(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.engine.status())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    }

    /// 1 or 2 for the leading seat, 0 for a draw.
    #[wasm_bindgen(js_name = matchWinner)]
    pub fn match_winner(&self) -> u8 {
        self.engine.match_winner().winner().map_or(0, Seat::number)
    }

    #[wasm_bindgen(js_name = isFullAutoMode)]
    pub fn is_full_auto_mode(&self) -> bool {
        self.engine.is_full_auto()
    }

    pub fn round(&self) -> u32 {
        self.engine.round()
    }

    #[wasm_bindgen(js_name = maxRounds)]
    pub fn max_rounds(&self) -> u32 {
        self.engine.round_limit()
    }
}

/// Default configuration (human vs computer, classic pieces) as JSON.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> String {
    MatchConfig::default().to_json()
}

/// Five-piece configuration as JSON.
#[wasm_bindgen(js_name = lizardSpockConfig)]
pub fn lizard_spock_config() -> String {
    MatchConfig::lizard_spock([PlayerType::Human, PlayerType::Computer]).to_json()
}
