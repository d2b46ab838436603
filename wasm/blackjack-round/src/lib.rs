use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[macro_use]
mod logging;

pub mod deck;
pub mod game;
pub mod hand;
pub mod outcome;

pub use deck::{Card, CardSource, InfiniteShoe, Rank, Suit};
pub use game::{Action, Phase, RoundConfig, RoundEngine, RoundError, RoundSnapshot, RoundState};
pub use hand::{compute_score, hand_value, Hand, Role};
pub use outcome::{check_winner, Outcome, DEALER_STANDS_ON};

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // json_compatible so the concealed hole card arrives as `null`.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
}

/// One table: the page creates it on load and calls it from its buttons.
#[wasm_bindgen]
pub struct BlackjackRound {
    engine: RoundEngine,
    listener: Option<Function>,
}

#[wasm_bindgen]
impl BlackjackRound {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue) -> Result<BlackjackRound, JsValue> {
        console_error_panic_hook::set_once();
        let config: RoundConfig = if config.is_undefined() || config.is_null() {
            RoundConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid config: {err}")))?
        };

        Ok(BlackjackRound {
            engine: RoundEngine::from_config(&config),
            listener: None,
        })
    }

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self) -> Result<JsValue, JsValue> {
        self.engine
            .start_round()
            .map_err(|err| JsValue::from_str(&format!("Start rejected: {err}")))?;
        self.publish()
    }

    #[wasm_bindgen(js_name = playerHit)]
    pub fn player_hit(&mut self) -> Result<JsValue, JsValue> {
        self.engine
            .player_hit()
            .map_err(|err| JsValue::from_str(&format!("Hit rejected: {err}")))?;
        self.publish()
    }

    #[wasm_bindgen(js_name = dealerPlay)]
    pub fn dealer_play(&mut self) -> Result<JsValue, JsValue> {
        self.engine
            .dealer_play()
            .map_err(|err| JsValue::from_str(&format!("Stand rejected: {err}")))?;
        self.publish()
    }

    pub fn stand(&mut self) -> Result<JsValue, JsValue> {
        self.dealer_play()
    }

    pub fn restart(&mut self) -> Result<JsValue, JsValue> {
        self.engine.restart();
        self.publish()
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.engine.state().snapshot())
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.engine
            .state()
            .snapshot()
            .to_json()
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }

    #[wasm_bindgen(js_name = canHit)]
    pub fn can_hit(&self) -> bool {
        self.engine.state().phase() == Phase::PlayerTurn
    }

    #[wasm_bindgen(js_name = canStand)]
    pub fn can_stand(&self) -> bool {
        matches!(
            self.engine.state().phase(),
            Phase::PlayerTurn | Phase::DealerTurn
        )
    }

    /// Registers `callback(state)` to run after every accepted action.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&mut self, callback: Function) {
        self.listener = Some(callback);
    }
}

impl BlackjackRound {
    fn publish(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.state()?;
        if let Some(listener) = &self.listener {
            let _ = listener.call1(&JsValue::NULL, &snapshot);
        }
        Ok(snapshot)
    }
}

#[wasm_bindgen(js_name = drawCard)]
pub fn draw_card() -> Result<JsValue, JsValue> {
    let mut shoe = InfiniteShoe::new(None);
    to_js(&shoe.draw_card())
}

#[wasm_bindgen(js_name = computeScore)]
pub fn compute_score_js(cards: &JsValue) -> Result<u32, JsValue> {
    let cards: Vec<Card> = serde_wasm_bindgen::from_value(cards.clone())
        .map_err(|err| JsValue::from_str(&format!("Invalid cards: {err}")))?;
    Ok(compute_score(&cards))
}

#[wasm_bindgen(js_name = checkWinner)]
pub fn check_winner_js(player_score: u32, dealer_score: u32) -> String {
    check_winner(player_score, dealer_score)
        .map(|outcome| outcome.label().to_string())
        .unwrap_or_default()
}
