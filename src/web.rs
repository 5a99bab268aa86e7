//! Browser entry point
//!
//! The page owns the DOM and the clock; it creates one `WebGame`, forwards
//! taps and back presses, calls `tick` from `requestAnimationFrame` with
//! `performance.now()`, and redraws from `view_json`.

use std::time::Duration;

use wasm_bindgen::prelude::*;

use crate::ads::{AdPresenter, NullAdNetwork};
use crate::catalog::Category;
use crate::engine::RoundId;
use crate::music::WebMusic;
use crate::persistence::LocalStore;
use crate::platform::{self, BackAction};
use crate::shell::Shell;
use crate::speech::WebSpeech;

type WebShell = Shell<WebSpeech, NullAdNetwork, LocalStore, WebMusic>;

#[wasm_bindgen(start)]
pub fn start() {
    platform::init_logging();
    log::info!("Kids Match (web) starting...");
}

fn at(now_ms: f64) -> Duration {
    Duration::from_secs_f64(now_ms.max(0.0) / 1000.0)
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    shell: WebShell,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let ads = AdPresenter::new(NullAdNetwork, platform::supports_ads());
        let shell = Shell::new(
            WebSpeech::new(),
            ads,
            WebMusic::new(),
            LocalStore,
            rand::random(),
        );
        WebGame { shell }
    }

    pub fn boot(&mut self, now_ms: f64) {
        self.shell.boot(at(now_ms));
    }

    /// `index` follows the order of `categories` in the home view
    pub fn select_category(&mut self, index: usize, now_ms: f64) -> Result<(), JsValue> {
        let category = Category::ALL
            .get(index)
            .copied()
            .ok_or_else(|| js_error(format!("no category at index {index}")))?;
        self.shell
            .select_category(category, at(now_ms))
            .map_err(js_error)
    }

    /// Returns "correct", "incorrect" or "ignored"
    pub fn choose(&mut self, round_id: u32, item_id: &str, now_ms: f64) -> String {
        let outcome = self
            .shell
            .choose(RoundId(u64::from(round_id)), item_id, at(now_ms));
        format!("{outcome:?}").to_lowercase()
    }

    /// Number of rounds advanced during this tick
    pub fn tick(&mut self, now_ms: f64) -> usize {
        self.shell.tick(at(now_ms)).len()
    }

    /// True when the page should close
    pub fn back(&mut self) -> bool {
        self.shell.back() == BackAction::Exit
    }

    pub fn toggle_language(&mut self, now_ms: f64) -> Result<(), JsValue> {
        self.shell.toggle_language(at(now_ms)).map_err(js_error)
    }

    pub fn toggle_music(&mut self) -> bool {
        self.shell.toggle_music()
    }

    pub fn view_json(&self) -> String {
        self.shell.view().to_json().to_string()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
