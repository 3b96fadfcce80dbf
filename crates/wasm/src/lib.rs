//! blast-wasm - WebAssembly bindings for driving a session from the browser.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use blast_core::{preview_color, Anchor, Pivot};
use blast_engine::{BoardMetrics, GameConfig, PlaceOutcome, Point, Rejection, Session};

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsSession {
    /// Classic rules, seeded from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(size: Option<usize>, batch_size: Option<usize>) -> Result<JsSession, JsValue> {
        let mut config = GameConfig::classic();
        if let Some(size) = size {
            config = config.with_size(size);
        }
        if let Some(batch_size) = batch_size {
            config = config.with_batch_size(batch_size);
        }
        Self::build(config, random_seed())
    }

    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u32) -> Result<JsSession, JsValue> {
        Self::build(GameConfig::classic(), seed as u64)
    }

    /// `config` is a plain object; missing fields take classic defaults.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config: JsValue, seed: Option<u32>) -> Result<JsSession, JsValue> {
        let config: GameConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|err| JsValue::from_str(&format!("invalid config: {err}")))?;
        let seed = seed.map(u64::from).unwrap_or_else(random_seed);
        Self::build(config, seed)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
        gloo::console::log!("session reset");
    }

    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, index: usize) -> bool {
        self.inner.select_piece(index)
    }

    /// `row`/`col` is the tray cell the pointer grabbed, if known.
    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, index: usize, row: Option<usize>, col: Option<usize>) -> bool {
        let grabbed = row.zip(col).map(|(row, col)| Pivot::new(row, col));
        self.inner.begin_drag(index, grabbed)
    }

    /// Snapped anchor `{row, col}` for a pointer sample, or `null`.
    pub fn hover(&mut self, x: f64, y: f64, left: f64, top: f64, width: f64, height: f64) -> JsValue {
        let metrics = BoardMetrics::new(left, top, width, height);
        match self.inner.hover(Point::new(x, y), &metrics) {
            Some(anchor) => to_js(&anchor),
            None => JsValue::NULL,
        }
    }

    /// Cells the selected piece would cover at `(row, col)`, or `null`.
    pub fn preview(&self, row: i32, col: i32) -> JsValue {
        match self.inner.preview(Anchor::new(row, col)) {
            Some(cells) => to_js(&cells.into_vec()),
            None => JsValue::NULL,
        }
    }

    /// Ends the drag; the piece stays selected.
    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&mut self) {
        self.inner.cancel_drag();
    }

    /// Drop at the last hovered anchor. Rejections throw the status text.
    pub fn release(&mut self) -> Result<JsValue, JsValue> {
        let result = self.inner.release();
        Self::settle(result)
    }

    #[wasm_bindgen(js_name = tryPlace)]
    pub fn try_place(&mut self, row: i32, col: i32) -> Result<JsValue, JsValue> {
        let result = self.inner.try_place(Anchor::new(row, col));
        Self::settle(result)
    }

    /// Rows of `null` or hex colour strings.
    pub fn grid(&self) -> JsValue {
        to_js(self.inner.grid())
    }

    pub fn tray(&self) -> JsValue {
        to_js(self.inner.tray())
    }

    #[wasm_bindgen(js_name = trayAvailability)]
    pub fn tray_availability(&self) -> JsValue {
        to_js(&self.inner.tray_availability())
    }

    pub fn snapshot(&self) -> JsValue {
        to_js(&self.inner.snapshot())
    }

    pub fn selected(&self) -> Option<usize> {
        self.inner.selected()
    }

    pub fn score(&self) -> f64 {
        self.inner.score() as f64
    }

    pub fn phase(&self) -> JsValue {
        to_js(&self.inner.phase())
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    #[wasm_bindgen(js_name = isBoardEmpty)]
    pub fn is_board_empty(&self) -> bool {
        self.inner.grid().is_empty()
    }

    pub fn size(&self) -> usize {
        self.inner.config().size
    }
}

impl JsSession {
    fn build(config: GameConfig, seed: u64) -> Result<JsSession, JsValue> {
        let inner =
            Session::with_seed(config, seed).map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self { inner })
    }

    fn settle(result: Result<PlaceOutcome, Rejection>) -> Result<JsValue, JsValue> {
        match result {
            Ok(outcome) => {
                if outcome.game_over {
                    gloo::console::log!("game over, final score", outcome.total_score as f64);
                }
                Ok(to_js(&outcome))
            }
            Err(rejection) => {
                let text = rejection.to_string();
                gloo::console::warn!("placement rejected:", text.clone());
                Err(JsValue::from_str(&text))
            }
        }
    }
}

/// `rgba(r, g, b, 0.8)` ghost tint for a piece colour.
#[wasm_bindgen(js_name = previewColor)]
pub fn preview_color_js(hex: &str) -> String {
    preview_color(hex)
}

#[wasm_bindgen(js_name = classicConfig)]
pub fn classic_config() -> JsValue {
    to_js(&GameConfig::classic())
}

#[wasm_bindgen(js_name = legacyConfig)]
pub fn legacy_config() -> JsValue {
    to_js(&GameConfig::legacy())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|_| JsValue::NULL)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}
