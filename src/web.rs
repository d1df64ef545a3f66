//! wasm-bindgen surface used by the HTML page.
//!
//! ```javascript
//! import init, { QuizApp } from './pkg/vocab_quiz.js';
//!
//! await init();
//! const app = await QuizApp.load();          // fetches json/data.json
//! app.startQuiz(JSON.stringify({
//!     questionCount: 10, chapters: ["Ch-1"],
//!     questionField: "kana", answerField: "meaning",
//! }));
//! const q = JSON.parse(app.currentQuestion());
//! const outcome = JSON.parse(app.submitAnswer(q.choices[0]));
//! app.advance();
//! ```
//!
//! Structured values cross the boundary as JSON strings. Errors are thrown as
//! JS `Error`s whose `name` is the [`QuizError::kind`].

use std::sync::Once;

use log::{error, info};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::app::QuizController;
use crate::browse::Navigation;
use crate::config::AppConfig;
use crate::error::QuizError;
use crate::session::{QuizConfiguration, SessionState};
use crate::vocab::VocabularyStore;

static LOGGER: Once = Once::new();

fn init_logging(level: log::Level) {
    LOGGER.call_once(|| {
        wasm_logger::init(wasm_logger::Config::new(level));
        info!("logging initialized at {level}");
    });
}

fn parse_config(config_json: Option<String>) -> Result<AppConfig, QuizError> {
    match config_json {
        Some(text) if !text.trim().is_empty() => AppConfig::from_json_str(&text),
        _ => Ok(AppConfig::default()),
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `fetch` resolves for 4xx/5xx too; only `ok` responses carry data.
fn check_status(url: &str, ok: bool, status: u16) -> Result<(), QuizError> {
    if ok {
        Ok(())
    } else {
        Err(QuizError::Load(format!("{url}: HTTP {status}")))
    }
}

async fn fetch_text(url: &str) -> Result<String, QuizError> {
    let window = web_sys::window().ok_or_else(|| QuizError::Load("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| QuizError::Load(format!("{url}: {}", describe(&e))))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| QuizError::Load(format!("{url}: fetch did not yield a Response")))?;
    check_status(url, response.ok(), response.status())?;
    let body = response
        .text()
        .map_err(|e| QuizError::Load(format!("{url}: {}", describe(&e))))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|e| QuizError::Load(format!("{url}: {}", describe(&e))))?;
    text.as_string()
        .ok_or_else(|| QuizError::Load(format!("{url}: response body is not text")))
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct QuizApp {
    inner: QuizController,
}

#[wasm_bindgen]
impl QuizApp {
    /// Fetch the vocabulary named by `config.dataUrl` and build the app. A
    /// failed fetch or malformed data rejects the promise and keeps nothing;
    /// the page retries by calling `load` again.
    pub async fn load(config_json: Option<String>) -> Result<QuizApp, JsValue> {
        let config = parse_config(config_json)?;
        init_logging(config.log_level());
        let text = fetch_text(&config.data_url).await.inspect_err(|e| {
            error!("error loading data: {e}");
        })?;
        let store = VocabularyStore::from_json_str(&text).inspect_err(|e| {
            error!("error parsing data: {e}");
        })?;
        Ok(QuizApp {
            inner: QuizController::new(config, store),
        })
    }

    /// Build from data the page already holds (no fetch).
    #[wasm_bindgen(js_name = fromData)]
    pub fn from_data(data_json: &str, config_json: Option<String>) -> Result<QuizApp, JsValue> {
        let config = parse_config(config_json)?;
        init_logging(config.log_level());
        let store = VocabularyStore::from_json_str(data_json)?;
        Ok(QuizApp {
            inner: QuizController::new(config, store),
        })
    }

    pub fn chapters(&self) -> js_sys::Array {
        self.inner
            .store()
            .chapters()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    #[wasm_bindgen(js_name = entryCount)]
    pub fn entry_count(&self) -> u32 {
        saturating_u32(self.inner.store().len())
    }

    #[wasm_bindgen(js_name = questionCountOptions)]
    pub fn question_count_options(&self) -> Vec<u32> {
        self.inner
            .store()
            .question_count_options()
            .into_iter()
            .map(saturating_u32)
            .collect()
    }

    /// `action` is `"prev"`, `"next"` or `"select"` (with `index`). Returns
    /// whether the displayed chapter changed.
    pub fn browse(&mut self, action: &str, index: Option<u32>) -> bool {
        match Navigation::parse(action, index.map(|i| i as usize)) {
            Some(nav) => self.inner.browse(nav),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = browseState)]
    pub fn browse_state(&self) -> Result<JsValue, JsValue> {
        match self.inner.browse_view() {
            Some(view) => to_json(&view).map(JsValue::from),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = startQuiz)]
    pub fn start_quiz(&mut self, config_json: &str) -> Result<(), JsValue> {
        let configuration = QuizConfiguration::from_json_str(config_json)?;
        self.inner.start_quiz(configuration)?;
        Ok(())
    }

    /// `"configuring"`, `"in_progress"` or `"finished"`.
    pub fn phase(&self) -> String {
        match self.inner.phase() {
            SessionState::Configuring => "configuring",
            SessionState::InProgress => "in_progress",
            SessionState::Finished => "finished",
        }
        .to_string()
    }

    #[wasm_bindgen(js_name = currentQuestion)]
    pub fn current_question(&self) -> Result<String, JsValue> {
        to_json(&self.inner.current_question()?)
    }

    #[wasm_bindgen(js_name = submitAnswer)]
    pub fn submit_answer(&mut self, choice: &str) -> Result<String, JsValue> {
        to_json(&self.inner.submit_answer(choice)?)
    }

    /// Returns the phase after moving on.
    pub fn advance(&mut self) -> Result<String, JsValue> {
        self.inner.advance()?;
        Ok(self.phase())
    }

    pub fn result(&self) -> Result<String, JsValue> {
        to_json(&self.inner.result()?)
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }
}
