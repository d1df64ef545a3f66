//! Vocab Quiz core crate.
//!
//! Chapter-tagged vocabulary (kana, romaji, meaning, optional kanji) is
//! loaded once from the page's JSON data file. The page browses it chapter by
//! chapter and runs multiple-choice quizzes built from it. All quiz logic is
//! plain Rust (native tests run with `cargo test`); `web` exposes it to JS
//! through wasm-bindgen.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod browse;
pub mod config;
pub mod distractor;
pub mod error;
pub mod sampler;
pub mod session;
pub mod vocab;
pub mod web;

pub use app::QuizController;
pub use browse::{ChapterBrowser, Navigation};
pub use config::{AppConfig, DistractorScope, QuizRules};
pub use distractor::{build_choices, build_distractors};
pub use error::QuizError;
pub use sampler::{pick_distinct_indices, shuffle};
pub use session::{AnswerOutcome, Question, QuizConfiguration, QuizResult, QuizSession, SessionState};
pub use vocab::{ChapterIndex, QuizField, VocabularyEntry, VocabularyStore, field_value};
pub use web::QuizApp;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
