//! Page-facing controller. Owns the loaded vocabulary, the chapter browser
//! and at most one quiz session, and renders their state as serde views for
//! the JS side. Kept free of JS types so it runs under native tests; `web`
//! wraps it for wasm-bindgen.

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::browse::{ChapterBrowser, Navigation};
use crate::config::AppConfig;
use crate::error::QuizError;
use crate::session::{AnswerOutcome, QuizConfiguration, QuizSession, SessionState};
use crate::vocab::{QuizField, VocabularyStore};

// --- Views -------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    pub script: String,
    pub meaning: String,
    pub romanization: String,
    pub ideographic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseView {
    pub chapter: String,
    pub index: usize,
    pub chapter_count: usize,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub entries: Vec<EntryRow>,
}

/// Per-entry detail card shown after an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetails {
    pub hiragana: String,
    pub katakana: String,
    pub romaji: String,
    pub kanji: String,
    pub meaning: String,
    pub chapter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub number: usize,
    pub total: usize,
    pub question_type: &'static str,
    pub answer_type: &'static str,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answered_choice: Option<String>,
    pub is_correct: Option<bool>,
    /// Only revealed once the question is answered.
    pub correct_value: Option<String>,
    pub details: Option<EntryDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeView {
    pub is_correct: bool,
    pub recorded: bool,
    pub correct_value: String,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
}

// --- Controller --------------------------------------------------------------

pub struct QuizController {
    config: AppConfig,
    store: VocabularyStore,
    browser: Option<ChapterBrowser>,
    session: Option<QuizSession>,
    rng: StdRng,
}

impl QuizController {
    pub fn new(config: AppConfig, store: VocabularyStore) -> Self {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    pub fn with_rng(config: AppConfig, store: VocabularyStore, rng: StdRng) -> Self {
        let browser = ChapterBrowser::new(store.index());
        if browser.is_none() {
            warn!("vocabulary is empty, nothing to browse or quiz");
        }
        Self {
            config,
            store,
            browser,
            session: None,
            rng,
        }
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    // --- browsing ---

    pub fn browse(&mut self, nav: Navigation) -> bool {
        self.browser.as_mut().is_some_and(|b| b.navigate(nav))
    }

    pub fn browse_view(&self) -> Option<BrowseView> {
        let browser = self.browser.as_ref()?;
        let entries = browser
            .current_entries(self.store.index())
            .iter()
            .map(|e| EntryRow {
                script: e.display_script(),
                meaning: e.meaning.clone(),
                romanization: e.romanization.clone(),
                ideographic: e.ideographic.clone(),
            })
            .collect();
        Some(BrowseView {
            chapter: browser.current_chapter().to_owned(),
            index: browser.index(),
            chapter_count: browser.chapter_count(),
            can_go_prev: browser.can_go_prev(),
            can_go_next: browser.can_go_next(),
            entries,
        })
    }

    // --- quiz ---

    pub fn phase(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Configuring, QuizSession::state)
    }

    /// Replaces any running session. On error the previous session is
    /// dropped as well and the controller is back in `Configuring`.
    pub fn start_quiz(&mut self, configuration: QuizConfiguration) -> Result<(), QuizError> {
        self.session = None;
        let session = QuizSession::start_with_rules(
            configuration,
            self.store.entries(),
            self.config.rules(),
            &mut self.rng,
        )?;
        self.session = Some(session);
        Ok(())
    }

    pub fn restart(&mut self) {
        if self.session.take().is_some() {
            info!("quiz abandoned, back to configuration");
        }
    }

    fn active(&self, operation: &'static str) -> Result<&QuizSession, QuizError> {
        self.session.as_ref().ok_or(QuizError::InvalidState {
            operation,
            state: SessionState::Configuring,
        })
    }

    fn active_mut(&mut self, operation: &'static str) -> Result<&mut QuizSession, QuizError> {
        self.session.as_mut().ok_or(QuizError::InvalidState {
            operation,
            state: SessionState::Configuring,
        })
    }

    pub fn current_question(&self) -> Result<QuestionView, QuizError> {
        let session = self.active("current_question")?;
        let question = session.current_question()?;
        let (number, total) = session.progress();
        let config = session.configuration();
        let answered = question.is_answered();
        let entry = question.entry();
        Ok(QuestionView {
            number,
            total,
            question_type: wire_name(config.question_field),
            answer_type: wire_name(config.answer_field),
            prompt: question.prompt_value().to_owned(),
            choices: question.choices().to_vec(),
            answered_choice: question.answered_choice().map(str::to_owned),
            is_correct: question.is_correct(),
            correct_value: answered.then(|| question.correct_value().to_owned()),
            details: answered.then(|| EntryDetails {
                hiragana: entry.script_primary.clone(),
                katakana: entry.script_secondary.clone(),
                romaji: entry.romanization.clone(),
                kanji: entry.ideographic.clone(),
                meaning: entry.meaning.clone(),
                chapter: entry.chapter.clone(),
            }),
        })
    }

    pub fn submit_answer(&mut self, choice: &str) -> Result<OutcomeView, QuizError> {
        let session = self.active_mut("submit_answer")?;
        let AnswerOutcome {
            is_correct,
            recorded,
        } = session.submit_answer(choice)?;
        let correct_value = session.current_question()?.correct_value().to_owned();
        Ok(OutcomeView {
            is_correct,
            recorded,
            correct_value,
            score: session.score(),
        })
    }

    pub fn advance(&mut self) -> Result<SessionState, QuizError> {
        self.active_mut("advance")?.advance()
    }

    pub fn result(&self) -> Result<ResultView, QuizError> {
        let result = self.active("result")?.result()?;
        Ok(ResultView {
            score: result.score,
            total: result.total,
            percentage: result.percentage(),
        })
    }
}

fn wire_name(field: QuizField) -> &'static str {
    match field {
        QuizField::CombinedScript => "kana",
        QuizField::Romanization => "romaji",
        QuizField::Ideographic => "kanji",
        QuizField::Meaning => "meaning",
    }
}
