//! Quiz session: builds the question set from a configuration and walks it
//! one question at a time.
//!
//! `Configuring -> InProgress -> Finished`. Configuring is the time before a
//! session exists; restarting means building a new session. Each question
//! accepts a single answer: once `answered_choice` is set the question is
//! locked and further submissions leave the score untouched.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{DistractorScope, QuizRules};
use crate::distractor::{build_choices, build_distractors};
use crate::error::QuizError;
use crate::sampler::shuffle;
use crate::vocab::{QuizField, VocabularyEntry};

// --- Configuration -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfiguration {
    pub question_count: usize,
    pub chapters: BTreeSet<String>,
    pub question_field: QuizField,
    pub answer_field: QuizField,
}

impl QuizConfiguration {
    pub fn new<I, S>(
        question_count: usize,
        chapters: I,
        question_field: QuizField,
        answer_field: QuizField,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_count,
            chapters: chapters.into_iter().map(Into::into).collect(),
            question_field,
            answer_field,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, QuizError> {
        serde_json::from_str(text)
            .map_err(|e| QuizError::DataFormat(format!("quiz configuration: {e}")))
    }

    /// Kanji on either side means entries without kanji cannot take part.
    pub fn requires_ideographic(&self) -> bool {
        self.question_field == QuizField::Ideographic || self.answer_field == QuizField::Ideographic
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.question_count == 0 {
            return Err(QuizError::InvalidConfiguration(
                "question count must be at least 1".into(),
            ));
        }
        if self.chapters.is_empty() {
            return Err(QuizError::EmptySelection);
        }
        Ok(())
    }

    fn admits(&self, entry: &VocabularyEntry) -> bool {
        self.chapters.contains(&entry.chapter)
            && (!self.requires_ideographic() || entry.has_ideographic())
    }
}

// --- Questions ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    entry: VocabularyEntry,
    prompt_value: String,
    correct_value: String,
    choices: Vec<String>,
    answered_choice: Option<String>,
    is_correct: Option<bool>,
}

impl Question {
    fn new(entry: VocabularyEntry, prompt_value: String, correct_value: String, choices: Vec<String>) -> Self {
        Self {
            entry,
            prompt_value,
            correct_value,
            choices,
            answered_choice: None,
            is_correct: None,
        }
    }

    pub fn entry(&self) -> &VocabularyEntry {
        &self.entry
    }

    pub fn prompt_value(&self) -> &str {
        &self.prompt_value
    }

    pub fn correct_value(&self) -> &str {
        &self.correct_value
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn answered_choice(&self) -> Option<&str> {
        self.answered_choice.as_deref()
    }

    pub fn is_correct(&self) -> Option<bool> {
        self.is_correct
    }

    pub fn is_answered(&self) -> bool {
        self.answered_choice.is_some()
    }

    fn record(&mut self, choice: &str) -> AnswerOutcome {
        if self.is_answered() {
            return AnswerOutcome {
                is_correct: self.is_correct.unwrap_or(false),
                recorded: false,
            };
        }
        let is_correct = choice == self.correct_value;
        self.answered_choice = Some(choice.to_owned());
        self.is_correct = Some(is_correct);
        AnswerOutcome {
            is_correct,
            recorded: true,
        }
    }
}

/// What `submit_answer` did. `recorded == false` means the question was
/// already answered and `is_correct` repeats the first verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub recorded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64 * 100.0
        }
    }
}

// --- Session -----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Configuring,
    InProgress,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::Configuring => "configuring",
            SessionState::InProgress => "in progress",
            SessionState::Finished => "finished",
        })
    }
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    configuration: QuizConfiguration,
    pool: Vec<VocabularyEntry>,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
}

impl QuizSession {
    /// Start with the stock rules: four choices, distractors from the whole
    /// `vocabulary`.
    pub fn start<R: Rng + ?Sized>(
        configuration: QuizConfiguration,
        vocabulary: &[VocabularyEntry],
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        Self::start_with_rules(configuration, vocabulary, QuizRules::default(), rng)
    }

    pub fn start_with_rules<R: Rng + ?Sized>(
        configuration: QuizConfiguration,
        vocabulary: &[VocabularyEntry],
        rules: QuizRules,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        configuration.validate()?;

        let mut pool: Vec<VocabularyEntry> = vocabulary
            .iter()
            .filter(|e| configuration.admits(e))
            .cloned()
            .collect();
        if pool.is_empty() {
            info!(
                "no eligible vocabulary for chapters {:?}",
                configuration.chapters
            );
            return Err(QuizError::EmptySelection);
        }

        shuffle(&mut pool, rng);
        let take = configuration.question_count.min(pool.len());
        let distractor_pool = match rules.distractor_scope {
            DistractorScope::AllChapters => vocabulary,
            DistractorScope::SelectedChapters => pool.as_slice(),
        };

        let mut questions = Vec::with_capacity(take);
        for entry in &pool[..take] {
            let prompt_value = entry.field_value(configuration.question_field).to_owned();
            let correct_value = entry.field_value(configuration.answer_field).to_owned();
            let distractors = build_distractors(
                distractor_pool,
                &correct_value,
                configuration.answer_field,
                rules.distractor_count(),
                configuration.requires_ideographic(),
                rng,
            );
            let choices = build_choices(&correct_value, distractors, rng);
            questions.push(Question::new(entry.clone(), prompt_value, correct_value, choices));
        }

        info!(
            "quiz started: {} questions from a pool of {} ({} -> {})",
            questions.len(),
            pool.len(),
            configuration.question_field.label(),
            configuration.answer_field.label()
        );

        Ok(Self {
            configuration,
            pool,
            questions,
            current_index: 0,
            score: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        if self.current_index < self.questions.len() {
            SessionState::InProgress
        } else {
            SessionState::Finished
        }
    }

    fn require(&self, wanted: SessionState, operation: &'static str) -> Result<(), QuizError> {
        let state = self.state();
        if state == wanted {
            Ok(())
        } else {
            Err(QuizError::InvalidState { operation, state })
        }
    }

    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.require(SessionState::InProgress, "current_question")?;
        Ok(&self.questions[self.current_index])
    }

    /// Record `choice` for the current question. Only the first submission
    /// per question counts; later ones return the locked verdict.
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerOutcome, QuizError> {
        self.require(SessionState::InProgress, "submit_answer")?;
        let outcome = self.questions[self.current_index].record(choice);
        if outcome.recorded {
            if outcome.is_correct {
                self.score += 1;
            }
            debug!(
                "question {} answered {:?}, correct = {}",
                self.current_index + 1,
                choice,
                outcome.is_correct
            );
        } else {
            debug!("question {} already answered, ignoring {:?}", self.current_index + 1, choice);
        }
        Ok(outcome)
    }

    /// Move to the next question; past the last one the quiz is finished.
    pub fn advance(&mut self) -> Result<SessionState, QuizError> {
        self.require(SessionState::InProgress, "advance")?;
        self.current_index += 1;
        let state = self.state();
        if state == SessionState::Finished {
            info!("quiz finished: {}/{}", self.score, self.questions.len());
        }
        Ok(state)
    }

    pub fn result(&self) -> Result<QuizResult, QuizError> {
        self.require(SessionState::Finished, "result")?;
        Ok(QuizResult {
            score: self.score,
            total: self.questions.len(),
        })
    }

    /// 1-based number of the current question and the total.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.current_index + 1).min(total), total)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn configuration(&self) -> &QuizConfiguration {
        &self.configuration
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn pool(&self) -> &[VocabularyEntry] {
        &self.pool
    }
}
