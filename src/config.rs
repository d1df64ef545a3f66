//! Page-level settings. Every field has a default so an empty object (or no
//! config at all) reproduces the stock behaviour: data from `json/data.json`,
//! four choices per question, distractors drawn from the whole vocabulary.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::QuizError;

pub const DEFAULT_DATA_URL: &str = "json/data.json";
pub const DEFAULT_CHOICES_PER_QUESTION: usize = 4;

/// Where wrong answers are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistractorScope {
    /// Any entry in the loaded vocabulary.
    #[default]
    AllChapters,
    /// Only entries that passed the quiz's chapter filter.
    SelectedChapters,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub data_url: String,
    pub choices_per_question: usize,
    pub distractor_scope: DistractorScope,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            choices_per_question: DEFAULT_CHOICES_PER_QUESTION,
            distractor_scope: DistractorScope::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(text: &str) -> Result<Self, QuizError> {
        let config: AppConfig = serde_json::from_str(text)
            .map_err(|e| QuizError::DataFormat(format!("app config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.choices_per_question == 0 {
            return Err(QuizError::InvalidConfiguration(
                "choicesPerQuestion must be at least 1".into(),
            ));
        }
        if self.data_url.trim().is_empty() {
            return Err(QuizError::InvalidConfiguration("dataUrl is empty".into()));
        }
        Ok(())
    }

    /// Unknown level names fall back to `Info`.
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }

    pub fn rules(&self) -> QuizRules {
        QuizRules {
            choices_per_question: self.choices_per_question,
            distractor_scope: self.distractor_scope,
        }
    }
}

/// The part of [`AppConfig`] that shapes question construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRules {
    pub choices_per_question: usize,
    pub distractor_scope: DistractorScope,
}

impl QuizRules {
    pub fn distractor_count(&self) -> usize {
        self.choices_per_question.saturating_sub(1)
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        AppConfig::default().rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.data_url, "json/data.json");
        assert_eq!(cfg.rules().distractor_count(), 3);
        assert_eq!(cfg.log_level(), log::Level::Info);
    }

    #[test]
    fn partial_override() {
        let cfg = AppConfig::from_json_str(
            r#"{"dataUrl":"../json/data.json","distractorScope":"selected_chapters","logLevel":"debug"}"#,
        )
        .unwrap();
        assert_eq!(cfg.data_url, "../json/data.json");
        assert_eq!(cfg.distractor_scope, DistractorScope::SelectedChapters);
        assert_eq!(cfg.choices_per_question, 4);
        assert_eq!(cfg.log_level(), log::Level::Debug);
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let cfg = AppConfig {
            log_level: "chatty".into(),
            ..AppConfig::default()
        };
        assert_eq!(cfg.log_level(), log::Level::Info);
    }

    #[test]
    fn zero_choices_rejected() {
        let err = AppConfig::from_json_str(r#"{"choicesPerQuestion":0}"#).unwrap_err();
        assert!(matches!(err, QuizError::InvalidConfiguration(_)));
    }

    #[test]
    fn malformed_json_is_data_format_error() {
        let err = AppConfig::from_json_str("{dataUrl:").unwrap_err();
        assert_eq!(err.kind(), "data_format_error");
    }
}
