//! Vocabulary entries, field resolution and the chapter index.
//!
//! The data file is a JSON array of records keyed `chapter`, `hirakana`,
//! `katakana`, `romaji`, `meaning` and `kanji`. Every key is optional: absent
//! text becomes an empty string (shown as "N/A"), and an entry without a
//! chapter lands in the "No Chapter" bucket instead of being dropped.

use std::collections::BTreeMap;

use log::{debug, info};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuizError;

pub const NO_CHAPTER: &str = "No Chapter";
pub const NOT_AVAILABLE: &str = "N/A";

/// Question counts offered on the configuration screen besides "All".
pub const QUESTION_COUNT_PRESETS: [usize; 3] = [10, 20, 30];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VocabularyEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub chapter: String,
    #[serde(rename = "hirakana", default, deserialize_with = "lenient_text")]
    pub script_primary: String,
    #[serde(rename = "katakana", default, deserialize_with = "lenient_text")]
    pub script_secondary: String,
    #[serde(rename = "romaji", default, deserialize_with = "lenient_text")]
    pub romanization: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub meaning: String,
    #[serde(rename = "kanji", default, deserialize_with = "lenient_text")]
    pub ideographic: String,
}

/// Accepts strings, numbers, booleans and null; nested arrays/objects are a
/// format error.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(de::Error::custom("expected text, found an array")),
        Value::Object(_) => Err(de::Error::custom("expected text, found an object")),
    }
}

/// The entry attribute a question prompts with or expects as the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizField {
    #[serde(rename = "kana", alias = "combinedScript")]
    CombinedScript,
    #[serde(rename = "romaji", alias = "romanization")]
    Romanization,
    #[serde(rename = "kanji", alias = "ideographic")]
    Ideographic,
    #[serde(rename = "meaning")]
    Meaning,
}

impl QuizField {
    pub const ALL: [QuizField; 4] = [
        QuizField::CombinedScript,
        QuizField::Romanization,
        QuizField::Ideographic,
        QuizField::Meaning,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuizField::CombinedScript => "Hiragana / Katakana",
            QuizField::Romanization => "Romaji",
            QuizField::Ideographic => "Kanji",
            QuizField::Meaning => "Meaning",
        }
    }
}

impl VocabularyEntry {
    /// Resolve `field` for display or comparison. `CombinedScript` prefers the
    /// primary script and falls back to the secondary one; empty values read
    /// as "N/A".
    pub fn field_value(&self, field: QuizField) -> &str {
        let raw: &str = match field {
            QuizField::CombinedScript => {
                if self.script_primary.is_empty() {
                    &self.script_secondary
                } else {
                    &self.script_primary
                }
            }
            QuizField::Romanization => &self.romanization,
            QuizField::Ideographic => &self.ideographic,
            QuizField::Meaning => &self.meaning,
        };
        if raw.is_empty() { NOT_AVAILABLE } else { raw }
    }

    pub fn has_ideographic(&self) -> bool {
        !self.ideographic.is_empty()
    }

    /// Script column of the chapter table: both scripts when present,
    /// otherwise whichever exists, otherwise "-".
    pub fn display_script(&self) -> String {
        match (
            self.script_primary.is_empty(),
            self.script_secondary.is_empty(),
        ) {
            (false, false) => format!("{} ({})", self.script_primary, self.script_secondary),
            (false, true) => self.script_primary.clone(),
            (true, false) => self.script_secondary.clone(),
            (true, true) => "-".to_string(),
        }
    }
}

/// Free-function form of [`VocabularyEntry::field_value`].
pub fn field_value(entry: &VocabularyEntry, field: QuizField) -> &str {
    entry.field_value(field)
}

// --- Chapter index -----------------------------------------------------------

/// Chapter key -> entries in source order. Keys iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterIndex {
    chapters: BTreeMap<String, Vec<VocabularyEntry>>,
}

impl ChapterIndex {
    pub fn build(entries: &[VocabularyEntry]) -> Self {
        let mut chapters: BTreeMap<String, Vec<VocabularyEntry>> = BTreeMap::new();
        for entry in entries {
            chapters
                .entry(entry.chapter.clone())
                .or_default()
                .push(entry.clone());
        }
        Self { chapters }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chapters.keys().map(String::as_str)
    }

    pub fn entries(&self, chapter: &str) -> &[VocabularyEntry] {
        self.chapters.get(chapter).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

// --- Store -------------------------------------------------------------------

/// Loaded vocabulary. Built once; reloading means constructing a new store.
#[derive(Debug, Clone, Default)]
pub struct VocabularyStore {
    entries: Vec<VocabularyEntry>,
    index: ChapterIndex,
}

impl VocabularyStore {
    /// Build from already-parsed JSON. The top level must be an array of
    /// objects.
    pub fn load(data: Value) -> Result<Self, QuizError> {
        let records = match data {
            Value::Array(records) => records,
            other => {
                return Err(QuizError::DataFormat(format!(
                    "expected a list of entries, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut entries = Vec::with_capacity(records.len());
        for (i, record) in records.into_iter().enumerate() {
            if !record.is_object() {
                return Err(QuizError::DataFormat(format!(
                    "entry {i} is {}, expected an object",
                    json_kind(&record)
                )));
            }
            let mut entry: VocabularyEntry = serde_json::from_value(record)
                .map_err(|e| QuizError::DataFormat(format!("entry {i}: {e}")))?;
            if entry.chapter.is_empty() {
                debug!("entry {i} has no chapter, filing under {NO_CHAPTER:?}");
                entry.chapter = NO_CHAPTER.to_string();
            }
            entries.push(entry);
        }

        Ok(Self::from_entries(entries))
    }

    pub fn from_json_str(text: &str) -> Result<Self, QuizError> {
        let data: Value = serde_json::from_str(text)
            .map_err(|e| QuizError::DataFormat(format!("invalid JSON: {e}")))?;
        Self::load(data)
    }

    pub fn from_entries(entries: Vec<VocabularyEntry>) -> Self {
        let index = ChapterIndex::build(&entries);
        info!(
            "loaded {} vocabulary entries across {} chapters",
            entries.len(),
            index.len()
        );
        Self { entries, index }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn index(&self) -> &ChapterIndex {
        &self.index
    }

    pub fn chapters(&self) -> Vec<String> {
        self.index.keys().map(str::to_owned).collect()
    }

    pub fn entries_for(&self, chapter: &str) -> &[VocabularyEntry] {
        self.index.entries(chapter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 10, 20, 30 and the total entry count ("All").
    pub fn question_count_options(&self) -> Vec<usize> {
        let mut options = QUESTION_COUNT_PRESETS.to_vec();
        options.push(self.entries.len());
        options
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
