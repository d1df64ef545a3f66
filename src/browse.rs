//! Chapter-by-chapter vocabulary browsing (the word list page).

use crate::vocab::{ChapterIndex, VocabularyEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Prev,
    Next,
    Select(usize),
}

impl Navigation {
    /// `"prev"`, `"next"` or `"select"` (which needs `index`).
    pub fn parse(action: &str, index: Option<usize>) -> Option<Self> {
        match (action, index) {
            ("prev", _) => Some(Navigation::Prev),
            ("next", _) => Some(Navigation::Next),
            ("select", Some(i)) => Some(Navigation::Select(i)),
            _ => None,
        }
    }
}

/// Cursor over the sorted chapter keys. Holds no entries itself; look them up
/// through the [`ChapterIndex`] it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterBrowser {
    chapters: Vec<String>,
    current: usize,
}

impl ChapterBrowser {
    /// Starts on the first chapter. `None` when there is nothing to browse.
    pub fn new(index: &ChapterIndex) -> Option<Self> {
        if index.is_empty() {
            return None;
        }
        Some(Self {
            chapters: index.keys().map(str::to_owned).collect(),
            current: 0,
        })
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn current_chapter(&self) -> &str {
        &self.chapters[self.current]
    }

    pub fn current_entries<'a>(&self, index: &'a ChapterIndex) -> &'a [VocabularyEntry] {
        index.entries(self.current_chapter())
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current + 1 < self.chapters.len()
    }

    /// Returns whether the current chapter changed. Moves past either end and
    /// out-of-range selections are ignored.
    pub fn navigate(&mut self, nav: Navigation) -> bool {
        let target = match nav {
            Navigation::Prev if self.can_go_prev() => self.current - 1,
            Navigation::Next if self.can_go_next() => self.current + 1,
            Navigation::Select(i) if i < self.chapters.len() => i,
            _ => return false,
        };
        let changed = target != self.current;
        self.current = target;
        changed
    }
}
