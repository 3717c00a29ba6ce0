use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Section {index} does not exist, the draft has {len} sections")]
    NoSuchSection { index: usize, len: usize },
}

/// One question of the application form and the answer to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub question: String,
    pub answer: String,
    /// Maximum answer length in characters, if the form imposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_limit: Option<usize>,
}

impl Section {
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    /// Length of the answer in characters, whitespace included.
    #[must_use]
    pub fn char_count(&self) -> usize { self.answer.chars().count() }

    /// Length of the answer in characters, whitespace excluded.
    #[must_use]
    pub fn char_count_without_whitespace(&self) -> usize {
        self.answer.chars().filter(|c| !c.is_whitespace()).count()
    }

    #[must_use]
    pub fn is_over_limit(&self) -> bool { self.char_limit.is_some_and(|limit| self.char_count() > limit) }
}

/// A cover letter being written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub title: String,
    pub company: String,
    pub sections: Vec<Section>,
}

impl Draft {
    pub fn add_section(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// # Errors
    ///
    /// If there is no section at `index`.
    pub fn remove_section(&mut self, index: usize) -> Result<Section, DraftError> {
        self.check_index(index)?;
        Ok(self.sections.remove(index))
    }

    /// # Errors
    ///
    /// If there is no section at `index`.
    pub fn set_answer(&mut self, index: usize, answer: impl Into<String>) -> Result<(), DraftError> {
        self.check_index(index)?;
        self.sections[index].answer = answer.into();
        Ok(())
    }

    /// Moves the section at `from` so that it ends up at `to`.
    ///
    /// # Errors
    ///
    /// If either index is out of range.
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        self.check_index(from)?;
        self.check_index(to)?;

        let section = self.sections.remove(from);
        self.sections.insert(to, section);
        Ok(())
    }

    /// Whether the draft has a title or any answered section.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty()
            || self
                .sections
                .iter()
                .any(|section| !section.answer.trim().is_empty())
    }

    fn check_index(&self, index: usize) -> Result<(), DraftError> {
        if index < self.sections.len() {
            Ok(())
        } else {
            Err(DraftError::NoSuchSection {
                index,
                len: self.sections.len(),
            })
        }
    }
}
