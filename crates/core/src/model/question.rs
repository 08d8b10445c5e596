use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OPTION_COUNT, OptionIndex};
use crate::model::text::{OptionText, PromptText, SectionName, TextError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text {0}")]
    Text(TextError),

    #[error("section {0}")]
    Section(TextError),

    #[error("expected exactly {OPTION_COUNT} options, found {found}")]
    OptionCount { found: usize },

    #[error("option {position} {source}")]
    Option { position: usize, source: TextError },

    #[error("correct answer index {index} is outside 0..{OPTION_COUNT}")]
    CorrectIndex { index: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One multiple-choice quiz item.
///
/// Serializes with the question bank's field names (`question`, `section`,
/// `options`, `answer`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    text: PromptText,
    section: SectionName,
    options: [OptionText; OPTION_COUNT],
    #[serde(rename = "answer")]
    correct: OptionIndex,
}

impl Question {
    /// Creates a new Question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if any text is empty, the option count is not
    /// exactly four, or `correct` does not index into the options.
    pub fn new(
        text: impl Into<String>,
        section: impl Into<String>,
        options: Vec<String>,
        correct: usize,
    ) -> Result<Self, QuestionError> {
        let text = PromptText::parse(text).map_err(QuestionError::Text)?;
        let section = SectionName::parse(section).map_err(QuestionError::Section)?;

        let found = options.len();
        let options: [String; OPTION_COUNT] = options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { found })?;
        let mut parsed = Vec::with_capacity(OPTION_COUNT);
        for (position, option) in options.into_iter().enumerate() {
            let option = OptionText::parse(option)
                .map_err(|source| QuestionError::Option { position, source })?;
            parsed.push(option);
        }
        let options: [OptionText; OPTION_COUNT] = parsed
            .try_into()
            .map_err(|_| QuestionError::OptionCount { found })?;

        let correct =
            OptionIndex::new(correct).ok_or(QuestionError::CorrectIndex { index: correct })?;

        Ok(Self {
            text,
            section,
            options,
            correct,
        })
    }

    // Accessors
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    #[must_use]
    pub fn section(&self) -> &str {
        self.section.as_str()
    }

    #[must_use]
    pub fn options(&self) -> &[OptionText; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> &str {
        self.options[index.value()].as_str()
    }

    #[must_use]
    pub fn correct(&self) -> OptionIndex {
        self.correct
    }

    /// True when `choice` is the correct option.
    #[must_use]
    pub fn is_correct(&self, choice: OptionIndex) -> bool {
        self.correct == choice
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Sydney", "Melbourne", "Canberra", "Perth"]
            .map(String::from)
            .to_vec()
    }

    #[test]
    fn question_new_happy_path() {
        let q = Question::new("What is the capital of Australia?", "Geography", options(), 2)
            .unwrap();
        assert_eq!(q.text(), "What is the capital of Australia?");
        assert_eq!(q.section(), "Geography");
        assert_eq!(q.option(q.correct()), "Canberra");
        assert!(q.is_correct(OptionIndex::new(2).unwrap()));
        assert!(!q.is_correct(OptionIndex::new(0).unwrap()));
    }

    #[test]
    fn question_new_rejects_empty_text() {
        let err = Question::new("", "Geography", options(), 2).unwrap_err();
        assert_eq!(err, QuestionError::Text(TextError::Empty));

        let err = Question::new("Q", "", options(), 2).unwrap_err();
        assert_eq!(err, QuestionError::Section(TextError::Empty));
    }

    #[test]
    fn question_new_rejects_wrong_option_count() {
        let mut three = options();
        three.pop();
        let err = Question::new("Q", "S", three, 0).unwrap_err();
        assert_eq!(err, QuestionError::OptionCount { found: 3 });

        let mut five = options();
        five.push("Brisbane".into());
        let err = Question::new("Q", "S", five, 0).unwrap_err();
        assert_eq!(err, QuestionError::OptionCount { found: 5 });
    }

    #[test]
    fn question_new_rejects_empty_option_and_bad_index() {
        let mut opts = options();
        opts[1] = String::new();
        let err = Question::new("Q", "S", opts, 0).unwrap_err();
        assert_eq!(
            err,
            QuestionError::Option {
                position: 1,
                source: TextError::Empty
            }
        );

        let err = Question::new("Q", "S", options(), 4).unwrap_err();
        assert_eq!(err, QuestionError::CorrectIndex { index: 4 });
    }

    #[test]
    fn question_serializes_with_bank_field_names() {
        let q = Question::new("Q", "S", options(), 1).unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["question"], "Q");
        assert_eq!(json["section"], "S");
        assert_eq!(json["answer"], 1);
        assert_eq!(json["options"][2], "Canberra");

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }
}
