use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionConfigError {
    #[error("question count must be > 0")]
    ZeroQuestions,

    #[error("stratified section cannot be empty")]
    EmptySection,

    #[error("stratified count must be > 0")]
    ZeroStratifiedCount,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Draw a fixed number of questions from one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stratify {
    section: String,
    count: usize,
}

impl Stratify {
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

/// How a session samples the pool.
///
/// Flat sessions draw `question_count` questions from the whole pool. With
/// `stratify`, `count` questions come from the named section and another
/// `question_count` from every other section, so the session holds
/// `count + question_count` questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionConfigDraft")]
pub struct SessionConfig {
    question_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    stratify: Option<Stratify>,
}

/// Default session length of the quiz.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

impl SessionConfig {
    /// Flat sampling of `question_count` questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionConfigError::ZeroQuestions` if `question_count` is zero.
    pub fn flat(question_count: usize) -> Result<Self, SessionConfigError> {
        Self::new(question_count, None)
    }

    /// Stratified sampling: `count` from `section` plus `question_count` from
    /// the other sections.
    ///
    /// # Errors
    ///
    /// Returns `SessionConfigError` if any parameter is out of range.
    pub fn stratified(
        question_count: usize,
        section: impl Into<String>,
        count: usize,
    ) -> Result<Self, SessionConfigError> {
        Self::new(
            question_count,
            Some(Stratify {
                section: section.into(),
                count,
            }),
        )
    }

    fn new(question_count: usize, stratify: Option<Stratify>) -> Result<Self, SessionConfigError> {
        if question_count == 0 {
            return Err(SessionConfigError::ZeroQuestions);
        }
        if let Some(stratify) = &stratify {
            if stratify.section.is_empty() {
                return Err(SessionConfigError::EmptySection);
            }
            if stratify.count == 0 {
                return Err(SessionConfigError::ZeroStratifiedCount);
            }
        }

        Ok(Self {
            question_count,
            stratify,
        })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn stratify(&self) -> Option<&Stratify> {
        self.stratify.as_ref()
    }

    /// Number of questions a session built from this config holds.
    #[must_use]
    pub fn session_len(&self) -> usize {
        self.question_count + self.stratify.as_ref().map_or(0, Stratify::count)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            stratify: None,
        }
    }
}

#[derive(Deserialize)]
struct SessionConfigDraft {
    question_count: usize,
    #[serde(default)]
    stratify: Option<Stratify>,
}

impl TryFrom<SessionConfigDraft> for SessionConfig {
    type Error = SessionConfigError;

    fn try_from(draft: SessionConfigDraft) -> Result<Self, Self::Error> {
        Self::new(draft.question_count, draft.stratify)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
