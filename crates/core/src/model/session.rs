use chrono::{DateTime, Duration, Utc};

use crate::error::QuizError;
use crate::model::ids::{OptionIndex, SessionId};
use crate::model::question::Question;

/// Answer state of one question: `None` until an option is chosen.
pub type Slot = Option<OptionIndex>;

/// Movement request for single-question presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    JumpTo(usize),
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── ACTIVE SESSION ────────────────────────────────────────────────────────────
//

/// One attempt at a sampled set of questions.
///
/// The question list is fixed at creation; only the answer slots and the
/// current position change while the session is active.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    id: SessionId,
    questions: Vec<Question>,
    answers: Vec<Slot>,
    current: usize,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    pub(crate) fn new(questions: Vec<Question>, started_at: DateTime<Utc>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            id: SessionId::random(),
            questions,
            answers,
            current: 0,
            started_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Slot] {
        &self.answers
    }

    /// Slot for `index`, or `None` if the index is outside the session.
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<Slot> {
        self.answers.get(index).copied()
    }

    /// Number of questions in this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.len() - self.answered_count()
    }

    /// True once every slot holds an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        SessionProgress {
            total: self.len(),
            answered,
            remaining: self.len() - answered,
            is_complete: self.is_complete(),
        }
    }

    /// Record `option` as the answer to question `index`, replacing any prior choice.
    pub(crate) fn select_answer(
        &mut self,
        index: usize,
        option: usize,
    ) -> Result<OptionIndex, QuizError> {
        let len = self.len();
        let slot = self
            .answers
            .get_mut(index)
            .ok_or(QuizError::QuestionOutOfRange { index, len })?;
        let choice = OptionIndex::new(option).ok_or(QuizError::OptionOutOfRange { index: option })?;
        *slot = Some(choice);
        Ok(choice)
    }

    /// Move the current position. Moves past either end leave it unchanged.
    pub(crate) fn navigate(&mut self, navigation: Navigation) -> usize {
        let target = match navigation {
            Navigation::Previous => self.current.checked_sub(1),
            Navigation::Next => self.current.checked_add(1),
            Navigation::JumpTo(index) => Some(index),
        };
        if let Some(target) = target.filter(|t| *t < self.len()) {
            self.current = target;
        }
        self.current
    }

    /// Every chosen option, or `None` while any slot is empty.
    pub(crate) fn choices(&self) -> Option<Vec<OptionIndex>> {
        self.answers.iter().copied().collect()
    }
}

//
// ─── SCORED SESSION ────────────────────────────────────────────────────────────
//

/// Outcome of a single question in a scored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOutcome<'a> {
    pub question: &'a Question,
    pub chosen: OptionIndex,
    pub is_correct: bool,
}

/// A finished session with its score frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSession {
    session: QuizSession,
    choices: Vec<OptionIndex>,
    score: usize,
    completed_at: DateTime<Utc>,
}

impl ScoredSession {
    pub(crate) fn new(
        session: QuizSession,
        choices: Vec<OptionIndex>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let score = session
            .questions
            .iter()
            .zip(&choices)
            .filter(|(question, choice)| question.is_correct(**choice))
            .count();
        Self {
            session,
            choices,
            score,
            completed_at,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.session.id
    }

    /// Number of correctly answered questions.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.session.len()
    }

    #[must_use]
    pub fn choices(&self) -> &[OptionIndex] {
        &self.choices
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.session.started_at
    }

    pub fn outcomes(&self) -> impl Iterator<Item = QuestionOutcome<'_>> {
        self.session
            .questions
            .iter()
            .zip(&self.choices)
            .map(|(question, chosen)| QuestionOutcome {
                question,
                chosen: *chosen,
                is_correct: question.is_correct(*chosen),
            })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
