//! The quiz lifecycle as an explicit state machine.
//!
//! `Idle → Ready → Active → Scored → Ready`. Each operation is a legal
//! transition; anything else yields `QuizError::InvalidOperation` and leaves
//! the state as it was.

use std::fmt;
use std::mem;

use rand::Rng;
use serde_json::Value;

use crate::error::QuizError;
use crate::model::{
    Navigation, OptionIndex, QuestionPool, QuizSession, ScoredSession, SessionConfig,
};
use crate::plan::SessionBuilder;
use crate::time::Clock;
use crate::validate::{ValidationError, validate};

/// Coarse phase of the controller, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizPhase {
    Idle,
    Ready,
    Active,
    Scored,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Active => "active",
            Self::Scored => "scored",
        })
    }
}

/// Full controller state. The pool travels with every loaded state.
#[derive(Debug, Clone, Default)]
pub enum QuizState {
    #[default]
    Idle,
    Ready(QuestionPool),
    Active(QuestionPool, QuizSession),
    Scored(QuestionPool, ScoredSession),
}

impl QuizState {
    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self {
            Self::Idle => QuizPhase::Idle,
            Self::Ready(_) => QuizPhase::Ready,
            Self::Active(..) => QuizPhase::Active,
            Self::Scored(..) => QuizPhase::Scored,
        }
    }
}

/// Owns the lifecycle of quiz attempts over one question pool.
#[derive(Debug, Clone, Default)]
pub struct QuizController {
    state: QuizState,
    clock: Clock,
}

impl QuizController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn pool(&self) -> Option<&QuestionPool> {
        match &self.state {
            QuizState::Idle => None,
            QuizState::Ready(pool) | QuizState::Active(pool, _) | QuizState::Scored(pool, _) => {
                Some(pool)
            }
        }
    }

    /// The in-progress session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::Active(_, session) => Some(session),
            _ => None,
        }
    }

    /// The finished session, if any.
    #[must_use]
    pub fn scored(&self) -> Option<&ScoredSession> {
        match &self.state {
            QuizState::Scored(_, scored) => Some(scored),
            _ => None,
        }
    }

    /// Install the validated pool. `Idle → Ready`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` unless the controller is idle.
    pub fn load_pool(&mut self, pool: QuestionPool) -> Result<(), QuizError> {
        self.expect_phase(QuizPhase::Idle, "load a question pool")?;
        self.state = QuizState::Ready(pool);
        Ok(())
    }

    /// Validate raw question data and install it.
    ///
    /// On any failure the controller stays where it was.
    ///
    /// # Errors
    ///
    /// Returns `LoadRawError::Validation` for bad data and
    /// `LoadRawError::Quiz` if the controller is not idle.
    pub fn load_raw(&mut self, raw: &Value) -> Result<(), LoadRawError> {
        self.expect_phase(QuizPhase::Idle, "load a question pool")?;
        let pool = validate(raw)?;
        self.load_pool(pool)?;
        Ok(())
    }

    /// Start a session using the thread-local random generator.
    ///
    /// # Errors
    ///
    /// See [`QuizController::start_session_with_rng`].
    pub fn start_session(&mut self, config: &SessionConfig) -> Result<&QuizSession, QuizError> {
        self.start_session_with_rng(config, &mut rand::rng())
    }

    /// Sample a new session from the pool. `Ready → Active`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` unless the controller is ready.
    /// Returns `QuizError::InsufficientQuestions` if the pool cannot satisfy `config`.
    pub fn start_session_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Result<&QuizSession, QuizError> {
        let pool = match mem::take(&mut self.state) {
            QuizState::Ready(pool) => pool,
            other => {
                self.state = other;
                return Err(self.invalid("start a session"));
            }
        };
        let plan = match SessionBuilder::new(&pool, config).build(rng) {
            Ok(plan) => plan,
            Err(err) => {
                self.state = QuizState::Ready(pool);
                return Err(err);
            }
        };

        let session = QuizSession::new(plan.questions, self.clock.now());
        self.state = QuizState::Active(pool, session);
        self.session().ok_or_else(|| self.invalid("start a session"))
    }

    /// Record an answer, replacing any earlier choice for that question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` outside an active session and
    /// `QuestionOutOfRange`/`OptionOutOfRange` for bad indices.
    pub fn select_answer(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<OptionIndex, QuizError> {
        let phase = self.phase();
        match &mut self.state {
            QuizState::Active(_, session) => session.select_answer(question, option),
            _ => Err(QuizError::InvalidOperation {
                operation: "select an answer",
                phase,
            }),
        }
    }

    /// Move the current position and return it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` outside an active session.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<usize, QuizError> {
        let phase = self.phase();
        match &mut self.state {
            QuizState::Active(_, session) => Ok(session.navigate(navigation)),
            _ => Err(QuizError::InvalidOperation {
                operation: "navigate",
                phase,
            }),
        }
    }

    /// Score the session. `Active → Scored`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` outside an active session.
    /// Returns `QuizError::IncompleteAnswers` while any question is unanswered.
    pub fn finish(&mut self) -> Result<&ScoredSession, QuizError> {
        let (pool, session) = match mem::take(&mut self.state) {
            QuizState::Active(pool, session) => (pool, session),
            other => {
                self.state = other;
                return Err(self.invalid("finish"));
            }
        };
        let Some(choices) = session.choices() else {
            let unanswered = session.unanswered_count();
            self.state = QuizState::Active(pool, session);
            return Err(QuizError::IncompleteAnswers { unanswered });
        };

        let scored = ScoredSession::new(session, choices, self.clock.now());
        self.state = QuizState::Scored(pool, scored);
        self.scored().ok_or_else(|| self.invalid("finish"))
    }

    /// Discard the current attempt. `Active | Scored → Ready`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` when there is no attempt to discard.
    pub fn reset(&mut self) -> Result<(), QuizError> {
        match mem::take(&mut self.state) {
            QuizState::Active(pool, _) | QuizState::Scored(pool, _) => {
                self.state = QuizState::Ready(pool);
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("reset"))
            }
        }
    }

    fn expect_phase(&self, expected: QuizPhase, operation: &'static str) -> Result<(), QuizError> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidOperation {
            operation,
            phase: self.phase(),
        }
    }
}

/// Failure of [`QuizController::load_raw`].
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadRawError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
