use log::{debug, info, warn};
use rand::Rng;

use quiz_core::model::{Navigation, OptionIndex, QuestionPool, SessionConfig};
use quiz_core::{Clock, QuizController, QuizError, QuizPhase};

use crate::config::QuizConfig;
use crate::error::QuizServiceError;
use crate::loader::load_pool;
use crate::review::QuizReview;
use crate::source::QuestionSource;
use crate::view::QuizView;

/// Presentation-facing facade over one `QuizController`.
///
/// Owns the time source and the default session settings; the UI calls these
/// methods in response to user actions and renders [`QuizService::view`].
#[derive(Debug, Clone, Default)]
pub struct QuizService {
    controller: QuizController,
    session_config: SessionConfig,
}

impl QuizService {
    #[must_use]
    pub fn new(session_config: SessionConfig) -> Self {
        Self {
            controller: QuizController::new(),
            session_config,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.controller = self.controller.with_clock(clock);
        self
    }

    /// Load the configured source and build a ready service.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Load` if fetching or validation fails.
    pub async fn from_config(config: &QuizConfig) -> Result<Self, QuizServiceError> {
        let mut service = Self::new(config.session.clone());
        let source = config.source.build();
        service.load(source.as_ref()).await?;
        Ok(service)
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    #[must_use]
    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }

    /// Fetch and validate the question bank. `Idle → Ready`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if a pool is already loaded and
    /// `QuizServiceError::Load` if fetching or validation fails; the service
    /// stays idle in both failure cases.
    pub async fn load(
        &mut self,
        source: &dyn QuestionSource,
    ) -> Result<&QuestionPool, QuizServiceError> {
        if self.phase() != QuizPhase::Idle {
            return Err(self.invalid("load a question pool"));
        }
        let pool = load_pool(source).await?;
        self.controller.load_pool(pool)?;
        debug!("quiz ready");
        self.controller
            .pool()
            .ok_or_else(|| self.invalid("load a question pool"))
    }

    /// Start a session with the default settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InsufficientQuestions` or `QuizError::InvalidOperation`.
    pub fn start(&mut self) -> Result<QuizView, QuizServiceError> {
        let config = self.session_config.clone();
        self.start_with(&config)
    }

    /// Start a session with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InsufficientQuestions` or `QuizError::InvalidOperation`.
    pub fn start_with(&mut self, config: &SessionConfig) -> Result<QuizView, QuizServiceError> {
        self.start_with_rng(config, &mut rand::rng())
    }

    /// Start a session drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InsufficientQuestions` or `QuizError::InvalidOperation`.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Result<QuizView, QuizServiceError> {
        match self.controller.start_session_with_rng(config, rng) {
            Ok(session) => {
                info!("session {} started with {} questions", session.id(), session.len());
            }
            Err(err) => {
                warn!("cannot start session: {err}");
                return Err(err.into());
            }
        }
        Ok(self.view())
    }

    /// Record the chosen option for a question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` outside an active session or for out-of-range indices.
    pub fn select_answer(
        &mut self,
        question: usize,
        option: usize,
    ) -> Result<OptionIndex, QuizServiceError> {
        let choice = self.controller.select_answer(question, option)?;
        debug!("question {question} answered with option {choice}");
        Ok(choice)
    }

    /// Move between questions in single-question presentation.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` outside an active session.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<usize, QuizServiceError> {
        Ok(self.controller.navigate(navigation)?)
    }

    /// Score the session and return the review.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::IncompleteAnswers` while questions are unanswered.
    pub fn finish(&mut self) -> Result<QuizReview, QuizServiceError> {
        let scored = self.controller.finish().inspect_err(|err| {
            debug!("finish refused: {err}");
        })?;
        info!(
            "session {} scored {}/{}",
            scored.id(),
            scored.score(),
            scored.total()
        );
        Ok(QuizReview::from_scored(scored))
    }

    /// Discard the current attempt and return to the start screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOperation` when no attempt exists.
    pub fn reset(&mut self) -> Result<(), QuizServiceError> {
        self.controller.reset()?;
        debug!("quiz reset");
        Ok(())
    }

    /// Snapshot of the current state for rendering.
    #[must_use]
    pub fn view(&self) -> QuizView {
        QuizView::from_controller(&self.controller, self.session_config.session_len())
    }

    /// Result review, available once scored.
    #[must_use]
    pub fn review(&self) -> Option<QuizReview> {
        self.controller.scored().map(QuizReview::from_scored)
    }

    fn invalid(&self, operation: &'static str) -> QuizServiceError {
        QuizError::InvalidOperation {
            operation,
            phase: self.phase(),
        }
        .into()
    }
}
