use quiz_core::model::{Question, QuizSession, SessionProgress};
use quiz_core::{QuizController, QuizPhase};

/// Presentation-agnostic snapshot of one question in the active session.
///
/// No pre-formatted strings; the UI decides numbering and highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
}

impl QuestionView {
    fn new(index: usize, question: &Question, selected: Option<usize>) -> Self {
        Self {
            index,
            text: question.text().to_owned(),
            options: question
                .options()
                .iter()
                .map(|o| o.as_str().to_owned())
                .collect(),
            selected,
        }
    }
}

/// Everything a presentation layer needs to render the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub phase: QuizPhase,
    /// Size of the loaded pool, `None` before loading.
    pub pool_size: Option<usize>,
    /// Session length the next `start` will use, including any stratified
    /// section draw.
    pub question_count: usize,
    pub questions: Vec<QuestionView>,
    pub current: Option<usize>,
    pub progress: Option<SessionProgress>,
    /// True when the finish action should be enabled.
    pub can_finish: bool,
    pub score: Option<usize>,
}

impl QuizView {
    pub(crate) fn from_controller(controller: &QuizController, question_count: usize) -> Self {
        let pool_size = controller.pool().map(|pool| pool.len());

        let (session, score) = match (controller.session(), controller.scored()) {
            (Some(session), _) => (Some(session), None),
            (None, Some(scored)) => (Some(scored.session()), Some(scored.score())),
            (None, None) => (None, None),
        };

        Self {
            phase: controller.phase(),
            pool_size,
            question_count,
            questions: session.map(question_views).unwrap_or_default(),
            current: session.map(QuizSession::current),
            progress: session.map(QuizSession::progress),
            can_finish: controller.phase() == QuizPhase::Active
                && session.is_some_and(QuizSession::is_complete),
            score,
        }
    }
}

fn question_views(session: &QuizSession) -> Vec<QuestionView> {
    session
        .questions()
        .iter()
        .zip(session.answers())
        .enumerate()
        .map(|(index, (question, slot))| {
            QuestionView::new(index, question, slot.map(|choice| choice.value()))
        })
        .collect()
}
