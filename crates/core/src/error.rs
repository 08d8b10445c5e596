use thiserror::Error;

use crate::controller::QuizPhase;

/// Errors emitted by quiz session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("not enough questions{}: requested {requested}, available {available}", in_section(.section))]
    InsufficientQuestions {
        requested: usize,
        available: usize,
        /// Partition that ran short; `None` for the whole pool.
        section: Option<SectionScope>,
    },

    #[error("{unanswered} question(s) still unanswered")]
    IncompleteAnswers { unanswered: usize },

    #[error("cannot {operation} while {phase}")]
    InvalidOperation {
        operation: &'static str,
        phase: QuizPhase,
    },

    #[error("question index {index} is out of range for a session of {len}")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option index {index} is out of range")]
    OptionOutOfRange { index: usize },
}

/// Which side of a stratified split a shortage refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionScope {
    Matching(String),
    Excluding(String),
}

fn in_section(section: &Option<SectionScope>) -> String {
    match section {
        None => String::new(),
        Some(SectionScope::Matching(name)) => format!(" in section \"{name}\""),
        Some(SectionScope::Excluding(name)) => format!(" outside section \"{name}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_message_names_partition() {
        let err = QuizError::InsufficientQuestions {
            requested: 5,
            available: 2,
            section: Some(SectionScope::Matching("Values".into())),
        };
        assert_eq!(
            err.to_string(),
            "not enough questions in section \"Values\": requested 5, available 2"
        );

        let err = QuizError::InsufficientQuestions {
            requested: 1,
            available: 0,
            section: None,
        };
        assert_eq!(
            err.to_string(),
            "not enough questions: requested 1, available 0"
        );
    }

    #[test]
    fn invalid_operation_message() {
        let err = QuizError::InvalidOperation {
            operation: "select an answer",
            phase: QuizPhase::Idle,
        };
        assert_eq!(err.to_string(), "cannot select an answer while idle");
    }
}
