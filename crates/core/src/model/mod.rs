mod config;
mod ids;
mod pool;
mod question;
mod session;
pub mod text;

pub use config::{DEFAULT_QUESTION_COUNT, SessionConfig, SessionConfigError, Stratify};
pub use ids::{OPTION_COUNT, OptionIndex, SessionId};
pub use pool::QuestionPool;
pub use question::{Question, QuestionError};
pub use session::{
    Navigation, QuestionOutcome, QuizSession, ScoredSession, SessionProgress, Slot,
};
pub use text::{OptionText, PromptText, SectionName, TextError};
