#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod loader;
pub mod quiz_service;
pub mod review;
pub mod source;
pub mod view;

pub use quiz_core::Clock;

pub use config::{QuizConfig, SourceConfig};
pub use error::{ConfigError, LoadError, LoadPoolError, QuizServiceError};
pub use loader::load_pool;
pub use quiz_service::QuizService;
pub use review::{QuizReview, ReviewItem, Verdict};
pub use source::{FileQuestionSource, HttpQuestionSource, QuestionSource, StaticQuestionSource};
pub use view::{QuestionView, QuizView};
