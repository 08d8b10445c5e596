#![forbid(unsafe_code)]

pub mod controller;
pub mod error;
pub mod model;
pub mod plan;
pub mod time;
pub mod validate;


pub use controller::{LoadRawError, QuizController, QuizPhase, QuizState};
pub use error::{QuizError, SectionScope};
pub use plan::{SessionBuilder, SessionPlan};
pub use time::Clock;
pub use validate::{ValidationError, ValidationRule, validate, validate_str};
