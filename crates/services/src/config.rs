use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use quiz_core::model::SessionConfig;

use crate::error::ConfigError;
use crate::source::{FileQuestionSource, HttpQuestionSource, QUESTIONS_FILE, QuestionSource};

/// Location of the question bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Http { url: Url },
    File { path: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::File {
            path: PathBuf::from(QUESTIONS_FILE),
        }
    }
}

impl SourceConfig {
    /// Build the configured source.
    #[must_use]
    pub fn build(&self) -> Box<dyn QuestionSource> {
        match self {
            Self::Http { url } => Box::new(HttpQuestionSource::new(url.clone())),
            Self::File { path } => Box::new(FileQuestionSource::new(path.clone())),
        }
    }
}

/// Quiz application settings.
///
/// ```json
/// {
///   "source": { "kind": "http", "url": "https://example.com/questions.json" },
///   "session": { "question_count": 20, "stratify": { "section": "Australian values", "count": 5 } }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl QuizConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed or out-of-range settings.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json_str(&body)
    }
}
