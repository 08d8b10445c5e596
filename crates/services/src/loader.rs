use log::{info, warn};

use quiz_core::model::QuestionPool;
use quiz_core::validate;

use crate::error::LoadPoolError;
use crate::source::QuestionSource;

/// Fetch the question bank once and validate it.
///
/// # Errors
///
/// Returns `LoadPoolError::Load` if the source fails and
/// `LoadPoolError::Validation` if the data does not match the question schema.
pub async fn load_pool(source: &dyn QuestionSource) -> Result<QuestionPool, LoadPoolError> {
    let location = source.describe();
    let raw = source.fetch().await.inspect_err(|err| {
        warn!("fetching questions from {location} failed: {err}");
    })?;

    let pool = validate(&raw).inspect_err(|err| {
        warn!("question bank from {location} is invalid: {err}");
    })?;

    info!(
        "loaded {} questions in {} sections from {location}",
        pool.len(),
        pool.sections().len()
    );
    Ok(pool)
}
