use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{QuizError, SectionScope};
use crate::model::{Question, QuestionPool, SessionConfig};

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// How many of `questions` came from the stratified section.
    pub stratified_selected: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Samples a session from the pool according to a `SessionConfig`.
///
/// Selection is without replacement and the final order is a uniform random
/// permutation (Fisher–Yates via `SliceRandom::shuffle`).
pub struct SessionBuilder<'a> {
    pool: &'a QuestionPool,
    config: &'a SessionConfig,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(pool: &'a QuestionPool, config: &'a SessionConfig) -> Self {
        Self { pool, config }
    }

    /// Build a session plan.
    ///
    /// - Flat: `question_count` questions drawn from the whole pool.
    /// - Stratified: `count` from the matching section plus `question_count`
    ///   from the other sections, merged and re-shuffled.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InsufficientQuestions` if the pool, or either side of
    /// a stratified split, holds fewer questions than requested.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<SessionPlan, QuizError> {
        let total = self.config.question_count();

        let Some(stratify) = self.config.stratify() else {
            let candidates: Vec<&Question> = self.pool.iter().collect();
            let selected = sample(candidates, total, None, rng)?;
            return Ok(SessionPlan {
                questions: selected.into_iter().cloned().collect(),
                stratified_selected: 0,
            });
        };

        let section = stratify.section();
        let (matching, rest): (Vec<&Question>, Vec<&Question>) =
            self.pool.iter().partition(|q| q.section() == section);

        let from_section = sample(
            matching,
            stratify.count(),
            Some(SectionScope::Matching(section.to_owned())),
            rng,
        )?;
        let from_rest = sample(
            rest,
            total,
            Some(SectionScope::Excluding(section.to_owned())),
            rng,
        )?;

        let stratified_selected = from_section.len();
        let mut selected: Vec<&Question> = from_section;
        selected.extend(from_rest);
        selected.shuffle(rng);

        Ok(SessionPlan {
            questions: selected.into_iter().cloned().collect(),
            stratified_selected,
        })
    }
}

fn sample<'q, R: Rng + ?Sized>(
    mut candidates: Vec<&'q Question>,
    count: usize,
    section: Option<SectionScope>,
    rng: &mut R,
) -> Result<Vec<&'q Question>, QuizError> {
    if count > candidates.len() {
        return Err(QuizError::InsufficientQuestions {
            requested: count,
            available: candidates.len(),
            section,
        });
    }
    candidates.shuffle(rng);
    candidates.truncate(count);
    Ok(candidates)
}
