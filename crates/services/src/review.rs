use std::fmt;

use quiz_core::model::ScoredSession;

/// Overall judgement of a scored attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Perfect,
    Great,
    Good,
    KeepPracticing,
}

impl Verdict {
    /// Perfect when every answer is right, great from 70%, good from 50%.
    #[must_use]
    pub fn from_score(score: usize, total: usize) -> Self {
        if total > 0 && score >= total {
            Self::Perfect
        } else if score * 10 >= total * 7 && total > 0 {
            Self::Great
        } else if score * 2 >= total && total > 0 {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect score!",
            Self::Great => "Great job!",
            Self::Good => "Good effort!",
            Self::KeepPracticing => "Keep practicing!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Review line for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub text: String,
    pub options: Vec<String>,
    pub chosen: usize,
    pub correct: usize,
    pub is_correct: bool,
}

/// Result screen model for a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReview {
    pub score: usize,
    pub total: usize,
    pub verdict: Verdict,
    pub items: Vec<ReviewItem>,
}

impl QuizReview {
    #[must_use]
    pub fn from_scored(scored: &ScoredSession) -> Self {
        let items = scored
            .outcomes()
            .map(|outcome| ReviewItem {
                text: outcome.question.text().to_owned(),
                options: outcome
                    .question
                    .options()
                    .iter()
                    .map(|o| o.as_str().to_owned())
                    .collect(),
                chosen: outcome.chosen.value(),
                correct: outcome.question.correct().value(),
                is_correct: outcome.is_correct,
            })
            .collect();

        Self {
            score: scored.score(),
            total: scored.total(),
            verdict: Verdict::from_score(scored.score(), scored.total()),
            items,
        }
    }

    /// Items answered wrongly, for a "review mistakes" list.
    pub fn mistakes(&self) -> impl Iterator<Item = &ReviewItem> {
        self.items.iter().filter(|item| !item.is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_thresholds_for_ten_questions() {
        assert_eq!(Verdict::from_score(10, 10), Verdict::Perfect);
        assert_eq!(Verdict::from_score(9, 10), Verdict::Great);
        assert_eq!(Verdict::from_score(7, 10), Verdict::Great);
        assert_eq!(Verdict::from_score(6, 10), Verdict::Good);
        assert_eq!(Verdict::from_score(5, 10), Verdict::Good);
        assert_eq!(Verdict::from_score(4, 10), Verdict::KeepPracticing);
        assert_eq!(Verdict::from_score(0, 10), Verdict::KeepPracticing);
    }

    #[test]
    fn verdict_scales_with_session_length() {
        assert_eq!(Verdict::from_score(2, 2), Verdict::Perfect);
        assert_eq!(Verdict::from_score(1, 2), Verdict::Good);
        assert_eq!(Verdict::from_score(14, 20), Verdict::Great);
        assert_eq!(Verdict::Great.to_string(), "Great job!");
    }
}
