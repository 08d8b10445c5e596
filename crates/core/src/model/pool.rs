use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::question::Question;

/// The validated, immutable set of candidate questions for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Number of questions labelled with `section`.
    #[must_use]
    pub fn count_in_section(&self, section: &str) -> usize {
        self.questions
            .iter()
            .filter(|q| q.section() == section)
            .count()
    }

    /// Distinct section labels, in the order they first appear.
    #[must_use]
    pub fn sections(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(Question::section)
            .filter(|section| seen.insert(*section))
            .collect()
    }
}

impl<'a> IntoIterator for &'a QuestionPool {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(section: &str) -> Question {
        let options = ["A", "B", "C", "D"].map(String::from).to_vec();
        Question::new("Q", section, options, 0).unwrap()
    }

    #[test]
    fn sections_are_distinct_in_first_seen_order() {
        let pool = QuestionPool::new(vec![
            question("Values"),
            question("Geography"),
            question("Values"),
        ]);
        assert_eq!(pool.sections(), vec!["Values", "Geography"]);
        assert_eq!(pool.count_in_section("Values"), 2);
        assert_eq!(pool.count_in_section("Geography"), 1);
        assert_eq!(pool.count_in_section("History"), 0);
    }

    #[test]
    fn sections_dedup_across_interleaved_labels() {
        let labels = ["A", "B", "A", "C", "B", "C", "A"];
        let pool = QuestionPool::new(labels.iter().map(|l| question(l)).collect());
        assert_eq!(pool.sections(), vec!["A", "B", "C"]);
    }

    #[test]
    fn empty_pool_is_representable() {
        let pool = QuestionPool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        assert!(pool.sections().is_empty());
    }
}
