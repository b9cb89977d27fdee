//! Per-question choice views
//!
//! Every time a question is presented, its answer choices are shuffled into
//! a fresh [`ChoiceView`]. The view tracks which shuffled position holds the
//! correct answer and which positions lifelines have hidden. Hiding is a
//! presentation-level flag: indices stay stable so a submitted index always
//! refers to the same choice.

use itertools::Itertools;
use serde::Serialize;

use crate::question::QuestionRecord;

/// One answer choice in its shuffled position
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    /// The display text of this choice
    pub text: String,
    /// Whether this choice is the correct answer
    pub correct: bool,
    /// The choice's index in the original question record
    pub original_index: usize,
    /// Whether a lifeline has hidden this choice
    pub hidden: bool,
}

/// The shuffled, possibly partially hidden choice set of the current question
///
/// Rebuilt for every question presentation and never reused across
/// questions. Invalidated by the session once the question resolves.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    choices: Vec<Choice>,
}

impl ChoiceView {
    /// Builds a uniformly shuffled view of a question's choices
    pub fn shuffled(question: &QuestionRecord) -> Self {
        let mut choices = question
            .choices
            .iter()
            .enumerate()
            .map(|(original_index, text)| Choice {
                text: text.clone(),
                correct: original_index == question.answer_index,
                original_index,
                hidden: false,
            })
            .collect_vec();

        fastrand::shuffle(&mut choices);

        Self { choices }
    }

    /// Returns the number of choices, hidden ones included
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns whether the view has no choices
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Returns all choices in shuffled order
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Returns the choice at a shuffled index
    pub fn get(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    /// Returns whether the index refers to a currently visible choice
    ///
    /// Hidden choices are not selectable; the UI contract only ever exposes
    /// visible ones.
    pub fn is_selectable(&self, index: usize) -> bool {
        self.choices.get(index).is_some_and(|choice| !choice.hidden)
    }

    /// Returns the number of visible choices
    pub fn visible_count(&self) -> usize {
        self.choices.iter().filter(|choice| !choice.hidden).count()
    }

    /// Returns the text of the correct choice
    pub fn correct_text(&self) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.correct)
            .map(|choice| choice.text.as_str())
    }

    /// Hides the choice at the given shuffled index
    pub(crate) fn hide(&mut self, index: usize) {
        if let Some(choice) = self.choices.get_mut(index) {
            choice.hidden = true;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::question::Difficulty;

    fn question() -> QuestionRecord {
        QuestionRecord {
            text: "Pick b".to_string(),
            choices: vec![
                "a".to_string(),
                "b".to_string(),
                "c".to_string(),
                "d".to_string(),
            ],
            answer_index: 1,
            explanation: String::new(),
            difficulty: Difficulty::Medium,
            category: "General".to_string(),
        }
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let q = question();
        let view = ChoiceView::shuffled(&q);

        assert_eq!(view.len(), 4);
        let original_indices: HashSet<_> =
            view.choices().iter().map(|c| c.original_index).collect();
        assert_eq!(original_indices, (0..4).collect());
        for choice in view.choices() {
            assert_eq!(choice.text, q.choices[choice.original_index]);
        }
    }

    #[test]
    fn test_exactly_one_correct_choice() {
        let view = ChoiceView::shuffled(&question());
        let correct = view.choices().iter().filter(|c| c.correct).collect_vec();

        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].original_index, 1);
        assert_eq!(correct[0].text, "b");
        assert_eq!(view.correct_text(), Some("b"));
    }

    #[test]
    fn test_hide_affects_selectability_not_indices() {
        let mut view = ChoiceView::shuffled(&question());
        let text_before = view.get(2).expect("index exists").text.clone();

        view.hide(2);

        assert!(!view.is_selectable(2));
        assert_eq!(view.visible_count(), 3);
        assert_eq!(view.get(2).expect("index exists").text, text_before);
    }

    #[test]
    fn test_out_of_range_index_not_selectable() {
        let view = ChoiceView::shuffled(&question());
        assert!(!view.is_selectable(99));
    }
}
