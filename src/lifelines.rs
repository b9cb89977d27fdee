//! Lifelines and their effect on the current choice view
//!
//! Each team holds each lifeline exactly once per session. Fifty-fifty and
//! consult narrow the visible choice set without resolving the question;
//! pass is handled by the session itself since it resolves the question.
//! This module owns the choice-view mutations.

use enum_map::Enum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::choices::ChoiceView;

/// The three one-shot lifelines available to each team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifeline {
    /// Hides up to two incorrect choices
    FiftyFifty,
    /// Resolves the question with no points for either team
    Pass,
    /// Narrows the choices down to the correct one plus one incorrect one
    Consult,
}

/// Hides up to two random incorrect, still-visible choices
///
/// The correct choice is never hidden. On a two-choice question only one
/// incorrect choice exists and only that one is hidden.
pub(crate) fn apply_fifty_fifty(view: &mut ChoiceView) {
    let mut wrong_indices = view
        .choices()
        .iter()
        .enumerate()
        .filter(|(_, choice)| !choice.correct && !choice.hidden)
        .map(|(index, _)| index)
        .collect_vec();

    fastrand::shuffle(&mut wrong_indices);

    for index in wrong_indices
        .into_iter()
        .take(crate::constants::lifelines::FIFTY_FIFTY_REMOVALS)
    {
        view.hide(index);
    }
}

/// Keeps the correct choice plus one random incorrect choice visible
///
/// All other choices are hidden, leaving exactly two visible on any
/// question with two or more choices.
pub(crate) fn apply_consult(view: &mut ChoiceView) {
    let Some(correct_index) = view.choices().iter().position(|choice| choice.correct) else {
        return;
    };

    let wrong_indices = view
        .choices()
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != correct_index)
        .map(|(index, _)| index)
        .collect_vec();
    let kept_wrong = fastrand::choice(&wrong_indices).copied();

    for index in 0..view.len() {
        if index != correct_index && Some(index) != kept_wrong {
            view.hide(index);
        }
    }
}
