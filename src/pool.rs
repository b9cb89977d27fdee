//! Session pool building
//!
//! This module selects the questions played in one session: the bank is
//! filtered by difficulty, shuffled uniformly, and truncated to the desired
//! count. The resulting pool is fixed for the whole session and consumed by
//! index.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::question::{Difficulty, QuestionRecord};

/// Difficulty filter applied when building a session pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyFilter {
    /// Only easy questions
    Easy,
    /// Only medium questions
    Medium,
    /// Only hard questions
    Hard,
    /// Questions of any difficulty
    #[default]
    Mixed,
}

impl DifficultyFilter {
    /// Returns whether a question of the given difficulty passes the filter
    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            Self::Easy => difficulty == Difficulty::Easy,
            Self::Medium => difficulty == Difficulty::Medium,
            Self::Hard => difficulty == Difficulty::Hard,
            Self::Mixed => true,
        }
    }
}

/// Builds the ordered question pool for one session
///
/// Retains bank records matching the filter, shuffles them uniformly at
/// random, and truncates to `min(desired_count, matching)`. An empty result
/// means the session cannot start; callers must treat it as immediate
/// game over.
pub fn build_pool(
    bank: &[QuestionRecord],
    filter: DifficultyFilter,
    desired_count: usize,
) -> Vec<QuestionRecord> {
    let mut pool = bank
        .iter()
        .filter(|question| filter.matches(question.difficulty))
        .cloned()
        .collect_vec();

    fastrand::shuffle(&mut pool);
    pool.truncate(desired_count);

    pool
}
