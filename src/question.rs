//! Question records and difficulty levels
//!
//! This module defines the immutable question record used everywhere in the
//! engine, the difficulty scale with its scoring table, and validation
//! bounds for records accepted into the bank.

use enum_map::Enum;
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Difficulty of a question
///
/// The difficulty determines how many points a correct answer is worth
/// and is matched against the session's difficulty filter when building
/// the question pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy question, worth the fewest points
    Easy,
    /// Medium question, the default when a record declares no difficulty
    #[default]
    Medium,
    /// Hard question, worth the most points
    Hard,
}

impl Difficulty {
    /// Returns the points awarded for answering a question of this
    /// difficulty correctly
    pub fn points(self) -> u64 {
        match self {
            Self::Easy => crate::constants::scoring::EASY_POINTS,
            Self::Medium => crate::constants::scoring::MEDIUM_POINTS,
            Self::Hard => crate::constants::scoring::HARD_POINTS,
        }
    }

    /// Parses a difficulty label leniently, the way bank sources declare it
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unknown labels fall back to [`Difficulty::Medium`], matching the
    /// default applied to records that declare no difficulty at all.
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            _ => Self::Medium,
        }
    }
}

/// A single normalized trivia question
///
/// Records are immutable once loaded into the bank. Two records are
/// considered duplicates when their `text` is identical; the bank keeps
/// only the first occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionRecord {
    /// The question text, also the record's identity for deduplication
    #[garde(length(min = 1, max = crate::constants::question::MAX_TEXT_LENGTH))]
    pub text: String,
    /// Ordered list of answer choices
    #[garde(
        length(min = 1, max = crate::constants::question::MAX_CHOICE_COUNT),
        inner(length(min = 1, max = crate::constants::question::MAX_CHOICE_LENGTH))
    )]
    pub choices: Vec<String>,
    /// Index into `choices` of the correct answer
    #[garde(skip)]
    pub answer_index: usize,
    /// Optional explanation shown after the question resolves (empty if absent)
    #[garde(skip)]
    pub explanation: String,
    /// Difficulty of the question
    #[garde(skip)]
    pub difficulty: Difficulty,
    /// Category the question belongs to
    #[garde(skip)]
    pub category: String,
}
