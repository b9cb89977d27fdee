//! Configuration constants for the trivia duel engine
//!
//! This module contains the configuration limits and scoring constants
//! used throughout the engine to ensure data integrity and provide
//! consistent boundaries for different components.

/// Session configuration constants
pub mod session {
    /// Minimum per-question time limit in seconds (0 disables the countdown)
    pub const MIN_TIME_LIMIT: u64 = 0;
    /// Maximum per-question time limit in seconds
    pub const MAX_TIME_LIMIT: u64 = 600;
    /// Minimum number of questions in a session
    pub const MIN_QUESTION_COUNT: usize = 1;
    /// Maximum number of questions in a session
    pub const MAX_QUESTION_COUNT: usize = 500;
    /// Maximum length of a team name in characters
    pub const MAX_TEAM_NAME_LENGTH: usize = 50;
    /// Name used for the first team when none is provided
    pub const DEFAULT_TEAM_A_NAME: &str = "Team A";
    /// Name used for the second team when none is provided
    pub const DEFAULT_TEAM_B_NAME: &str = "Team B";
    /// Per-question time limit in seconds used when none is provided
    pub const DEFAULT_TIME_LIMIT: u64 = 30;
    /// Number of questions used when none is provided
    pub const DEFAULT_QUESTION_COUNT: usize = 50;
}

/// Question record constants
pub mod question {
    /// Maximum length of question text in characters
    pub const MAX_TEXT_LENGTH: usize = 500;
    /// Maximum number of answer choices for a question
    pub const MAX_CHOICE_COUNT: usize = 8;
    /// Maximum length of a single answer choice in characters
    pub const MAX_CHOICE_LENGTH: usize = 200;
    /// Category assigned to records that do not declare one
    pub const DEFAULT_CATEGORY: &str = "General";
}

/// Points awarded per correctly answered question, by difficulty
pub mod scoring {
    /// Points for a correct answer to an easy question
    pub const EASY_POINTS: u64 = 10;
    /// Points for a correct answer to a medium question
    pub const MEDIUM_POINTS: u64 = 20;
    /// Points for a correct answer to a hard question
    pub const HARD_POINTS: u64 = 30;
}

/// Lifeline behavior constants
pub mod lifelines {
    /// Maximum number of incorrect choices hidden by fifty-fifty
    pub const FIFTY_FIFTY_REMOVALS: usize = 2;
    /// Number of choices left visible by consult (the correct one plus one)
    pub const CONSULT_VISIBLE_CHOICES: usize = 2;
}
