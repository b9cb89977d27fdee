//! Session configuration
//!
//! This module defines the settings collected before a session starts:
//! team names, difficulty filter, per-question time limit, and question
//! count. [`SessionConfig::sanitized`] mirrors a setup form, applying
//! defaults for blank names and clamping numeric inputs; garde validation
//! enforces the same bounds on configs built directly.

use garde::Validate;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::constants::session as limits;
use crate::pool::DifficultyFilter;

type ValidationResult = garde::Result;

/// Validates that the per-question time limit is within bounds
///
/// Zero is valid and disables the countdown entirely.
fn validate_time_limit(val: &Duration) -> ValidationResult {
    if (limits::MIN_TIME_LIMIT..=limits::MAX_TIME_LIMIT).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "time_limit is outside of the bounds [{},{}]",
            limits::MIN_TIME_LIMIT,
            limits::MAX_TIME_LIMIT,
        )))
    }
}

/// Configuration for one trivia duel session
#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionConfig {
    /// Display name of team A
    #[garde(length(min = 1, max = limits::MAX_TEAM_NAME_LENGTH))]
    pub team_a_name: String,
    /// Display name of team B
    #[garde(length(min = 1, max = limits::MAX_TEAM_NAME_LENGTH))]
    pub team_b_name: String,
    /// Difficulty filter applied when building the question pool
    #[garde(skip)]
    pub difficulty: DifficultyFilter,
    /// Per-question time limit; zero disables the countdown
    #[garde(custom(|v, _| validate_time_limit(v)))]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub time_limit: Duration,
    /// Number of questions to play, capped to the available pool size
    #[garde(range(min = limits::MIN_QUESTION_COUNT, max = limits::MAX_QUESTION_COUNT))]
    pub question_count: usize,
}

impl Default for SessionConfig {
    /// Default configuration matching the setup form's initial values
    fn default() -> Self {
        Self {
            team_a_name: limits::DEFAULT_TEAM_A_NAME.to_owned(),
            team_b_name: limits::DEFAULT_TEAM_B_NAME.to_owned(),
            difficulty: DifficultyFilter::Mixed,
            time_limit: Duration::from_secs(limits::DEFAULT_TIME_LIMIT),
            question_count: limits::DEFAULT_QUESTION_COUNT,
        }
    }
}

impl SessionConfig {
    /// Builds a configuration from raw form-style inputs
    ///
    /// Blank or whitespace-only team names fall back to "Team A"/"Team B",
    /// over-long names are truncated, the time limit is clamped to
    /// [0, 600] seconds, and the question count is clamped to [1, 500].
    /// The result always passes validation.
    pub fn sanitized(
        team_a_name: &str,
        team_b_name: &str,
        difficulty: DifficultyFilter,
        time_limit_seconds: u64,
        question_count: usize,
    ) -> Self {
        Self {
            team_a_name: sanitize_name(team_a_name, limits::DEFAULT_TEAM_A_NAME),
            team_b_name: sanitize_name(team_b_name, limits::DEFAULT_TEAM_B_NAME),
            difficulty,
            time_limit: Duration::from_secs(
                time_limit_seconds.clamp(limits::MIN_TIME_LIMIT, limits::MAX_TIME_LIMIT),
            ),
            question_count: question_count
                .clamp(limits::MIN_QUESTION_COUNT, limits::MAX_QUESTION_COUNT),
        }
    }
}

/// Trims a raw team name, truncating to the length limit and falling back
/// to the default when blank
fn sanitize_name(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_owned()
    } else {
        trimmed
            .chars()
            .take(limits::MAX_TEAM_NAME_LENGTH)
            .collect()
    }
}
