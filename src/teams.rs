//! Teams and per-team session state
//!
//! A duel always has exactly two teams taking strict turns. Each team owns
//! a monotonically increasing score and one flag per lifeline; a consumed
//! lifeline never replenishes for the rest of the session.

use enum_map::{Enum, EnumMap, enum_map};
use serde::{Deserialize, Serialize};

use crate::lifelines::Lifeline;

/// One of the two competing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Team {
    /// The team that answers the first question
    A,
    /// The team that answers the second question
    B,
}

impl Team {
    /// Returns the other team
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Per-team state for one session
#[derive(Debug, Clone, Serialize)]
pub struct TeamState {
    /// Display name of the team
    name: String,
    /// Points scored so far; only ever increases
    score: u64,
    /// Availability of each one-shot lifeline
    lifelines: EnumMap<Lifeline, bool>,
}

impl TeamState {
    /// Creates a fresh team state with zero score and all lifelines available
    pub fn new(name: String) -> Self {
        Self {
            name,
            score: 0,
            lifelines: enum_map! { _ => true },
        }
    }

    /// Returns the team's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the team's current score
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns whether the given lifeline is still available
    pub fn lifeline_available(&self, lifeline: Lifeline) -> bool {
        self.lifelines[lifeline]
    }

    /// Adds points to the team's score
    pub(crate) fn award(&mut self, points: u64) {
        self.score += points;
    }

    /// Consumes a lifeline, returning whether it was still available
    ///
    /// Returns `false` without any effect when the lifeline was already
    /// used; the flag transitions true to false at most once.
    pub(crate) fn consume_lifeline(&mut self, lifeline: Lifeline) -> bool {
        if self.lifelines[lifeline] {
            self.lifelines[lifeline] = false;
            true
        } else {
            false
        }
    }
}
