//! Per-question countdown
//!
//! The countdown ticks once per second. Each tick is scheduled through the
//! host-provided `schedule_message` callback and delivered back to the
//! session as an alarm; the countdown itself never blocks or spawns
//! anything. A generation counter is the single-slot cancellation token:
//! starting or cancelling bumps the generation, so an already scheduled
//! tick that arrives late no longer matches and is ignored. This guarantees
//! a question can never be resolved twice by a stale expiry.

use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Interval between countdown ticks
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Alarm messages for the countdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One-second countdown tick for a question
    Tick {
        /// Index of the question the tick belongs to
        question_index: usize,
        /// Countdown generation the tick was scheduled under
        generation: u64,
    },
}

/// Result of processing one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to an older countdown and was ignored
    Stale,
    /// The countdown is still running; the next tick has been scheduled
    Running {
        /// Seconds left on the countdown
        remaining_seconds: u64,
    },
    /// The countdown reached zero; the question must resolve as unanswered
    Expired,
}

/// Countdown state owned by a session
///
/// At most one countdown is live per active question; restarting for the
/// next question implicitly cancels the previous one.
#[derive(Debug, Clone)]
pub struct Countdown {
    /// Configured limit in seconds; zero disables the countdown
    limit_seconds: u64,
    /// Seconds remaining, `None` when disabled or cancelled
    remaining_seconds: Option<u64>,
    /// Cancellation token; ticks from older generations are ignored
    generation: u64,
}

impl Countdown {
    /// Creates a countdown with the given per-question limit
    pub fn new(limit: Duration) -> Self {
        Self {
            limit_seconds: limit.as_secs(),
            remaining_seconds: None,
            generation: 0,
        }
    }

    /// Returns whether the countdown is disabled (limit of zero)
    pub fn is_disabled(&self) -> bool {
        self.limit_seconds == 0
    }

    /// Returns the seconds remaining, if a countdown is running
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.remaining_seconds
    }

    /// Starts a fresh countdown for a question
    ///
    /// Any previously scheduled tick is invalidated. When the countdown is
    /// disabled nothing is scheduled and the question never auto-resolves.
    pub fn start<S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        question_index: usize,
        schedule_message: &mut S,
    ) {
        self.generation += 1;

        if self.is_disabled() {
            self.remaining_seconds = None;
            return;
        }

        self.remaining_seconds = Some(self.limit_seconds);
        schedule_message(
            AlarmMessage::Tick {
                question_index,
                generation: self.generation,
            }
            .into(),
            TICK_INTERVAL,
        );
    }

    /// Cancels the running countdown
    ///
    /// Must be called on every resolution path so a late tick cannot fire
    /// after the question resolved.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.remaining_seconds = None;
    }

    /// Processes a delivered tick
    ///
    /// Ticks carrying an old generation or a different question index are
    /// reported as [`TickOutcome::Stale`]. While time remains, the next
    /// tick is scheduled and the new remaining time reported; reaching zero
    /// yields [`TickOutcome::Expired`] exactly once.
    pub fn tick<S: FnMut(crate::AlarmMessage, Duration)>(
        &mut self,
        current_question_index: usize,
        message: AlarmMessage,
        schedule_message: &mut S,
    ) -> TickOutcome {
        let AlarmMessage::Tick {
            question_index,
            generation,
        } = message;

        if generation != self.generation || question_index != current_question_index {
            return TickOutcome::Stale;
        }
        let Some(remaining) = self.remaining_seconds else {
            return TickOutcome::Stale;
        };

        let remaining = remaining.saturating_sub(1);
        self.remaining_seconds = Some(remaining);

        if remaining == 0 {
            TickOutcome::Expired
        } else {
            schedule_message(
                AlarmMessage::Tick {
                    question_index,
                    generation,
                }
                .into(),
                TICK_INTERVAL,
            );
            TickOutcome::Running {
                remaining_seconds: remaining,
            }
        }
    }
}
