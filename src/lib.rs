//! # Trivia Duel Engine
//!
//! This library provides the core game logic for a turn-based trivia duel
//! between two teams. It covers question bank loading and normalization,
//! session pool building, per-question choice shuffling, scoring, lifelines
//! (fifty-fifty, pass, consult), and a tick-based countdown that resolves
//! unanswered questions. Rendering, audio, and transport are external
//! collaborators driven purely through state snapshots.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

use serde::{Deserialize, Serialize};

pub mod constants;

pub mod bank;
pub mod choices;
pub mod config;
pub mod lifelines;
pub mod pool;
pub mod question;
pub mod session;
pub mod teams;
pub mod timer;

/// Alarm messages delivered back to a session by the host scheduler
///
/// Operations that start or restart the countdown hand one of these to the
/// provided `schedule_message` callback along with a delay. The host runtime
/// is responsible for delivering it to [`session::Session::receive_alarm`]
/// once the delay elapses. Stale alarms are recognized and ignored by the
/// session, so late delivery after a question resolved is harmless.
#[derive(Debug, Clone, Copy, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Countdown tick alarms
    Countdown(timer::AlarmMessage),
}

impl AlarmMessage {
    /// Converts the alarm message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
