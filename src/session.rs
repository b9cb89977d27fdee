//! Session state machine
//!
//! This module contains the main session struct and logic for running one
//! trivia duel: turn alternation, answer resolution, scoring, lifeline use,
//! countdown handling, and the end-of-game summary. Every state transition
//! is surfaced outward as an immutable [`Snapshot`] through the
//! [`Renderer`] trait; the UI collaborator never mutates the session except
//! through the operations defined here.

use enum_map::{EnumMap, enum_map};
use garde::Validate;
use serde::Serialize;
use serde_with::skip_serializing_none;
use thiserror::Error;
use web_time::Duration;

use crate::{
    AlarmMessage,
    choices::ChoiceView,
    config::SessionConfig,
    lifelines::{self, Lifeline},
    pool,
    question::{Difficulty, QuestionRecord},
    teams::{Team, TeamState},
    timer::{Countdown, TickOutcome},
};

/// The phase a session is currently in
///
/// A session starts in [`Phase::AwaitingAnswer`] for question 0 and cycles
/// between awaiting and answered until the pool is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// The current question is open; answers and lifelines are accepted
    AwaitingAnswer,
    /// The current question has resolved; only `advance` is accepted
    Answered,
    /// All questions are resolved; the session is frozen
    GameOver,
}

/// How the current question was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The active team picked the correct choice
    Correct,
    /// The active team picked an incorrect choice
    Incorrect,
    /// The countdown expired before an answer was submitted
    TimedOut,
    /// The active team used its pass lifeline
    Passed,
}

/// Resolution details for an answered question
///
/// Carries everything the UI shows as feedback: the outcome, the points
/// credited, the correct answer's text, and the explanation if the record
/// has one.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// How the question resolved
    pub outcome: Outcome,
    /// Points credited for this resolution (zero unless correct)
    pub points_awarded: u64,
    /// The team that was active at resolution time
    pub scoring_team: Team,
    /// Display text of the correct choice
    pub correct_text: String,
    /// Explanation from the question record, if present
    pub explanation: Option<String>,
}

/// Final result of a completed session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    /// The named team finished with the higher score
    Team(Team),
    /// Both teams finished with equal scores
    Draw,
}

/// End-of-game summary included in the terminal snapshot
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    /// Which team won, or a draw
    pub winner: Winner,
}

/// The current question as presented to the teams
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    /// The question text
    pub text: String,
    /// Category of the question
    pub category: String,
    /// Difficulty of the question
    pub difficulty: Difficulty,
    /// The shuffled choice set, including lifeline visibility
    pub choices: ChoiceView,
}

/// Immutable view of the session state after a transition
///
/// Snapshots are plain data: the render collaborator may serialize,
/// display, or diff them, but state only changes through session
/// operations.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Current phase of the session
    pub phase: Phase,
    /// Index of the current question; equals `question_count` at game over
    pub question_index: usize,
    /// Total number of questions in the pool
    pub question_count: usize,
    /// The team whose turn it is
    pub active_team: Team,
    /// Both teams' names, scores, and lifeline availability
    pub teams: EnumMap<Team, TeamState>,
    /// The current question, absent once the session is over
    pub question: Option<QuestionView>,
    /// Seconds left on the countdown, absent when disabled or resolved
    pub remaining_seconds: Option<u64>,
    /// Resolution feedback for the current question, once answered
    pub resolution: Option<Resolution>,
    /// Final summary, present only at game over
    pub summary: Option<Summary>,
}

impl Snapshot {
    /// Converts the snapshot to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Trait for receiving state snapshots after every transition
///
/// This is the render boundary: implementations draw the scoreboard,
/// question, and feedback however they like, but feed nothing back except
/// calls to the session operations.
pub trait Renderer {
    /// Receives the snapshot produced by a state transition
    fn render(&mut self, snapshot: &Snapshot);
}

/// Errors preventing a session from starting
#[derive(Debug, Error)]
pub enum StartError {
    /// The configuration failed validation
    #[error("invalid session configuration: {0}")]
    InvalidConfig(#[from] garde::Report),
    /// No bank questions matched the difficulty filter
    #[error("no questions available for the requested difficulty")]
    EmptyPool,
}

/// One trivia duel between two teams
///
/// The session owns the question pool, both team states, the current
/// choice view, and the countdown. All methods are no-ops when called in a
/// phase that does not accept them; invalid inputs (resolved questions,
/// hidden choices, consumed lifelines) are silently ignored rather than
/// treated as errors.
#[derive(Debug)]
pub struct Session {
    /// Questions selected for this session, consumed by index
    pool: Vec<QuestionRecord>,
    /// Per-team names, scores, and lifeline flags
    teams: EnumMap<Team, TeamState>,
    /// The team whose turn it is
    active_team: Team,
    /// Index of the current question; `pool.len()` means game over
    question_index: usize,
    /// Whether the current question has been resolved
    answered: bool,
    /// Shuffled choices of the current question
    current_view: Option<ChoiceView>,
    /// Per-question countdown
    countdown: Countdown,
    /// Resolution of the current question, while answered
    resolution: Option<Resolution>,
}

impl Session {
    /// Starts a new session
    ///
    /// Validates the configuration, builds the question pool from the bank,
    /// resets both teams to zero score with all lifelines available, sets
    /// team A active, shuffles the choices of question 0, starts the
    /// countdown, and emits the initial snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::InvalidConfig`] when the configuration fails
    /// validation and [`StartError::EmptyPool`] when no bank question
    /// matches the difficulty filter; the caller must route the latter to a
    /// "no questions available" terminal screen.
    pub fn start<S: FnMut(AlarmMessage, Duration), R: Renderer>(
        config: &SessionConfig,
        bank: &[QuestionRecord],
        mut schedule_message: S,
        renderer: &mut R,
    ) -> Result<Self, StartError> {
        config.validate()?;

        let pool = pool::build_pool(bank, config.difficulty, config.question_count);
        let first_view = match pool.first() {
            Some(first) => ChoiceView::shuffled(first),
            None => return Err(StartError::EmptyPool),
        };

        let mut session = Self {
            pool,
            teams: enum_map! {
                Team::A => TeamState::new(config.team_a_name.clone()),
                Team::B => TeamState::new(config.team_b_name.clone()),
            },
            active_team: Team::A,
            question_index: 0,
            answered: false,
            current_view: Some(first_view),
            countdown: Countdown::new(config.time_limit),
            resolution: None,
        };

        session.countdown.start(0, &mut schedule_message);
        session.emit(renderer);

        Ok(session)
    }

    /// Submits the active team's answer for the current question
    ///
    /// Accepted only while the question is unresolved and `choice_index`
    /// refers to a visible choice; anything else is a silent no-op, which
    /// also guards against double submission. A correct pick credits the
    /// active team the points for the question's difficulty. The countdown
    /// is cancelled on every resolution.
    pub fn submit_answer<R: Renderer>(&mut self, choice_index: usize, renderer: &mut R) {
        if self.is_game_over() || self.answered {
            return;
        }

        let Some(correct) = self.current_view.as_ref().and_then(|view| {
            view.get(choice_index)
                .and_then(|choice| (!choice.hidden).then_some(choice.correct))
        }) else {
            return;
        };

        let outcome = if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };
        self.resolve(outcome, renderer);
    }

    /// Processes a countdown alarm delivered by the host scheduler
    ///
    /// Ticks for an older countdown or an already resolved question are
    /// ignored. A running tick emits a snapshot with the updated remaining
    /// time; expiry resolves the question as unanswered with zero points.
    pub fn receive_alarm<S: FnMut(AlarmMessage, Duration), R: Renderer>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        renderer: &mut R,
    ) {
        if self.is_game_over() || self.answered {
            return;
        }

        let AlarmMessage::Countdown(tick) = message;

        match self
            .countdown
            .tick(self.question_index, tick, &mut schedule_message)
        {
            TickOutcome::Stale => {}
            TickOutcome::Running { .. } => self.emit(renderer),
            TickOutcome::Expired => self.resolve(Outcome::TimedOut, renderer),
        }
    }

    /// Uses one of the active team's lifelines on the current question
    ///
    /// Accepted only while the question is unresolved and the lifeline is
    /// still available for the active team; the flag is consumed exactly
    /// once. Fifty-fifty and consult narrow the visible choices and leave
    /// the question open (the countdown keeps running); pass resolves it
    /// immediately with zero points for either team.
    pub fn use_lifeline<R: Renderer>(&mut self, lifeline: Lifeline, renderer: &mut R) {
        if self.is_game_over() || self.answered {
            return;
        }
        if !self.teams[self.active_team].consume_lifeline(lifeline) {
            return;
        }

        match lifeline {
            Lifeline::FiftyFifty => {
                if let Some(view) = self.current_view.as_mut() {
                    lifelines::apply_fifty_fifty(view);
                }
                self.emit(renderer);
            }
            Lifeline::Consult => {
                if let Some(view) = self.current_view.as_mut() {
                    lifelines::apply_consult(view);
                }
                self.emit(renderer);
            }
            Lifeline::Pass => self.resolve(Outcome::Passed, renderer),
        }
    }

    /// Moves on from a resolved question
    ///
    /// Accepted only once the current question is resolved. Increments the
    /// question index, flips the active team, and either presents the next
    /// question with a fresh choice shuffle and countdown, or transitions
    /// to game over with the final scores frozen.
    pub fn advance<S: FnMut(AlarmMessage, Duration), R: Renderer>(
        &mut self,
        mut schedule_message: S,
        renderer: &mut R,
    ) {
        if self.is_game_over() || !self.answered {
            return;
        }

        self.question_index += 1;
        self.active_team = self.active_team.opponent();
        self.answered = false;
        self.resolution = None;

        let next_view = self.pool.get(self.question_index).map(ChoiceView::shuffled);
        match next_view {
            Some(view) => {
                self.current_view = Some(view);
                self.countdown
                    .start(self.question_index, &mut schedule_message);
            }
            None => {
                self.current_view = None;
                self.countdown.cancel();
            }
        }

        self.emit(renderer);
    }

    /// Resolves the current question with the given outcome
    fn resolve<R: Renderer>(&mut self, outcome: Outcome, renderer: &mut R) {
        let (points_on_correct, explanation) = match self.pool.get(self.question_index) {
            Some(question) => (
                question.difficulty.points(),
                (!question.explanation.is_empty()).then(|| question.explanation.clone()),
            ),
            None => return,
        };

        self.countdown.cancel();
        self.answered = true;

        let points_awarded = if outcome == Outcome::Correct {
            points_on_correct
        } else {
            0
        };
        self.teams[self.active_team].award(points_awarded);

        self.resolution = Some(Resolution {
            outcome,
            points_awarded,
            scoring_team: self.active_team,
            correct_text: self
                .current_view
                .as_ref()
                .and_then(ChoiceView::correct_text)
                .unwrap_or_default()
                .to_owned(),
            explanation,
        });

        self.emit(renderer);
    }

    fn emit<R: Renderer>(&self, renderer: &mut R) {
        renderer.render(&self.snapshot());
    }

    /// Returns the current phase of the session
    pub fn phase(&self) -> Phase {
        if self.is_game_over() {
            Phase::GameOver
        } else if self.answered {
            Phase::Answered
        } else {
            Phase::AwaitingAnswer
        }
    }

    /// Returns whether all questions have been resolved and advanced past
    pub fn is_game_over(&self) -> bool {
        self.question_index >= self.pool.len()
    }

    /// Returns the team whose turn it is
    pub fn active_team(&self) -> Team {
        self.active_team
    }

    /// Returns the state of the given team
    pub fn team(&self, team: Team) -> &TeamState {
        &self.teams[team]
    }

    /// Returns the index of the current question
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Returns the total number of questions in the pool
    pub fn question_count(&self) -> usize {
        self.pool.len()
    }

    /// Returns the current question record, if the session is not over
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.pool.get(self.question_index)
    }

    /// Returns the shuffled choice view of the current question
    pub fn choice_view(&self) -> Option<&ChoiceView> {
        self.current_view.as_ref()
    }

    /// Returns the leading team, or a draw when scores are equal
    pub fn winner(&self) -> Winner {
        let score_a = self.teams[Team::A].score();
        let score_b = self.teams[Team::B].score();

        if score_a > score_b {
            Winner::Team(Team::A)
        } else if score_b > score_a {
            Winner::Team(Team::B)
        } else {
            Winner::Draw
        }
    }

    /// Builds an immutable snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            question_index: self.question_index,
            question_count: self.pool.len(),
            active_team: self.active_team,
            teams: self.teams.clone(),
            question: self.current_question().map(|question| QuestionView {
                text: question.text.clone(),
                category: question.category.clone(),
                difficulty: question.difficulty,
                choices: self
                    .current_view
                    .clone()
                    .unwrap_or_else(|| ChoiceView::shuffled(question)),
            }),
            remaining_seconds: self.countdown.remaining_seconds(),
            resolution: self.resolution.clone(),
            summary: self.is_game_over().then(|| Summary {
                winner: self.winner(),
            }),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::pool::DifficultyFilter;

    struct TestRenderer {
        snapshots: Vec<Snapshot>,
    }

    impl TestRenderer {
        fn new() -> Self {
            Self {
                snapshots: Vec::new(),
            }
        }

        fn last(&self) -> &Snapshot {
            self.snapshots.last().expect("at least one snapshot")
        }
    }

    impl Renderer for TestRenderer {
        fn render(&mut self, snapshot: &Snapshot) {
            self.snapshots.push(snapshot.clone());
        }
    }

    fn record(text: &str, difficulty: Difficulty, explanation: &str) -> QuestionRecord {
        QuestionRecord {
            text: text.to_string(),
            choices: vec![
                "c0".to_string(),
                "c1".to_string(),
                "c2".to_string(),
                "c3".to_string(),
            ],
            answer_index: 2,
            explanation: explanation.to_string(),
            difficulty,
            category: "General".to_string(),
        }
    }

    fn mixed_bank() -> Vec<QuestionRecord> {
        vec![
            record("q0", Difficulty::Easy, "e0"),
            record("q1", Difficulty::Medium, ""),
            record("q2", Difficulty::Hard, "e2"),
            record("q3", Difficulty::Medium, ""),
            record("q4", Difficulty::Easy, ""),
        ]
    }

    fn untimed_config(count: usize) -> SessionConfig {
        SessionConfig::sanitized("Red", "Blue", DifficultyFilter::Mixed, 0, count)
    }

    fn correct_index(session: &Session) -> usize {
        session
            .choice_view()
            .expect("view exists")
            .choices()
            .iter()
            .position(|c| c.correct)
            .expect("correct choice exists")
    }

    fn wrong_index(session: &Session) -> usize {
        session
            .choice_view()
            .expect("view exists")
            .choices()
            .iter()
            .position(|c| !c.correct && !c.hidden)
            .expect("visible wrong choice exists")
    }

    #[test]
    fn test_start_initial_state() {
        let mut renderer = TestRenderer::new();
        let session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.active_team(), Team::A);
        assert_eq!(session.question_index(), 0);
        assert_eq!(session.question_count(), 3);
        assert_eq!(session.team(Team::A).score(), 0);
        assert_eq!(session.team(Team::B).score(), 0);

        let snapshot = renderer.last();
        assert_eq!(snapshot.teams[Team::A].name(), "Red");
        assert_eq!(snapshot.teams[Team::B].name(), "Blue");
        assert!(snapshot.question.is_some());
        assert!(snapshot.summary.is_none());
    }

    #[test]
    fn test_start_empty_pool_fails() {
        let bank = vec![record("q0", Difficulty::Medium, "")];
        let config = SessionConfig::sanitized("a", "b", DifficultyFilter::Hard, 0, 3);
        let mut renderer = TestRenderer::new();

        let result = Session::start(&config, &bank, |_, _| {}, &mut renderer);

        assert!(matches!(result, Err(StartError::EmptyPool)));
        assert!(renderer.snapshots.is_empty());
    }

    #[test]
    fn test_start_invalid_config_fails() {
        let mut config = untimed_config(3);
        config.question_count = 0;
        let mut renderer = TestRenderer::new();

        let result = Session::start(&config, &mixed_bank(), |_, _| {}, &mut renderer);

        assert!(matches!(result, Err(StartError::InvalidConfig(_))));
    }

    #[test]
    fn test_pool_capped_to_available_questions() {
        let mut renderer = TestRenderer::new();
        let config = SessionConfig::sanitized("a", "b", DifficultyFilter::Easy, 0, 100);
        let session = Session::start(&config, &mixed_bank(), |_, _| {}, &mut renderer)
            .expect("session starts");

        assert_eq!(session.question_count(), 2);
    }

    #[test]
    fn test_correct_answer_credits_active_team() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        let expected_points = session
            .current_question()
            .expect("question exists")
            .difficulty
            .points();
        session.submit_answer(correct_index(&session), &mut renderer);

        assert_eq!(session.phase(), Phase::Answered);
        assert_eq!(session.team(Team::A).score(), expected_points);
        assert_eq!(session.team(Team::B).score(), 0);

        let resolution = renderer.last().resolution.as_ref().expect("resolved");
        assert_eq!(resolution.outcome, Outcome::Correct);
        assert_eq!(resolution.points_awarded, expected_points);
        assert_eq!(resolution.scoring_team, Team::A);
        assert_eq!(resolution.correct_text, "c2");
    }

    #[test]
    fn test_incorrect_answer_awards_nothing() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.submit_answer(wrong_index(&session), &mut renderer);

        assert_eq!(session.phase(), Phase::Answered);
        assert_eq!(session.team(Team::A).score(), 0);
        let resolution = renderer.last().resolution.as_ref().expect("resolved");
        assert_eq!(resolution.outcome, Outcome::Incorrect);
        assert_eq!(resolution.points_awarded, 0);
    }

    #[test]
    fn test_double_submission_is_ignored() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.submit_answer(wrong_index(&session), &mut renderer);
        let score_after_first = session.team(Team::A).score();
        let snapshots_after_first = renderer.snapshots.len();

        session.submit_answer(correct_index(&session), &mut renderer);

        assert_eq!(session.team(Team::A).score(), score_after_first);
        assert_eq!(renderer.snapshots.len(), snapshots_after_first);
    }

    #[test]
    fn test_turn_alternates_on_every_advance() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(5), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        let mut expected = Team::A;
        for _ in 0..5 {
            assert_eq!(session.active_team(), expected);
            session.submit_answer(wrong_index(&session), &mut renderer);
            session.advance(|_, _| {}, &mut renderer);
            expected = expected.opponent();
        }

        assert!(session.is_game_over());
    }

    #[test]
    fn test_full_game_scenario() {
        // config {Red, Blue, mixed, no limit, 3 questions}; answers:
        // correct, incorrect, pass -> Red has q0's points, Blue has 0.
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        let q0_points = session
            .current_question()
            .expect("question exists")
            .difficulty
            .points();
        session.submit_answer(correct_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);

        assert_eq!(session.active_team(), Team::B);
        session.submit_answer(wrong_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);

        assert_eq!(session.active_team(), Team::A);
        session.use_lifeline(Lifeline::Pass, &mut renderer);
        assert_eq!(
            renderer.last().resolution.as_ref().expect("resolved").outcome,
            Outcome::Passed
        );
        session.advance(|_, _| {}, &mut renderer);

        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.team(Team::A).score(), q0_points);
        assert_eq!(session.team(Team::B).score(), 0);
        assert_eq!(session.winner(), Winner::Team(Team::A));

        let snapshot = renderer.last();
        assert!(snapshot.question.is_none());
        assert_eq!(
            snapshot.summary.expect("summary present").winner,
            Winner::Team(Team::A)
        );
    }

    #[test]
    fn test_scores_change_only_on_resolution() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(2), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        let total = |s: &Session| s.team(Team::A).score() + s.team(Team::B).score();

        let before = total(&session);
        session.use_lifeline(Lifeline::FiftyFifty, &mut renderer);
        assert_eq!(total(&session), before);

        session.submit_answer(correct_index(&session), &mut renderer);
        let delta = total(&session) - before;
        assert!(matches!(delta, 10 | 20 | 30));

        let before = total(&session);
        session.advance(|_, _| {}, &mut renderer);
        assert_eq!(total(&session), before);
    }

    #[test]
    fn test_timeout_resolves_as_incorrect() {
        // 5-second limit, no answer: the question auto-resolves after 5
        // ticks with zero points and advance proceeds normally.
        let config = SessionConfig::sanitized("Red", "Blue", DifficultyFilter::Mixed, 5, 2);
        let mut renderer = TestRenderer::new();
        let mut pending: VecDeque<AlarmMessage> = VecDeque::new();

        let mut session = Session::start(
            &config,
            &mixed_bank(),
            |alarm, _| pending.push_back(alarm),
            &mut renderer,
        )
        .expect("session starts");

        let mut ticks_delivered = 0;
        while let Some(alarm) = pending.pop_front() {
            let mut next = VecDeque::new();
            session.receive_alarm(alarm, |a, _| next.push_back(a), &mut renderer);
            pending.append(&mut next);
            ticks_delivered += 1;
            assert!(ticks_delivered <= 5, "countdown must expire by tick 5");
        }

        assert_eq!(ticks_delivered, 5);
        assert_eq!(session.phase(), Phase::Answered);
        assert_eq!(session.team(Team::A).score(), 0);
        let resolution = renderer.last().resolution.as_ref().expect("resolved");
        assert_eq!(resolution.outcome, Outcome::TimedOut);
        assert_eq!(resolution.points_awarded, 0);

        session.advance(|_, _| {}, &mut renderer);
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.active_team(), Team::B);
    }

    #[test]
    fn test_tick_snapshot_reports_remaining_time() {
        let config = SessionConfig::sanitized("Red", "Blue", DifficultyFilter::Mixed, 5, 1);
        let mut renderer = TestRenderer::new();
        let mut pending: VecDeque<AlarmMessage> = VecDeque::new();

        let mut session = Session::start(
            &config,
            &mixed_bank(),
            |alarm, _| pending.push_back(alarm),
            &mut renderer,
        )
        .expect("session starts");

        assert_eq!(renderer.last().remaining_seconds, Some(5));

        let alarm = pending.pop_front().expect("tick scheduled");
        session.receive_alarm(alarm, |a, _| pending.push_back(a), &mut renderer);

        assert_eq!(renderer.last().remaining_seconds, Some(4));
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_stale_tick_after_answer_is_ignored() {
        let config = SessionConfig::sanitized("Red", "Blue", DifficultyFilter::Mixed, 5, 2);
        let mut renderer = TestRenderer::new();
        let mut pending: VecDeque<AlarmMessage> = VecDeque::new();

        let mut session = Session::start(
            &config,
            &mixed_bank(),
            |alarm, _| pending.push_back(alarm),
            &mut renderer,
        )
        .expect("session starts");

        session.submit_answer(correct_index(&session), &mut renderer);
        let score_after_answer = session.team(Team::A).score();
        let snapshots_after_answer = renderer.snapshots.len();

        // the tick scheduled at start is still pending; deliver it late
        let alarm = pending.pop_front().expect("tick scheduled");
        session.receive_alarm(alarm, |a, _| pending.push_back(a), &mut renderer);

        assert_eq!(session.phase(), Phase::Answered);
        assert_eq!(session.team(Team::A).score(), score_after_answer);
        assert_eq!(renderer.snapshots.len(), snapshots_after_answer);
    }

    #[test]
    fn test_fifty_fifty_scenario() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(2), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.use_lifeline(Lifeline::FiftyFifty, &mut renderer);

        let view = session.choice_view().expect("view exists");
        assert_eq!(view.visible_count(), 2);
        assert!(
            !view
                .choices()
                .iter()
                .find(|c| c.correct)
                .expect("correct exists")
                .hidden
        );
        assert!(!session.team(Team::A).lifeline_available(Lifeline::FiftyFifty));
        // question still open
        assert_eq!(session.phase(), Phase::AwaitingAnswer);

        // reuse has no effect, even on the team's next turn
        session.submit_answer(correct_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);
        session.submit_answer(correct_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);
        assert!(session.is_game_over());
        assert!(!session.team(Team::A).lifeline_available(Lifeline::FiftyFifty));
    }

    #[test]
    fn test_lifeline_reuse_is_ignored() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.use_lifeline(Lifeline::FiftyFifty, &mut renderer);
        let snapshots_after_use = renderer.snapshots.len();
        let visible_after_use = session.choice_view().expect("view").visible_count();

        session.use_lifeline(Lifeline::FiftyFifty, &mut renderer);

        assert_eq!(renderer.snapshots.len(), snapshots_after_use);
        assert_eq!(
            session.choice_view().expect("view").visible_count(),
            visible_after_use
        );
    }

    #[test]
    fn test_lifelines_are_per_team() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(3), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.use_lifeline(Lifeline::Consult, &mut renderer);
        assert!(!session.team(Team::A).lifeline_available(Lifeline::Consult));
        assert!(session.team(Team::B).lifeline_available(Lifeline::Consult));

        session.submit_answer(correct_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);

        // team B can still use its own consult
        session.use_lifeline(Lifeline::Consult, &mut renderer);
        assert!(!session.team(Team::B).lifeline_available(Lifeline::Consult));
        assert_eq!(session.choice_view().expect("view").visible_count(), 2);
    }

    #[test]
    fn test_consult_keeps_question_open() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(1), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.use_lifeline(Lifeline::Consult, &mut renderer);

        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        let expected_points = session
            .current_question()
            .expect("question exists")
            .difficulty
            .points();
        session.submit_answer(correct_index(&session), &mut renderer);
        assert_eq!(session.team(Team::A).score(), expected_points);
    }

    #[test]
    fn test_pass_resolves_with_explanation() {
        let mut renderer = TestRenderer::new();
        let bank = vec![record("q0", Difficulty::Hard, "the reason")];
        let mut session =
            Session::start(&untimed_config(1), &bank, |_, _| {}, &mut renderer)
                .expect("session starts");

        session.use_lifeline(Lifeline::Pass, &mut renderer);

        assert_eq!(session.phase(), Phase::Answered);
        assert_eq!(session.team(Team::A).score(), 0);
        assert_eq!(session.team(Team::B).score(), 0);
        let resolution = renderer.last().resolution.as_ref().expect("resolved");
        assert_eq!(resolution.outcome, Outcome::Passed);
        assert_eq!(resolution.explanation.as_deref(), Some("the reason"));
        assert!(!session.team(Team::A).lifeline_available(Lifeline::Pass));
    }

    #[test]
    fn test_hidden_choice_cannot_be_submitted() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(1), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.use_lifeline(Lifeline::Consult, &mut renderer);

        let hidden_index = session
            .choice_view()
            .expect("view exists")
            .choices()
            .iter()
            .position(|c| c.hidden)
            .expect("consult hid something");
        session.submit_answer(hidden_index, &mut renderer);

        assert_eq!(session.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_no_lifeline_after_resolution() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(2), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.submit_answer(correct_index(&session), &mut renderer);
        session.use_lifeline(Lifeline::FiftyFifty, &mut renderer);

        // flag untouched since the question was already resolved
        assert!(session.team(Team::A).lifeline_available(Lifeline::FiftyFifty));
    }

    #[test]
    fn test_game_over_is_frozen() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(1), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.submit_answer(correct_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);
        assert!(session.is_game_over());

        let final_score = session.team(Team::A).score();
        let snapshot_count = renderer.snapshots.len();

        session.submit_answer(0, &mut renderer);
        session.use_lifeline(Lifeline::Pass, &mut renderer);
        session.advance(|_, _| {}, &mut renderer);

        assert_eq!(session.team(Team::A).score(), final_score);
        assert_eq!(renderer.snapshots.len(), snapshot_count);
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn test_choices_reshuffled_per_question_presentation() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(2), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        let first_text = session
            .current_question()
            .expect("question exists")
            .text
            .clone();
        session.submit_answer(correct_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);

        let second_text = &session.current_question().expect("question exists").text;
        assert_ne!(&first_text, second_text);

        // fresh view: all four choices visible again
        assert_eq!(session.choice_view().expect("view").visible_count(), 4);
    }

    #[test]
    fn test_draw_summary() {
        let mut renderer = TestRenderer::new();
        let mut session =
            Session::start(&untimed_config(2), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        session.submit_answer(wrong_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);
        session.submit_answer(wrong_index(&session), &mut renderer);
        session.advance(|_, _| {}, &mut renderer);

        assert_eq!(session.winner(), Winner::Draw);
        assert_eq!(
            renderer.last().summary.expect("summary present").winner,
            Winner::Draw
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut renderer = TestRenderer::new();
        let session =
            Session::start(&untimed_config(1), &mixed_bank(), |_, _| {}, &mut renderer)
                .expect("session starts");

        let json = session.snapshot().to_message();
        assert!(json.contains("AwaitingAnswer"));
        assert!(json.contains("Red"));
    }
}
