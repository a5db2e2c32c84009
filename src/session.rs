use crate::language::Language;
use crate::stats::{FinalResult, LiveStats};
use crate::time_series::WpmSeries;
use crate::typing_policy::{classify_positions, evaluate_append, CharClass, Evaluation, Outcome};
use crate::word_generator::Mode;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant, SystemTime};
use strum_macros::Display;
use tracing::info;

/// How long the last keystroke stays visible to the renderer.
pub const FEEDBACK_WINDOW: Duration = Duration::from_millis(200);

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Display, Serialize, Deserialize,
)]
pub enum TimeLimit {
    #[value(name = "15")]
    #[serde(rename = "15")]
    #[strum(serialize = "15s")]
    Secs15,
    #[default]
    #[value(name = "30")]
    #[serde(rename = "30")]
    #[strum(serialize = "30s")]
    Secs30,
    #[value(name = "60")]
    #[serde(rename = "60")]
    #[strum(serialize = "60s")]
    Secs60,
    #[value(name = "unbounded", alias = "inf")]
    #[serde(rename = "unbounded")]
    #[strum(serialize = "∞")]
    Unbounded,
}

impl TimeLimit {
    pub fn seconds(&self) -> Option<u32> {
        match self {
            Self::Secs15 => Some(15),
            Self::Secs30 => Some(30),
            Self::Secs60 => Some(60),
            Self::Unbounded => None,
        }
    }

    /// Tokens to generate so the text is unlikely to run out.
    pub fn token_budget(&self) -> usize {
        match self {
            Self::Unbounded => 1000,
            _ => 300,
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Secs15 => Self::Secs30,
            Self::Secs30 => Self::Secs60,
            Self::Secs60 => Self::Unbounded,
            Self::Unbounded => Self::Secs15,
        }
    }
}

/// Everything that selects what a session practices. Changing any field means a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub time_limit: TimeLimit,
    pub mode: Mode,
    pub language: Language,
    pub binary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    TimedOut,
    Stopped,
}

/// Whole-second session timer: counts down for fixed limits, up otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Countdown { limit: u32, remaining: u32 },
    Stopwatch { elapsed: u32 },
}

impl Clock {
    pub fn new(time_limit: TimeLimit) -> Self {
        match time_limit.seconds() {
            Some(limit) => Self::Countdown {
                limit,
                remaining: limit,
            },
            None => Self::Stopwatch { elapsed: 0 },
        }
    }

    pub fn tick(&mut self) {
        match self {
            Self::Countdown { remaining, .. } => *remaining = remaining.saturating_sub(1),
            Self::Stopwatch { elapsed } => *elapsed += 1,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Countdown { remaining: 0, .. })
    }

    pub fn elapsed_secs(&self) -> u32 {
        match *self {
            Self::Countdown { limit, remaining } => limit - remaining,
            Self::Stopwatch { elapsed } => elapsed,
        }
    }

    /// Remaining seconds for a countdown, elapsed seconds otherwise.
    pub fn display_secs(&self) -> u32 {
        match *self {
            Self::Countdown { remaining, .. } => remaining,
            Self::Stopwatch { elapsed } => elapsed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastKeystroke {
    pub char: char,
    pub correct: bool,
    pub at: Instant,
}

/// One practice attempt. Counters only ever grow; deleting shortens the buffer and nothing else.
#[derive(Debug, Clone)]
pub struct SessionState {
    target: Vec<char>,
    input: Vec<char>,
    correct_count: usize,
    incorrect_count: usize,
    phase: Phase,
    started_at: Option<SystemTime>,
    clock: Clock,
    last_keystroke: Option<LastKeystroke>,
    finish_reason: Option<FinishReason>,
    final_result: Option<FinalResult>,
    wpm_series: WpmSeries,
}

impl SessionState {
    pub fn new(target_text: &str, time_limit: TimeLimit) -> Self {
        Self {
            target: target_text.chars().collect(),
            input: Vec::new(),
            correct_count: 0,
            incorrect_count: 0,
            phase: Phase::Idle,
            started_at: None,
            clock: Clock::new(time_limit),
            last_keystroke: None,
            finish_reason: None,
            final_result: None,
            wpm_series: WpmSeries::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    /// Number of classified keystrokes so far.
    pub fn typed_count(&self) -> usize {
        self.correct_count + self.incorrect_count
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    pub fn final_result(&self) -> Option<&FinalResult> {
        self.final_result.as_ref()
    }

    pub fn wpm_series(&self) -> &WpmSeries {
        &self.wpm_series
    }

    pub fn last_keystroke(&self) -> Option<&LastKeystroke> {
        self.last_keystroke.as_ref()
    }

    pub fn next_expected(&self) -> Option<char> {
        if self.has_finished() {
            return None;
        }
        self.target.get(self.input.len()).copied()
    }

    pub fn classification(&self) -> Vec<CharClass> {
        classify_positions(&self.target, &self.input)
    }

    pub fn live_stats(&self) -> LiveStats {
        LiveStats::from_counters(self.correct_count, self.incorrect_count, &self.clock)
    }

    fn start(&mut self) {
        self.phase = Phase::Active;
        self.started_at = Some(SystemTime::now());
        info!(target_len = self.target.len(), "session started");
    }

    /// Score and append one character. Ignored once finished or past the end of the target.
    pub fn insert(&mut self, c: char) -> Option<Evaluation> {
        if self.has_finished() {
            return None;
        }
        let evaluation = evaluate_append(&self.target, self.input.len(), c)?;

        if self.phase == Phase::Idle {
            self.start();
        }

        match evaluation.outcome {
            Outcome::Correct => self.correct_count += 1,
            Outcome::Incorrect => self.incorrect_count += 1,
        }
        self.input.push(c);
        self.last_keystroke = Some(LastKeystroke {
            char: c,
            correct: evaluation.outcome == Outcome::Correct,
            at: Instant::now(),
        });

        if self.input.len() == self.target.len() {
            self.finish(FinishReason::Completed);
        }
        Some(evaluation)
    }

    /// Drop the last typed character. Returns whether anything was removed.
    pub fn delete(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.input.pop().is_some()
    }

    /// Shorten the buffer to `len` characters.
    pub fn truncate(&mut self, len: usize) {
        if self.phase == Phase::Active {
            self.input.truncate(len);
        }
    }

    /// Advance the clock one second. Only meaningful while active.
    pub fn tick(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.clock.tick();
        let live = self.live_stats();
        self.wpm_series.record(self.clock.elapsed_secs(), live.wpm);

        if self.clock.is_expired() {
            self.finish(FinishReason::TimedOut);
        }
    }

    /// External stop. Idle and finished sessions are unaffected.
    pub fn stop(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.finish(FinishReason::Stopped);
        true
    }

    fn finish(&mut self, reason: FinishReason) {
        let result =
            FinalResult::from_counters(self.correct_count, self.incorrect_count, &self.clock);
        self.phase = Phase::Finished;
        self.finish_reason = Some(reason);
        self.final_result = Some(result);
        self.last_keystroke = None;
        info!(
            ?reason,
            wpm = result.wpm,
            accuracy = result.accuracy,
            "session finished"
        );
    }

    /// Clear the last keystroke once its display window has passed.
    pub fn expire_last_keystroke(&mut self, now: Instant) {
        if let Some(last) = self.last_keystroke {
            if now.saturating_duration_since(last.at) >= FEEDBACK_WINDOW {
                self.last_keystroke = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(session: &mut SessionState, s: &str) {
        for c in s.chars() {
            session.insert(c);
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = SessionState::new("hello world", TimeLimit::Secs30);

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.input().len(), 0);
        assert_eq!(session.clock().display_secs(), 30);
        assert!(!session.has_started());
        assert_eq!(session.next_expected(), Some('h'));
        assert_eq!(session.live_stats().accuracy, 100);
    }

    #[test]
    fn test_first_char_starts_session() {
        let mut session = SessionState::new("test", TimeLimit::Secs30);
        let eval = session.insert('t').unwrap();

        assert_eq!(eval.outcome, Outcome::Correct);
        assert_eq!(session.phase(), Phase::Active);
        assert!(session.started_at().is_some());
        assert_eq!(session.next_expected(), Some('e'));
    }

    #[test]
    fn test_incorrect_char_is_counted() {
        let mut session = SessionState::new("test", TimeLimit::Secs30);
        session.insert('x');

        assert_eq!(session.incorrect_count(), 1);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.input(), &['x']);
    }

    #[test]
    fn test_counters_match_buffer_without_deletes() {
        let mut session = SessionState::new("the quick fox", TimeLimit::Unbounded);
        for (i, c) in "thx quick".chars().enumerate() {
            session.insert(c);
            assert_eq!(session.typed_count(), i + 1);
            assert_eq!(session.typed_count(), session.input().len());
        }
    }

    #[test]
    fn test_delete_keeps_counters() {
        let mut session = SessionState::new("test", TimeLimit::Secs30);
        type_str(&mut session, "tx");
        assert!(session.delete());

        assert_eq!(session.input(), &['t']);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.incorrect_count(), 1);

        session.insert('e');
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.typed_count(), 3);
    }

    #[test]
    fn test_delete_on_idle_is_noop() {
        let mut session = SessionState::new("test", TimeLimit::Secs30);
        assert!(!session.delete());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_completing_target_finishes() {
        let mut session = SessionState::new("hi", TimeLimit::Secs60);
        session.insert('h');
        assert!(!session.has_finished());
        session.insert('i');

        assert!(session.has_finished());
        assert_eq!(session.finish_reason(), Some(FinishReason::Completed));
        assert_eq!(session.clock().display_secs(), 60);
        assert_eq!(session.next_expected(), None);
    }

    #[test]
    fn test_chars_beyond_target_are_ignored() {
        let mut session = SessionState::new("hi", TimeLimit::Unbounded);
        type_str(&mut session, "hix");

        assert_eq!(session.input().len(), 2);
        assert_eq!(session.typed_count(), 2);
    }

    #[test]
    fn test_countdown_expires() {
        let mut session = SessionState::new("hello world", TimeLimit::Secs15);
        type_str(&mut session, "hel");
        for _ in 0..14 {
            session.tick();
        }
        assert_eq!(session.phase(), Phase::Active);
        session.tick();

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.finish_reason(), Some(FinishReason::TimedOut));
        let result = session.final_result().unwrap();
        assert_eq!(result.correct_chars, 3);
        // 3 chars / 5 over 0.25 min
        assert_eq!(result.wpm, 2);
    }

    #[test]
    fn test_ticks_before_start_are_ignored() {
        let mut session = SessionState::new("hello", TimeLimit::Secs15);
        session.tick();
        assert_eq!(session.clock().display_secs(), 15);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_stopwatch_counts_up() {
        let mut session = SessionState::new("hello", TimeLimit::Unbounded);
        session.insert('h');
        session.tick();
        session.tick();
        assert_eq!(session.clock().display_secs(), 2);
        assert_eq!(session.wpm_series().points().len(), 2);
    }

    #[test]
    fn test_stop_freezes_results() {
        let mut session = SessionState::new("hello", TimeLimit::Unbounded);
        session.insert('h');
        assert!(session.stop());
        let frozen = *session.final_result().unwrap();

        session.tick();
        session.insert('e');
        assert_eq!(session.final_result(), Some(&frozen));
        assert_eq!(session.input().len(), 1);
        assert!(!session.stop());
    }

    #[test]
    fn test_stop_when_idle_does_nothing() {
        let mut session = SessionState::new("hello", TimeLimit::Secs30);
        assert!(!session.stop());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_last_keystroke_expires() {
        let mut session = SessionState::new("hello", TimeLimit::Secs30);
        session.insert('x');
        let last = *session.last_keystroke().unwrap();
        assert!(!last.correct);

        session.expire_last_keystroke(last.at + Duration::from_millis(50));
        assert!(session.last_keystroke().is_some());
        session.expire_last_keystroke(last.at + FEEDBACK_WINDOW);
        assert!(session.last_keystroke().is_none());
    }

    #[test]
    fn test_time_limit_values() {
        assert_eq!(TimeLimit::Secs15.seconds(), Some(15));
        assert_eq!(TimeLimit::Unbounded.seconds(), None);
        assert_eq!(TimeLimit::Unbounded.token_budget(), 1000);
        assert_eq!(TimeLimit::Secs60.token_budget(), 300);
        assert_eq!(TimeLimit::Unbounded.cycle(), TimeLimit::Secs15);
        assert_eq!(TimeLimit::default(), TimeLimit::Secs30);
    }

    #[test]
    fn test_empty_target_never_starts() {
        let mut session = SessionState::new("", TimeLimit::Secs30);
        assert!(session.insert('a').is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }
}
