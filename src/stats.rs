//! Words-per-minute and accuracy derivation from session counters.

use crate::session::Clock;
use serde::{Deserialize, Serialize};

/// Standard characters-per-word divisor.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Minutes used as WPM denominator. Zero elapsed time is floored to one second.
pub fn elapsed_minutes(clock: &Clock) -> f64 {
    match clock.elapsed_secs() {
        0 => 1.0 / 60.0,
        secs => secs as f64 / 60.0,
    }
}

pub fn words_per_minute(correct_chars: usize, minutes: f64) -> u32 {
    if minutes <= 0.0 {
        return 0;
    }
    ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Rounded percentage of correct keystrokes; 100 before anything is typed.
pub fn accuracy(correct_chars: usize, incorrect_chars: usize) -> u32 {
    let total = correct_chars + incorrect_chars;
    if total == 0 {
        return 100;
    }
    ((correct_chars as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy: u32,
}

impl LiveStats {
    pub fn from_counters(correct_chars: usize, incorrect_chars: usize, clock: &Clock) -> Self {
        Self {
            wpm: words_per_minute(correct_chars, elapsed_minutes(clock)),
            accuracy: accuracy(correct_chars, incorrect_chars),
        }
    }
}

/// Terminal statistics handed to the results collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResult {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub total_chars: usize,
}

impl FinalResult {
    pub fn from_counters(correct_chars: usize, incorrect_chars: usize, clock: &Clock) -> Self {
        let live = LiveStats::from_counters(correct_chars, incorrect_chars, clock);
        Self {
            wpm: live.wpm,
            accuracy: live.accuracy,
            correct_chars,
            incorrect_chars,
            total_chars: correct_chars + incorrect_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TimeLimit;

    fn countdown(limit: TimeLimit, ticks: u32) -> Clock {
        let mut clock = Clock::new(limit);
        for _ in 0..ticks {
            clock.tick();
        }
        clock
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(8, 2), 80);
        assert_eq!(accuracy(2, 1), 67);
        assert_eq!(accuracy(1, 1), 50);
        assert_eq!(accuracy(0, 3), 0);
    }

    #[test]
    fn test_accuracy_defaults_to_100() {
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn test_accuracy_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(accuracy(1, 7), 13);
    }

    #[test]
    fn test_wpm_standard() {
        // 50 correct chars in 30 seconds = 10 words in half a minute
        assert_eq!(words_per_minute(50, 0.5), 20);
        assert_eq!(words_per_minute(0, 1.0), 0);
    }

    #[test]
    fn test_wpm_rounds() {
        // 7 chars in 1 min = 1.4 wpm
        assert_eq!(words_per_minute(7, 1.0), 1);
        // 13 chars in 1 min = 2.6 wpm
        assert_eq!(words_per_minute(13, 1.0), 3);
    }

    #[test]
    fn test_wpm_non_positive_minutes() {
        assert_eq!(words_per_minute(10, 0.0), 0);
    }

    #[test]
    fn test_unbounded_zero_elapsed_uses_one_second_floor() {
        let clock = Clock::new(TimeLimit::Unbounded);
        assert_eq!(elapsed_minutes(&clock), 1.0 / 60.0);
        assert_eq!(LiveStats::from_counters(5, 0, &clock).wpm, 60);
    }

    #[test]
    fn test_unbounded_elapsed_counts_up() {
        let clock = countdown(TimeLimit::Unbounded, 30);
        assert_eq!(elapsed_minutes(&clock), 0.5);
    }

    #[test]
    fn test_fixed_duration_uses_consumed_time() {
        let clock = countdown(TimeLimit::Secs60, 15);
        assert_eq!(elapsed_minutes(&clock), 0.25);
        assert_eq!(LiveStats::from_counters(25, 0, &clock).wpm, 20);
    }

    #[test]
    fn test_final_result_totals() {
        let clock = countdown(TimeLimit::Secs30, 30);
        let result = FinalResult::from_counters(100, 10, &clock);
        assert_eq!(result.total_chars, 110);
        assert_eq!(result.wpm, 40);
        assert_eq!(result.accuracy, 91);
    }

    #[test]
    fn test_final_result_serializes_camel_case() {
        let clock = Clock::new(TimeLimit::Secs15);
        let json = serde_json::to_string(&FinalResult::from_counters(1, 0, &clock)).unwrap();
        assert!(json.contains("\"correctChars\":1"));
        assert!(json.contains("\"totalChars\":1"));
    }
}
