//! Game Clock Formatting
//!
//! Turns elapsed game time into the on-screen countdown.

use std::time::Duration;

use crate::game::arena::TimerColor;

/// Remaining time at or below which the readout turns to warning color.
pub const WARNING_THRESHOLD: Duration = Duration::from_secs(60);

/// Text shown once the clock has run out.
pub const TIME_UP_TEXT: &str = "TIME UP!";

/// A rendered countdown readout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimerReadout {
    /// Text to display.
    pub text: String,
    /// Color hint.
    pub color: TimerColor,
}

/// Seconds left before the cap; negative once expired.
pub fn time_left_secs(elapsed: Duration, max_game_time: Duration) -> f64 {
    max_game_time.as_secs_f64() - elapsed.as_secs_f64()
}

/// `MM:SS` with both fields floored and clamped at zero.
pub fn format_mm_ss(secs: f64) -> String {
    let minutes = (secs / 60.0).floor().max(0.0) as u64;
    let seconds = (secs % 60.0).floor().max(0.0) as u64;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Build the timer readout for the current elapsed time.
pub fn readout(elapsed: Duration, max_game_time: Duration) -> TimerReadout {
    let left = time_left_secs(elapsed, max_game_time);

    if left <= 0.0 {
        return TimerReadout {
            text: TIME_UP_TEXT.to_string(),
            color: TimerColor::Warning,
        };
    }

    let color = if left <= WARNING_THRESHOLD.as_secs_f64() {
        TimerColor::Warning
    } else {
        TimerColor::Normal
    };

    TimerReadout {
        text: format!("Time: {}", format_mm_ss(left)),
        color,
    }
}

/// Long-form total, e.g. `3 minutes and 5 seconds` or `42 seconds`.
pub fn format_total(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;

    if minutes > 0 {
        format!("{} minutes and {} seconds", minutes, seconds)
    } else {
        format!("{} seconds", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(240.0), "04:00");
        assert_eq!(format_mm_ss(125.7), "02:05");
        assert_eq!(format_mm_ss(0.4), "00:00");
        assert_eq!(format_mm_ss(-3.0), "00:00");
    }

    #[test]
    fn test_readout_normal() {
        let r = readout(Duration::from_secs(10), Duration::from_secs(240));
        assert_eq!(r.text, "Time: 03:50");
        assert_eq!(r.color, TimerColor::Normal);
    }

    #[test]
    fn test_readout_last_minute_warns() {
        let r = readout(Duration::from_secs(180), Duration::from_secs(240));
        assert_eq!(r.text, "Time: 01:00");
        assert_eq!(r.color, TimerColor::Warning);

        let r = readout(Duration::from_millis(239_500), Duration::from_secs(240));
        assert_eq!(r.text, "Time: 00:00");
        assert_eq!(r.color, TimerColor::Warning);
    }

    #[test]
    fn test_readout_expired() {
        let r = readout(Duration::from_secs(240), Duration::from_secs(240));
        assert_eq!(r.text, TIME_UP_TEXT);
        assert_eq!(r.color, TimerColor::Warning);

        let r = readout(Duration::from_secs(300), Duration::from_secs(240));
        assert_eq!(r.text, TIME_UP_TEXT);
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(Duration::from_secs(42)), "42 seconds");
        assert_eq!(format_total(Duration::from_secs(185)), "3 minutes and 5 seconds");
        assert_eq!(format_total(Duration::from_millis(999)), "0 seconds");
    }
}
