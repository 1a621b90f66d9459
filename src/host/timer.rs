//! Writing-session countdown, advanced one second per tick by the host.

use crate::{Error, Result};

/// Label on the timer button when no countdown runs.
pub const IDLE_TIMER_LABEL: &str = "Timer";

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Running { remaining_secs: u64 },
    /// Emitted exactly once; the host plays the alarm and shows the idle label.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u64,
}

impl Countdown {
    /// Builds a countdown; `Ok(None)` when both fields are zero.
    pub fn new(hours: i64, minutes: i64) -> Result<Option<Self>> {
        if hours < 0 || minutes < 0 {
            return Err(Error::InvalidTimer(format!(
                "negative duration {hours}h {minutes}m"
            )));
        }
        let total = (hours as u64)
            .checked_mul(3600)
            .and_then(|h| h.checked_add((minutes as u64).checked_mul(60)?))
            .ok_or_else(|| Error::InvalidTimer(format!("{hours}h {minutes}m is too long")))?;
        if total == 0 {
            return Ok(None);
        }
        Ok(Some(Self {
            remaining_secs: total,
        }))
    }

    /// Builds a countdown from raw dialog fields. Leading digits are used and
    /// anything unparsable counts as zero.
    pub fn from_inputs(hours: &str, minutes: &str) -> Result<Option<Self>> {
        Self::new(parse_leading_int(hours), parse_leading_int(minutes))
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Advances one second. Returns `None` once the countdown already finished.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.is_finished() {
            return None;
        }
        self.remaining_secs -= 1;
        if self.is_finished() {
            tracing::info!("countdown finished");
            Some(TimerEvent::Finished)
        } else {
            Some(TimerEvent::Running {
                remaining_secs: self.remaining_secs,
            })
        }
    }

    /// `HH:MM:SS`, zero-padded.
    pub fn display(&self) -> String {
        let hours = self.remaining_secs / 3600;
        let minutes = (self.remaining_secs % 3600) / 60;
        let seconds = self.remaining_secs % 60;
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

fn parse_leading_int(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<i64>()
        .map(|value| sign * value)
        .unwrap_or(0)
}
