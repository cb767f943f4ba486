//! Tick intervals for the cycler

use std::time::Duration;

use super::error::{CyclerError, CyclerResult};

/// Validated timing for the three phases.
///
/// Typing and deleting intervals are strictly positive; the pause may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclerConfig {
    typing_interval_ms: u64,
    deleting_interval_ms: u64,
    pause_ms: u64,
}

impl CyclerConfig {
    /// Build a config, rejecting zero typing or deleting intervals.
    pub fn new(
        typing_interval_ms: u64,
        deleting_interval_ms: u64,
        pause_ms: u64,
    ) -> CyclerResult<Self> {
        if typing_interval_ms == 0 {
            return Err(CyclerError::invalid_config(
                "typing_interval_ms must be positive",
            ));
        }
        if deleting_interval_ms == 0 {
            return Err(CyclerError::invalid_config(
                "deleting_interval_ms must be positive",
            ));
        }
        Ok(Self {
            typing_interval_ms,
            deleting_interval_ms,
            pause_ms,
        })
    }

    /// Build a config from signed values, as read from loosely typed input.
    ///
    /// Negative values are rejected the same way zero intervals are.
    pub fn from_signed(
        typing_interval_ms: i64,
        deleting_interval_ms: i64,
        pause_ms: i64,
    ) -> CyclerResult<Self> {
        let non_negative = |name: &str, value: i64| {
            u64::try_from(value).map_err(|_| {
                CyclerError::invalid_config(format!("{name} must not be negative, got {value}"))
            })
        };
        Self::new(
            non_negative("typing_interval_ms", typing_interval_ms)?,
            non_negative("deleting_interval_ms", deleting_interval_ms)?,
            non_negative("pause_ms", pause_ms)?,
        )
    }

    /// Interval between typed characters, in milliseconds.
    #[must_use]
    pub const fn typing_interval_ms(&self) -> u64 {
        self.typing_interval_ms
    }

    /// Interval between deleted characters, in milliseconds.
    #[must_use]
    pub const fn deleting_interval_ms(&self) -> u64 {
        self.deleting_interval_ms
    }

    /// Hold time on a completed phrase, in milliseconds.
    #[must_use]
    pub const fn pause_ms(&self) -> u64 {
        self.pause_ms
    }

    /// Interval between typed characters.
    #[must_use]
    pub const fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    /// Interval between deleted characters.
    #[must_use]
    pub const fn deleting_interval(&self) -> Duration {
        Duration::from_millis(self.deleting_interval_ms)
    }

    /// Hold time on a completed phrase.
    #[must_use]
    pub const fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: 100,
            deleting_interval_ms: 50,
            pause_ms: 2000,
        }
    }
}
