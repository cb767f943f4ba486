//! Deterministic virtual clock driver
//!
//! Drives a [`PhraseCycler`] on simulated milliseconds instead of wall time.
//! Holds at most one pending deadline, mirroring the single outstanding
//! timer a real host keeps.

use std::time::Duration;

use super::error::{CyclerError, CyclerResult};
use super::machine::{Frame, PhraseCycler};
use super::phrases::PhraseSet;
use super::timing::CyclerConfig;

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Simulated-time driver for a cycler.
#[derive(Debug)]
pub struct VirtualClock {
    cycler: PhraseCycler,
    now_ms: u64,
    deadline_ms: Option<u64>,
    torn_down: bool,
}

impl VirtualClock {
    /// Start driving `cycler` at t=0, arming its first tick.
    #[must_use]
    pub fn new(cycler: PhraseCycler) -> Self {
        let deadline_ms = cycler.next_delay().map(millis);
        Self {
            cycler,
            now_ms: 0,
            deadline_ms,
            torn_down: false,
        }
    }

    /// Current simulated time.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// When the pending timer fires, if one is armed.
    #[must_use]
    pub const fn pending_deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// The driven cycler.
    #[must_use]
    pub const fn cycler(&self) -> &PhraseCycler {
        &self.cycler
    }

    /// Whether [`Self::teardown`] has been called.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Snapshot of the current state at the current time.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.cycler.frame(self.now_ms)
    }

    /// Move time forward to `t_ms`, firing every deadline on the way.
    ///
    /// Returns one frame per firing, in order. Time never moves backwards.
    pub fn run_until(&mut self, t_ms: u64) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Some(deadline) = self.deadline_ms.filter(|d| *d <= t_ms) {
            self.now_ms = deadline;
            self.cycler.advance();
            frames.push(self.cycler.frame(deadline));
            self.deadline_ms = self
                .cycler
                .next_delay()
                .map(|delay| deadline.saturating_add(millis(delay)));
        }
        self.now_ms = self.now_ms.max(t_ms);
        frames
    }

    /// Move time forward by `elapsed_ms`.
    pub fn run_for(&mut self, elapsed_ms: u64) -> Vec<Frame> {
        self.run_until(self.now_ms.saturating_add(elapsed_ms))
    }

    /// Swap phrases and timing, cancelling the pending timer and re-arming it
    /// from the current time with the new interval.
    pub fn reconfigure(
        &mut self,
        phrases: PhraseSet,
        config: CyclerConfig,
    ) -> CyclerResult<Frame> {
        if self.torn_down {
            return Err(CyclerError::Stopped);
        }
        self.cycler.reconfigure(phrases, config);
        self.deadline_ms = self
            .cycler
            .next_delay()
            .map(|delay| self.now_ms.saturating_add(millis(delay)));
        Ok(self.frame())
    }

    /// Cancel the pending timer. Nothing fires afterwards.
    pub fn teardown(&mut self) {
        self.deadline_ms = None;
        self.torn_down = true;
    }
}
