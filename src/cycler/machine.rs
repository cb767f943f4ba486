//! Phrase cycler state machine
//!
//! Drives a display string through typing, pause and deleting phases over a
//! cyclic list of phrases. The machine itself owns no timer: a driver asks
//! [`PhraseCycler::next_delay`] how long to wait, then calls
//! [`PhraseCycler::advance`] once the delay has elapsed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phrases::PhraseSet;
use super::timing::CyclerConfig;

/// Behaviour mode of the cycler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Appending one character per tick
    Typing,
    /// Holding the completed phrase until the pause elapses
    Paused,
    /// Removing one character per tick
    Deleting,
}

/// What a single call to [`PhraseCycler::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No phrases: nothing happened.
    Idle,
    /// A character was appended; the phrase is still incomplete.
    Typed(char),
    /// The final character was appended and the pause began.
    Paused,
    /// The pause elapsed and deletion began.
    Resumed,
    /// A character was removed; some text remains.
    Deleted(char),
    /// The text became empty and typing moved on to the given phrase.
    Advanced(usize),
}

/// Mutable state of the cycler.
///
/// `displayed_text` is always a prefix of the phrase at `active_phrase_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclerState {
    /// Index of the phrase being typed or deleted
    pub active_phrase_index: usize,
    /// Currently visible prefix of the active phrase
    pub displayed_text: String,
    /// Current phase
    pub phase: Phase,
}

impl CyclerState {
    fn initial() -> Self {
        Self {
            active_phrase_index: 0,
            displayed_text: String::new(),
            phase: Phase::Typing,
        }
    }
}

/// Snapshot published to hosts after every state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Milliseconds since the driver started
    pub elapsed_ms: u64,
    /// Index of the active phrase
    pub phrase_index: usize,
    /// Visible text
    pub text: String,
    /// Phase after the change
    pub phase: Phase,
}

/// Typewriter state machine over a [`PhraseSet`].
#[derive(Debug, Clone)]
pub struct PhraseCycler {
    phrases: PhraseSet,
    config: CyclerConfig,
    state: CyclerState,
}

impl PhraseCycler {
    /// Create a cycler in its initial state: typing phrase 0 from empty.
    #[must_use]
    pub fn new(phrases: PhraseSet, config: CyclerConfig) -> Self {
        Self {
            phrases,
            config,
            state: CyclerState::initial(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CyclerState {
        &self.state
    }

    /// Currently visible text.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        &self.state.displayed_text
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Phrase currently being typed or deleted, `None` for an empty set.
    #[must_use]
    pub fn active_phrase(&self) -> Option<&str> {
        self.phrases.get(self.state.active_phrase_index)
    }

    /// Phrases in use.
    #[must_use]
    pub const fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    /// Timing in use.
    #[must_use]
    pub const fn config(&self) -> &CyclerConfig {
        &self.config
    }

    /// Delay before the next tick, given the current phase.
    ///
    /// `None` when there are no phrases: no timer should be scheduled.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        if self.phrases.is_empty() {
            return None;
        }
        Some(match self.state.phase {
            Phase::Typing => self.config.typing_interval(),
            Phase::Paused => self.config.pause(),
            Phase::Deleting => self.config.deleting_interval(),
        })
    }

    /// Apply one timer firing.
    pub fn advance(&mut self) -> Step {
        let Some(phrase) = self.phrases.get(self.state.active_phrase_index) else {
            return Step::Idle;
        };
        let text = &mut self.state.displayed_text;

        match self.state.phase {
            Phase::Typing => {
                let Some(next) = phrase[text.len()..].chars().next() else {
                    self.state.phase = Phase::Paused;
                    return Step::Paused;
                };
                text.push(next);
                if text.len() == phrase.len() {
                    self.state.phase = Phase::Paused;
                    Step::Paused
                } else {
                    Step::Typed(next)
                }
            }
            Phase::Paused => {
                self.state.phase = Phase::Deleting;
                Step::Resumed
            }
            Phase::Deleting => match text.pop() {
                Some(removed) if !text.is_empty() => Step::Deleted(removed),
                _ => {
                    let next = self.phrases.next_index(self.state.active_phrase_index);
                    self.state.active_phrase_index = next;
                    self.state.phase = Phase::Typing;
                    Step::Advanced(next)
                }
            },
        }
    }

    /// Replace phrases and timing while running.
    ///
    /// Keeps as much progress as the new phrase list allows. If the visible
    /// text is not a prefix of the new active phrase it is cleared and typing
    /// restarts. Drivers must re-arm their timer with [`Self::next_delay`]
    /// afterwards.
    pub fn reconfigure(&mut self, phrases: PhraseSet, config: CyclerConfig) {
        self.phrases = phrases;
        self.config = config;

        if self.state.active_phrase_index >= self.phrases.len() {
            debug!(
                index = self.state.active_phrase_index,
                len = self.phrases.len(),
                "active phrase index out of range, restarting from phrase 0"
            );
            self.state = CyclerState::initial();
            return;
        }

        let Some(phrase) = self.phrases.get(self.state.active_phrase_index) else {
            return;
        };
        let text = &self.state.displayed_text;

        if !phrase.starts_with(text.as_str()) {
            debug!(
                text = %text,
                phrase,
                "displayed text no longer a prefix, restarting phrase"
            );
            self.state.displayed_text.clear();
            self.state.phase = Phase::Typing;
            return;
        }

        let complete = text.len() == phrase.len();
        self.state.phase = match (self.state.phase, complete) {
            (Phase::Typing, true) => Phase::Paused,
            (Phase::Paused, false) => Phase::Typing,
            (phase, _) => phase,
        };
    }

    /// Build a frame describing the current state.
    #[must_use]
    pub fn frame(&self, elapsed_ms: u64) -> Frame {
        Frame {
            elapsed_ms,
            phrase_index: self.state.active_phrase_index,
            text: self.state.displayed_text.clone(),
            phase: self.state.phase,
        }
    }
}
