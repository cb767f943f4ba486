//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use crate::cycler::{CyclerConfig, Frame, Phase, PhraseCycler, PhraseSet};

/// Build a cycler from string literals and millisecond timings.
#[must_use]
pub fn cycler(
    phrases: &[&str],
    typing_ms: u64,
    deleting_ms: u64,
    pause_ms: u64,
) -> PhraseCycler {
    PhraseCycler::new(
        PhraseSet::new(phrases.iter().copied()).unwrap(),
        CyclerConfig::new(typing_ms, deleting_ms, pause_ms).unwrap(),
    )
}

/// Create a `Frame` on phrase 0 for testing.
#[must_use]
pub fn make_test_frame(elapsed_ms: u64, text: &str, phase: Phase) -> Frame {
    Frame {
        elapsed_ms,
        phrase_index: 0,
        text: text.to_string(),
        phase,
    }
}

/// Assert the displayed text is a prefix of the active phrase.
pub fn assert_prefix_invariant(cycler: &PhraseCycler) {
    let text = cycler.displayed_text();
    let phrase = cycler.active_phrase().unwrap_or("");
    assert!(
        phrase.starts_with(text),
        "'{text}' is not a prefix of '{phrase}'"
    );
}
