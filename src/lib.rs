//! typist - Typewriter phrase cycler
//!
//! A timer-driven state machine that types and deletes a rotating list of
//! phrases, with a deterministic virtual clock, a tokio driver, and a
//! terminal host.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod contact;
pub mod cycler;
pub mod log;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use cli::TerminalDisplay;
pub use config::TypistConfig;
pub use contact::{ContactSubmission, Field, FieldError};
pub use cycler::{
    CyclerConfig, CyclerError, CyclerHandle, Frame, Phase, PhraseCycler, PhraseSet, Step,
    VirtualClock,
};
pub use log::{FrameLogger, FrameRecord};
