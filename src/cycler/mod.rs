//! Phrase cycler
//!
//! The typewriter state machine, its validated inputs, and the two drivers
//! that own its timer: a virtual clock and a tokio task.

pub mod clock;
pub mod error;
pub mod machine;
pub mod phrases;
pub mod runner;
pub mod timing;

pub use clock::VirtualClock;
pub use error::{CyclerError, CyclerResult};
pub use machine::{CyclerState, Frame, Phase, PhraseCycler, Step};
pub use phrases::PhraseSet;
pub use runner::{spawn, spawn_with_stream, CyclerHandle, FrameStream};
pub use timing::CyclerConfig;
