//! Logging and observability
//!
//! This module provides logging functionality for typist, including
//! JSONL logging of every published frame.

pub mod jsonl;

pub use jsonl::{FrameLogger, FrameRecord};
