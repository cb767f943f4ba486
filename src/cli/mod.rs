//! CLI output formatting
//!
//! Provides the terminal host that renders cycler frames.

pub mod display;

pub use display::TerminalDisplay;
