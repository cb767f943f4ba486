//! Terminal display for the phrase cycler
//!
//! Redraws a single line on stderr for every published frame.
//! All output goes to stderr so stdout remains clean for piping.

use std::io::{self, Write};

use anyhow::Result;
use colored::{Color, Colorize};

use crate::config::TypistConfig;
use crate::cycler::Frame;

/// Single-line renderer for cycler frames
pub struct TerminalDisplay {
    prefix: String,
    cursor: String,
    cursor_color: Color,
    /// Width of the last drawn line, used to blank leftovers when text shrinks
    last_width: usize,
}

impl TerminalDisplay {
    /// Create a display with explicit decoration
    #[must_use]
    pub fn new(prefix: &str, cursor: &str, cursor_color: Color) -> Self {
        Self {
            prefix: prefix.to_string(),
            cursor: cursor.to_string(),
            cursor_color,
            last_width: 0,
        }
    }

    /// Create a display from the `[display]` section
    pub fn from_config(config: &TypistConfig) -> Result<Self> {
        Ok(Self::new(
            &config.display.prefix,
            &config.display.cursor,
            config.cursor_color()?,
        ))
    }

    /// Print the header shown before the animation starts
    pub fn print_header(&self, source: &str, phrase_count: usize) {
        eprintln!(
            "{} {}",
            "===".bold().cyan(),
            format!("typist: {phrase_count} phrase(s) from {source}")
                .bold()
                .cyan()
        );
        eprintln!("{}", "─".repeat(50).dimmed());
    }

    /// Uncolored line body and the padding needed to cover the previous draw
    fn compose(&self, text: &str) -> (String, usize) {
        let body = format!("{}{}", self.prefix, text);
        let width = body.chars().count() + self.cursor.chars().count();
        let padding = self.last_width.saturating_sub(width);
        (body, padding)
    }

    /// Redraw the line for `frame`
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let (body, padding) = self.compose(&frame.text);
        let width = body.chars().count() + self.cursor.chars().count();

        let mut stderr = io::stderr().lock();
        write!(
            stderr,
            "\r{}{}{}",
            body.bold(),
            self.cursor.color(self.cursor_color),
            " ".repeat(padding)
        )?;
        stderr.flush()?;

        self.last_width = width;
        Ok(())
    }

    /// End the animated line and print a short summary
    pub fn print_summary(&self, frames_drawn: u64, elapsed_ms: u64) {
        eprintln!();
        eprintln!("{}", "─".repeat(50).dimmed());
        let secs = elapsed_ms / 1000;
        let millis = elapsed_ms % 1000;
        eprintln!(
            "  {} {frames_drawn} frames | {secs}.{millis:03}s",
            "STOPPED".yellow().bold()
        );
    }
}
