//! Configuration file parser
//!
//! Parses `typist.toml` into validated phrases, timing, and display settings.

use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Color;
use serde::{Deserialize, Serialize};

use crate::cycler::{CyclerConfig, PhraseSet};

/// Tick intervals as written in the config file
///
/// Signed so that negative values reach validation and get a readable error
/// instead of a bare integer parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    /// Milliseconds between typed characters (default: 100)
    #[serde(default = "default_typing_interval_ms")]
    pub typing_interval_ms: i64,
    /// Milliseconds between deleted characters (default: 50)
    #[serde(default = "default_deleting_interval_ms")]
    pub deleting_interval_ms: i64,
    /// Hold time on a completed phrase (default: 2000)
    #[serde(default = "default_pause_ms")]
    pub pause_ms: i64,
}

const fn default_typing_interval_ms() -> i64 {
    100
}

const fn default_deleting_interval_ms() -> i64 {
    50
}

const fn default_pause_ms() -> i64 {
    2000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            typing_interval_ms: default_typing_interval_ms(),
            deleting_interval_ms: default_deleting_interval_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

/// How the terminal host decorates the text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Static text printed before the cycling phrase
    #[serde(default)]
    pub prefix: String,
    /// Caret drawn after the text
    #[serde(default = "default_cursor")]
    pub cursor: String,
    /// Caret color name, as understood by `colored`
    #[serde(default = "default_cursor_color")]
    pub cursor_color: String,
}

fn default_cursor() -> String {
    "|".to_string()
}

fn default_cursor_color() -> String {
    "cyan".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            cursor: default_cursor(),
            cursor_color: default_cursor_color(),
        }
    }
}

/// Top-level configuration parsed from typist.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypistConfig {
    /// Phrases to cycle through, in order
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Tick intervals
    #[serde(default)]
    pub timing: TimingConfig,
    /// Terminal decoration
    #[serde(default)]
    pub display: DisplayConfig,
}

impl TypistConfig {
    /// Parse a typist.toml file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse typist.toml content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse typist.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Validated phrase list
    pub fn phrase_set(&self) -> Result<PhraseSet> {
        PhraseSet::new(self.phrases.iter().cloned()).context("Invalid phrases")
    }

    /// Validated timing
    pub fn cycler_config(&self) -> Result<CyclerConfig> {
        let timing = &self.timing;
        CyclerConfig::from_signed(
            timing.typing_interval_ms,
            timing.deleting_interval_ms,
            timing.pause_ms,
        )
        .context("Invalid [timing] section")
    }

    /// Caret color
    pub fn cursor_color(&self) -> Result<Color> {
        parse_color(&self.display.cursor_color)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.phrase_set()?;
        self.cycler_config()?;
        self.cursor_color()?;

        if self.display.cursor.contains('\n') {
            bail!("Cursor cannot contain a newline");
        }

        Ok(())
    }
}

/// Resolve a color name such as `cyan` or `bright blue`.
fn parse_color(name: &str) -> Result<Color> {
    match name.parse::<Color>() {
        Ok(color) => Ok(color),
        Err(()) => bail!("Unknown cursor color '{name}'"),
    }
}
