//! JSONL (JSON Lines) logging for frame history
//!
//! Provides append-only logging of published frames to `<log_dir>/frames.jsonl`

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write as IoWrite};
use std::path::{Path, PathBuf};

use crate::cycler::{Frame, Phase};

/// A frame as recorded in the log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameRecord {
    /// Wall-clock time the frame was recorded
    pub timestamp: DateTime<Utc>,
    /// Milliseconds since the cycler started
    pub elapsed_ms: u64,
    /// Index of the active phrase
    pub phrase_index: usize,
    /// Visible text
    pub text: String,
    /// Phase after the change
    pub phase: Phase,
}

impl FrameRecord {
    /// Stamp a frame with the current time.
    #[must_use]
    pub fn now(frame: &Frame) -> Self {
        Self {
            timestamp: Utc::now(),
            elapsed_ms: frame.elapsed_ms,
            phrase_index: frame.phrase_index,
            text: frame.text.clone(),
            phase: frame.phase,
        }
    }
}

/// JSONL logger for frame history
///
/// Each line is a JSON object representing a single published frame.
/// The file is kept open for the logger's lifetime since frames arrive
/// many times per second.
pub struct FrameLogger {
    log_path: PathBuf,
    writer: BufWriter<File>,
}

impl FrameLogger {
    /// Create a new frame logger
    ///
    /// # Arguments
    /// * `log_dir` - Directory where frames.jsonl will be stored
    ///
    /// # Errors
    /// Returns an error if the log directory or file cannot be created
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("frames.jsonl");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            log_path,
            writer: BufWriter::new(file),
        })
    }

    /// Append a frame record to the log
    pub fn append(&mut self, record: &FrameRecord) -> Result<()> {
        let json =
            serde_json::to_string(record).context("Failed to serialize frame record to JSON")?;
        writeln!(self.writer, "{json}").context("Failed to write to log file")?;
        Ok(())
    }

    /// Flush buffered records to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush log file")
    }

    /// Read all frame records from the log, in order
    ///
    /// Flushes pending records first.
    pub fn read_all(&mut self) -> Result<Vec<FrameRecord>> {
        self.flush()?;
        read_records(&self.log_path)
    }

    /// Get the path to the log file
    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Read every record in a frames.jsonl file.
///
/// A missing file yields an empty list.
pub fn read_records(path: &Path) -> Result<Vec<FrameRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;

    let mut records = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record: FrameRecord = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse line {} as JSON", line_num + 1))?;
        records.push(record);
    }

    Ok(records)
}
