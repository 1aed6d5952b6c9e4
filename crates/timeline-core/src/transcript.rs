//! JSONL transcript reading.
//!
//! Each line of a transcript is an independent JSON object. Only the
//! top-level `timestamp` string is consumed; everything else is ignored.
//! Partial writes and foreign lines are normal in live logs, so every line
//! is classified rather than trusted.

use crate::config::expand_home;
use crate::timestamp::normalize_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Why a transcript line produced no event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Empty or whitespace-only line.
    Blank,
    /// Not valid JSON (truncated write, invalid UTF-8, trailing garbage).
    MalformedJson,
    /// Valid JSON, but not an object.
    NotAnObject,
    /// No `timestamp` field, or it is null, empty, or not a string.
    MissingTimestamp,
    /// `timestamp` present but not a recognizable date-time.
    UnparseableTimestamp,
}

/// Result of classifying one transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Event(DateTime<Utc>),
    Skipped(SkipReason),
}

/// Per-file line accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub lines: usize,
    pub events: usize,
    pub blank: usize,
    pub malformed_json: usize,
    pub not_an_object: usize,
    pub missing_timestamp: usize,
    pub unparseable_timestamp: usize,
    /// I/O failures that ended the read early.
    pub read_errors: usize,
}

impl ScanStats {
    pub fn record(&mut self, outcome: &LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Event(_) => self.events += 1,
            LineOutcome::Skipped(reason) => match reason {
                SkipReason::Blank => self.blank += 1,
                SkipReason::MalformedJson => self.malformed_json += 1,
                SkipReason::NotAnObject => self.not_an_object += 1,
                SkipReason::MissingTimestamp => self.missing_timestamp += 1,
                SkipReason::UnparseableTimestamp => self.unparseable_timestamp += 1,
            },
        }
    }

    /// Total lines that produced no event.
    pub fn skipped(&self) -> usize {
        self.blank
            + self.malformed_json
            + self.not_an_object
            + self.missing_timestamp
            + self.unparseable_timestamp
    }
}

/// Everything extracted from one transcript file.
#[derive(Debug, Clone)]
pub struct TranscriptScan {
    /// Path after `~` expansion.
    pub path: PathBuf,
    /// False when the file did not exist.
    pub found: bool,
    /// Sorted ascending.
    pub instants: Vec<DateTime<Utc>>,
    pub stats: ScanStats,
}

impl TranscriptScan {
    fn empty(path: PathBuf, found: bool) -> Self {
        Self {
            path,
            found,
            instants: Vec::new(),
            stats: ScanStats::default(),
        }
    }
}

/// Classify a single raw line.
pub fn classify_line(line: &[u8]) -> LineOutcome {
    if line.iter().all(u8::is_ascii_whitespace) {
        return LineOutcome::Skipped(SkipReason::Blank);
    }

    let value: Value = match serde_json::from_slice(line) {
        Ok(v) => v,
        Err(_) => return LineOutcome::Skipped(SkipReason::MalformedJson),
    };

    let Some(record) = value.as_object() else {
        return LineOutcome::Skipped(SkipReason::NotAnObject);
    };

    match record.get("timestamp").and_then(Value::as_str) {
        Some(raw) if !raw.is_empty() => match normalize_timestamp(raw) {
            Some(ts) => LineOutcome::Event(ts),
            None => LineOutcome::Skipped(SkipReason::UnparseableTimestamp),
        },
        _ => LineOutcome::Skipped(SkipReason::MissingTimestamp),
    }
}

/// Read every event instant from a JSONL transcript.
///
/// A missing or unopenable file is logged and yields an empty scan. A read
/// failure partway through keeps what was collected so far.
pub fn read_transcript(path: &Path) -> TranscriptScan {
    let path = expand_home(path);

    if !path.exists() {
        warn!("{} not found", path.display());
        return TranscriptScan::empty(path, false);
    }

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to open {}: {}", path.display(), e);
            return TranscriptScan::empty(path, true);
        }
    };

    let mut scan = TranscriptScan::empty(path, true);
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let outcome = classify_line(&buf);
                scan.stats.record(&outcome);
                if let LineOutcome::Event(ts) = outcome {
                    scan.instants.push(ts);
                }
            }
            Err(e) => {
                warn!(
                    "Stopped reading {} after {} lines: {}",
                    scan.path.display(),
                    scan.stats.lines,
                    e
                );
                scan.stats.read_errors += 1;
                break;
            }
        }
    }

    scan.instants.sort();
    debug!(
        "{}: {} events, {} lines skipped",
        scan.path.display(),
        scan.stats.events,
        scan.stats.skipped()
    );
    scan
}
