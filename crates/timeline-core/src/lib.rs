//! Core data model for agent-timeline.
//!
//! Reads JSONL transcripts written by Claude Code and Codex, normalizes their
//! timestamps, and loads the session table that drives a timeline run.

pub mod config;
pub mod error;
pub mod timestamp;
pub mod transcript;
pub mod types;

pub use config::TimelineConfig;
pub use error::TimelineError;
pub use timestamp::normalize_timestamp;
pub use transcript::{read_transcript, LineOutcome, ScanStats, SkipReason, TranscriptScan};
pub use types::{Category, SessionDescriptor, SessionTimeline};
