//! Run summaries, as plain text or JSON.

use crate::aggregations::{format_duration, SessionStats, Timelines};
use chrono::{DateTime, Utc};
use serde::Serialize;
use timeline_core::types::Category;

/// Report generator for terminal summaries.
pub struct ReportGenerator;

/// Machine-readable form of a run.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub total_events: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    pub sessions: Vec<SessionStats>,
    /// Sessions whose transcript was not found.
    pub missing: &'a [String],
}

impl ReportGenerator {
    /// Generate a compact per-session summary suitable for the terminal.
    pub fn text_summary(timelines: &Timelines) -> String {
        let mut output = String::new();

        match timelines.time_range() {
            Some((min, max)) => {
                output.push_str(&format!(
                    "  {} events across {} sessions, {} to {} UTC\n",
                    timelines.total_events(),
                    timelines.len(),
                    min.format("%Y-%m-%d %H:%M"),
                    max.format("%Y-%m-%d %H:%M"),
                ));
            }
            None => {
                output.push_str(&format!(
                    "  No events across {} sessions\n",
                    timelines.len()
                ));
            }
        }

        let stats = timelines.session_stats();
        for category in [Category::Claude, Category::Codex] {
            let mut sessions = stats.iter().filter(|s| s.category == category).peekable();
            if sessions.peek().is_none() {
                continue;
            }

            output.push_str(&format!("  {}:\n", category.label()));
            for session in sessions {
                let (Some(first), Some(last)) = (session.first, session.last) else {
                    output.push_str(&format!("    {}: no data\n", session.session_name));
                    continue;
                };

                output.push_str(&format!(
                    "    {}: {} events, {}-{} ({}), peak {}/bucket\n",
                    session.session_name,
                    session.event_count,
                    first.format("%H:%M"),
                    last.format("%H:%M"),
                    format_duration(session.duration_secs),
                    session.peak_per_bucket,
                ));
                if session.skipped_lines > 0 {
                    output.push_str(&format!(
                        "      skipped {} of {} lines\n",
                        session.skipped_lines, session.scan.lines
                    ));
                }
            }
        }

        if !timelines.missing().is_empty() {
            output.push_str(&format!(
                "  Missing transcripts: {}\n",
                timelines.missing().join(", ")
            ));
        }

        output
    }

    pub fn summary(timelines: &Timelines) -> RunSummary<'_> {
        let range = timelines.time_range();
        RunSummary {
            total_events: timelines.total_events(),
            first: range.map(|(min, _)| min),
            last: range.map(|(_, max)| max),
            sessions: timelines.session_stats(),
            missing: timelines.missing(),
        }
    }

    /// The run summary as pretty-printed JSON.
    pub fn json_summary(timelines: &Timelines) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::summary(timelines))
    }
}
