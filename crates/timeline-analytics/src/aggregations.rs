//! Per-session aggregation of transcript instants.
//!
//! Runs the transcript reader once per configured session and collects the
//! results into [`Timelines`], keeping sessions that produced no events so
//! the renderer and summary can report them.

use crate::density::DensityProfile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use timeline_core::transcript::{read_transcript, ScanStats, TranscriptScan};
use timeline_core::types::{Category, SessionDescriptor, SessionTimeline};
use tracing::info;

/// Statistics computed for a single session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub session_name: String,
    pub category: Category,
    pub event_count: usize,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    /// Seconds from first to last event.
    pub duration_secs: u64,
    /// Transcript lines that produced no event.
    pub skipped_lines: usize,
    /// Largest bucket count in the session's density profile.
    pub peak_per_bucket: u32,
    pub scan: ScanStats,
    pub density: DensityProfile,
}

impl SessionStats {
    pub fn from_timeline(timeline: &SessionTimeline) -> Self {
        let density = DensityProfile::compute(timeline);
        Self {
            session_name: timeline.name.clone(),
            category: timeline.category,
            event_count: timeline.len(),
            first: timeline.first(),
            last: timeline.last(),
            duration_secs: timeline.span().num_seconds().max(0) as u64,
            skipped_lines: timeline.stats.skipped(),
            peak_per_bucket: density.max_count(),
            scan: timeline.stats.clone(),
            density,
        }
    }
}

/// All session timelines from one run, keyed by session name.
#[derive(Debug, Clone, Default)]
pub struct Timelines {
    sessions: BTreeMap<String, SessionTimeline>,
    /// Sessions whose transcript file did not exist.
    missing: Vec<String>,
}

impl Timelines {
    pub fn insert(&mut self, timeline: SessionTimeline) {
        self.sessions.insert(timeline.name.clone(), timeline);
    }

    pub fn get(&self, name: &str) -> Option<&SessionTimeline> {
        self.sessions.get(name)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionTimeline> {
        self.sessions.values()
    }

    /// Names of sessions whose transcript was not found.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Events across every session.
    pub fn total_events(&self) -> usize {
        self.sessions.values().map(|t| t.len()).sum()
    }

    /// Whether any session has at least one event.
    pub fn has_data(&self) -> bool {
        self.sessions.values().any(|t| !t.is_empty())
    }

    /// Earliest and latest event across all sessions.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let min = self.sessions.values().filter_map(|t| t.first()).min()?;
        let max = self.sessions.values().filter_map(|t| t.last()).max()?;
        Some((min, max))
    }

    /// Sessions of one category, earliest start first.
    ///
    /// Sessions without events sort last; ties break on name.
    pub fn by_category(&self, category: Category) -> Vec<&SessionTimeline> {
        let mut sessions: Vec<_> = self
            .sessions
            .values()
            .filter(|t| t.category == category)
            .collect();
        sessions.sort_by(|a, b| {
            let key_a = a.first().unwrap_or(DateTime::<Utc>::MAX_UTC);
            let key_b = b.first().unwrap_or(DateTime::<Utc>::MAX_UTC);
            key_a.cmp(&key_b).then_with(|| a.name.cmp(&b.name))
        });
        sessions
    }

    /// Per-session statistics, Claude Code first, each category in lane order.
    pub fn session_stats(&self) -> Vec<SessionStats> {
        [Category::Claude, Category::Codex]
            .into_iter()
            .flat_map(|category| self.by_category(category))
            .map(SessionStats::from_timeline)
            .collect()
    }
}

/// Builds [`Timelines`] from session descriptors.
pub struct SessionAggregator {
    reader: fn(&Path) -> TranscriptScan,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self {
            reader: read_transcript,
        }
    }

    /// Use a different transcript reader.
    pub fn with_reader(reader: fn(&Path) -> TranscriptScan) -> Self {
        Self { reader }
    }

    /// Read every descriptor's transcript, in map order.
    ///
    /// A missing or unreadable file yields an empty timeline; it never stops
    /// the remaining sessions from being read.
    pub fn aggregate(&self, descriptors: &BTreeMap<String, SessionDescriptor>) -> Timelines {
        let mut timelines = Timelines::default();

        for (name, desc) in descriptors {
            info!("Processing {}...", name);
            let scan = (self.reader)(&desc.path);
            info!("  Found {} events", scan.instants.len());

            if !scan.found {
                timelines.missing.push(name.clone());
            }
            timelines.insert(
                SessionTimeline::new(name.clone(), desc.category, scan.instants)
                    .with_stats(scan.stats),
            );
        }

        timelines
    }
}

impl Default for SessionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as a human-readable duration string.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
