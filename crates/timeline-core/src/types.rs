use crate::transcript::ScanStats;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which agent tool produced a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Claude,
    Codex,
}

impl Category {
    /// Human-readable tool name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Claude => "Claude Code",
            Category::Codex => "Codex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a named session's transcript lives and which tool wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    /// Transcript path. A leading `~` is expanded when the file is read.
    #[serde(alias = "source_location")]
    pub path: PathBuf,
    #[serde(rename = "type", alias = "category")]
    pub category: Category,
}

impl SessionDescriptor {
    pub fn new(path: impl Into<PathBuf>, category: Category) -> Self {
        Self {
            path: path.into(),
            category,
        }
    }
}

/// All event instants extracted from one session's transcript.
#[derive(Debug, Clone)]
pub struct SessionTimeline {
    pub name: String,
    pub category: Category,
    /// Sorted ascending. May be empty.
    pub instants: Vec<DateTime<Utc>>,
    /// What the reader skipped while building `instants`.
    pub stats: ScanStats,
}

impl SessionTimeline {
    /// Build a timeline, sorting `instants` if the caller has not.
    pub fn new(name: impl Into<String>, category: Category, mut instants: Vec<DateTime<Utc>>) -> Self {
        instants.sort();
        Self {
            name: name.into(),
            category,
            instants,
            stats: ScanStats::default(),
        }
    }

    pub fn with_stats(mut self, stats: ScanStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn first(&self) -> Option<DateTime<Utc>> {
        self.instants.first().copied()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.instants.last().copied()
    }

    /// Time between the first and last event; zero for fewer than two events.
    pub fn span(&self) -> Duration {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last - first,
            _ => Duration::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 16, h, m, 0).unwrap()
    }

    #[test]
    fn test_timeline_sorts_instants() {
        let timeline = SessionTimeline::new("s", Category::Codex, vec![at(12, 0), at(10, 0), at(11, 0)]);
        assert_eq!(timeline.instants, vec![at(10, 0), at(11, 0), at(12, 0)]);
        assert_eq!(timeline.span(), Duration::hours(2));
    }

    #[test]
    fn test_empty_timeline() {
        let timeline = SessionTimeline::new("empty", Category::Claude, Vec::new());
        assert!(timeline.is_empty());
        assert!(timeline.first().is_none());
        assert_eq!(timeline.span(), Duration::zero());
    }

    #[test]
    fn test_descriptor_accepts_alias_keys() {
        let json = r#"{"path": "~/.codex/sessions/a.jsonl", "type": "codex"}"#;
        let desc: SessionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.category, Category::Codex);
        assert_eq!(desc.path, PathBuf::from("~/.codex/sessions/a.jsonl"));
    }

    #[test]
    fn test_descriptor_accepts_aliases() {
        let json = r#"{"source_location": "/tmp/a.jsonl", "category": "claude"}"#;
        let desc: SessionDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.category, Category::Claude);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(Category::Claude.to_string(), "Claude Code");
        assert_eq!(Category::Codex.label(), "Codex");
    }
}
