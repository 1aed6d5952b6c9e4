//! Chart geometry in data coordinates.
//!
//! Time runs along x; sessions are stacked as horizontal lanes along y, Codex
//! at the bottom and Claude Code above, each group ordered by first event.
//! Renderers plot x as minutes since [`ChartLayout::x_min`].

use chrono::{DateTime, Duration, Utc};
use timeline_analytics::aggregations::Timelines;
use timeline_analytics::density::DensityProfile;
use timeline_core::types::{Category, SessionTimeline};

/// Half the height of an event tick, in lane units.
pub const EVENT_HALF_HEIGHT: f64 = 0.35;
/// Half-height of a density band at full intensity.
pub const BAND_SCALE: f64 = 0.3;
/// Vertical gap between the Codex and Claude Code groups.
pub const GROUP_GAP: f64 = 0.5;

const PAD_BEFORE_MINUTES: i64 = 60;
const PAD_AFTER_MINUTES: i64 = 90;
const LABEL_OFFSET_MINUTES: i64 = 5;
const MAJOR_TICK_SECS: i64 = 2 * 3600;
const MINOR_TICK_SECS: i64 = 30 * 60;

pub const SUBTITLE: &str =
    "Actual message/event activity (vertical lines = events, shading = intensity)";

/// A shaded density band.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub half_height: f64,
}

/// One session's row.
#[derive(Debug, Clone)]
pub struct Lane {
    pub name: String,
    pub category: Category,
    pub y: f64,
    pub events: Vec<DateTime<Utc>>,
    /// Only buckets with at least one event.
    pub bands: Vec<Band>,
}

impl Lane {
    fn from_timeline(timeline: &SessionTimeline, y: f64) -> Self {
        let bands = DensityProfile::compute(timeline)
            .buckets
            .iter()
            .filter(|b| b.count > 0)
            .map(|b| Band {
                start: b.start,
                end: b.end,
                half_height: b.intensity * BAND_SCALE,
            })
            .collect();

        Self {
            name: timeline.name.clone(),
            category: timeline.category,
            y,
            events: timeline.instants.clone(),
            bands,
        }
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// A group heading on the left of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupLabel {
    pub category: Category,
    pub y: f64,
}

/// Everything a renderer needs to draw the timeline.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub title: String,
    pub subtitle: String,
    pub x_label: String,
    pub x_min: DateTime<Utc>,
    pub x_max: DateTime<Utc>,
    pub y_min: f64,
    pub y_max: f64,
    pub lanes: Vec<Lane>,
    pub divider_y: f64,
    pub group_labels: Vec<GroupLabel>,
    /// Where session names start.
    pub session_label_x: DateTime<Utc>,
    /// Where group headings end.
    pub group_label_x: DateTime<Utc>,
    pub major_ticks: Vec<DateTime<Utc>>,
    pub minor_ticks: Vec<DateTime<Utc>>,
}

impl ChartLayout {
    /// Lay out every session. Returns `None` when no session has events.
    pub fn build(timelines: &Timelines, title: &str) -> Option<Self> {
        let (min_time, max_time) = timelines.time_range()?;

        let codex = timelines.by_category(Category::Codex);
        let claude = timelines.by_category(Category::Claude);

        let mut lanes = Vec::with_capacity(timelines.len());
        let mut y = 1.0;
        for timeline in &codex {
            lanes.push(Lane::from_timeline(timeline, y));
            y += 1.0;
        }
        y += GROUP_GAP;
        let divider_y = y - GROUP_GAP / 2.0;
        for timeline in &claude {
            lanes.push(Lane::from_timeline(timeline, y));
            y += 1.0;
        }

        let group_labels = vec![
            GroupLabel {
                category: Category::Claude,
                y: y - 0.5,
            },
            GroupLabel {
                category: Category::Codex,
                y: codex.len() as f64 / 2.0 + 0.5,
            },
        ];

        let x_min = min_time - Duration::minutes(PAD_BEFORE_MINUTES);
        let x_max = max_time + Duration::minutes(PAD_AFTER_MINUTES);

        Some(Self {
            title: title.to_string(),
            subtitle: SUBTITLE.to_string(),
            x_label: axis_label(min_time, max_time),
            x_min,
            x_max,
            y_min: 0.3,
            y_max: timelines.len() as f64 + 1.5,
            lanes,
            divider_y,
            group_labels,
            session_label_x: max_time + Duration::minutes(LABEL_OFFSET_MINUTES),
            group_label_x: min_time - Duration::minutes(LABEL_OFFSET_MINUTES),
            major_ticks: ticks_every(x_min, x_max, MAJOR_TICK_SECS),
            minor_ticks: ticks_every(x_min, x_max, MINOR_TICK_SECS),
        })
    }

    /// Plot x coordinate of `t`: minutes since the left edge.
    pub fn minutes_from_start(&self, t: DateTime<Utc>) -> f64 {
        (t - self.x_min).num_milliseconds() as f64 / 60_000.0
    }

    /// Plot x coordinate of the right edge.
    pub fn x_span(&self) -> f64 {
        self.minutes_from_start(self.x_max)
    }
}

/// Axis label with the data's date, or a `Jan 16-17` style range when it crosses midnight.
pub fn axis_label(min_time: DateTime<Utc>, max_time: DateTime<Utc>) -> String {
    let date_str = if min_time.date_naive() == max_time.date_naive() {
        min_time.format("%b %d").to_string()
    } else {
        format!("{}-{}", min_time.format("%b %d"), max_time.format("%d"))
    };
    format!("Time (UTC) — {}, {}", date_str, min_time.format("%Y"))
}

/// Instants in `[min, max]` aligned to multiples of `step_secs` since the epoch.
fn ticks_every(min: DateTime<Utc>, max: DateTime<Utc>, step_secs: i64) -> Vec<DateTime<Utc>> {
    let first = min.timestamp().div_euclid(step_secs) * step_secs;
    let first = if first < min.timestamp() {
        first + step_secs
    } else {
        first
    };

    (0..)
        .map(|i| first + i * step_secs)
        .take_while(|secs| *secs <= max.timestamp())
        .filter_map(|secs| DateTime::from_timestamp(secs, 0))
        .collect()
}
