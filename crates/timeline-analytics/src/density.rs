//! Per-session event density.
//!
//! Each session is bucketed over its own span, so a ten-minute burst and a
//! six-hour session come out with comparable granularity. Bucket assignment
//! follows the usual equal-width histogram convention: every bucket is
//! right-open except the last, which includes the session's final event.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use timeline_core::types::SessionTimeline;

/// Roughly how many buckets a session is split into.
pub const TARGET_BUCKETS: f64 = 30.0;

/// Lower bound on the bucket count, so short sessions still get shape.
pub const MIN_BUCKETS: usize = 10;

/// One density bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityBucket {
    /// Session start plus the left edge, truncated to whole minutes.
    pub start: DateTime<Utc>,
    /// Session start plus the right edge, truncated to whole minutes.
    pub end: DateTime<Utc>,
    /// Exact left edge in minutes since the session start.
    pub start_minute: f64,
    /// Exact right edge in minutes since the session start.
    pub end_minute: f64,
    pub count: u32,
    /// `count / max_count`, in `[0, 1]`.
    pub intensity: f64,
}

/// Histogram of a session's events over its own time span.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DensityProfile {
    /// Width of each bucket in whole minutes (before equal-width spreading).
    pub bucket_minutes: u32,
    pub buckets: Vec<DensityBucket>,
}

impl DensityProfile {
    /// Bucket a session's events.
    ///
    /// Fewer than two events, or all events at the same instant, give an
    /// empty profile.
    pub fn compute(timeline: &SessionTimeline) -> Self {
        Self::from_instants(&timeline.instants)
    }

    /// Bucket a sorted slice of instants.
    pub fn from_instants(instants: &[DateTime<Utc>]) -> Self {
        let (Some(&start), Some(&end)) = (instants.first(), instants.last()) else {
            return Self::default();
        };
        if instants.len() < 2 {
            return Self::default();
        }

        let span_minutes = minutes(end - start);
        if span_minutes <= 0.0 {
            return Self::default();
        }

        let bucket_minutes = ((span_minutes / TARGET_BUCKETS) as u32).max(1);
        let bucket_count = MIN_BUCKETS.max((span_minutes / bucket_minutes as f64) as usize + 1);

        let edges = linspace(span_minutes, bucket_count);
        let mut counts = vec![0u32; bucket_count];
        for ts in instants {
            let offset = minutes(*ts - start);
            counts[bucket_index(offset, span_minutes, &edges)] += 1;
        }

        let max_count = counts.iter().copied().max().unwrap_or(0);
        let buckets = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DensityBucket {
                start: start + Duration::minutes(edges[i] as i64),
                end: start + Duration::minutes(edges[i + 1] as i64),
                start_minute: edges[i],
                end_minute: edges[i + 1],
                count,
                intensity: if max_count == 0 {
                    0.0
                } else {
                    count as f64 / max_count as f64
                },
            })
            .collect();

        Self {
            bucket_minutes,
            buckets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// `(start, end)` instants of each bucket.
    pub fn bucket_boundaries(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.buckets.iter().map(|b| (b.start, b.end)).collect()
    }

    pub fn bucket_counts(&self) -> Vec<u32> {
        self.buckets.iter().map(|b| b.count).collect()
    }

    pub fn normalized_intensity(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.intensity).collect()
    }

    pub fn max_count(&self) -> u32 {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Duration as fractional minutes.
fn minutes(d: Duration) -> f64 {
    match d.num_microseconds() {
        Some(us) => us as f64 / 60_000_000.0,
        None => d.num_seconds() as f64 / 60.0,
    }
}

/// `count + 1` evenly spaced edges over `[0, stop]`, last edge exactly `stop`.
fn linspace(stop: f64, count: usize) -> Vec<f64> {
    let step = stop / count as f64;
    let mut edges: Vec<f64> = (0..=count).map(|i| i as f64 * step).collect();
    edges[count] = stop;
    edges
}

/// Index of the bucket holding `offset`.
///
/// Computes the index arithmetically, then nudges it by one where floating
/// point puts it on the wrong side of an edge.
fn bucket_index(offset: f64, span: f64, edges: &[f64]) -> usize {
    let n = edges.len() - 1;
    let mut idx = ((offset / span) * n as f64) as usize;
    if idx >= n {
        idx = n - 1;
    }
    if offset < edges[idx] && idx > 0 {
        idx -= 1;
    }
    if offset >= edges[idx + 1] && idx != n - 1 {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use timeline_core::types::Category;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 16, 16, 0, 0).unwrap()
    }

    fn offsets(mins: &[i64]) -> Vec<DateTime<Utc>> {
        mins.iter().map(|m| base() + Duration::minutes(*m)).collect()
    }

    #[test]
    fn test_empty_and_single_instant() {
        assert!(DensityProfile::from_instants(&[]).is_empty());
        assert!(DensityProfile::from_instants(&offsets(&[0])).is_empty());

        let timeline = SessionTimeline::new("empty", Category::Codex, vec![]);
        assert!(DensityProfile::compute(&timeline).is_empty());
    }

    #[test]
    fn test_zero_span() {
        let profile = DensityProfile::from_instants(&offsets(&[5, 5, 5]));
        assert!(profile.is_empty());
    }

    #[test]
    fn test_short_span_uses_minimum_bucket_count() {
        let profile = DensityProfile::from_instants(&offsets(&[0, 5]));
        assert_eq!(profile.len(), MIN_BUCKETS);
        assert_eq!(profile.bucket_minutes, 1);

        let counts = profile.bucket_counts();
        assert_eq!(counts[0], 1);
        assert_eq!(counts[MIN_BUCKETS - 1], 1);
        assert_eq!(counts.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_ten_minute_pair() {
        // floor(10 / 1) + 1 = 11 buckets.
        let profile = DensityProfile::from_instants(&offsets(&[0, 10]));
        assert_eq!(profile.len(), 11);

        let counts = profile.bucket_counts();
        assert_eq!(counts[0], 1);
        assert_eq!(counts[10], 1);
        assert!(profile.normalized_intensity().contains(&1.0));
    }

    #[test]
    fn test_last_bucket_is_closed() {
        let profile = DensityProfile::from_instants(&offsets(&[0, 3, 7, 20]));
        let last = profile.buckets.last().unwrap();
        assert_eq!(last.end_minute, 20.0);
        assert_eq!(last.count, 1);
    }

    #[test]
    fn test_edge_instant_goes_right() {
        // 9 minute span: 10 buckets of 0.9 minutes, so 4.5 sits on edge 5.
        let mut instants = offsets(&[0]);
        instants.push(base() + Duration::seconds(270));
        instants.push(base() + Duration::minutes(9));
        let profile = DensityProfile::from_instants(&instants);
        assert_eq!(profile.len(), 10);
        assert_eq!(profile.bucket_counts(), vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn test_six_hour_session() {
        let mins: Vec<i64> = (0..=360).step_by(2).collect();
        let profile = DensityProfile::from_instants(&offsets(&mins));
        // 360 / 30 = 12 minute buckets, 360 / 12 + 1 = 31 buckets.
        assert_eq!(profile.bucket_minutes, 12);
        assert_eq!(profile.len(), 31);
        assert_eq!(profile.bucket_counts().iter().sum::<u32>(), mins.len() as u32);
    }

    #[test]
    fn test_intensity_normalized() {
        let profile = DensityProfile::from_instants(&offsets(&[0, 0, 0, 0, 1, 2, 30]));
        let intensity = profile.normalized_intensity();
        assert_eq!(intensity.len(), profile.len());
        assert!(intensity.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(intensity.iter().cloned().fold(0.0, f64::max), 1.0);
        assert_eq!(profile.max_count(), 4);
    }

    #[test]
    fn test_boundaries_truncate_to_minutes() {
        let profile = DensityProfile::from_instants(&offsets(&[0, 5]));
        let bounds = profile.bucket_boundaries();
        // Buckets are 0.5 minutes wide; the first two both start at minute 0.
        assert_eq!(bounds[0].0, base());
        assert_eq!(bounds[1].0, base());
        assert_eq!(bounds[2].0, base() + Duration::minutes(1));
        assert_eq!(bounds.last().unwrap().1, base() + Duration::minutes(5));
    }
}
