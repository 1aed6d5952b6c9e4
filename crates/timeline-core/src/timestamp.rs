//! Timestamp normalization for transcript records.
//!
//! Claude Code writes `2026-01-16T16:46:56.123Z`, Codex writes the same shape,
//! and hand-edited logs occasionally carry explicit offsets or nanosecond
//! fractions. Everything is folded into a UTC instant with microsecond
//! precision.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

/// Layouts tried after RFC 3339 when an explicit offset is present.
///
/// `%#z` accepts `+05`, `+0530` and `+05:30`.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y%m%dT%H%M%S%.f%#z",
];

/// Layouts for timestamps without any offset. These are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
];

/// Digits of sub-second precision kept on every instant.
const MAX_FRACTION_DIGITS: usize = 6;

/// Parse a transcript timestamp into a UTC instant.
///
/// Returns `None` for empty or unparseable input; the caller treats that as a
/// skipped record.
pub fn normalize_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }

    let mut ts = match raw.strip_suffix('Z') {
        Some(base) => format!("{base}+00:00"),
        None => raw.to_string(),
    };

    if ts.contains('.') && ts.contains('+') {
        ts = truncate_fraction(&ts)?;
    }

    parse_iso(&ts).map(|dt| dt.trunc_subsecs(MAX_FRACTION_DIGITS as u16))
}

/// Cut the fractional seconds of `<base>.<frac>+<offset>` down to six digits.
///
/// A base with more than one `.` is malformed.
fn truncate_fraction(ts: &str) -> Option<String> {
    let (base, offset) = ts.rsplit_once('+')?;
    let Some((main, frac)) = base.split_once('.') else {
        return Some(ts.to_string());
    };
    if frac.contains('.') {
        return None;
    }
    let frac: String = frac.chars().take(MAX_FRACTION_DIGITS).collect();
    Some(format!("{main}.{frac}+{offset}"))
}

fn parse_iso(ts: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(ts, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(ts, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
