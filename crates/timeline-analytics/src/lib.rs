//! Aggregation, density binning, and summaries for agent-timeline.
//!
//! Turns session descriptors into per-session timelines, buckets each
//! timeline into a density profile, and formats a plain-text summary.

pub mod aggregations;
pub mod density;
pub mod reports;

pub use aggregations::{SessionAggregator, SessionStats, Timelines};
pub use density::{DensityBucket, DensityProfile};
pub use reports::{ReportGenerator, RunSummary};
