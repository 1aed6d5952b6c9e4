//! Timeline chart rendering for agent-timeline.
//!
//! Lays out per-session timelines and writes them as
//! `timeline_activity.png` and `timeline_activity.svg`.

mod draw;
pub mod layout;
pub mod png;
pub mod style;
pub mod svg;

use std::path::{Path, PathBuf};
use thiserror::Error;
use timeline_analytics::aggregations::Timelines;
use tracing::info;

pub use layout::ChartLayout;
pub use png::PngRenderer;
pub use svg::SvgRenderer;

/// File stem shared by every artifact.
pub const ARTIFACT_BASENAME: &str = "timeline_activity";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Drawing error: {0}")]
    Draw(String),

    #[error("No timestamps found in any session")]
    NoData,
}

/// Something that can draw a [`ChartLayout`] to a file.
pub trait ChartRenderer {
    /// File extension of the artifact, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, chart: &ChartLayout, path: &Path) -> Result<(), RenderError>;
}

/// Render `timelines` with every renderer into `output_dir`.
///
/// The directory is created if needed. Returns the written paths.
pub fn render_artifacts(
    timelines: &Timelines,
    title: &str,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, RenderError> {
    let chart = ChartLayout::build(timelines, title).ok_or(RenderError::NoData)?;
    std::fs::create_dir_all(output_dir)?;

    let png = PngRenderer::default();
    let svg = SvgRenderer::default();
    let renderers: [&dyn ChartRenderer; 2] = [&png, &svg];
    let mut written = Vec::with_capacity(renderers.len());
    for renderer in renderers {
        let path = output_dir.join(format!("{}.{}", ARTIFACT_BASENAME, renderer.extension()));
        renderer.render(&chart, &path)?;
        info!("Saved: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;
    use timeline_core::types::{Category, SessionTimeline};

    #[test]
    fn test_render_artifacts_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("docs");

        let mut timelines = Timelines::default();
        timelines.insert(SessionTimeline::new(
            "Claude Code #1",
            Category::Claude,
            vec![
                Utc.with_ymd_and_hms(2026, 1, 16, 16, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2026, 1, 16, 17, 30, 0).unwrap(),
            ],
        ));

        let written = render_artifacts(&timelines, "Test", &out).unwrap();
        assert_eq!(
            written,
            vec![
                out.join("timeline_activity.png"),
                out.join("timeline_activity.svg")
            ]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_render_artifacts_without_data() {
        let dir = TempDir::new().unwrap();
        let mut timelines = Timelines::default();
        timelines.insert(SessionTimeline::new("Codex #1", Category::Codex, vec![]));

        let err = render_artifacts(&timelines, "Test", dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::NoData));
        assert!(!dir.path().join("timeline_activity.png").exists());
    }
}
