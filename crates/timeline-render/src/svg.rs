//! SVG output.

use crate::draw::{draw_chart, draw_error};
use crate::layout::ChartLayout;
use crate::{ChartRenderer, RenderError};
use plotters::prelude::*;
use std::path::Path;

/// Renders the chart as an SVG document.
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
        }
    }
}

impl SvgRenderer {
    /// Build the SVG document as a string.
    pub fn to_svg(&self, chart: &ChartLayout) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.width, self.height))
                .into_drawing_area();
            draw_chart(&root, chart).map_err(draw_error)?;
            root.present().map_err(draw_error)?;
        }
        Ok(svg)
    }
}

impl ChartRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, chart: &ChartLayout, path: &Path) -> Result<(), RenderError> {
        std::fs::write(path, self.to_svg(chart)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;
    use timeline_analytics::aggregations::Timelines;
    use timeline_core::types::{Category, SessionTimeline};

    fn chart() -> ChartLayout {
        let at = |h, m| Utc.with_ymd_and_hms(2026, 1, 16, h, m, 0).unwrap();
        let mut timelines = Timelines::default();
        timelines.insert(SessionTimeline::new(
            "Claude Code <#1>",
            Category::Claude,
            vec![at(10, 0), at(10, 20), at(11, 0)],
        ));
        timelines.insert(SessionTimeline::new(
            "Codex #3",
            Category::Codex,
            vec![at(9, 0), at(12, 0)],
        ));
        timelines.insert(SessionTimeline::new("Codex #empty", Category::Codex, vec![]));
        ChartLayout::build(&timelines, "Tom & Jerry").unwrap()
    }

    #[test]
    fn test_svg_content() {
        let svg = SvgRenderer::default().to_svg(&chart()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Tom &amp; Jerry"));
        assert!(svg.contains("Claude Code &lt;#1&gt;"));
        assert!(svg.contains("Codex #3"));
        assert!(svg.contains("Time (UTC) — Jan 16, 2026"));
        assert!(svg.contains("10:00"));

        let lower = svg.to_lowercase();
        assert!(lower.contains("#6366f1"));
        assert!(lower.contains("#f97316"));
        // Sessions without events get no label.
        assert!(!svg.contains("Codex #empty"));
    }

    #[test]
    fn test_svg_legend_and_group_labels() {
        let svg = SvgRenderer::default().to_svg(&chart()).unwrap();
        // Group heading, legend entry, and the session label.
        assert!(svg.matches("Claude Code").count() >= 3);
        assert!(svg.matches("Codex").count() >= 3);
    }

    #[test]
    fn test_svg_event_ticks() {
        let chart = chart();
        let svg = SvgRenderer::default().to_svg(&chart).unwrap();
        let grid = chart.major_ticks.len() + chart.minor_ticks.len();
        // 5 events + grid lines + divider.
        assert!(svg.matches("<polyline").count() >= 5 + grid + 1);
    }

    #[test]
    fn test_svg_written_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        SvgRenderer::default().render(&chart(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("</svg>"));
    }
}
