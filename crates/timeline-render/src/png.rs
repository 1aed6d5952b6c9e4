//! PNG output.

use crate::draw::{draw_chart, draw_error};
use crate::layout::ChartLayout;
use crate::{ChartRenderer, RenderError};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::path::Path;

/// Renders the chart as a bitmap.
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        // 16x8 inches at 150 dpi.
        Self {
            width: 2400,
            height: 1200,
        }
    }
}

impl PngRenderer {
    pub fn to_image(&self, chart: &ChartLayout) -> Result<RgbImage, RenderError> {
        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root =
                BitMapBackend::with_buffer(&mut buffer, (self.width, self.height)).into_drawing_area();
            draw_chart(&root, chart).map_err(draw_error)?;
            root.present().map_err(draw_error)?;
        }

        RgbImage::from_raw(self.width, self.height, buffer)
            .ok_or_else(|| RenderError::Draw("bitmap buffer size mismatch".into()))
    }
}

impl ChartRenderer for PngRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, chart: &ChartLayout, path: &Path) -> Result<(), RenderError> {
        self.to_image(chart)?.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
