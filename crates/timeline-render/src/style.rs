//! Colours, fonts and stroke constants shared by every backend.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, TextStyle};
use timeline_core::types::Category;

/// Indigo.
pub const CLAUDE_COLOR: RGBColor = RGBColor(0x63, 0x66, 0xf1);
/// Orange.
pub const CODEX_COLOR: RGBColor = RGBColor(0xf9, 0x73, 0x16);
pub const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
pub const DIVIDER_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);
pub const TEXT_COLOR: RGBColor = RGBColor(0x22, 0x22, 0x22);
pub const BACKGROUND: RGBColor = RGBColor(0xff, 0xff, 0xff);

pub const EVENT_ALPHA: f64 = 0.6;
pub const BAND_ALPHA: f64 = 0.4;
pub const MAJOR_GRID_ALPHA: f64 = 0.3;
pub const MINOR_GRID_ALPHA: f64 = 0.15;
pub const DIVIDER_ALPHA: f64 = 0.4;
pub const LEGEND_ALPHA: f64 = 0.6;

/// Pixel height the font sizes below are tuned for.
pub const REFERENCE_HEIGHT: f64 = 800.0;

pub const TITLE_SIZE: f64 = 20.0;
pub const SUBTITLE_SIZE: f64 = 15.0;
pub const GROUP_LABEL_SIZE: f64 = 14.0;
pub const LEGEND_SIZE: f64 = 13.0;
pub const LABEL_SIZE: f64 = 12.0;

pub fn category_color(category: Category) -> RGBColor {
    match category {
        Category::Claude => CLAUDE_COLOR,
        Category::Codex => CODEX_COLOR,
    }
}

pub fn font(size: f64, bold: bool) -> FontDesc<'static> {
    let weight = if bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    FontDesc::new(FontFamily::SansSerif, size, weight)
}

/// Sans-serif text at `size` pixels, anchored at (`h`, `v`).
pub fn text_style(size: f64, bold: bool, color: RGBColor, h: HPos, v: VPos) -> TextStyle<'static> {
    font(size, bold).color(&color).pos(Pos::new(h, v))
}
