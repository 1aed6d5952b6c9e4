//! Chart drawing shared by every plotters backend.
//!
//! Sizes are tuned for an 800 px tall canvas and scaled to the target height,
//! so the SVG and the larger PNG come out with the same proportions.

use crate::layout::{ChartLayout, EVENT_HALF_HEIGHT};
use crate::style::{self, category_color, text_style};
use crate::RenderError;
use chrono::{DateTime, Utc};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, VPos};
use timeline_core::types::Category;

pub(crate) type DrawResult<DB> =
    Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub(crate) fn draw_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Draw(err.to_string())
}

/// Draw the whole chart, title to legend, onto `root`.
pub(crate) fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartLayout,
) -> DrawResult<DB> {
    let (width, height) = root.dim_in_pixel();
    let scale = f64::from(height) / style::REFERENCE_HEIGHT;
    let px = |v: f64| (v * scale).round() as i32;
    let stroke = |v: f64| ((v * scale).round() as u32).max(1);
    let x = |t: DateTime<Utc>| chart.minutes_from_start(t);
    let x_span = chart.x_span();

    root.fill(&style::BACKGROUND)?;

    let centre = width as i32 / 2;
    root.draw(&Text::new(
        chart.title.as_str(),
        (centre, px(14.0)),
        text_style(
            style::TITLE_SIZE * scale,
            true,
            style::TEXT_COLOR,
            HPos::Center,
            VPos::Top,
        ),
    ))?;
    root.draw(&Text::new(
        chart.subtitle.as_str(),
        (centre, px(44.0)),
        text_style(
            style::SUBTITLE_SIZE * scale,
            false,
            style::TEXT_COLOR,
            HPos::Center,
            VPos::Top,
        ),
    ))?;

    let mut plot = ChartBuilder::on(root)
        .margin_top(px(80.0))
        .margin_left(px(24.0))
        .margin_right(px(24.0))
        .margin_bottom(px(8.0))
        .x_label_area_size(px(60.0))
        .build_cartesian_2d(0f64..x_span, chart.y_min..chart.y_max)?;

    // Grid.
    for (ticks, alpha) in [
        (&chart.minor_ticks, style::MINOR_GRID_ALPHA),
        (&chart.major_ticks, style::MAJOR_GRID_ALPHA),
    ] {
        let line = style::GRID_COLOR.mix(alpha).stroke_width(1);
        plot.draw_series(ticks.iter().map(|t| {
            PathElement::new(vec![(x(*t), chart.y_min), (x(*t), chart.y_max)], line)
        }))?;
    }

    plot.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, chart.divider_y), (x_span, chart.divider_y)],
        style::DIVIDER_COLOR
            .mix(style::DIVIDER_ALPHA)
            .stroke_width(stroke(1.0)),
    )))?;

    // One series per category, so each gets a legend entry.
    let event_width = stroke(0.8);
    let (swatch_w, swatch_h) = (px(24.0), px(7.0));
    for category in [Category::Claude, Category::Codex] {
        let color = category_color(category);
        let line = color.mix(style::EVENT_ALPHA).stroke_width(event_width);
        let lanes = chart.lanes.iter().filter(|lane| lane.category == category);
        plot.draw_series(lanes.flat_map(|lane| {
            lane.events.iter().map(move |t| {
                PathElement::new(
                    vec![
                        (x(*t), lane.y - EVENT_HALF_HEIGHT),
                        (x(*t), lane.y + EVENT_HALF_HEIGHT),
                    ],
                    line,
                )
            })
        }))?
        .label(category.label())
        .legend(move |(lx, ly)| {
            Rectangle::new(
                [(lx, ly - swatch_h), (lx + swatch_w, ly + swatch_h)],
                color.mix(style::LEGEND_ALPHA).filled(),
            )
        });
    }

    for lane in &chart.lanes {
        let fill = category_color(lane.category).mix(style::BAND_ALPHA).filled();
        plot.draw_series(lane.bands.iter().map(|band| {
            Rectangle::new(
                [
                    (x(band.start), lane.y - band.half_height),
                    (x(band.end), lane.y + band.half_height),
                ],
                fill,
            )
        }))?;
    }

    // Session names to the right of the data, group names to the left.
    let session_x = x(chart.session_label_x);
    plot.draw_series(chart.lanes.iter().filter(|lane| lane.has_events()).map(|lane| {
        Text::new(
            lane.name.clone(),
            (session_x, lane.y),
            text_style(
                style::LABEL_SIZE * scale,
                false,
                category_color(lane.category),
                HPos::Left,
                VPos::Center,
            ),
        )
    }))?;

    let group_x = x(chart.group_label_x);
    plot.draw_series(chart.group_labels.iter().map(|group| {
        Text::new(
            group.category.label(),
            (group_x, group.y),
            text_style(
                style::GROUP_LABEL_SIZE * scale,
                true,
                category_color(group.category),
                HPos::Right,
                VPos::Center,
            ),
        )
    }))?;

    plot.draw_series(std::iter::once(Rectangle::new(
        [(0.0, chart.y_min), (x_span, chart.y_max)],
        style::TEXT_COLOR.stroke_width(1),
    )))?;

    // Axis text sits below the plotting area, so it goes on the root.
    let tick_style = text_style(
        style::LABEL_SIZE * scale,
        false,
        style::TEXT_COLOR,
        HPos::Center,
        VPos::Top,
    );
    for tick in &chart.major_ticks {
        let (tx, ty) = plot.backend_coord(&(x(*tick), chart.y_min));
        root.draw(&Text::new(
            tick.format("%H:%M").to_string(),
            (tx, ty + px(8.0)),
            tick_style.clone(),
        ))?;
    }

    let (cx, cy) = plot.backend_coord(&(x_span / 2.0, chart.y_min));
    root.draw(&Text::new(
        chart.x_label.as_str(),
        (cx, cy + px(32.0)),
        text_style(
            style::LEGEND_SIZE * scale,
            false,
            style::TEXT_COLOR,
            HPos::Center,
            VPos::Top,
        ),
    ))?;

    plot.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(px(10.0))
        .label_font(style::font(style::LEGEND_SIZE * scale, false))
        .background_style(&style::BACKGROUND.mix(0.8))
        .border_style(&style::GRID_COLOR)
        .draw()?;

    Ok(())
}
