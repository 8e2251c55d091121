//! Chart Renderer
//! Draws a `ChartView` onto any plotters backend.
//!
//! Layout:
//! 1. Title centered at the top
//! 2. Plot: bars (stacked, optionally horizontal), lines or pie
//! 3. Legend strip at the bottom when coloring by series
//!
//! Bars and markers are drawn in pixel space on the root area so bar width
//! and corner radius stay in pixels regardless of the data range.

use crate::charts::geometry::{self, to_pixel};
use crate::charts::view::{category_at, ChartView};
use crate::config::{ChartKind, Orientation};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;
type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const LEGEND_HEIGHT: u32 = 30;
const LINE_WIDTH: u32 = 2;
const MARKER_RADIUS: i32 = 3;
const MUTED: RGBColor = RGBColor(140, 140, 140);

/// Render into a packed RGB8 buffer of the view's canvas size.
pub fn render_rgb(view: &ChartView) -> Result<Vec<u8>, RenderError> {
    let (width, height) = view.size();
    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        draw_chart(&root, view).map_err(|e| RenderError::Draw(e.to_string()))?;
        root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
    }
    Ok(buf)
}

/// Draw the complete chart, title and legend included.
pub fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &ChartView,
) -> DrawResult<DB> {
    root.fill(&WHITE)?;

    let titled = if view.config.title.is_empty() {
        None
    } else {
        Some(root.titled(&view.config.title, ("sans-serif", 22))?)
    };
    let area = titled.as_ref().unwrap_or(root);

    let legend = if view.config.show_legend {
        view.legend_entries()
    } else {
        Vec::new()
    };
    let plot = if legend.is_empty() {
        None
    } else {
        let (_, height) = area.dim_in_pixel();
        let (plot, strip) = area.split_vertically(height.saturating_sub(LEGEND_HEIGHT));
        draw_legend(&strip, &legend)?;
        Some(plot)
    };
    let area = plot.as_ref().unwrap_or(area);

    if view.is_empty() {
        return draw_placeholder(area);
    }

    match view.config.kind {
        ChartKind::Bar => draw_bars(root, area, view),
        ChartKind::Line => draw_lines(root, area, view),
        ChartKind::Pie => draw_pie(area, view),
    }
}

fn label_font<'a>(size: u32) -> TextStyle<'a> {
    TextStyle::from(("sans-serif", size).into_font())
}

fn draw_placeholder<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
    let (w, h) = area.dim_in_pixel();
    let style = label_font(18)
        .color(&MUTED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new("No data", (w as i32 / 2, h as i32 / 2), style))
}

fn draw_legend<DB: DrawingBackend>(
    strip: &DrawingArea<DB, Shift>,
    entries: &[(String, RGBAColor)],
) -> DrawResult<DB> {
    const SWATCH: i32 = 12;
    const GAP: i32 = 6;
    const SPACING: i32 = 18;

    let style = label_font(13).pos(Pos::new(HPos::Left, VPos::Center));
    let mut widths = Vec::with_capacity(entries.len());
    for (name, _) in entries {
        widths.push(strip.estimate_text_size(name, &style)?.0 as i32);
    }
    let total: i32 = widths.iter().map(|w| SWATCH + GAP + w).sum::<i32>()
        + SPACING * (entries.len() as i32 - 1).max(0);

    let (w, h) = strip.dim_in_pixel();
    let cy = h as i32 / 2;
    let mut x = ((w as i32 - total) / 2).max(0);
    for ((name, color), text_w) in entries.iter().zip(widths) {
        strip.draw(&Rectangle::new(
            [(x, cy - SWATCH / 2), (x + SWATCH, cy + SWATCH / 2)],
            color.filled(),
        ))?;
        strip.draw(&Text::new(name.as_str(), (x + SWATCH + GAP, cy), style.clone()))?;
        x += SWATCH + GAP + text_w + SPACING;
    }
    Ok(())
}

fn build_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    view: &ChartView,
    x: Range<f64>,
    y: Range<f64>,
) -> Result<Chart<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>> {
    ChartBuilder::on(area)
        .margin(16)
        .x_label_area_size(if view.config.show_x_axis { 44 } else { 0 })
        .y_label_area_size(if view.config.show_y_axis { 64 } else { 0 })
        .build_cartesian_2d(x, y)
}

/// Axis labels and grid. The categorical axis gets category names at
/// integer positions; horizontal charts list categories top to bottom.
fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    view: &ChartView,
    orientation: Orientation,
) -> DrawResult<DB> {
    let config = &view.config;
    let categories = &view.categories;
    let count = categories.len();
    let last = count as f64 - 1.0;

    let along = |v: &f64| category_at(categories, *v);
    let reversed = |v: &f64| category_at(categories, last - *v);

    let mut mesh = chart.configure_mesh();
    mesh.label_style(("sans-serif", 12))
        .axis_desc_style(("sans-serif", 14));

    // The category axis keeps the x label wherever it ends up
    let (horizontal_desc, vertical_desc) = match orientation {
        Orientation::Vertical => {
            mesh.disable_x_mesh()
                .x_labels(count)
                .x_label_formatter(&along);
            (&config.x_axis_label, &config.y_axis_label)
        }
        Orientation::Horizontal => {
            mesh.disable_y_mesh()
                .y_labels(count)
                .y_label_formatter(&reversed);
            (&config.y_axis_label, &config.x_axis_label)
        }
    };

    if config.show_x_axis {
        mesh.x_desc(horizontal_desc.as_str());
    } else {
        mesh.disable_x_axis().x_labels(0);
    }
    if config.show_y_axis {
        mesh.y_desc(vertical_desc.as_str());
    } else {
        mesh.disable_y_axis().y_labels(0);
    }
    mesh.draw()
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    view: &ChartView,
) -> DrawResult<DB> {
    let slots = -0.5..view.categories.len() as f64 - 0.5;
    let (lo, hi) = view.value_range();
    let orientation = view.config.orientation;
    let half = view.config.bar_width / 2.0;

    let mut chart = match orientation {
        Orientation::Vertical => build_chart(area, view, slots, lo..hi)?,
        Orientation::Horizontal => build_chart(area, view, lo..hi, slots)?,
    };
    draw_mesh(&mut chart, view, orientation)?;

    let last = view.categories.len() as f64 - 1.0;
    for seg in view.bar_segments() {
        if seg.start == seg.end {
            continue;
        }
        let (a, b) = match orientation {
            Orientation::Vertical => {
                let x = seg.category as f64;
                let (cx, y0) = chart.backend_coord(&(x, seg.start));
                let (_, y1) = chart.backend_coord(&(x, seg.end));
                let cx = cx as f64;
                (
                    to_pixel(cx - half, y0 as f64),
                    to_pixel(cx + half, y1 as f64),
                )
            }
            Orientation::Horizontal => {
                let y = last - seg.category as f64;
                let (x0, cy) = chart.backend_coord(&(seg.start, y));
                let (x1, _) = chart.backend_coord(&(seg.end, y));
                let cy = cy as f64;
                (
                    to_pixel(x0 as f64, cy - half),
                    to_pixel(x1 as f64, cy + half),
                )
            }
        };
        let outline = geometry::rounded_rect(a, b, view.config.corner_radius);
        root.draw(&Polygon::new(outline, view.mark_color(seg.series).filled()))?;
    }
    Ok(())
}

fn draw_lines<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    area: &DrawingArea<DB, Shift>,
    view: &ChartView,
) -> DrawResult<DB> {
    let slots = -0.5..view.categories.len() as f64 - 0.5;
    let (lo, hi) = view.value_range();
    let mut chart = build_chart(area, view, slots, lo..hi)?;
    draw_mesh(&mut chart, view, Orientation::Vertical)?;

    for series in 0..view.series.len() {
        let color = view.mark_color(series);
        let pixels: Vec<(f64, f64)> = view
            .series_marks(series)
            .map(|m| {
                let (x, y) = chart.backend_coord(&(m.category as f64, m.value));
                (x as f64, y as f64)
            })
            .collect();

        let runs = match view.config.dash.pattern() {
            None => vec![pixels.clone()],
            Some((on, off)) => geometry::dash_polyline(&pixels, on, off),
        };
        for run in runs.iter().filter(|run| run.len() > 1) {
            let path: Vec<(i32, i32)> = run.iter().map(|&(x, y)| to_pixel(x, y)).collect();
            root.draw(&PathElement::new(path, color.stroke_width(LINE_WIDTH)))?;
        }
        for &(x, y) in &pixels {
            root.draw(&Circle::new(to_pixel(x, y), MARKER_RADIUS, color.filled()))?;
        }
    }
    Ok(())
}

fn draw_pie<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, view: &ChartView) -> DrawResult<DB> {
    let (w, h) = area.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = (w.min(h) as f64 * 0.35).max(1.0);
    let label_style = label_font(13).pos(Pos::new(HPos::Center, VPos::Center));

    let weights: Vec<f64> = view.marks.iter().map(|m| m.value).collect();
    for (mark, angles) in view.marks.iter().zip(geometry::pie_angles(&weights)) {
        let Some((start, end)) = angles else {
            continue;
        };

        let mut outline = geometry::pie_slice(center, radius, start, end);
        area.draw(&Polygon::new(
            outline.clone(),
            view.mark_color(mark.series).filled(),
        ))?;
        if let Some(&first) = outline.first() {
            outline.push(first);
        }
        area.draw(&PathElement::new(outline, WHITE.stroke_width(2)))?;

        let mid = (start + end) / 2.0;
        let at = to_pixel(
            center.0 + radius * 1.18 * mid.cos(),
            center.1 + radius * 1.18 * mid.sin(),
        );
        let category = &view.categories[mark.category];
        let text = if view.series.len() > 1 {
            format!("{} ({})", category, view.series_label(mark.series))
        } else {
            category.clone()
        };
        area.draw(&Text::new(text, at, label_style.clone()))?;
    }
    Ok(())
}
