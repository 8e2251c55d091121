//! Chart View Module
//! Pure description of what to draw, derived from a snapshot.

use crate::config::{ChartConfig, ChartKind, Rgb};
use crate::data::series_names;
use crate::editor::ChartSnapshot;
use plotters::style::{Color, RGBAColor, RGBColor};

/// Largest magnitude on a value axis. Keeps `hi - lo` finite for the
/// axis math downstream.
const VALUE_LIMIT: f64 = f64::MAX / 4.0;

/// Series palette, used once more than one series is present.
pub const PALETTE: [Rgb; 10] = [
    Rgb([52, 152, 219]), // Blue
    Rgb([46, 204, 113]), // Green
    Rgb([231, 76, 60]),  // Red
    Rgb([155, 89, 182]), // Purple
    Rgb([243, 156, 18]), // Orange
    Rgb([26, 188, 156]), // Teal
    Rgb([233, 30, 99]),  // Pink
    Rgb([0, 188, 212]),  // Cyan
    Rgb([121, 85, 72]),  // Brown
    Rgb([96, 125, 139]), // Blue Grey
];

/// How marks are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMode {
    /// Color by series identity from `PALETTE`.
    PerSeries,
    /// Every mark uses the configured primary color.
    Uniform(Rgb),
}

/// One point, resolved to category and series indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mark {
    pub category: usize,
    pub series: usize,
    pub value: f64,
}

/// A bar piece after stacking, spanning `start..end` on the value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSegment {
    pub category: usize,
    pub series: usize,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone)]
pub struct ChartView {
    pub config: ChartConfig,
    pub categories: Vec<String>,
    pub series: Vec<Option<String>>,
    pub marks: Vec<Mark>,
    pub style: StyleMode,
}

impl ChartView {
    pub fn from_snapshot(snapshot: &ChartSnapshot) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let series = series_names(&snapshot.points);
        let mut marks = Vec::with_capacity(snapshot.points.len());

        for point in snapshot.points.iter() {
            let category = match categories.iter().position(|c| *c == point.label) {
                Some(i) => i,
                None => {
                    categories.push(point.label.clone());
                    categories.len() - 1
                }
            };
            let series_idx = series
                .iter()
                .position(|s| *s == point.series)
                .unwrap_or_default();
            marks.push(Mark {
                category,
                series: series_idx,
                value: point.value,
            });
        }

        let style = if series.len() > 1 {
            StyleMode::PerSeries
        } else {
            StyleMode::Uniform(snapshot.config.primary_color)
        };

        Self {
            config: snapshot.config.clone(),
            categories,
            series,
            marks,
            style,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.canvas.width, self.config.canvas.height)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn series_label(&self, series: usize) -> &str {
        self.series
            .get(series)
            .and_then(|s| s.as_deref())
            .unwrap_or("")
    }

    /// Base color of a series, before opacity.
    pub fn series_rgb(&self, series: usize) -> Rgb {
        match self.style {
            StyleMode::PerSeries => PALETTE[series % PALETTE.len()],
            StyleMode::Uniform(color) => color,
        }
    }

    /// Mark color with the configured opacity applied.
    pub fn mark_color(&self, series: usize) -> RGBAColor {
        let rgb = self.series_rgb(series);
        RGBColor(rgb.r(), rgb.g(), rgb.b()).mix(self.config.opacity)
    }

    /// (name, color) pairs for the legend; empty unless coloring by series.
    pub fn legend_entries(&self) -> Vec<(String, RGBAColor)> {
        match self.style {
            StyleMode::PerSeries => (0..self.series.len())
                .map(|i| (self.series_label(i).to_string(), self.mark_color(i)))
                .collect(),
            StyleMode::Uniform(_) => Vec::new(),
        }
    }

    /// Stack marks sharing a category. Positive values grow up from zero,
    /// negative values grow down.
    pub fn bar_segments(&self) -> Vec<BarSegment> {
        let mut positive = vec![0.0; self.categories.len()];
        let mut negative = vec![0.0; self.categories.len()];

        self.marks
            .iter()
            .map(|mark| {
                let top = if mark.value >= 0.0 {
                    &mut positive[mark.category]
                } else {
                    &mut negative[mark.category]
                };
                let start = *top;
                *top = (*top + mark.value).clamp(-f64::MAX, f64::MAX);
                BarSegment {
                    category: mark.category,
                    series: mark.series,
                    start,
                    end: *top,
                }
            })
            .collect()
    }

    /// Value-axis extent for the current chart kind, always containing zero.
    pub fn value_range(&self) -> (f64, f64) {
        let (mut lo, mut hi) = (0.0f64, 0.0f64);
        match self.config.kind {
            ChartKind::Bar => {
                for seg in self.bar_segments() {
                    lo = lo.min(seg.start.min(seg.end));
                    hi = hi.max(seg.start.max(seg.end));
                }
            }
            ChartKind::Line | ChartKind::Pie => {
                for mark in &self.marks {
                    lo = lo.min(mark.value);
                    hi = hi.max(mark.value);
                }
            }
        }

        let (lo, hi) = (lo.max(-VALUE_LIMIT), hi.min(VALUE_LIMIT));
        if !(hi - lo).is_finite() || hi - lo < f64::EPSILON {
            return (0.0, 1.0);
        }
        // halves keep the span finite near the f64 limits
        let pad = (hi / 2.0 - lo / 2.0) * 0.1;
        let lo = if lo < 0.0 { (lo - pad).max(-VALUE_LIMIT) } else { lo };
        let hi = if hi > 0.0 { (hi + pad).min(VALUE_LIMIT) } else { hi };
        (lo, hi)
    }

    /// Marks of one series in point order, for line charts.
    pub fn series_marks(&self, series: usize) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(move |m| m.series == series)
    }
}

/// Category label at an axis position, empty off the integer grid.
pub fn category_at(categories: &[String], value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    categories
        .get(nearest as usize)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_csv, DataMode};

    fn view(text: &str, mode: DataMode) -> ChartView {
        ChartView::from_snapshot(&ChartSnapshot::new(
            ChartConfig::default(),
            parse_csv(text, mode),
        ))
    }

    #[test]
    fn test_categories_and_series_first_seen() {
        let v = view("L,S1,S2\nB,1,2\nA,3,4\nB,5,6", DataMode::Multi);
        assert_eq!(v.categories, vec!["B", "A"]);
        assert_eq!(v.series_label(0), "S1");
        assert_eq!(v.series_label(1), "S2");
        assert_eq!(v.marks.len(), 6);
        assert_eq!(v.marks[4].category, 0);
    }

    #[test]
    fn test_single_series_is_uniform() {
        let v = view("L,V\nA,1\nB,2", DataMode::Single);
        assert_eq!(v.style, StyleMode::Uniform(Rgb::ACCENT));
        assert!(v.legend_entries().is_empty());
        assert_eq!(v.series_rgb(0), Rgb::ACCENT);
    }

    #[test]
    fn test_multi_series_uses_palette() {
        let v = view("L,S1,S2\nA,1,2", DataMode::Multi);
        assert_eq!(v.style, StyleMode::PerSeries);
        assert_eq!(v.series_rgb(1), PALETTE[1]);
        let legend = v.legend_entries();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].0, "S1");
    }

    #[test]
    fn test_opacity_applies_in_both_modes() {
        let mut config = ChartConfig::default();
        config.set_opacity(0.5);
        for text in ["L,S1\nA,1", "L,S1,S2\nA,1,2"] {
            let v = ChartView::from_snapshot(&ChartSnapshot::new(
                config.clone(),
                parse_csv(text, DataMode::Multi),
            ));
            assert_eq!(v.mark_color(0).3, 0.5);
        }
    }

    #[test]
    fn test_bars_stack_per_category() {
        let v = view("L,S1,S2\nA,1,2\nB,3,-1", DataMode::Multi);
        let segs = v.bar_segments();
        assert_eq!(
            segs.iter().map(|s| (s.start, s.end)).collect::<Vec<_>>(),
            vec![(0.0, 1.0), (1.0, 3.0), (0.0, 3.0), (0.0, -1.0)]
        );
    }

    #[test]
    fn test_value_range_includes_zero() {
        let v = view("L,V\nA,2\nB,4", DataMode::Single);
        let (lo, hi) = v.value_range();
        assert_eq!(lo, 0.0);
        assert!((hi - 4.2).abs() < 1e-9);

        let negative = view("L,V\nA,-2", DataMode::Single);
        let (lo, hi) = negative.value_range();
        assert!(lo < -2.0);
        assert_eq!(hi, 0.0);

        assert_eq!(view("L,V", DataMode::Single).value_range(), (0.0, 1.0));
    }

    #[test]
    fn test_huge_values_keep_range_finite() {
        let stacked = view("L,S1,S2\nA,1e308,1e308", DataMode::Multi);
        let segs = stacked.bar_segments();
        assert!(segs.iter().all(|s| s.start.is_finite() && s.end.is_finite()));
        let (lo, hi) = stacked.value_range();
        assert!(lo.is_finite() && hi.is_finite() && hi > lo);
        assert!((hi - lo).is_finite());

        let mut config = ChartConfig::default();
        config.apply(crate::config::ConfigUpdate::Kind(ChartKind::Line));
        let spread = ChartView::from_snapshot(&ChartSnapshot::new(
            config,
            parse_csv("L,V\nA,1.7e308\nB,-1.7e308", DataMode::Single),
        ));
        let (lo, hi) = spread.value_range();
        assert!(lo < 0.0 && hi > 0.0);
        assert!((hi - lo).is_finite());
    }

    #[test]
    fn test_category_at_grid() {
        let cats = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_at(&cats, 1.0), "B");
        assert_eq!(category_at(&cats, 0.5), "");
        assert_eq!(category_at(&cats, -1.0), "");
        assert_eq!(category_at(&cats, 2.0), "");
    }
}
