//! Config module - presentation settings for the chart

pub mod storage;

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const CORNER_RADIUS_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const BAR_WIDTH_RANGE: RangeInclusive<f64> = 2.0..=30.0;
pub const OPACITY_RANGE: RangeInclusive<f64> = 0.2..=1.0;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// System accent blue.
    pub const ACCENT: Rgb = Rgb([0, 122, 255]);

    pub fn r(self) -> u8 {
        self.0[0]
    }

    pub fn g(self) -> u8 {
        self.0[1]
    }

    pub fn b(self) -> u8 {
        self.0[2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DashStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DashStyle {
    pub const ALL: [DashStyle; 3] = [DashStyle::Solid, DashStyle::Dashed, DashStyle::Dotted];

    pub fn label(self) -> &'static str {
        match self {
            DashStyle::Solid => "Solid",
            DashStyle::Dashed => "Dashed",
            DashStyle::Dotted => "Dotted",
        }
    }

    /// (on, off) lengths in pixels, `None` for a continuous stroke.
    pub fn pattern(self) -> Option<(f64, f64)> {
        match self {
            DashStyle::Solid => None,
            DashStyle::Dashed => Some((8.0, 5.0)),
            DashStyle::Dotted => Some((2.0, 4.0)),
        }
    }
}

/// Pixel size of the chart surface, shared by preview and every export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Everything about how the chart looks. Independent of the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub primary_color: Rgb,
    pub corner_radius: f64,
    pub bar_width: f64,
    pub opacity: f64,
    pub show_legend: bool,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub orientation: Orientation,
    pub dash: DashStyle,
    pub kind: ChartKind,
    pub canvas: CanvasSize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Sample Chart".to_string(),
            x_axis_label: "X".to_string(),
            y_axis_label: "Y".to_string(),
            primary_color: Rgb::ACCENT,
            corner_radius: 0.0,
            bar_width: 10.0,
            opacity: 1.0,
            show_legend: true,
            show_x_axis: true,
            show_y_axis: true,
            orientation: Orientation::Vertical,
            dash: DashStyle::Solid,
            kind: ChartKind::Bar,
            canvas: CanvasSize::default(),
        }
    }
}

/// A single field assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdate {
    Title(String),
    XAxisLabel(String),
    YAxisLabel(String),
    PrimaryColor(Rgb),
    CornerRadius(f64),
    BarWidth(f64),
    Opacity(f64),
    ShowLegend(bool),
    ShowXAxis(bool),
    ShowYAxis(bool),
    Orientation(Orientation),
    Dash(DashStyle),
    Kind(ChartKind),
}

fn clamp_into(value: f64, range: &RangeInclusive<f64>) -> Option<f64> {
    value
        .is_finite()
        .then(|| value.clamp(*range.start(), *range.end()))
}

impl ChartConfig {
    /// Set one field. Numeric fields are clamped into their range.
    pub fn apply(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::Title(v) => self.title = v,
            ConfigUpdate::XAxisLabel(v) => self.x_axis_label = v,
            ConfigUpdate::YAxisLabel(v) => self.y_axis_label = v,
            ConfigUpdate::PrimaryColor(v) => self.primary_color = v,
            ConfigUpdate::CornerRadius(v) => {
                self.set_corner_radius(v);
            }
            ConfigUpdate::BarWidth(v) => {
                self.set_bar_width(v);
            }
            ConfigUpdate::Opacity(v) => {
                self.set_opacity(v);
            }
            ConfigUpdate::ShowLegend(v) => self.show_legend = v,
            ConfigUpdate::ShowXAxis(v) => self.show_x_axis = v,
            ConfigUpdate::ShowYAxis(v) => self.show_y_axis = v,
            ConfigUpdate::Orientation(v) => self.orientation = v,
            ConfigUpdate::Dash(v) => self.dash = v,
            ConfigUpdate::Kind(v) => self.kind = v,
        }
    }

    /// Returns the stored value. Non-finite input keeps the previous one.
    pub fn set_corner_radius(&mut self, value: f64) -> f64 {
        if let Some(v) = clamp_into(value, &CORNER_RADIUS_RANGE) {
            self.corner_radius = v;
        }
        self.corner_radius
    }

    pub fn set_bar_width(&mut self, value: f64) -> f64 {
        if let Some(v) = clamp_into(value, &BAR_WIDTH_RANGE) {
            self.bar_width = v;
        }
        self.bar_width
    }

    pub fn set_opacity(&mut self, value: f64) -> f64 {
        if let Some(v) = clamp_into(value, &OPACITY_RANGE) {
            self.opacity = v;
        }
        self.opacity
    }

    /// Force every bounded field back into range, e.g. after loading from disk.
    pub fn normalized(mut self) -> Self {
        let defaults = ChartConfig::default();
        self.corner_radius = clamp_into(self.corner_radius, &CORNER_RADIUS_RANGE)
            .unwrap_or(defaults.corner_radius);
        self.bar_width =
            clamp_into(self.bar_width, &BAR_WIDTH_RANGE).unwrap_or(defaults.bar_width);
        self.opacity = clamp_into(self.opacity, &OPACITY_RANGE).unwrap_or(defaults.opacity);
        self.canvas.width = self.canvas.width.clamp(64, 4096);
        self.canvas.height = self.canvas.height.clamp(64, 4096);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_setters_clamp() {
        let mut config = ChartConfig::default();
        assert_eq!(config.set_corner_radius(15.0), 10.0);
        assert_eq!(config.set_bar_width(1.0), 2.0);
        assert_eq!(config.set_opacity(0.0), 0.2);
        assert_eq!(config.set_corner_radius(5.0), 5.0);
        assert_eq!(config.set_bar_width(15.0), 15.0);
    }

    #[test]
    fn test_non_finite_keeps_previous() {
        let mut config = ChartConfig::default();
        config.set_opacity(0.5);
        assert_eq!(config.set_opacity(f64::NAN), 0.5);
        assert_eq!(config.set_bar_width(f64::INFINITY), 10.0);
    }

    #[test]
    fn test_fields_are_independent() {
        let mut config = ChartConfig::default();
        config.apply(ConfigUpdate::BarWidth(30.0));
        config.apply(ConfigUpdate::Opacity(0.2));
        assert_eq!(config.bar_width, 30.0);
        assert_eq!(config.opacity, 0.2);
        assert_eq!(config.corner_radius, 0.0);
    }

    #[test]
    fn test_apply_toggles_and_text() {
        let mut config = ChartConfig::default();
        config.apply(ConfigUpdate::Title("Sales".into()));
        config.apply(ConfigUpdate::ShowLegend(false));
        config.apply(ConfigUpdate::Orientation(Orientation::Horizontal));
        config.apply(ConfigUpdate::Kind(ChartKind::Pie));
        config.apply(ConfigUpdate::Dash(DashStyle::Dotted));
        config.apply(ConfigUpdate::PrimaryColor(Rgb([1, 2, 3])));
        assert_eq!(config.title, "Sales");
        assert!(!config.show_legend);
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.kind, ChartKind::Pie);
        assert_eq!(config.dash.pattern(), Some((2.0, 4.0)));
        assert_eq!(config.primary_color.g(), 2);
    }

    #[test]
    fn test_normalized_repairs_out_of_range() {
        let config = ChartConfig {
            corner_radius: -4.0,
            bar_width: 99.0,
            opacity: f64::NAN,
            canvas: CanvasSize {
                width: 0,
                height: 100_000,
            },
            ..ChartConfig::default()
        }
        .normalized();
        assert_eq!(config.corner_radius, 0.0);
        assert_eq!(config.bar_width, 30.0);
        assert_eq!(config.opacity, 1.0);
        assert_eq!(config.canvas.width, 64);
        assert_eq!(config.canvas.height, 4096);
    }
}
