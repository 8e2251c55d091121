//! Charts module - View description, rendering and PDF output

pub mod geometry;
mod pdf;
mod renderer;
pub mod view;

pub use pdf::PdfBackend;
pub use renderer::{draw_chart, render_rgb, RenderError};
pub use view::ChartView;
