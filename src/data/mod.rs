//! Data module - chart points, CSV parsing and file loading

mod loader;
mod parser;
mod point;

pub use loader::{read_text, ImportError};
pub use parser::{distinct_series_count, parse_csv, series_names, DataMode};
pub use point::{ChartPoint, PointId};
