//! Chart Point Module
//! The single data record handed to the chart renderer.

use uuid::Uuid;

/// Process-local identity of a point. Carries no meaning beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId(Uuid);

impl PointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

/// One labeled value, optionally tagged with the series it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub id: PointId,
    /// `None` means the implicit single series.
    pub series: Option<String>,
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(series: Option<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: PointId::new(),
            series,
            label: label.into(),
            value,
        }
    }

    /// Point without a series tag.
    pub fn single(label: impl Into<String>, value: f64) -> Self {
        Self::new(None, label, value)
    }

    /// Point belonging to a named series.
    pub fn in_series(series: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self::new(Some(series.into()), label, value)
    }
}
