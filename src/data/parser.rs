//! CSV Parser Module
//! Splits comma-delimited text into chart points (single or multi series).
//!
//! The format is deliberately minimal: rows end at `\n`, fields end at `,`,
//! and there is no quoting. A comma inside a label shifts every column after
//! it. Empty rows and empty fields are dropped before any indexing happens.

use crate::data::ChartPoint;
use serde::{Deserialize, Serialize};

/// Parsing policy for the text source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataMode {
    /// `label,value` rows; the header is discarded
    Single,
    /// `label,s1,s2,...` rows; header fields after the first name the series
    #[default]
    Multi,
}

impl DataMode {
    pub fn label(self) -> &'static str {
        match self {
            DataMode::Single => "Single series",
            DataMode::Multi => "Multi series",
        }
    }
}

/// Parse delimited text into points. Never fails; bad rows and fields are skipped.
pub fn parse_csv(text: &str, mode: DataMode) -> Vec<ChartPoint> {
    let mut rows = split_rows(text);
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    match mode {
        DataMode::Single => rows.filter_map(parse_single_row).collect(),
        DataMode::Multi => {
            let series: Vec<&str> = split_fields(header).skip(1).collect();
            let mut points = Vec::new();
            for row in rows {
                let fields: Vec<&str> = split_fields(row).collect();
                if fields.len() < 2 {
                    continue;
                }
                let label = fields[0];
                for (index, name) in series.iter().enumerate() {
                    if let Some(value) = fields.get(index + 1).and_then(|f| parse_value(f)) {
                        points.push(ChartPoint::in_series(*name, label, value));
                    }
                }
            }
            points
        }
    }
}

fn parse_single_row(row: &str) -> Option<ChartPoint> {
    let mut fields = split_fields(row);
    let label = fields.next()?;
    let value = parse_value(fields.next()?)?;
    Some(ChartPoint::single(label, value))
}

fn split_rows(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .filter(|row| !row.is_empty())
}

fn split_fields(row: &str) -> impl Iterator<Item = &str> {
    row.split(',').filter(|field| !field.is_empty())
}

fn parse_value(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Distinct series tags in first-seen order.
pub fn series_names(points: &[ChartPoint]) -> Vec<Option<String>> {
    let mut names: Vec<Option<String>> = Vec::new();
    for point in points {
        if !names.contains(&point.series) {
            names.push(point.series.clone());
        }
    }
    names
}

pub fn distinct_series_count(points: &[ChartPoint]) -> usize {
    series_names(points).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(points: &[ChartPoint]) -> Vec<(Option<&str>, &str, f64)> {
        points
            .iter()
            .map(|p| (p.series.as_deref(), p.label.as_str(), p.value))
            .collect()
    }

    #[test]
    fn test_single_rows_in_order() {
        let points = parse_csv("Label,Value\nA,1\nB,2.5\nC,-3", DataMode::Single);
        assert_eq!(
            summary(&points),
            vec![(None, "A", 1.0), (None, "B", 2.5), (None, "C", -3.0)]
        );
    }

    #[test]
    fn test_header_is_never_data() {
        let points = parse_csv("1,2\n3,4", DataMode::Single);
        assert_eq!(summary(&points), vec![(None, "3", 4.0)]);
    }

    #[test]
    fn test_empty_and_header_only() {
        for mode in [DataMode::Single, DataMode::Multi] {
            assert!(parse_csv("", mode).is_empty());
            assert!(parse_csv("Label,Value", mode).is_empty());
            assert!(parse_csv("\n\nLabel,S1\n\n", mode).is_empty());
        }
    }

    #[test]
    fn test_single_skips_bad_rows() {
        let text = "Label,Value\nA\nB,x\nC,3,extra,9\nD, 4";
        let points = parse_csv(text, DataMode::Single);
        assert_eq!(summary(&points), vec![(None, "C", 3.0)]);
    }

    #[test]
    fn test_one_field_row_skipped_in_multi_mode() {
        let points = parse_csv("Label,S1\nA\nB,2", DataMode::Multi);
        assert_eq!(summary(&points), vec![(Some("S1"), "B", 2.0)]);
    }

    #[test]
    fn test_multi_skips_unparseable_field_only() {
        let points = parse_csv("Label,S1,S2\nA,1,x", DataMode::Multi);
        assert_eq!(summary(&points), vec![(Some("S1"), "A", 1.0)]);
    }

    #[test]
    fn test_multi_emits_row_major() {
        let points = parse_csv("Label,S1,S2\nA,1,2\nB,3,4", DataMode::Multi);
        assert_eq!(
            summary(&points),
            vec![
                (Some("S1"), "A", 1.0),
                (Some("S2"), "A", 2.0),
                (Some("S1"), "B", 3.0),
                (Some("S2"), "B", 4.0),
            ]
        );
    }

    #[test]
    fn test_multi_short_row_and_extra_fields() {
        let points = parse_csv("Label,S1,S2\nA,1\nB,1,2,3", DataMode::Multi);
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].series.as_deref(), Some("S1"));
        assert_eq!(points[2].value, 2.0);
    }

    #[test]
    fn test_crlf_and_empty_fields() {
        // "A,,5" collapses to two fields, so 5 lands in the first series
        let points = parse_csv("Label,S1,S2\r\nA,,5\r\n", DataMode::Multi);
        assert_eq!(summary(&points), vec![(Some("S1"), "A", 5.0)]);
    }

    #[test]
    fn test_non_finite_values_dropped() {
        let points = parse_csv("L,V\nA,NaN\nB,inf\nC,1e3", DataMode::Single);
        assert_eq!(summary(&points), vec![(None, "C", 1000.0)]);
    }

    #[test]
    fn test_series_names_first_seen() {
        let points = parse_csv("Label,S2,S1\nA,1,2\nB,3,4", DataMode::Multi);
        assert_eq!(
            series_names(&points),
            vec![Some("S2".to_string()), Some("S1".to_string())]
        );
        assert_eq!(distinct_series_count(&points), 2);

        let single = parse_csv("L,V\nA,1\nB,2", DataMode::Single);
        assert_eq!(series_names(&single), vec![None]);
        assert_eq!(distinct_series_count(&[]), 0);
    }
}
