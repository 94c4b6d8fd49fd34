//! Cell grid accessor over a parsed worksheet range

use crate::types::CellValue;
use calamine::{Data, Range};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

/// Column offset → trimmed header label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    labels: BTreeMap<usize, String>,
    /// Record keys, unique, without unnamed columns
    keys: Vec<(usize, String)>,
}

impl HeaderMap {
    /// Build a header map from (column offset, label) pairs.
    ///
    /// Labels are trimmed; a whitespace-only label leaves its column unnamed.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        let labels: BTreeMap<usize, String> = labels
            .into_iter()
            .map(|(col, label)| (col, label.into().trim().to_string()))
            .collect();
        let keys = Self::record_keys(&labels);
        Self { labels, keys }
    }

    /// Later duplicates of a label are keyed `label_1`, `label_2`, ...
    fn record_keys(labels: &BTreeMap<usize, String>) -> Vec<(usize, String)> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut keys = Vec::with_capacity(labels.len());

        for (&col, label) in labels {
            if label.is_empty() {
                continue;
            }
            let count = seen.entry(label.as_str()).or_insert(0);
            let key = if *count == 0 {
                label.clone()
            } else {
                format!("{}_{}", label, count)
            };
            *count += 1;
            keys.push((col, key));
        }

        keys
    }

    pub fn label(&self, col: usize) -> Option<&str> {
        self.labels.get(&col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().map(|(&col, label)| (col, label.as_str()))
    }

    /// Addressable columns and the record key each one maps to
    pub fn keys(&self) -> &[(usize, String)] {
        &self.keys
    }
}

/// Rectangular view over the journal worksheet; row 0 holds the headers
#[derive(Debug, Clone)]
pub struct CellGrid {
    range: Range<Data>,
}

impl CellGrid {
    pub fn new(range: Range<Data>) -> Self {
        Self { range }
    }

    /// Bounding range as ((min_row, min_col), (max_row, max_col))
    pub fn bounds(&self) -> Option<((u32, u32), (u32, u32))> {
        Some((self.range.start()?, self.range.end()?))
    }

    pub fn width(&self) -> usize {
        self.range.get_size().1
    }

    /// Number of rows after the header row
    pub fn data_row_count(&self) -> usize {
        self.range.get_size().0.saturating_sub(1)
    }

    /// Header cell at a column offset, if a cell is present there
    pub fn header_cell(&self, col: usize) -> Option<&Data> {
        self.range
            .get((0, col))
            .filter(|cell| !matches!(cell, Data::Empty))
    }

    /// Trim every present header cell and write the label back into row 0.
    ///
    /// Running this twice yields the same map. Whitespace-only headers
    /// normalize to an empty label and are left as they are in the grid.
    pub fn normalize_headers(&mut self) -> HeaderMap {
        let Some((start_row, start_col)) = self.range.start() else {
            return HeaderMap::default();
        };

        let labels: Vec<(usize, String)> = (0..self.width())
            .filter_map(|col| {
                self.header_cell(col)
                    .map(|cell| (col, cell_value(cell).to_text().trim().to_string()))
            })
            .collect();

        for (col, label) in &labels {
            if !label.is_empty() {
                self.range
                    .set_value((start_row, start_col + *col as u32), Data::String(label.clone()));
            }
        }

        HeaderMap::from_labels(labels)
    }

    /// Data rows (every row after the header), decoded cell by cell
    pub fn data_rows(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        self.range
            .rows()
            .skip(1)
            .map(|row| row.iter().map(cell_value).collect())
    }
}

/// Decode a calamine cell into a [`CellValue`]
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => CellValue::Number(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};
    use pretty_assertions::assert_eq;

    fn grid_from(rows: &[&[Data]]) -> CellGrid {
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        CellGrid::new(range)
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_normalize_headers_trims_and_writes_back() {
        let mut grid = grid_from(&[
            &[s(" 日期"), s("收入 "), s(" 支出 ")],
            &[s("1/2"), s("10"), s("")],
        ]);

        let headers = grid.normalize_headers();

        assert_eq!(headers.label(0), Some("日期"));
        assert_eq!(headers.label(1), Some("收入"));
        assert_eq!(headers.label(2), Some("支出"));
        assert_eq!(grid.header_cell(2), Some(&s("支出")));
    }

    #[test]
    fn test_normalize_headers_is_idempotent() {
        let mut grid = grid_from(&[&[s(" 科代 "), Data::Empty, s("摘要"), s("   ")]]);

        let first = grid.normalize_headers();
        let second = grid.normalize_headers();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_normalize_headers_skips_absent_cells() {
        let mut grid = grid_from(&[&[s("日期"), Data::Empty, s("摘要")]]);

        let headers = grid.normalize_headers();

        assert_eq!(headers.label(1), None);
        assert_eq!(headers.keys().len(), 2);
    }

    #[test]
    fn test_whitespace_header_becomes_unnamed() {
        let mut grid = grid_from(&[&[s("日期"), s("   ")]]);

        let headers = grid.normalize_headers();

        assert_eq!(headers.label(1), Some(""));
        assert_eq!(headers.keys(), &[(0, "日期".to_string())]);
        // left untouched in the grid
        assert_eq!(grid.header_cell(1), Some(&s("   ")));
    }

    #[test]
    fn test_numeric_header_renders_as_text() {
        let mut grid = grid_from(&[&[Data::Float(2024.0), Data::Int(7)]]);

        let headers = grid.normalize_headers();

        assert_eq!(headers.label(0), Some("2024"));
        assert_eq!(headers.label(1), Some("7"));
    }

    #[test]
    fn test_duplicate_labels_get_suffixed_keys() {
        let headers = HeaderMap::from_labels([(0, "摘要"), (1, "摘要"), (2, "摘要")]);
        let keys: Vec<&str> = headers.keys().iter().map(|(_, key)| key.as_str()).collect();

        assert_eq!(keys, vec!["摘要", "摘要_1", "摘要_2"]);
    }

    #[test]
    fn test_data_rows_skip_header() {
        let grid = grid_from(&[
            &[s("日期"), s("收入")],
            &[s("1/2"), Data::Float(50.0)],
            &[Data::Empty, Data::Int(3)],
        ]);

        let rows: Vec<Vec<CellValue>> = grid.data_rows().collect();

        assert_eq!(grid.data_row_count(), 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![CellValue::text("1/2"), CellValue::Number(50.0)]);
        assert_eq!(rows[1], vec![CellValue::Empty, CellValue::Number(3.0)]);
    }

    #[test]
    fn test_bounds_follow_range_origin() {
        let mut range = Range::new((2, 1), (4, 3));
        range.set_value((2, 1), s("日期"));
        let mut grid = CellGrid::new(range);

        assert_eq!(grid.bounds(), Some(((2, 1), (4, 3))));
        let headers = grid.normalize_headers();
        assert_eq!(headers.label(0), Some("日期"));
    }

    #[test]
    fn test_padded_labels_are_trimmed() {
        let headers = HeaderMap::from_labels([(0, " 備註 "), (1, "\t")]);

        assert_eq!(headers.label(0), Some("備註"));
        assert_eq!(headers.label(1), Some(""));
        assert_eq!(headers.keys(), &[(0, "備註".to_string())]);
    }

    #[test]
    fn test_cell_value_errors_render_as_text() {
        let value = cell_value(&Data::Error(CellErrorType::Div0));
        assert_eq!(value, CellValue::text("#DIV/0!"));
    }

    #[test]
    fn test_cell_value_durations_stay_numeric() {
        let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(cell_value(&Data::DateTime(duration)), CellValue::Number(1.5));
    }

    #[test]
    fn test_cell_value_iso_dates() {
        let value = cell_value(&Data::DateTimeIso("2024-03-05".to_string()));
        assert_eq!(value.to_text(), "3/5");

        let value = cell_value(&Data::DateTimeIso("2024-03-05T10:30:00".to_string()));
        assert_eq!(value.to_text(), "3/5");

        let value = cell_value(&Data::DateTimeIso("not a date".to_string()));
        assert_eq!(value, CellValue::text("not a date"));
    }
}
