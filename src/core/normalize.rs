//! Row normalization shared by the preview and the grouping paths

use crate::excel::{CellGrid, HeaderMap};
use crate::types::{CellValue, JournalColumn, JournalRow};

/// Normalized content of the journal sheet
#[derive(Debug, Clone, Default)]
pub struct Journal {
    pub headers: HeaderMap,
    pub rows: Vec<JournalRow>,
}

impl Journal {
    /// Normalize the headers of `grid` in place, then every non-blank data row
    pub fn from_grid(grid: &mut CellGrid) -> Self {
        let headers = grid.normalize_headers();
        let rows: Vec<JournalRow> = grid
            .data_rows()
            .filter(|cells| !cells.iter().all(CellValue::is_empty))
            .map(|cells| normalize_row(&cells, &headers))
            .collect();

        tracing::info!(
            columns = headers.len(),
            rows = rows.len(),
            "journal sheet normalized"
        );

        Self { headers, rows }
    }
}

/// Project one raw row onto a [`JournalRow`].
///
/// Labels are matched after trimming, so a padded legacy label such as
/// `" 支出 "` lands in the same field as `"支出"`. Missing cells stay empty.
pub fn normalize_row(cells: &[CellValue], headers: &HeaderMap) -> JournalRow {
    let mut row = JournalRow::default();

    for (col, key) in headers.keys() {
        let value = cells.get(*col).cloned().unwrap_or_default();
        match JournalColumn::from_label(key) {
            Some(column) => *row.get_mut(column) = normalize_value(column, value),
            None => row.extra.push((key.clone(), value)),
        }
    }

    row
}

/// Trim text in the monetary columns; anything else passes through
pub fn normalize_value(column: JournalColumn, value: CellValue) -> CellValue {
    match value {
        CellValue::Text(s) if column.is_monetary() => CellValue::Text(s.trim().to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_normalize_row_maps_known_labels() {
        let headers = HeaderMap::from_labels([(0, "科代"), (1, "日期"), (2, "支出")]);
        let row = normalize_row(&[t("101"), t("1/2"), t("100 ")], &headers);

        assert_eq!(row.account_code, t("101"));
        assert_eq!(row.date, t("1/2"));
        assert_eq!(row.expense, t("100"));
        assert_eq!(row.income, CellValue::Empty);
        assert!(row.extra.is_empty());
    }

    #[test]
    fn test_padded_monetary_label_is_an_alias() {
        let headers = HeaderMap::from_labels([(0, " 支出 "), (1, " 收入 ")]);
        let row = normalize_row(&[t("  10 "), t(" 5")], &headers);

        assert_eq!(row.expense, t("10"));
        assert_eq!(row.income, t("5"));
        assert!(row.extra.is_empty());
    }

    #[test]
    fn test_monetary_numbers_are_left_alone() {
        let headers = HeaderMap::from_labels([(0, "收入")]);
        let row = normalize_row(&[CellValue::Number(50.0)], &headers);

        assert_eq!(row.income, CellValue::Number(50.0));
    }

    #[test]
    fn test_other_text_is_not_trimmed() {
        let headers = HeaderMap::from_labels([(0, "摘要")]);
        let row = normalize_row(&[t(" lunch ")], &headers);

        assert_eq!(row.summary, t(" lunch "));
    }

    #[test]
    fn test_unknown_labels_go_to_extra() {
        let headers = HeaderMap::from_labels([(0, "備註"), (1, "摘要"), (2, "摘要")]);
        let row = normalize_row(&[t("a"), t("b"), t("c")], &headers);

        assert_eq!(row.summary, t("b"));
        assert_eq!(
            row.extra,
            vec![
                ("備註".to_string(), t("a")),
                ("摘要_1".to_string(), t("c")),
            ]
        );
    }

    #[test]
    fn test_padded_unknown_label_keys_extra_trimmed() {
        let headers = HeaderMap::from_labels([(0, " 備註 "), (1, "科代")]);
        let row = normalize_row(&[t("note"), t("101")], &headers);

        assert_eq!(row.extra, vec![("備註".to_string(), t("note"))]);
    }

    #[test]
    fn test_short_rows_default_to_empty() {
        let headers = HeaderMap::from_labels([(0, "科代"), (5, "會計科目")]);
        let row = normalize_row(&[t("101")], &headers);

        assert_eq!(row.account_code, t("101"));
        assert_eq!(row.account_name, CellValue::Empty);
    }

    #[test]
    fn test_unnamed_columns_are_dropped() {
        let headers = HeaderMap::from_labels([(0, ""), (1, "科代")]);
        let row = normalize_row(&[t("ghost"), t("101")], &headers);

        assert_eq!(row.account_code, t("101"));
        assert!(row.extra.is_empty());
    }
}
