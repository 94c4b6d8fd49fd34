//! Export composer - one account group → one export sheet

use crate::types::{AccountGroup, CellValue, ExportRow, ExportSheet, JournalColumn, JournalRow};

/// Build the sheet for one account: info row, label row, then data rows
pub fn compose_sheet(group: &AccountGroup) -> ExportSheet {
    let mut rows = Vec::with_capacity(group.rows.len() + ExportSheet::DATA_START);
    rows.push(info_row(&group.code, group.account_name()));
    rows.push(label_row());
    rows.extend(group.rows.iter().map(project_row));

    ExportSheet {
        code: group.code.clone(),
        rows,
    }
}

/// Account code under the date column, account name under expense-name
pub fn info_row(code: &str, account_name: CellValue) -> ExportRow {
    let mut row: ExportRow = Default::default();
    row[0] = CellValue::text(code);
    row[1] = blank_if_empty(account_name);
    row
}

pub fn label_row() -> ExportRow {
    JournalColumn::EXPORT.map(|column| CellValue::text(column.label()))
}

/// Reorder a journal row onto the export columns; other fields are dropped
pub fn project_row(row: &JournalRow) -> ExportRow {
    JournalColumn::EXPORT.map(|column| blank_if_empty(row.get(column).clone()))
}

fn blank_if_empty(value: CellValue) -> CellValue {
    if value.is_empty() {
        CellValue::Empty
    } else {
        value
    }
}
