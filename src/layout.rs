//! Fixed layout of the journal workbook and of the exported workbook.

/// Worksheet that holds the journal rows.
pub const JOURNAL_SHEET: &str = "日記帳";

/// Content type of an OOXML spreadsheet (.xlsx).
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Default file name of the exported workbook.
pub const EXPORT_FILE_NAME: &str = "processed_accounts.xlsx";

/// Number format applied to typed dates in the exported date column.
pub const DATE_FORMAT: &str = "m/d";

/// Maximum length of a worksheet name.
pub const SHEET_NAME_MAX_CHARS: usize = 31;

/// Declared content type for a file name, judged by its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let is_xlsx = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

    if is_xlsx {
        XLSX_CONTENT_TYPE
    } else {
        "application/octet-stream"
    }
}
