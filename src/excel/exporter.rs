//! Workbook assembler - export sheets → .xlsx bytes

use crate::error::{SplitError, SplitResult};
use crate::layout::{DATE_FORMAT, SHEET_NAME_MAX_CHARS};
use crate::types::{CellValue, ExportSheet};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::HashSet;

/// Characters Excel does not allow in a worksheet name
const FORBIDDEN_SHEET_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Sheet names Excel reserves for itself (compared case-insensitively)
const RESERVED_SHEET_NAMES: [&str; 1] = ["history"];

/// An assembled workbook and the sheet name given to each account
#[derive(Debug, Clone)]
pub struct AssembledWorkbook {
    pub bytes: Vec<u8>,
    /// (account code, sheet name), in sheet order
    pub sheet_names: Vec<(String, String)>,
}

/// Writes one worksheet per export sheet into a single workbook
pub struct ExcelExporter<'a> {
    sheets: &'a [ExportSheet],
}

impl<'a> ExcelExporter<'a> {
    pub fn new(sheets: &'a [ExportSheet]) -> Self {
        Self { sheets }
    }

    /// Build the workbook in memory
    pub fn export(&self) -> SplitResult<AssembledWorkbook> {
        if self.sheets.is_empty() {
            return Err(SplitError::EmptySelection);
        }

        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format(DATE_FORMAT);
        let mut namer = SheetNamer::new();
        let mut sheet_names = Vec::with_capacity(self.sheets.len());

        for sheet in self.sheets {
            let name = namer.name_for(&sheet.code);
            if name != sheet.code {
                tracing::warn!(code = %sheet.code, sheet = %name, "account code renamed to a valid sheet name");
            }

            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&name)
                .map_err(|e| SplitError::Export(format!("Failed to set worksheet name: {}", e)))?;
            Self::write_sheet(worksheet, sheet, &date_format)?;

            tracing::debug!(sheet = %name, rows = sheet.rows.len(), "worksheet written");
            sheet_names.push((sheet.code.clone(), name));
        }

        let bytes = workbook
            .save_to_buffer()
            .map_err(|e| SplitError::Export(format!("Failed to save Excel file: {}", e)))?;

        Ok(AssembledWorkbook { bytes, sheet_names })
    }

    fn write_sheet(
        worksheet: &mut Worksheet,
        sheet: &ExportSheet,
        date_format: &Format,
    ) -> SplitResult<()> {
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let is_data_row = row_idx >= ExportSheet::DATA_START;

            for (col_idx, value) in row.iter().enumerate() {
                let date_column = col_idx == 0;
                Self::write_cell(
                    worksheet,
                    row_idx as u32,
                    col_idx as u16,
                    value,
                    (is_data_row && date_column).then_some(date_format),
                )?;
            }
        }
        Ok(())
    }

    /// Write one cell; `date_format` is set only where typed dates keep their type
    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
        date_format: Option<&Format>,
    ) -> SplitResult<()> {
        match (value, date_format) {
            (CellValue::Empty, _) => Ok(()),
            (CellValue::Date(dt), Some(format)) => worksheet
                .write_datetime_with_format(row, col, dt, format)
                .map(|_| ())
                .map_err(|e| SplitError::Export(format!("Failed to write date: {}", e))),
            (CellValue::Number(n), _) => worksheet
                .write_number(row, col, *n)
                .map(|_| ())
                .map_err(|e| SplitError::Export(format!("Failed to write number: {}", e))),
            (CellValue::Bool(b), _) => worksheet
                .write_boolean(row, col, *b)
                .map(|_| ())
                .map_err(|e| SplitError::Export(format!("Failed to write boolean: {}", e))),
            (other, _) => worksheet
                .write_string(row, col, &other.to_text())
                .map(|_| ())
                .map_err(|e| SplitError::Export(format!("Failed to write text: {}", e))),
        }
    }
}

/// Turns account codes into unique, valid worksheet names
#[derive(Debug)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl Default for SheetNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetNamer {
    pub fn new() -> Self {
        Self {
            used: RESERVED_SHEET_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Sanitize `code` and make it unique among the names handed out so far.
    ///
    /// Forbidden characters become `_`, leading/trailing apostrophes are
    /// dropped, names are cut to 31 characters, and a case-insensitive clash
    /// gets a ` (n)` suffix.
    pub fn name_for(&mut self, code: &str) -> String {
        let base = sanitize_sheet_name(code);

        let mut candidate = base.clone();
        let mut n = 2;
        while self.used.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({})", n);
            let keep = SHEET_NAME_MAX_CHARS - suffix.chars().count();
            candidate = format!("{}{}", truncate_chars(&base, keep), suffix);
            n += 1;
        }

        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

/// Make a single name valid on its own, without looking at other sheets
pub fn sanitize_sheet_name(code: &str) -> String {
    let replaced: String = code
        .chars()
        .map(|c| if FORBIDDEN_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim_matches('\'');
    let name = truncate_chars(trimmed, SHEET_NAME_MAX_CHARS);

    if name.is_empty() {
        "Sheet".to_string()
    } else {
        name
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
