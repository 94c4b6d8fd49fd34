//! Journal importer - workbook bytes → cell grid of the journal sheet

use crate::error::{SplitError, SplitResult};
use crate::excel::grid::CellGrid;
use crate::layout::{JOURNAL_SHEET, XLSX_CONTENT_TYPE};
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use std::io::Cursor;

/// Reads the journal sheet out of an uploaded workbook
pub struct JournalImporter<'a> {
    bytes: &'a [u8],
}

impl<'a> JournalImporter<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Reject anything not declared as an OOXML spreadsheet
    pub fn check_content_type(content_type: &str) -> SplitResult<()> {
        if content_type == XLSX_CONTENT_TYPE {
            Ok(())
        } else {
            Err(SplitError::UnsupportedFileType(content_type.to_string()))
        }
    }

    /// Open the workbook and return the journal sheet as a grid
    pub fn read_grid(&self) -> SplitResult<CellGrid> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(self.bytes))
            .map_err(|e| SplitError::Workbook(format!("Failed to open Excel file: {}", e)))?;

        let sheet_names = workbook.sheet_names();
        tracing::debug!(sheets = ?sheet_names, "workbook opened");

        if !sheet_names.iter().any(|name| name == JOURNAL_SHEET) {
            return Err(SplitError::MissingWorksheet(JOURNAL_SHEET.to_string()));
        }

        let range = workbook.worksheet_range(JOURNAL_SHEET).map_err(|e| {
            SplitError::Workbook(format!("Failed to read '{}': {}", JOURNAL_SHEET, e))
        })?;

        Ok(CellGrid::new(range))
    }
}
