//! Excel import/export for the journal workbook
//!
//! - Import: workbook bytes → journal sheet grid (calamine)
//! - Export: per-account sheets → workbook bytes (rust_xlsxwriter)

mod exporter;
mod grid;
mod importer;

pub use exporter::{sanitize_sheet_name, AssembledWorkbook, ExcelExporter, SheetNamer};
pub use grid::{cell_value, CellGrid, HeaderMap};
pub use importer::JournalImporter;
