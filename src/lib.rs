//! journal-split - split an accounting journal into one sheet per account
//!
//! This library reads the `日記帳` (journal) worksheet of an .xlsx workbook,
//! normalizes its headers and amounts, groups the rows by account code
//! (`科代`) and writes the selected accounts back out as a new workbook with
//! one sheet per account.
//!
//! # Example
//!
//! ```no_run
//! use journal_split::layout::XLSX_CONTENT_TYPE;
//! use journal_split::session::{Session, Upload};
//!
//! let bytes = std::fs::read("journal.xlsx")?;
//! let mut session = Session::new();
//! let groups = session.receive(Upload::new("journal.xlsx", XLSX_CONTENT_TYPE, bytes))?;
//! println!("Accounts: {}", groups.len());
//!
//! session.select_all()?;
//! let workbook = session.export()?;
//! std::fs::write(&workbook.file_name, &workbook.bytes)?;
//! # Ok::<(), journal_split::error::SplitError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod layout;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{SplitError, SplitResult};
pub use session::{read_journal, ExportedWorkbook, Phase, SelectionSet, Session, Upload};
pub use types::{AccountGroup, AccountGroups, CellValue, ExportSheet, JournalColumn, JournalRow};
