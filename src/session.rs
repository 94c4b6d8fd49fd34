//! Interactive session: upload → group → select → export
//!
//! ```text
//! Idle ──receive──▶ (Parsing) ──▶ Grouped ──export──▶ (Exporting) ──▶ Idle
//!                       │            ▲  │
//!                       └─error─▶ Idle  └─toggle / select all / deselect all
//! ```
//!
//! Parsing and exporting run to completion inside [`Session::receive`] and
//! [`Session::export`], so only `Idle` and `Grouped` are ever observed.

use crate::core::{compose_sheet, group_by_account, Journal};
use crate::error::{SplitError, SplitResult};
use crate::excel::{ExcelExporter, JournalImporter};
use crate::layout::{EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::types::{AccountGroups, ExportSheet};
use std::collections::HashMap;

/// A file handed to the session by the user
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    /// Content type as declared by whoever supplied the file
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Check the declared type, find the journal sheet and normalize it
pub fn read_journal(upload: &Upload) -> SplitResult<Journal> {
    JournalImporter::check_content_type(&upload.content_type)?;
    let mut grid = JournalImporter::new(&upload.bytes).read_grid()?;
    Ok(Journal::from_grid(&mut grid))
}

/// The workbook produced by an export, ready to be saved
#[derive(Debug, Clone)]
pub struct ExportedWorkbook {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    /// (account code, sheet name), in sheet order
    pub sheets: Vec<(String, String)>,
}

/// Which account codes go into the export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashMap<String, bool>,
}

impl SelectionSet {
    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.get(code).copied().unwrap_or(false)
    }

    pub fn set(&mut self, code: &str, selected: bool) {
        self.selected.insert(code.to_string(), selected);
    }

    /// Flip one code and return its new state
    pub fn toggle(&mut self, code: &str) -> bool {
        let now = !self.is_selected(code);
        self.set(code, now);
        now
    }

    pub fn select_all<'a>(&mut self, codes: impl IntoIterator<Item = &'a str>) {
        self.selected = codes.into_iter().map(|code| (code.to_string(), true)).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn count(&self) -> usize {
        self.selected.values().filter(|&&on| on).count()
    }
}

/// Observable phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Grouped,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Grouped {
        groups: AccountGroups,
        selection: SelectionSet,
    },
}

/// One user's session over a single uploaded workbook at a time
#[derive(Debug, Default)]
pub struct Session {
    state: State,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Grouped { .. } => Phase::Grouped,
        }
    }

    /// Parse and group an uploaded workbook.
    ///
    /// Whatever the outcome, state from a previous upload is discarded; on
    /// error the session is left idle.
    pub fn receive(&mut self, upload: Upload) -> SplitResult<&AccountGroups> {
        self.state = State::Idle;

        tracing::info!(file = %upload.file_name, bytes = upload.bytes.len(), "file received");
        let groups = Self::parse(&upload)?;

        self.state = State::Grouped {
            groups,
            selection: SelectionSet::default(),
        };
        self.groups()
    }

    fn parse(upload: &Upload) -> SplitResult<AccountGroups> {
        let journal = read_journal(upload)?;
        Ok(group_by_account(journal.rows))
    }

    pub fn groups(&self) -> SplitResult<&AccountGroups> {
        match &self.state {
            State::Grouped { groups, .. } => Ok(groups),
            State::Idle => Err(SplitError::NoWorkbook),
        }
    }

    pub fn selection(&self) -> SplitResult<&SelectionSet> {
        match &self.state {
            State::Grouped { selection, .. } => Ok(selection),
            State::Idle => Err(SplitError::NoWorkbook),
        }
    }

    fn grouped_mut(&mut self) -> SplitResult<(&AccountGroups, &mut SelectionSet)> {
        match &mut self.state {
            State::Grouped { groups, selection } => Ok((groups, selection)),
            State::Idle => Err(SplitError::NoWorkbook),
        }
    }

    /// Select or deselect one account
    pub fn set_selected(&mut self, code: &str, selected: bool) -> SplitResult<()> {
        let (groups, selection) = self.grouped_mut()?;
        if !groups.contains(code) {
            return Err(SplitError::UnknownAccount(code.to_string()));
        }
        selection.set(code, selected);
        Ok(())
    }

    /// Flip one account and return whether it is now selected
    pub fn toggle(&mut self, code: &str) -> SplitResult<bool> {
        let (groups, selection) = self.grouped_mut()?;
        if !groups.contains(code) {
            return Err(SplitError::UnknownAccount(code.to_string()));
        }
        Ok(selection.toggle(code))
    }

    pub fn select_all(&mut self) -> SplitResult<()> {
        let (groups, selection) = self.grouped_mut()?;
        selection.select_all(groups.codes());
        Ok(())
    }

    pub fn deselect_all(&mut self) -> SplitResult<()> {
        let (_, selection) = self.grouped_mut()?;
        selection.clear();
        Ok(())
    }

    /// Export the selected accounts in group order.
    ///
    /// An empty selection is refused and the session stays grouped; a
    /// successful export returns the session to idle.
    pub fn export(&mut self) -> SplitResult<ExportedWorkbook> {
        let (groups, selection) = self.grouped_mut()?;
        let sheets: Vec<ExportSheet> = groups
            .iter()
            .filter(|group| selection.is_selected(&group.code))
            .map(compose_sheet)
            .collect();

        if sheets.is_empty() {
            return Err(SplitError::EmptySelection);
        }

        let assembled = ExcelExporter::new(&sheets).export()?;
        tracing::info!(sheets = sheets.len(), "workbook exported");

        self.state = State::Idle;
        Ok(ExportedWorkbook {
            file_name: EXPORT_FILE_NAME.to_string(),
            content_type: XLSX_CONTENT_TYPE,
            bytes: assembled.bytes,
            sheets: assembled.sheet_names,
        })
    }
}
