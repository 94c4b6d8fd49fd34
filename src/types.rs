use chrono::{Datelike, NaiveDateTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell value after decoding
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// No cell, or a cell without content
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl CellValue {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the value as display text.
    ///
    /// Dates render as `month/day` without padding, integral numbers without
    /// a decimal part.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Date(dt) => format!("{}/{}", dt.month(), dt.day()),
        }
    }
}

/// Format a number for display, dropping the decimal part of integral values
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            other => serializer.serialize_str(&other.to_text()),
        }
    }
}

//==============================================================================
// Journal Columns
//==============================================================================

/// The well-known columns of the journal sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JournalColumn {
    Date,
    ExpenseName,
    Handler,
    ReceiptNote,
    Summary,
    Payee,
    Income,
    Expense,
    AccountCode,
    AccountName,
}

impl JournalColumn {
    /// Every well-known column, in record order
    pub const ALL: [JournalColumn; 10] = [
        JournalColumn::Date,
        JournalColumn::ExpenseName,
        JournalColumn::Handler,
        JournalColumn::ReceiptNote,
        JournalColumn::Summary,
        JournalColumn::Payee,
        JournalColumn::Income,
        JournalColumn::Expense,
        JournalColumn::AccountCode,
        JournalColumn::AccountName,
    ];

    /// Column order of every exported sheet
    pub const EXPORT: [JournalColumn; EXPORT_WIDTH] = [
        JournalColumn::Date,
        JournalColumn::ExpenseName,
        JournalColumn::Handler,
        JournalColumn::ReceiptNote,
        JournalColumn::Summary,
        JournalColumn::Payee,
        JournalColumn::Income,
        JournalColumn::Expense,
    ];

    /// Header label as it appears in the workbook
    pub fn label(self) -> &'static str {
        match self {
            JournalColumn::Date => "日期",
            JournalColumn::ExpenseName => "經費名稱",
            JournalColumn::Handler => "經辦人",
            JournalColumn::ReceiptNote => "粘存單",
            JournalColumn::Summary => "摘要",
            JournalColumn::Payee => "受款人",
            JournalColumn::Income => "收入",
            JournalColumn::Expense => "支出",
            JournalColumn::AccountCode => "科代",
            JournalColumn::AccountName => "會計科目",
        }
    }

    /// Match a header label, ignoring surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|column| column.label() == label)
    }

    /// Income and expense carry amounts and get their text trimmed
    pub fn is_monetary(self) -> bool {
        matches!(self, JournalColumn::Income | JournalColumn::Expense)
    }
}

//==============================================================================
// Journal Rows
//==============================================================================

/// One normalized data row of the journal sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalRow {
    pub date: CellValue,
    pub expense_name: CellValue,
    pub handler: CellValue,
    pub receipt_note: CellValue,
    pub summary: CellValue,
    pub payee: CellValue,
    pub income: CellValue,
    pub expense: CellValue,
    pub account_code: CellValue,
    pub account_name: CellValue,
    /// Labelled columns outside the well-known set, in sheet order
    pub extra: Vec<(String, CellValue)>,
}

impl JournalRow {
    pub fn get(&self, column: JournalColumn) -> &CellValue {
        match column {
            JournalColumn::Date => &self.date,
            JournalColumn::ExpenseName => &self.expense_name,
            JournalColumn::Handler => &self.handler,
            JournalColumn::ReceiptNote => &self.receipt_note,
            JournalColumn::Summary => &self.summary,
            JournalColumn::Payee => &self.payee,
            JournalColumn::Income => &self.income,
            JournalColumn::Expense => &self.expense,
            JournalColumn::AccountCode => &self.account_code,
            JournalColumn::AccountName => &self.account_name,
        }
    }

    pub fn get_mut(&mut self, column: JournalColumn) -> &mut CellValue {
        match column {
            JournalColumn::Date => &mut self.date,
            JournalColumn::ExpenseName => &mut self.expense_name,
            JournalColumn::Handler => &mut self.handler,
            JournalColumn::ReceiptNote => &mut self.receipt_note,
            JournalColumn::Summary => &mut self.summary,
            JournalColumn::Payee => &mut self.payee,
            JournalColumn::Income => &mut self.income,
            JournalColumn::Expense => &mut self.expense,
            JournalColumn::AccountCode => &mut self.account_code,
            JournalColumn::AccountName => &mut self.account_name,
        }
    }

    /// Builder-style setter, mostly for tests and fixtures
    pub fn with(mut self, column: JournalColumn, value: CellValue) -> Self {
        *self.get_mut(column) = value;
        self
    }

    /// Look up a value by label, including the extra columns
    pub fn field(&self, label: &str) -> Option<&CellValue> {
        match JournalColumn::from_label(label) {
            Some(column) => Some(self.get(column)),
            None => self
                .extra
                .iter()
                .find(|(key, _)| key == label)
                .map(|(_, value)| value),
        }
    }
}

impl Serialize for JournalRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(JournalColumn::ALL.len() + self.extra.len()))?;
        for column in JournalColumn::ALL {
            map.serialize_entry(column.label(), self.get(column))?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

//==============================================================================
// Account Groups
//==============================================================================

/// Rows sharing one account code
#[derive(Debug, Clone, PartialEq)]
pub struct AccountGroup {
    pub code: String,
    pub rows: Vec<JournalRow>,
}

impl AccountGroup {
    /// Account name of the group, taken from its first row only
    pub fn account_name(&self) -> CellValue {
        self.rows
            .first()
            .map(|row| row.account_name.clone())
            .unwrap_or_default()
    }
}

/// Account groups in order of first occurrence
#[derive(Debug, Clone, Default)]
pub struct AccountGroups {
    groups: Vec<AccountGroup>,
    index: HashMap<String, usize>,
}

impl AccountGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row to the group for `code`, creating the group on first use
    pub fn push(&mut self, code: String, row: JournalRow) {
        match self.index.get(&code) {
            Some(&idx) => self.groups[idx].rows.push(row),
            None => {
                self.index.insert(code.clone(), self.groups.len());
                self.groups.push(AccountGroup {
                    code,
                    rows: vec![row],
                });
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<&AccountGroup> {
        self.index.get(code).map(|&idx| &self.groups[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccountGroup> {
        self.groups.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of rows across all groups
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|group| group.rows.len()).sum()
    }
}

impl<'a> IntoIterator for &'a AccountGroups {
    type Item = &'a AccountGroup;
    type IntoIter = std::slice::Iter<'a, AccountGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

//==============================================================================
// Export Sheets
//==============================================================================

/// Column count of an exported sheet
pub const EXPORT_WIDTH: usize = 8;

/// One exported row, in `JournalColumn::EXPORT` order
pub type ExportRow = [CellValue; EXPORT_WIDTH];

/// Sheet content for one account: info row, label row, then data rows
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub code: String,
    pub rows: Vec<ExportRow>,
}

impl ExportSheet {
    /// Index of the first data row, after the info and label rows
    pub const DATA_START: usize = 2;

    pub fn data_rows(&self) -> &[ExportRow] {
        self.rows.get(Self::DATA_START..).unwrap_or(&[])
    }
}
