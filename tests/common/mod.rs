//! Shared fixtures: build journal workbooks in memory, read exports back

#![allow(dead_code)]

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

pub const JOURNAL: &str = "日記帳";

/// A fixture cell
#[derive(Clone, Copy)]
pub enum Cell {
    Empty,
    Text(&'static str),
    Num(f64),
    Bool(bool),
    Date(i32, u32, u32),
}

pub use Cell::{Bool as B, Empty as E, Num as N, Text as S};

pub fn d(y: i32, m: u32, day: u32) -> Cell {
    Cell::Date(y, m, day)
}

/// Workbook bytes with one sheet holding `headers` then `rows`
pub fn workbook(sheet: &str, headers: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }

    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match *cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(r, c, s).unwrap();
                }
                Cell::Num(n) => {
                    worksheet.write_number(r, c, n).unwrap();
                }
                Cell::Bool(b) => {
                    worksheet.write_boolean(r, c, b).unwrap();
                }
                Cell::Date(y, m, day) => {
                    let date = NaiveDate::from_ymd_opt(y, m, day).unwrap();
                    worksheet
                        .write_datetime_with_format(r, c, &date, &date_format)
                        .unwrap();
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// The worked example: two rows for account 101, one row without a code
pub fn example_journal() -> Vec<u8> {
    workbook(
        JOURNAL,
        &["科代", "會計科目", "日期", "收入", "支出"],
        &[
            vec![S("101"), S("Travel"), S("1/2"), E, S("100 ")],
            vec![S("101"), E, S("1/5"), S("50"), E],
            vec![E, E, S("1/9"), E, S("10")],
        ],
    )
}

/// Sheet names and ranges of an exported workbook
pub fn read_back(bytes: &[u8]) -> Vec<(String, Range<Data>)> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec())).unwrap();
    workbook
        .sheet_names()
        .into_iter()
        .map(|name| {
            let range = workbook.worksheet_range(&name).unwrap();
            (name, range)
        })
        .collect()
}

/// Text of a cell; empty for blanks
pub fn text(range: &Range<Data>, row: usize, col: usize) -> String {
    match range.get((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
