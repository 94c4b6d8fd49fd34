use crate::error::SplitResult;
use crate::layout::content_type_for;
use crate::session::{read_journal, Session, Upload};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One line of the account listing
#[derive(Debug, Serialize)]
struct AccountSummary<'a> {
    code: &'a str,
    name: String,
    rows: usize,
}

/// Read a workbook from disk, declaring its type from the file extension
fn read_upload(path: &Path) -> SplitResult<Upload> {
    let bytes = fs::read(path)?;
    let file_name = path.display().to_string();
    let content_type = content_type_for(&file_name);
    Ok(Upload::new(file_name, content_type, bytes))
}

/// Start a session and feed it the workbook at `path`
pub fn load(path: &Path) -> SplitResult<Session> {
    let mut session = Session::new();
    session.receive(read_upload(path)?)?;
    Ok(session)
}

/// Execute the list command
pub fn list(file: PathBuf, json: bool) -> SplitResult<()> {
    let session = load(&file)?;
    let groups = session.groups()?;

    let summaries: Vec<AccountSummary> = groups
        .iter()
        .map(|group| AccountSummary {
            code: &group.code,
            name: group.account_name().to_text(),
            rows: group.rows.len(),
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&summaries)?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", "📒 journal-split - Accounts".bold().green());
    println!("   File: {}\n", file.display());

    if summaries.is_empty() {
        println!("{}", "   No rows with an account code".yellow());
        return Ok(());
    }

    for summary in &summaries {
        println!(
            "   {}  {}  ({} rows)",
            summary.code.bright_blue().bold(),
            summary.name,
            summary.rows
        );
    }
    println!(
        "\n   {} accounts, {} rows",
        summaries.len(),
        groups.row_count()
    );

    Ok(())
}

/// Execute the preview command - print normalized journal rows as JSON
pub fn preview(file: PathBuf, limit: Option<usize>) -> SplitResult<()> {
    let journal = read_journal(&read_upload(&file)?)?;

    let shown = limit.unwrap_or(usize::MAX).min(journal.rows.len());
    let rows = &journal.rows[..shown];
    let out = serde_json::to_string_pretty(rows)?;
    println!("{}", out);

    Ok(())
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    output: Option<PathBuf>,
    all: bool,
    accounts: Vec<String>,
    exclude: Vec<String>,
) -> SplitResult<()> {
    println!("{}", "📒 journal-split - Export".bold().green());
    println!("   Input:  {}", input.display());

    let mut session = load(&input)?;

    if all {
        session.select_all()?;
    }
    for code in &accounts {
        session.set_selected(code, true)?;
    }
    for code in &exclude {
        session.set_selected(code, false)?;
    }

    let workbook = session.export()?;
    let output = output.unwrap_or_else(|| PathBuf::from(&workbook.file_name));
    fs::write(&output, &workbook.bytes)?;

    println!("   Output: {}\n", output.display());
    for (code, sheet) in &workbook.sheets {
        if code == sheet {
            println!("   ✅ {}", sheet.bright_blue());
        } else {
            println!("   ✅ {} (account {})", sheet.bright_blue(), code);
        }
    }
    println!(
        "\n{}",
        format!("✅ Exported {} accounts", workbook.sheets.len())
            .bold()
            .green()
    );

    Ok(())
}
