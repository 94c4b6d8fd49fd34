use clap::{Parser, Subcommand};
use colored::Colorize;
use journal_split::cli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "journal-split")]
#[command(about = "Split the 日記帳 journal sheet into one sheet per account code")]
#[command(long_about = "journal-split - per-account sheets from an accounting journal

Reads the '日記帳' worksheet of an .xlsx workbook, trims headers and amounts,
groups rows by account code (科代) and exports the accounts you pick as a new
workbook with one sheet per account.

COMMANDS:
  list      - Show the account codes found in the journal
  preview   - Print the normalized journal rows as JSON
  export    - Write selected accounts to a new workbook

EXAMPLES:
  journal-split list journal.xlsx
  journal-split export journal.xlsx --all
  journal-split export journal.xlsx -a 101 -a 202 -o travel.xlsx
  journal-split export journal.xlsx --all -x 999")]
#[command(version)]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List account codes with their names and row counts
    List {
        /// Path to the workbook (.xlsx)
        file: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the normalized journal rows as JSON
    Preview {
        /// Path to the workbook (.xlsx)
        file: PathBuf,

        /// Print at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    #[command(long_about = "Export selected accounts to a new workbook.

Each selected account becomes one sheet named after its account code. Every
sheet starts with an info row (account code, account name) and a label row,
followed by the account's journal rows in their original order.

SELECTION:
  --all          select every account
  -a, --account  select one account (repeatable)
  -x, --exclude  deselect one account (repeatable, applied last)

Nothing selected means nothing is exported.")]
    /// Export selected accounts to a new workbook
    Export {
        /// Path to the workbook (.xlsx)
        input: PathBuf,

        /// Output file (default: processed_accounts.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Select every account
        #[arg(long)]
        all: bool,

        /// Account code to select
        #[arg(short, long = "account")]
        accounts: Vec<String>,

        /// Account code to leave out
        #[arg(short = 'x', long)]
        exclude: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "journal_split=debug"
    } else {
        "journal_split=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::List { file, json } => cli::list(file, json)?,

        Commands::Preview { file, limit } => cli::preview(file, limit)?,

        Commands::Export {
            input,
            output,
            all,
            accounts,
            exclude,
        } => cli::export(input, output, all, accounts, exclude)?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{}", format!("❌ {:#}", e).bold().red());
        std::process::exit(1);
    }
}
