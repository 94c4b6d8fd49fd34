use thiserror::Error;

pub type SplitResult<T> = Result<T, SplitError>;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file type '{0}': please upload an XLSX file")]
    UnsupportedFileType(String),

    #[error("Could not find '{0}' worksheet in the uploaded file")]
    MissingWorksheet(String),

    #[error("No accounts selected for export")]
    EmptySelection,

    #[error("Unknown account code '{0}'")]
    UnknownAccount(String),

    #[error("No workbook has been loaded")]
    NoWorkbook,

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Export error: {0}")]
    Export(String),
}
