use std::path::PathBuf;

/// The Fake/True news dataset
pub mod news;

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// Neither a CSV nor an XLSX file exists for a source
    #[error(
        "could not find {stem}.csv or {stem}.xlsx in {dir}\nFiles present: {present:?}",
        dir = .dir.display()
    )]
    MissingFile {
        /// The file stem that was searched for
        stem: String,
        /// The directory searched
        dir: PathBuf,
        /// Names of the files found in the directory
        present: Vec<String>,
    },

    /// The source has no `text` column
    #[error("'text' column not found in {path}, columns = {columns:?}", path = .path.display())]
    MissingColumn {
        /// The source file
        path: PathBuf,
        /// The columns that were found
        columns: Vec<String>,
    },

    /// The workbook has no worksheet
    #[error("no worksheet found in {0}")]
    EmptyWorkbook(PathBuf),

    /// CSV parsing failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// XLSX parsing failure
    #[error(transparent)]
    Xlsx(#[from] calamine::Error),
}
