use std::path::{Path, PathBuf};

use burn::data::dataset::{self, InMemDataset};
use calamine::{open_workbook_auto, Reader};
use derive_new::new;
use log::info;
use serde::{Deserialize, Serialize};

use crate::labels::Label;

use super::DatasetError;

/// File stem of the unreliable (fake) news source
pub static FAKE_STEM: &str = "Fake";

/// File stem of the reliable news source
pub static TRUE_STEM: &str = "True";

/// The column holding the article text
pub static TEXT_COLUMN: &str = "text";

/// A labeled news text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct Item {
    /// The raw article text
    pub text: String,

    /// The class of the article
    pub label: Label,
}

/// The concatenated Fake and True news sources
pub struct Dataset {
    /// Underlying In-Memory dataset
    dataset: InMemDataset<Item>,

    /// Number of items read from the fake news source
    pub fake_count: usize,

    /// Number of items read from the true news source
    pub true_count: usize,
}

impl dataset::Dataset<Item> for Dataset {
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    fn len(&self) -> usize {
        self.dataset.len()
    }
}

impl Dataset {
    /// Load `Fake` and `True` sources from the data directory, labeling fake rows as
    /// [`Label::Unreliable`] and true rows as [`Label::Reliable`]. Fake rows come first.
    pub fn load(data_dir: &Path) -> Result<Self, DatasetError> {
        let fake = read_texts(data_dir, FAKE_STEM)?;
        let real = read_texts(data_dir, TRUE_STEM)?;

        let fake_count = fake.len();
        let true_count = real.len();

        let items = fake
            .into_iter()
            .map(|text| Item::new(text, Label::Unreliable))
            .chain(real.into_iter().map(|text| Item::new(text, Label::Reliable)))
            .collect::<Vec<_>>();

        info!(
            "Loaded samples: {} | Fake: {} | True: {}",
            items.len(),
            fake_count,
            true_count
        );

        Ok(Self {
            dataset: InMemDataset::new(items),
            fake_count,
            true_count,
        })
    }

    /// Every item, in load order
    pub fn items(&self) -> Vec<Item> {
        dataset::Dataset::iter(&self.dataset).collect()
    }
}

/// Locate the source file for a stem, preferring CSV over XLSX
pub fn locate(data_dir: &Path, stem: &str) -> Result<PathBuf, DatasetError> {
    let csv_path = data_dir.join(format!("{stem}.csv"));
    let xlsx_path = data_dir.join(format!("{stem}.xlsx"));

    if csv_path.exists() {
        return Ok(csv_path);
    }
    if xlsx_path.exists() {
        return Ok(xlsx_path);
    }

    let mut present = std::fs::read_dir(data_dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.file_name().to_string_lossy().to_string())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    present.sort();

    Err(DatasetError::MissingFile {
        stem: stem.to_string(),
        dir: data_dir.to_path_buf(),
        present,
    })
}

/// Read the `text` column of the source file for a stem. Cells that are not strings are
/// coerced to their string form.
pub fn read_texts(data_dir: &Path, stem: &str) -> Result<Vec<String>, DatasetError> {
    let path = locate(data_dir, stem)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("xlsx") => read_xlsx(&path),
        _ => read_csv(&path),
    }
}

fn text_column(path: &Path, columns: &[String]) -> Result<usize, DatasetError> {
    columns
        .iter()
        .position(|column| column.trim() == TEXT_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn {
            path: path.to_path_buf(),
            columns: columns.to_vec(),
        })
}

fn read_csv(path: &Path) -> Result<Vec<String>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();
    let index = text_column(path, &columns)?;

    let mut texts = Vec::new();
    for record in reader.records() {
        let record = record?;
        texts.push(record.get(index).unwrap_or_default().to_string());
    }

    Ok(texts)
}

fn read_xlsx(path: &Path) -> Result<Vec<String>, DatasetError> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range.rows();

    let columns = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
        .unwrap_or_default();
    let index = text_column(path, &columns)?;

    Ok(rows
        .map(|row| row.get(index).map(|cell| cell.to_string()).unwrap_or_default())
        .collect())
}
