//! CSV Data Loader Module
//! Reads the C-ID file with Polars and validates it into equivalency records.

use super::record::{
    EquivalencyRecord, COL_CID, COL_DESCRIPTOR, COL_INSTITUTION, COL_LOCAL_COURSE, COL_TITLES,
    REQUIRED_COLUMNS,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(
        "Data file not found: {file}\n\nPlace a file named '{file}' in this folder:\n{folder}"
    )]
    NotFound { file: String, folder: String },
    #[error(
        "Could not read {file} as CSV.\n\nMake sure the file is a valid CSV (comma-separated, UTF-8).\nDetail: {detail}"
    )]
    Unreadable { file: String, detail: String },
    #[error("{file} is empty.\n\nThe file must contain a header row and at least one data row.")]
    Empty { file: String },
    #[error(
        "{file} is missing required column(s).\n\nMissing: {}\n\nRequired columns (exact names):\n{}",
        .missing.join(", "),
        required_list()
    )]
    MissingColumns { file: String, missing: Vec<String> },
}

fn required_list() -> String {
    REQUIRED_COLUMNS
        .iter()
        .map(|c| format!("  • {}", c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handles reading and validating the equivalency CSV.
pub struct DataLoader {
    file_path: PathBuf,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_path.to_string_lossy().to_string())
    }

    /// Load every row of the file, in file order.
    pub fn load(&self) -> Result<Vec<EquivalencyRecord>, LoaderError> {
        let file = self.file_name();

        if !self.file_path.is_file() {
            let folder = std::path::absolute(&self.file_path)
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf))
                .unwrap_or_default();
            return Err(LoaderError::NotFound {
                file,
                folder: folder.to_string_lossy().to_string(),
            });
        }

        // Schema length 0 reads every column as text
        let df = LazyCsvReader::new(&self.file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::Unreadable {
                file: file.clone(),
                detail: e.to_string(),
            })?;

        if df.height() == 0 {
            return Err(LoaderError::Empty { file });
        }

        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !present.iter().any(|p| p == *c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns { file, missing });
        }

        Self::records_from_frame(&df).map_err(|e| LoaderError::Unreadable {
            file,
            detail: e.to_string(),
        })
    }

    fn records_from_frame(df: &DataFrame) -> PolarsResult<Vec<EquivalencyRecord>> {
        let cids = Self::text_column(df, COL_CID)?;
        let descriptors = Self::text_column(df, COL_DESCRIPTOR)?;
        let institutions = Self::text_column(df, COL_INSTITUTION)?;
        let titles = Self::text_column(df, COL_TITLES)?;
        let courses = Self::text_column(df, COL_LOCAL_COURSE)?;

        let records = (0..df.height())
            .map(|i| {
                EquivalencyRecord::new(
                    cids[i].as_str(),
                    descriptors[i].as_str(),
                    institutions[i].as_str(),
                    titles[i].as_str(),
                    courses[i].as_str(),
                )
            })
            .collect();

        Ok(records)
    }

    /// Column values as owned strings, nulls mapped to "".
    fn text_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
        let column = df.column(name)?.cast(&DataType::String)?;
        let values = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(values)
    }
}
