//! Loading category directories from disk.
//!
//! # Responsibilities
//! - Enumerate `<duns>.csv` files of one category directory
//! - Parse each file into records (or company info for the primary category)
//! - Skip and log malformed files without aborting the load
//!
//! # Design Decisions
//! - Files are visited in lexicographic path order so repeated loads of the
//!   same tree produce identical stores
//! - A missing category directory is a warning, not an error
//! - Short rows are kept and padded with `null`; a row with more cells than
//!   the header makes the file malformed

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::store::category::Category;
use crate::store::records::{CompanyInfo, Record};
use crate::store::DataStoreBuilder;

/// Columns every company info file must carry.
const INFO_FIELD_COLUMN: &str = "field";
const INFO_VALUE_COLUMN: &str = "value";

/// Why a single resource could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("{} has no header row", path.display())]
    Empty { path: PathBuf },

    #[error("{} line {line}: expected at most {expected} fields, found {found}", path.display())]
    TooManyFields {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{} is missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("cannot derive a company identifier from {}", path.display())]
    InvalidFileName { path: PathBuf },
}

/// Load every resource of `category` under `root` into `builder`.
///
/// Returns the number of companies loaded for the category.
pub fn load_category(root: &Path, category: Category, builder: &mut DataStoreBuilder) -> usize {
    let dir = root.join(category.dir_name());
    if !dir.is_dir() {
        tracing::warn!(
            category = %category,
            path = %dir.display(),
            "Category directory does not exist, skipping"
        );
        return 0;
    }

    let files = match csv_files(&dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(category = %category, error = %e, "Cannot list category directory");
            return 0;
        }
    };

    let mut loaded = 0;
    for path in files {
        match load_resource(&path, category, builder) {
            Ok(()) => loaded += 1,
            Err(e) => {
                tracing::warn!(
                    category = %category,
                    path = %path.display(),
                    error = %e,
                    "Skipping resource"
                );
            }
        }
    }
    loaded
}

fn load_resource(
    path: &Path,
    category: Category,
    builder: &mut DataStoreBuilder,
) -> Result<(), LoadError> {
    let id = company_id(path)?;
    match category {
        Category::CompanyInfo => {
            let info = read_company_info(path)?;
            builder.insert_company(id, info);
        }
        other => {
            let records = read_records(path)?;
            builder.insert_records(other, id, records);
        }
    }
    Ok(())
}

/// List the `.csv` files directly inside `dir`, sorted by path.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The company identifier is the file name without its extension.
pub fn company_id(path: &Path) -> Result<String, LoadError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LoadError::InvalidFileName {
            path: path.to_path_buf(),
        })
}

fn open_csv(path: &Path) -> Result<(csv::Reader<File>, csv::StringRecord), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok((reader, headers))
}

/// Next data row, rejecting rows wider than the header.
fn checked_row(
    path: &Path,
    headers: &csv::StringRecord,
    row: Result<csv::StringRecord, csv::Error>,
) -> Result<csv::StringRecord, LoadError> {
    let row = row.map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    if row.len() > headers.len() {
        return Err(LoadError::TooManyFields {
            path: path.to_path_buf(),
            line: row.position().map_or(0, |p| p.line()),
            expected: headers.len(),
            found: row.len(),
        });
    }
    Ok(row)
}

/// Parse a category table into rows.
pub fn read_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let (mut reader, headers) = open_csv(path)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = checked_row(path, &headers, row)?;
        records.push(Record::from_row(headers.iter(), row.iter()));
    }
    Ok(records)
}

/// Parse a `field,value` table into a company info mapping.
pub fn read_company_info(path: &Path) -> Result<CompanyInfo, LoadError> {
    let (mut reader, headers) = open_csv(path)?;

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: name,
            })
    };
    let field_idx = column(INFO_FIELD_COLUMN)?;
    let value_idx = column(INFO_VALUE_COLUMN)?;

    let mut info = CompanyInfo::new();
    for row in reader.records() {
        let row = checked_row(path, &headers, row)?;
        let field = row.get(field_idx).unwrap_or_default();
        if field.is_empty() {
            continue;
        }
        info.insert(field, row.get(value_idx).unwrap_or_default());
    }
    Ok(info)
}
