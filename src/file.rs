// src/file.rs
//! Export sink: one CSV file per site.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::ExportOptions;
use crate::error::ExportError;
use crate::record::{ProductRecord, HEADERS};

/// Write `records` for `site_name` into the export directory.
///
/// Returns the written path, or `None` when there was nothing to write; in
/// that case no file is created or touched.
pub fn export_site(
    export: &ExportOptions,
    site_name: &str,
    records: &[ProductRecord],
) -> Result<Option<PathBuf>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }
    ensure_directory(&export.out_dir)?;
    let path = export.path_for(site_name);
    write_products(&path, records)?;
    Ok(Some(path))
}

/// Create/truncate `path`; header row then one row per record.
pub fn write_products(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let csv_err = |source| ExportError::Csv { path: path.to_path_buf(), source };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    wtr.write_record(HEADERS).map_err(csv_err)?;
    for r in records {
        wtr.write_record(r.as_row()).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Read an export file back (header row expected).
pub fn read_products(path: &Path) -> Result<Vec<ProductRecord>, ExportError> {
    let csv_err = |source| ExportError::Csv { path: path.to_path_buf(), source };

    let mut rdr = csv::Reader::from_path(path).map_err(csv_err)?;
    rdr.deserialize().collect::<Result<Vec<ProductRecord>, _>>().map_err(csv_err)
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io { path: dir.to_path_buf(), source };

    if dir.exists() && !dir.is_dir() {
        return Err(io_err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "path exists but is not a directory",
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    Ok(())
}
