//! Writing archival snapshots to disk
//!
//! Uses temp→rename so a reader never sees a partially written archive

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use reportseal_core::errors::ExError;
use reportseal_core::ArchiveSnapshot;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default archive file name, written next to the report
pub const DEFAULT_ARCHIVE_NAME: &str = "report_with_csv_data.json";

/// Archive path used when none is given: alongside `report_path`
pub fn default_archive_path(report_path: &Path) -> PathBuf {
    report_path
        .parent()
        .map(|dir| dir.join(DEFAULT_ARCHIVE_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_NAME))
}

/// Atomically write bytes to a file
///
/// Writes a uniquely named temp file in the target's directory, then
/// renames it over the target. The temp file is removed on any failure.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let dir = match target_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| io_error("create_archive_dir", e))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| io_error("create_archive_temp", e))?;
    temp.write_all(content)
        .map_err(|e| io_error("write_archive_temp", e))?;

    temp.persist(target_path)
        .map_err(|e| io_error("rename_archive_temp", e.error))?;

    Ok(())
}

/// Write `snapshot` as pretty-printed JSON to `target_path`
///
/// # Errors
///
/// `Serialization` if the document cannot be encoded, `Io` if the write
/// or rename fails.
pub fn write_archive(target_path: &Path, snapshot: &ArchiveSnapshot) -> Result<()> {
    let json = snapshot
        .to_pretty_json()
        .map_err(|e| ExError::from(e).with_op("write_archive"))?;
    atomic_write(target_path, json.as_bytes())?;

    tracing::info!(
        path = %target_path.display(),
        archived = snapshot.archived_files().len(),
        skipped = snapshot.failures.len(),
        "Wrote archive snapshot"
    );
    Ok(())
}
