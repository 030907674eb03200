//! Report file output.
//!
//! Responsibilities:
//! - Write rendered documents atomically, creating parent directories.
//! - Resolve default report file names from the run date.
//!
//! Invariants:
//! - A failed write never leaves a truncated file at the destination.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Write `content` to `path` via a temp file and rename.
pub(crate) fn write_to_file(content: &str, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

/// `LicenseReport_<yyyyMMdd>.<extension>` inside `dir`.
pub(crate) fn dated_report_path(dir: &Path, generated_at: DateTime<Utc>, extension: &str) -> PathBuf {
    dir.join(format!(
        "LicenseReport_{}.{}",
        generated_at.format("%Y%m%d"),
        extension
    ))
}
