//! JSON report output writer.
//!
//! Writes ProfileReport structs to JSON files with proper formatting.

use super::schema::ProfileReport;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = ProfileReport::from_store(&store, 10);
/// write_report(&report, "profile.json")?;
/// ```
pub fn write_report(
    report: &ProfileReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path)
        .map_err(OutputError::WriteFailed)?;

    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report)
        .map_err(OutputError::SerializationFailed)?;

    info!("Report written successfully ({} bytes)",
          calculate_file_size(output_path));

    Ok(())
}

/// Serialize a report to a JSON string
///
/// **Public** - useful for tests and in-memory use
pub fn report_to_string(report: &ProfileReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report)
        .map_err(OutputError::SerializationFailed)
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::UnsupportedVersion` - Major schema version differs
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ProfileReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path)
        .map_err(OutputError::WriteFailed)?;

    let report: ProfileReport = serde_json::from_reader(file)
        .map_err(OutputError::SerializationFailed)?;

    if major_version(&report.version) != major_version(SCHEMA_VERSION) {
        return Err(OutputError::UnsupportedVersion(report.version));
    }

    debug!("Report loaded: version {}, class {}",
           report.version,
           report.class_id);

    Ok(report)
}

/// Validate that output path is writable
///
/// **Private** - shared by the JSON and collapsed writers
pub(crate) fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories if needed
///
/// **Private** - shared by the JSON and collapsed writers
pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                )))?;
        }
    }
    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path)
        .map(|m| m.len())
        .unwrap_or(0)
}

fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
