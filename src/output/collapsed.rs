//! Collapsed stack output writer.
//!
//! Writes one "stack weight" line per call path, ready for external
//! flamegraph tools.

use super::json::{create_parent_dirs, validate_output_path};
use crate::aggregator::CollapsedStack;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write collapsed stacks to a file
///
/// **Public** - main entry point for collapsed output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_collapsed(
    stacks: &[CollapsedStack],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} collapsed stacks to: {}", stacks.len(), output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path)
        .map_err(OutputError::WriteFailed)?;

    let mut writer = BufWriter::new(file);

    for stack in stacks {
        writeln!(writer, "{}", stack.to_line())
            .map_err(OutputError::WriteFailed)?;
    }

    writer.flush()
        .map_err(OutputError::WriteFailed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_collapsed_lines() {
        let temp_file = NamedTempFile::new().unwrap();
        let stacks = vec![
            CollapsedStack::new("a;b".to_string(), 30),
            CollapsedStack::new("a".to_string(), 10),
        ];

        write_collapsed(&stacks, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "a;b 30\na 10\n");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/stacks.folded");

        write_collapsed(&[], &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_directory_path_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(write_collapsed(&[], temp_dir.path()).is_err());
    }
}
