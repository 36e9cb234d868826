//! Data file writer
//!
//! A save rewrites the whole file: header first, then one row per item.
//! The handle is flushed and synced by [`ItemWriter::finish`]; on any error
//! it is dropped (and closed) before the error reaches the caller.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::codec::{encode_item, HEADER};
use super::errors::{StorageError, StorageResult};
use crate::model::Item;

/// Writer for a single save of the collection.
pub struct ItemWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    rows_written: usize,
}

impl ItemWriter {
    /// Creates (or truncates) the data file and writes the header.
    ///
    /// # Errors
    ///
    /// Returns `VAULT_STORAGE_WRITE_FAILED` if the file cannot be created or
    /// the header cannot be written.
    pub fn create(path: &Path) -> StorageResult<Self> {
        let file = File::create(path).map_err(|e| {
            StorageError::write_failed(
                format!("Failed to create data file: {}", path.display()),
                e,
            )
        })?;

        let mut writer = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            rows_written: 0,
        };
        writer.write_line(HEADER)?;

        Ok(writer)
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one item row.
    pub fn write_item(&mut self, item: &Item) -> StorageResult<()> {
        self.write_line(&encode_item(item))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flushes and syncs the file, returning the number of rows written.
    ///
    /// # Errors
    ///
    /// - `VAULT_STORAGE_WRITE_FAILED` if buffered rows cannot be flushed
    /// - `VAULT_STORAGE_IO_ERROR` if fsync fails
    pub fn finish(mut self) -> StorageResult<usize> {
        self.writer.flush().map_err(|e| {
            StorageError::write_failed(format!("Failed to flush {}", self.path.display()), e)
        })?;

        self.writer.get_ref().sync_all().map_err(|e| {
            StorageError::io_error(format!("fsync failed for {}", self.path.display()), e)
        })?;

        Ok(self.rows_written)
    }

    fn write_line(&mut self, line: &str) -> StorageResult<()> {
        writeln!(self.writer, "{}", line).map_err(|e| {
            StorageError::write_failed(format!("Failed to write {}", self.path.display()), e)
        })
    }
}

/// Writes a complete data file from a sequence of items.
pub fn write_items<'a>(
    path: &Path,
    items: impl IntoIterator<Item = &'a Item>,
) -> StorageResult<usize> {
    let mut writer = ItemWriter::create(path)?;
    for item in items {
        writer.write_item(item)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemDraft, Timestamp};
    use chrono::DateTime;
    use std::fs;
    use tempfile::TempDir;

    fn created() -> Timestamp {
        DateTime::parse_from_rfc3339("2026-10-19T08:00:00+00:00").unwrap()
    }

    fn item(id: u32, name: &str) -> Item {
        let draft = ItemDraft {
            name: name.into(),
            ..ItemDraft::default()
        };
        Item::new(id, draft, created())
    }

    #[test]
    fn test_empty_save_writes_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.csv");

        let written = write_items(&path, []).unwrap();

        assert_eq!(written, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", HEADER));
    }

    #[test]
    fn test_rows_follow_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.csv");
        let items = [item(1, "Sword"), item(2, "Shield")];

        let written = write_items(&path, &items).unwrap();

        assert_eq!(written, 2);
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("1;Sword;"));
        assert!(lines[2].starts_with("2;Shield;"));
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.csv");
        fs::write(&path, "old contents that are much longer than the new file\n".repeat(50))
            .unwrap();

        write_items(&path, &[item(1, "Sword")]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("old contents"));
    }

    #[test]
    fn test_writer_counts_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("items.csv");

        let mut writer = ItemWriter::create(&path).unwrap();
        assert_eq!(writer.path(), path.as_path());
        writer.write_item(&item(4, "Ring")).unwrap();
        writer.write_item(&item(9, "Amulet")).unwrap();

        assert_eq!(writer.finish().unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_unwritable_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing_dir").join("items.csv");

        let err = write_items(&path, []).unwrap_err();
        assert_eq!(err.code().code(), "VAULT_STORAGE_WRITE_FAILED");
    }
}
