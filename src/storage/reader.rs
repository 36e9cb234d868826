//! Data file reader
//!
//! - The first line is the header and is discarded unread
//! - Blank lines are skipped
//! - Malformed rows surface as skippable errors; the caller decides
//! - Invalid UTF-8 is replaced, not rejected, so one bad byte costs at most
//!   one field

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::codec::decode_row;
use super::errors::{StorageError, StorageResult};
use crate::model::Item;

/// Sequential reader over the rows of a data file.
pub struct ItemReader {
    path: PathBuf,
    reader: BufReader<File>,
    /// 1-based number of the last line read
    line_number: usize,
    buf: Vec<u8>,
}

impl ItemReader {
    /// Opens a data file and consumes its header line.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` if the file does not exist
    /// - `Ok(Some(reader))` positioned at the first data row
    ///
    /// # Errors
    ///
    /// Returns `VAULT_STORAGE_READ_FAILED` if the file exists but cannot be
    /// opened or its header cannot be read.
    pub fn open(path: &Path) -> StorageResult<Option<Self>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::read_failed(
                    format!("Failed to open data file: {}", path.display()),
                    e,
                ))
            }
        };

        let mut reader = Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            line_number: 0,
            buf: Vec::new(),
        };

        // Header
        reader.next_line()?;

        Ok(Some(reader))
    }

    /// Returns the data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of the last line read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next non-blank row.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` at end of file
    /// - `Ok(Some(Ok(item)))` for a decoded row
    /// - `Ok(Some(Err(e)))` for a malformed row (`e.is_skippable()`)
    ///
    /// # Errors
    ///
    /// Returns `VAULT_STORAGE_READ_FAILED` if the underlying read fails.
    pub fn read_next(&mut self) -> StorageResult<Option<StorageResult<Item>>> {
        loop {
            let Some(line) = self.next_line()? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            let line_number = self.line_number;
            return Ok(Some(
                decode_row(&line).map_err(|e| e.at_line(line_number)),
            ));
        }
    }

    fn next_line(&mut self) -> StorageResult<Option<String>> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf).map_err(|e| {
            StorageError::read_failed(
                format!(
                    "Failed to read line {} of {}",
                    self.line_number + 1,
                    self.path.display()
                ),
                e,
            )
        })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
