//! Delimited-file storage for itemvault
//!
//! The data file is UTF-8 text: one header line, then one `;`-separated row
//! per item. See [`codec`] for the row format.
//!
//! # Design Principles
//!
//! - A save rewrites the whole file; there are no partial updates
//! - Loads are best-effort: a malformed row is skipped, never fatal
//! - A single bad field falls back to its default instead of losing the row
//! - File handles never outlive the call that opened them

pub mod codec;
mod errors;
mod reader;
mod writer;

pub use codec::{decode_row, encode_item, split_row, FIELD_COUNT, HEADER};
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use reader::ItemReader;
pub use writer::{write_items, ItemWriter};
