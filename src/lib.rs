//! itemvault - interactive manager for game item records
//!
//! Items live in memory during a session and are persisted to a
//! semicolon-delimited text file on `save`.

pub mod cli;
pub mod model;
pub mod repository;
pub mod storage;
