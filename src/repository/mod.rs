//! Item repository for itemvault
//!
//! The repository owns the id→item map and is the only place items are
//! created, changed or persisted.
//!
//! # Design Principles
//!
//! - Ids are unique and never reused within a session
//! - Drafts are validated before they are stored
//! - Persistence failures leave the in-memory collection untouched
//! - A load replaces the collection and resets the id generator

mod errors;
mod ids;
mod store;

pub use errors::{RepositoryError, RepositoryResult};
pub use ids::IdGenerator;
pub use store::{LoadReport, Repository};
