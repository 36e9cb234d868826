//! Id generator
//!
//! - Ids start at 1 and only grow within a session
//! - Removing an item never gives its id back
//! - After a load the generator restarts at `max(loaded ids) + 1`
//! - Past `ItemId::MAX` the generator is exhausted and hands out nothing

use crate::model::ItemId;

/// First id handed out by an empty collection
const FIRST_ID: ItemId = 1;

/// Hands out fresh item ids.
///
/// Owned by the repository; there is no process-wide counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    /// `None` once every id has been handed out
    next: Option<ItemId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: Some(FIRST_ID),
        }
    }

    /// Restarts after the largest id in `ids`, or at 1 when there are none.
    pub fn after<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        let next = match ids.into_iter().max() {
            Some(max) => max.checked_add(1),
            None => Some(FIRST_ID),
        };
        Self { next }
    }

    /// Returns the id the next call to [`generate`](Self::generate) yields.
    pub fn peek(&self) -> Option<ItemId> {
        self.next
    }

    /// Takes the next id, or `None` when the id space is used up.
    pub fn generate(&mut self) -> Option<ItemId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
