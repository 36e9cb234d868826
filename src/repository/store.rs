//! In-memory item store with file persistence

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, warn};

use super::errors::{RepositoryError, RepositoryResult};
use super::ids::IdGenerator;
use crate::model::{now, Item, ItemDraft, ItemId, ItemKind, Rarity};
use crate::storage::{write_items, ItemReader};

/// Outcome of loading a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Whether the file existed
    pub found: bool,
    /// Rows decoded and stored (duplicate ids count once per row)
    pub loaded: usize,
    /// Malformed rows dropped
    pub skipped: usize,
}

/// Owner of the item collection.
///
/// Items are kept ordered by id, which is also creation order for ids handed
/// out by the generator. All mutation goes through this type.
#[derive(Debug, Default)]
pub struct Repository {
    items: BTreeMap<ItemId, Item>,
    ids: IdGenerator,
}

impl Repository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository from a data file.
    ///
    /// A missing file yields an empty repository.
    pub fn open(path: &Path) -> RepositoryResult<(Self, LoadReport)> {
        let mut repository = Self::new();
        let report = repository.load(path)?;
        Ok((repository, report))
    }

    /// Stores a new item built from `draft`.
    ///
    /// Assigns a fresh id and stamps the creation time.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::Invalid` if the draft breaks a field rule
    /// - `RepositoryError::IdsExhausted` if no fresh id is left
    pub fn insert(&mut self, draft: ItemDraft) -> RepositoryResult<ItemId> {
        draft.validate()?;

        let id = self.ids.generate().ok_or(RepositoryError::IdsExhausted)?;
        self.items.insert(id, Item::new(id, draft, now()));
        debug!(id, "item inserted");
        Ok(id)
    }

    /// Replaces every editable field of an existing item.
    ///
    /// The id and creation time are preserved.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if no item has this id
    /// - `RepositoryError::Invalid` if the draft breaks a field rule
    pub fn update(&mut self, id: ItemId, draft: ItemDraft) -> RepositoryResult<&Item> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound(id))?;
        draft.validate()?;

        item.apply(draft);
        debug!(id, "item updated");
        Ok(&*item)
    }

    /// Removes an item, returning it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    pub fn remove(&mut self, id: ItemId) -> RepositoryResult<Item> {
        let item = self.items.remove(&id).ok_or(RepositoryError::NotFound(id))?;
        debug!(id, "item removed");
        Ok(item)
    }

    /// Removes every item. Ids already handed out stay used.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Iterates items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id the next insert will receive, `None` once ids are exhausted.
    pub fn next_id(&self) -> Option<ItemId> {
        self.ids.peek()
    }

    /// Items of one kind, in id order.
    pub fn filter_by_kind(&self, kind: ItemKind) -> impl Iterator<Item = &Item> + '_ {
        self.items.values().filter(move |item| item.kind == kind)
    }

    /// Items bucketed by rarity.
    ///
    /// Always returns all four buckets in canonical order
    /// (Common, Rare, Epic, Legendary), empty ones included.
    pub fn group_by_rarity(&self) -> Vec<(Rarity, Vec<&Item>)> {
        Rarity::ALL
            .into_iter()
            .map(|rarity| {
                let members = self
                    .items
                    .values()
                    .filter(|item| item.rarity == rarity)
                    .collect();
                (rarity, members)
            })
            .collect()
    }

    /// Writes the whole collection to `path`, replacing the file.
    ///
    /// Returns the number of rows written. The collection is never changed,
    /// whether the save succeeds or not.
    pub fn save(&self, path: &Path) -> RepositoryResult<usize> {
        match write_items(path, self.items.values()) {
            Ok(rows) => {
                info!(path = %path.display(), rows, "data file saved");
                Ok(rows)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "data file save failed");
                Err(e.into())
            }
        }
    }

    /// Replaces the collection with the contents of `path`.
    ///
    /// - Missing file: the collection becomes empty, not an error
    /// - Malformed rows are skipped and counted
    /// - Rows keep their stored id; a later row with the same id wins
    /// - The id generator restarts after the largest loaded id
    ///
    /// On a read error the collection is left as it was.
    pub fn load(&mut self, path: &Path) -> RepositoryResult<LoadReport> {
        let Some(mut reader) = ItemReader::open(path)? else {
            info!(path = %path.display(), "data file not found, starting empty");
            self.items.clear();
            self.ids = IdGenerator::new();
            return Ok(LoadReport::default());
        };

        let mut items = BTreeMap::new();
        let mut report = LoadReport {
            found: true,
            ..LoadReport::default()
        };

        while let Some(row) = reader.read_next()? {
            match row {
                Ok(item) => {
                    items.insert(item.id(), item);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping malformed row");
                    report.skipped += 1;
                }
            }
        }

        self.ids = IdGenerator::after(items.keys().copied());
        self.items = items;

        info!(
            path = %path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "data file loaded"
        );
        Ok(report)
    }
}
