//! Item record and its editable draft

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};

use super::errors::ValidationResult;
use super::types::{ItemKind, ItemSize, Maker, Rarity};
use super::validator::{
    check_min, check_range, check_text, DURABILITY_RANGE, LEVEL_RANGE,
};

/// Item identifier, unique within a collection
pub type ItemId = u32;

/// Creation timestamp, kept with its UTC offset so it round-trips exactly
pub type Timestamp = DateTime<FixedOffset>;

/// Current local time with offset.
pub fn now() -> Timestamp {
    Local::now().fixed_offset()
}

/// The user-editable fields of an item.
///
/// Produced by interactive entry and consumed by insert and update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub kind: ItemKind,
    pub size: ItemSize,
    pub maker: Maker,
    pub required_level: u32,
    pub price: f64,
    pub durability: u32,
}

impl ItemDraft {
    /// Checks every bounded field.
    ///
    /// Slots only need to be non-negative here, which the type guarantees.
    pub fn validate(&self) -> ValidationResult<()> {
        check_text("name", &self.name)?;
        check_text("maker name", &self.maker.name)?;
        check_range("required level", self.required_level, &LEVEL_RANGE)?;
        check_min("price", self.price, 0.0)?;
        check_range("durability", self.durability, &DURABILITY_RANGE)?;
        check_min("weight", self.size.weight, 0.0)?;
        check_min("length", self.size.length, 0.0)?;
        Ok(())
    }
}

/// A stored item.
///
/// `id` and `created_at` are fixed at construction; every other field is
/// replaced as a whole by [`Item::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub kind: ItemKind,
    pub size: ItemSize,
    pub maker: Maker,
    pub required_level: u32,
    pub price: f64,
    pub durability: u32,
    created_at: Timestamp,
}

impl Item {
    /// Builds an item from a draft. No validation happens here; stored rows
    /// are trusted as read.
    pub fn new(id: ItemId, draft: ItemDraft, created_at: Timestamp) -> Self {
        let ItemDraft {
            name,
            description,
            rarity,
            kind,
            size,
            maker,
            required_level,
            price,
            durability,
        } = draft;

        Self {
            id,
            name,
            description,
            rarity,
            kind,
            size,
            maker,
            required_level,
            price,
            durability,
            created_at,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Replaces every editable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, draft: ItemDraft) {
        *self = Item::new(self.id, draft, self.created_at);
    }

    /// Copies the editable fields out.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            rarity: self.rarity,
            kind: self.kind,
            size: self.size,
            maker: self.maker.clone(),
            required_level: self.required_level,
            price: self.price,
            durability: self.durability,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {} ({}, {}), price {}, level {}, durability {}, created {}, size {}, maker: {}",
            self.id,
            self.name,
            self.kind,
            self.rarity,
            self.price,
            self.required_level,
            self.durability,
            self.created_at.format("%Y-%m-%d %H:%M"),
            self.size,
            self.maker,
        )?;
        if !self.description.trim().is_empty() {
            write!(f, ", description: {}", self.description)?;
        }
        Ok(())
    }
}
