//! Record model for itemvault
//!
//! An item is a fixed-shape record keyed by a numeric id. The user-editable
//! part of an item travels as an [`ItemDraft`]; the repository assigns the id
//! and creation timestamp.
//!
//! # Design Principles
//!
//! - Bounded fields are checked when written, never on read
//! - `id` and `created_at` are fixed at construction
//! - Enumerations have a stable name (file format) and ordinal (prompts)

mod errors;
mod item;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationResult};
pub use item::{now, Item, ItemDraft, ItemId, Timestamp};
pub use types::{ItemKind, ItemSize, Maker, Rarity, UNKNOWN_MAKER};
pub use validator::{
    parse_float_min, parse_int_in_range, parse_kind_choice, parse_rarity_choice, require_text,
    DURABILITY_RANGE, LEVEL_RANGE, SLOTS_RANGE,
};
