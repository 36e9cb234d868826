//! Value types that make up an item
//!
//! Enumerations carry two stable representations:
//! - name: written to the data file, matched case-insensitively on read
//! - ordinal: 1-based number offered by the field prompts

use std::fmt;
use std::str::FromStr;

use super::errors::ValidationError;

/// Maker name used when none was recorded
pub const UNKNOWN_MAKER: &str = "Unknown";

/// How rare an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All variants in canonical order
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    /// Names joined for prompts and error messages
    pub const CHOICES: &'static str = "Common, Rare, Epic, Legendary";

    /// Returns the name used in the data file
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Returns the 1-based ordinal
    pub fn ordinal(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }

    /// Looks up a variant by its 1-based ordinal
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.ordinal() == ordinal)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rarity {
    type Err = ValidationError;

    /// Accepts a name in any case or an ordinal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_ordinal = s.parse::<u32>().ok().and_then(Rarity::from_ordinal);
        by_ordinal
            .or_else(|| {
                Rarity::ALL
                    .into_iter()
                    .find(|r| r.name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "rarity",
                value: s.to_string(),
                choices: Rarity::CHOICES,
            })
    }
}

/// What sort of thing an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    #[default]
    Misc,
}

impl ItemKind {
    /// All variants in canonical order
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Weapon,
        ItemKind::Armor,
        ItemKind::Potion,
        ItemKind::Misc,
    ];

    /// Names joined for prompts and error messages
    pub const CHOICES: &'static str = "Weapon, Armor, Potion, Misc";

    /// Returns the name used in the data file
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "Weapon",
            ItemKind::Armor => "Armor",
            ItemKind::Potion => "Potion",
            ItemKind::Misc => "Misc",
        }
    }

    /// Returns the 1-based ordinal
    pub fn ordinal(&self) -> u32 {
        match self {
            ItemKind::Weapon => 1,
            ItemKind::Armor => 2,
            ItemKind::Potion => 3,
            ItemKind::Misc => 4,
        }
    }

    /// Looks up a variant by its 1-based ordinal
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.ordinal() == ordinal)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemKind {
    type Err = ValidationError;

    /// Accepts a name in any case or an ordinal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let by_ordinal = s.parse::<u32>().ok().and_then(ItemKind::from_ordinal);
        by_ordinal
            .or_else(|| {
                ItemKind::ALL
                    .into_iter()
                    .find(|k| k.name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| ValidationError::UnknownVariant {
                field: "kind",
                value: s.to_string(),
                choices: ItemKind::CHOICES,
            })
    }
}

/// Physical footprint of an item
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemSize {
    /// Weight, >= 0
    pub weight: f64,
    /// Length, >= 0
    pub length: f64,
    /// Inventory slots taken
    pub slots: u32,
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[weight={}, length={}, slots={}]",
            self.weight, self.length, self.slots
        )
    }
}

/// Who made an item, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maker {
    pub name: String,
    /// Empty when unknown
    pub city: String,
}

impl Maker {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }
}

impl Default for Maker {
    fn default() -> Self {
        Self::new(UNKNOWN_MAKER, "")
    }
}

impl fmt::Display for Maker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.city.trim().is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} ({})", self.name, self.city)
        }
    }
}
