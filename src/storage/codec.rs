//! Delimited row codec
//!
//! Row format (one item per line, fields in this order):
//!
//! ```text
//! Id;Name;Description;Rarity;Kind;Weight;Length;Slots;MakerName;MakerCity;RequiredLevel;Price;Durability;CreatedAt
//! ```
//!
//! Quoting:
//! - A field is wrapped in `"` only when it contains `;`, `"` or a tab
//! - Inside a quoted field `""` stands for one literal `"`
//! - Empty text is written as nothing, never as `""`
//!
//! Numbers use `.` as decimal point and no grouping. The timestamp is
//! RFC 3339 with its UTC offset and as many sub-second digits as needed.
//!
//! Decoding is best-effort: a row is rejected only when it has fewer than
//! [`FIELD_COUNT`] fields. Any single field that fails to parse falls back
//! to its default instead of losing the row.

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat};

use super::errors::{StorageError, StorageResult};
use crate::model::{now, Item, ItemDraft, ItemKind, ItemSize, Maker, Rarity, Timestamp, UNKNOWN_MAKER};

/// Field separator
pub const SEPARATOR: char = ';';

/// Optional quote character
pub const QUOTE: char = '"';

/// Fields per row
pub const FIELD_COUNT: usize = 14;

/// First line of every data file
pub const HEADER: &str =
    "Id;Name;Description;Rarity;Kind;Weight;Length;Slots;MakerName;MakerCity;RequiredLevel;Price;Durability;CreatedAt";

/// Quotes a text field if it needs it.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    let needs_quotes = value.contains([SEPARATOR, QUOTE, '\t']);
    if !needs_quotes {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    Cow::Owned(out)
}

/// Splits a row into unescaped fields.
///
/// Outside quotes a `;` ends the field and a `"` starts quoting, wherever it
/// appears. Inside quotes `""` is a literal quote and a lone `"` ends
/// quoting. An unterminated quote runs to the end of the line.
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    current.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == SEPARATOR {
            fields.push(std::mem::take(&mut current));
        } else if c == QUOTE {
            in_quotes = true;
        } else {
            current.push(c);
        }
    }
    fields.push(current);

    fields
}

/// Serializes an item to one row, without line terminator.
pub fn encode_item(item: &Item) -> String {
    let created_at = item
        .created_at()
        .to_rfc3339_opts(SecondsFormat::AutoSi, false);

    let fields: [Cow<'_, str>; FIELD_COUNT] = [
        Cow::Owned(item.id().to_string()),
        escape_field(&item.name),
        escape_field(&item.description),
        Cow::Borrowed(item.rarity.name()),
        Cow::Borrowed(item.kind.name()),
        Cow::Owned(item.size.weight.to_string()),
        Cow::Owned(item.size.length.to_string()),
        Cow::Owned(item.size.slots.to_string()),
        escape_field(&item.maker.name),
        escape_field(&item.maker.city),
        Cow::Owned(item.required_level.to_string()),
        Cow::Owned(item.price.to_string()),
        Cow::Owned(item.durability.to_string()),
        Cow::Owned(created_at),
    ];

    fields.join(";")
}

/// Parses one row back into an item.
///
/// # Errors
///
/// Returns `VAULT_MALFORMED_ROW` when the row has fewer than
/// [`FIELD_COUNT`] fields. Nothing else fails.
pub fn decode_row(line: &str) -> StorageResult<Item> {
    let fields = split_row(line);
    if fields.len() < FIELD_COUNT {
        return Err(StorageError::malformed_row(fields.len(), FIELD_COUNT));
    }

    let maker_name = if fields[8].is_empty() {
        UNKNOWN_MAKER.to_string()
    } else {
        fields[8].clone()
    };

    let draft = ItemDraft {
        name: fields[1].clone(),
        description: fields[2].clone(),
        rarity: fields[3].parse::<Rarity>().unwrap_or_default(),
        kind: fields[4].parse::<ItemKind>().unwrap_or_default(),
        size: ItemSize {
            weight: float_or_zero(&fields[5]),
            length: float_or_zero(&fields[6]),
            slots: int_or_zero(&fields[7]),
        },
        maker: Maker::new(maker_name, fields[9].clone()),
        required_level: int_or_zero(&fields[10]),
        price: float_or_zero(&fields[11]),
        durability: int_or_zero(&fields[12]),
    };

    Ok(Item::new(
        int_or_zero(&fields[0]),
        draft,
        timestamp_or_now(&fields[13]),
    ))
}

fn int_or_zero(field: &str) -> u32 {
    field.trim().parse().unwrap_or(0)
}

fn float_or_zero(field: &str) -> f64 {
    field.trim().parse().unwrap_or(0.0)
}

fn timestamp_or_now(field: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(field.trim()).unwrap_or_else(|_| now())
}
