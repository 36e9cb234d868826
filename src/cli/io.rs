//! Line-oriented console I/O for the session
//!
//! - Input: one command or field value per line
//! - Output: plain text, flushed after every prompt
//! - Invalid UTF-8 in input is replaced, not rejected

use std::io::{self, BufRead, Write};

use super::errors::{CommandError, CommandResult};
use crate::model::{
    parse_float_min, parse_int_in_range, parse_kind_choice, parse_rarity_choice, require_text,
    ItemDraft, ItemSize, Maker, ValidationResult, DURABILITY_RANGE, LEVEL_RANGE, SLOTS_RANGE,
};

/// Console bound to an input and output stream
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Writes `text` without a newline and flushes.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Writes one full line.
    pub fn say(&mut self, line: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Prompts for `label` until `parse` accepts the input.
    ///
    /// # Errors
    ///
    /// `CommandError::InputClosed` if input ends before a valid value.
    pub fn ask<T>(
        &mut self,
        label: &'static str,
        parse: impl Fn(&str) -> ValidationResult<T>,
    ) -> CommandResult<T> {
        loop {
            self.prompt(&format!("{}: ", label))?;
            let Some(line) = self.read_line()? else {
                return Err(CommandError::InputClosed(label));
            };
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(format_args!("  {}, try again", e))?,
            }
        }
    }

    /// Prompts for every editable field, in entry order.
    pub fn read_draft(&mut self) -> CommandResult<ItemDraft> {
        let name = self.ask("Name (required)", |s| require_text("name", s))?;
        let description = self.ask("Description", |s| Ok(s.to_string()))?;
        let rarity = self.ask(
            "Rarity 1-Common, 2-Rare, 3-Epic, 4-Legendary",
            parse_rarity_choice,
        )?;
        let kind = self.ask("Kind 1-Weapon, 2-Armor, 3-Potion, 4-Misc", parse_kind_choice)?;
        let maker_name = self.ask("Maker name (required)", |s| require_text("maker name", s))?;
        let maker_city = self.ask("Maker city", |s| Ok(s.to_string()))?;
        let required_level = self.ask("Required level (1..60)", |s| {
            parse_int_in_range("required level", s, &LEVEL_RANGE)
        })?;
        let price = self.ask("Price (>= 0)", |s| parse_float_min("price", s, 0.0))?;
        let durability = self.ask("Durability (0..100)", |s| {
            parse_int_in_range("durability", s, &DURABILITY_RANGE)
        })?;
        let weight = self.ask("Weight (>= 0)", |s| parse_float_min("weight", s, 0.0))?;
        let length = self.ask("Length (>= 0)", |s| parse_float_min("length", s, 0.0))?;
        let slots = self.ask("Slots (0..999)", |s| parse_int_in_range("slots", s, &SLOTS_RANGE))?;

        Ok(ItemDraft {
            name,
            description,
            rarity,
            kind,
            size: ItemSize {
                weight,
                length,
                slots,
            },
            maker: Maker::new(maker_name, maker_city),
            required_level,
            price,
            durability,
        })
    }
}
