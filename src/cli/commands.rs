//! # Command Table
//!
//! Every command the session understands, with its usage line and a short
//! summary. Dispatch and `help` both read from [`COMMANDS`].
//!
//! ## Parsing
//!
//! A line is a command name followed by an optional argument: everything
//! after the first space, trimmed. Names are case-insensitive. Blank lines
//! parse to nothing.

use super::errors::{CommandError, CommandResult};
use crate::model::ItemId;

/// Known commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Help,
    Info,
    Show,
    Insert,
    Update,
    RemoveKey,
    Clear,
    Save,
    ExecuteScript,
    Exit,
    FilterKind,
    GroupByRarity,
    Count,
}

/// Table entry for one command
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    pub name: CommandName,
    pub keyword: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: CommandName::Help,
        keyword: "help",
        usage: "help",
        summary: "show this list",
    },
    CommandEntry {
        name: CommandName::Info,
        keyword: "info",
        usage: "info",
        summary: "describe the collection",
    },
    CommandEntry {
        name: CommandName::Show,
        keyword: "show",
        usage: "show",
        summary: "print every item",
    },
    CommandEntry {
        name: CommandName::Insert,
        keyword: "insert",
        usage: "insert",
        summary: "add an item, field by field",
    },
    CommandEntry {
        name: CommandName::Update,
        keyword: "update",
        usage: "update <id>",
        summary: "re-enter every field of an item",
    },
    CommandEntry {
        name: CommandName::RemoveKey,
        keyword: "remove_key",
        usage: "remove_key <id>",
        summary: "remove an item by id",
    },
    CommandEntry {
        name: CommandName::Clear,
        keyword: "clear",
        usage: "clear",
        summary: "remove every item",
    },
    CommandEntry {
        name: CommandName::Save,
        keyword: "save",
        usage: "save [file]",
        summary: "write the collection to the data file",
    },
    CommandEntry {
        name: CommandName::ExecuteScript,
        keyword: "execute_script",
        usage: "execute_script <file>",
        summary: "run commands from a file (not from inside a script)",
    },
    CommandEntry {
        name: CommandName::Exit,
        keyword: "exit",
        usage: "exit",
        summary: "leave without saving",
    },
    CommandEntry {
        name: CommandName::FilterKind,
        keyword: "filter_kind",
        usage: "filter_kind <Weapon|Armor|Potion|Misc>",
        summary: "show items of one kind",
    },
    CommandEntry {
        name: CommandName::GroupByRarity,
        keyword: "group_by_rarity",
        usage: "group_by_rarity",
        summary: "show items grouped by rarity",
    },
    CommandEntry {
        name: CommandName::Count,
        keyword: "count",
        usage: "count",
        summary: "print the number of items",
    },
];

impl CommandName {
    /// Finds a command by keyword, ignoring ASCII case.
    pub fn lookup(keyword: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|entry| entry.keyword.eq_ignore_ascii_case(keyword))
            .map(|entry| entry.name)
    }

    /// Table entry; [`COMMANDS`] is in declaration order.
    pub fn entry(self) -> &'static CommandEntry {
        &COMMANDS[self as usize]
    }

    pub fn usage(self) -> &'static str {
        self.entry().usage
    }
}

/// Help listing built from the table.
pub fn help_text() -> String {
    let width = COMMANDS.iter().map(|c| c.usage.len()).max().unwrap_or(0);
    let mut text = String::from("Commands:");
    for entry in COMMANDS {
        text.push_str(&format!("\n  {:<width$}  {}", entry.usage, entry.summary));
    }
    text
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub keyword: &'a str,
    pub argument: Option<&'a str>,
}

impl<'a> Invocation<'a> {
    /// Resolves the keyword against the table.
    pub fn command(&self) -> CommandResult<CommandName> {
        CommandName::lookup(self.keyword)
            .ok_or_else(|| CommandError::UnknownCommand(self.keyword.to_string()))
    }
}

/// Splits a line into keyword and argument. `None` for a blank line.
pub fn parse_line(line: &str) -> Option<Invocation<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (keyword, argument) = match line.split_once(' ') {
        Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|a| !a.is_empty())),
        None => (line, None),
    };

    Some(Invocation { keyword, argument })
}

/// Parses the id argument of `command`, or fails with its usage line.
pub fn parse_id_argument(command: CommandName, argument: Option<&str>) -> CommandResult<ItemId> {
    argument
        .and_then(|a| a.parse::<ItemId>().ok())
        .ok_or(CommandError::Usage(command.usage()))
}

/// What the session does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Where the current line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Script,
}
