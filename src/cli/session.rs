//! Interactive session and script replay
//!
//! A session owns the repository and the console. Each input line goes
//! through [`Session::execute_line`]; a failed command is printed as
//! `[label] message` and the session carries on. Only console I/O failures
//! end the session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::commands::{help_text, parse_id_argument, parse_line, CommandName, Flow, RunMode};
use super::config::Config;
use super::errors::{CliResult, CommandError, CommandResult};
use super::io::Console;
use crate::model::{now, ItemId, ItemKind, Timestamp};
use crate::repository::{Repository, RepositoryError};

/// One user session over a console
pub struct Session<R, W> {
    repository: Repository,
    data_path: PathBuf,
    started_at: Timestamp,
    config: Config,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        repository: Repository,
        data_path: PathBuf,
        config: Config,
        console: Console<R, W>,
    ) -> Self {
        Self {
            repository,
            data_path,
            started_at: now(),
            config,
            console,
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Reads and runs commands until `exit` or end of input.
    pub fn run_interactive(&mut self) -> CliResult<()> {
        loop {
            self.console.prompt("\n> ")?;
            let Some(line) = self.console.read_line()? else {
                debug!("input closed, leaving session");
                return Ok(());
            };
            if self.execute_line(&line, RunMode::Interactive)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Runs one input line.
    ///
    /// Command failures are printed and swallowed. The error path is taken
    /// only when the console itself fails.
    pub fn execute_line(&mut self, line: &str, mode: RunMode) -> CliResult<Flow> {
        Ok(self.run_line(line, mode)?)
    }

    fn run_line(&mut self, line: &str, mode: RunMode) -> io::Result<Flow> {
        let Some(invocation) = parse_line(line) else {
            return Ok(Flow::Continue);
        };

        let result = invocation
            .command()
            .and_then(|command| self.dispatch(command, invocation.argument, mode));

        match result {
            Ok(flow) => Ok(flow),
            Err(CommandError::Io(e)) => Err(e),
            Err(e) => {
                warn!(command = invocation.keyword, error = %e, "command failed");
                self.console.say(format_args!("[{}] {}", e.label(), e))?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(
        &mut self,
        command: CommandName,
        argument: Option<&str>,
        mode: RunMode,
    ) -> CommandResult<Flow> {
        match command {
            CommandName::Help => self.console.say(help_text())?,
            CommandName::Info => self.info()?,
            CommandName::Show => self.show()?,
            CommandName::Insert => self.insert()?,
            CommandName::Update => self.update(parse_id_argument(command, argument)?)?,
            CommandName::RemoveKey => self.remove(parse_id_argument(command, argument)?)?,
            CommandName::Clear => self.clear()?,
            CommandName::Save => self.save(argument)?,
            CommandName::ExecuteScript => self.execute_script(argument, mode)?,
            CommandName::Exit => return Ok(Flow::Exit),
            CommandName::FilterKind => self.filter_kind(argument)?,
            CommandName::GroupByRarity => self.group_by_rarity()?,
            CommandName::Count => self.console.say(self.repository.count())?,
        }
        Ok(Flow::Continue)
    }

    fn info(&mut self) -> CommandResult<()> {
        let out = self.console.output();
        writeln!(out, "Collection: ordered map of items by id")?;
        writeln!(out, "Data file: {}", self.data_path.display())?;
        writeln!(out, "Items: {}", self.repository.count())?;
        match self.repository.next_id() {
            Some(id) => writeln!(out, "Next id: {}", id)?,
            None => writeln!(out, "Next id: none left")?,
        }
        writeln!(
            out,
            "Session started: {}",
            self.started_at.format("%Y-%m-%d %H:%M")
        )?;
        Ok(())
    }

    fn show(&mut self) -> CommandResult<()> {
        if self.repository.is_empty() {
            self.console.say("Empty.")?;
            return Ok(());
        }
        for item in self.repository.iter() {
            self.console.say(item)?;
        }
        Ok(())
    }

    fn insert(&mut self) -> CommandResult<()> {
        let draft = self.console.read_draft()?;
        let id = self.repository.insert(draft)?;
        self.console.say(format_args!("Added item #{}.", id))?;
        Ok(())
    }

    fn update(&mut self, id: ItemId) -> CommandResult<()> {
        let Some(current) = self.repository.get(id) else {
            return Err(RepositoryError::NotFound(id).into());
        };
        self.console.say(format_args!("Current: {}", current))?;

        let draft = self.console.read_draft()?;
        self.repository.update(id, draft)?;
        self.console.say(format_args!("Updated item #{}.", id))?;
        Ok(())
    }

    fn remove(&mut self, id: ItemId) -> CommandResult<()> {
        self.repository.remove(id)?;
        self.console.say(format_args!("Removed item #{}.", id))?;
        Ok(())
    }

    fn clear(&mut self) -> CommandResult<()> {
        let removed = self.repository.count();
        self.repository.clear();
        self.console.say(format_args!("Cleared {} items.", removed))?;
        Ok(())
    }

    fn save(&mut self, argument: Option<&str>) -> CommandResult<()> {
        let path = argument.map_or_else(|| self.data_path.clone(), PathBuf::from);
        let rows = self.repository.save(&path)?;
        self.console
            .say(format_args!("Saved {} items to {}", rows, path.display()))?;
        Ok(())
    }

    fn execute_script(&mut self, argument: Option<&str>, mode: RunMode) -> CommandResult<()> {
        if mode == RunMode::Script {
            return Err(CommandError::NestedScript);
        }
        let path = argument.ok_or(CommandError::Usage(CommandName::ExecuteScript.usage()))?;

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CommandError::ScriptNotFound(path.to_string()),
            _ => CommandError::ScriptRead {
                path: path.to_string(),
                source: e,
            },
        })?;

        let content = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = content.lines().collect();
        info!(script = path, lines = lines.len(), "running script");
        self.console
            .say(format_args!("Script {}: {} lines", path, lines.len()))?;

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            if self.config.echo_script_commands {
                self.console.say(format_args!("> {}", line))?;
            }
            if self.run_line(line, RunMode::Script)? == Flow::Exit {
                debug!(script = path, "exit inside script");
                break;
            }
        }
        info!(script = path, "script finished");
        Ok(())
    }

    fn filter_kind(&mut self, argument: Option<&str>) -> CommandResult<()> {
        let argument = argument.ok_or(CommandError::Usage(CommandName::FilterKind.usage()))?;
        let kind: ItemKind = argument.parse()?;

        let mut shown = 0;
        for item in self.repository.filter_by_kind(kind) {
            self.console.say(item)?;
            shown += 1;
        }
        if shown == 0 {
            self.console.say(format_args!("No {} items.", kind))?;
        }
        Ok(())
    }

    fn group_by_rarity(&mut self) -> CommandResult<()> {
        if self.repository.is_empty() {
            self.console.say("Empty.")?;
            return Ok(());
        }
        for (rarity, items) in self.repository.group_by_rarity() {
            self.console.say(format_args!("\n{}:", rarity))?;
            for item in items {
                self.console.say(format_args!("  {}", item))?;
            }
        }
        Ok(())
    }
}
