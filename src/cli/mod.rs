//! CLI module for itemvault
//!
//! Startup sequence:
//! 1. Parse arguments and load configuration
//! 2. Install logging
//! 3. Resolve the data file (argument, prompt, or configured default)
//! 4. Load it and hand the console to a [`Session`]

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod logging;
mod session;

use std::io::{stdin, stdout, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

pub use args::Cli;
pub use commands::{help_text, parse_line, CommandName, Flow, Invocation, RunMode, COMMANDS};
pub use config::{Config, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use errors::{CliError, CliErrorCode, CliResult, CommandError, CommandResult};
pub use io::Console;
pub use logging::init_logging;
pub use session::Session;

use crate::repository::{LoadReport, Repository};

/// Run the CLI
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::discover()?;
    init_logging(&config);

    let mut console = Console::new(stdin().lock(), stdout());
    let data_path = match cli.file {
        Some(path) => path,
        None => ask_data_path(&mut console, &config)?,
    };

    let repository = open_repository(&mut console, &data_path)?;
    console.say("Ready. Type 'help' for the list of commands.")?;

    let mut session = Session::new(repository, data_path, config, console);
    session.run_interactive()
}

/// Prompts for the data file; empty input picks the configured default.
pub fn ask_data_path<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> CliResult<PathBuf> {
    console.prompt(&format!("Data file (Enter = {}): ", config.default_data_file))?;
    let answer = console.read_line()?.unwrap_or_default();
    let answer = answer.trim();

    Ok(PathBuf::from(if answer.is_empty() {
        config.default_data_file.as_str()
    } else {
        answer
    }))
}

/// Loads the data file and reports the outcome.
///
/// A file that cannot be read is reported and the session starts empty.
pub fn open_repository<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    data_path: &Path,
) -> CliResult<Repository> {
    match Repository::open(data_path) {
        Ok((repository, report)) => {
            console.say(load_message(&report, data_path))?;
            Ok(repository)
        }
        Err(e) => {
            error!(path = %data_path.display(), error = %e, "failed to load data file");
            console.say(format_args!("[error] {}", e))?;
            info!("starting with an empty collection");
            Ok(Repository::new())
        }
    }
}

fn load_message(report: &LoadReport, data_path: &Path) -> String {
    if !report.found {
        return "File not found, starting with an empty collection".to_string();
    }
    let mut message = format!("Loaded {} items from {}", report.loaded, data_path.display());
    if report.skipped > 0 {
        message.push_str(&format!(" ({} malformed rows skipped)", report.skipped));
    }
    message
}
