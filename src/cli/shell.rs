use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, DefaultEditor};
use shell_words::split;

use crate::{
    config::ConfigManager,
    storage::{JsonFileStore, KeyValueStore, LedgerPersistence},
    tracker::DebtTracker,
};

use super::{
    commands::{LoopControl, ShellContext},
    output, CliError, CliMode, SCRIPT_ENV,
};

const PROMPT: &str = "debts> ";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let store = JsonFileStore::new(manager.store_dir())?;
    let persistence =
        LedgerPersistence::with_key(store, config.storage_key.clone()).pretty(config.pretty_json);
    let tracker = DebtTracker::open(persistence)?;
    let mut context = ShellContext::new(tracker, config);

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => {
            output::disable_colors();
            run_script(&mut context)
        }
    }
}

fn run_interactive<S: KeyValueStore>(context: &mut ShellContext<S>) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    output::info("Debt Ledger. Type `help` for commands.");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(context, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script<S: KeyValueStore>(context: &mut ShellContext<S>) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if handle_line(context, &line) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one input line; command failures are reported and the shell keeps going.
fn handle_line<S: KeyValueStore>(context: &mut ShellContext<S>, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse input: {err}"));
            return LoopControl::Continue;
        }
    };
    let Some((command, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let command = command.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command, &args) {
        Ok(control) => control,
        Err(err) => {
            tracing::debug!(command = %command, error = %err, "command failed");
            output::error(err);
            LoopControl::Continue
        }
    }
}
