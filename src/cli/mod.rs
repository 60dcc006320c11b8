//! Thin line-oriented shell over [`DebtTracker`](crate::tracker::DebtTracker).

pub mod commands;
pub mod output;
pub mod shell;

use thiserror::Error;

use crate::errors::LedgerError;

pub use commands::{LoopControl, ShellContext};
pub use shell::run_cli;

/// Environment variable that switches the shell to non-interactive stdin mode.
pub const SCRIPT_ENV: &str = "DEBT_LEDGER_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
