use std::path::Path;

use serde_json::Value;

use crate::{
    config::Config,
    errors::{LedgerError, Result},
    ledger::{Debt, DebtDraft, PaymentDraft},
    storage::KeyValueStore,
    tracker::DebtTracker,
};

use super::output;

/// Shell commands as (name, synopsis, description).
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("add", "add <debtor> <amount> [description]", "record a new debt"),
    ("pay", "pay <id> <amount> [method]", "record a payment"),
    ("note", "note <id> <text>", "append a collection note"),
    ("toggle", "toggle <id>", "flip the paid flag"),
    ("list", "list", "list debts, newest first"),
    ("show", "show <id>", "show payments and notes"),
    ("summary", "summary", "totals across all debts"),
    ("export", "export <path>", "write a backup file"),
    ("import", "import <path>", "replace debts from a backup file"),
    ("help", "help", "show this list"),
    ("exit", "exit", "leave the shell"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Presentation state for one shell session.
pub struct ShellContext<S> {
    pub tracker: DebtTracker<S>,
    pub config: Config,
}

impl<S: KeyValueStore> ShellContext<S> {
    pub fn new(tracker: DebtTracker<S>, config: Config) -> Self {
        Self { tracker, config }
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl> {
        match command {
            "add" => self.add(args),
            "pay" => self.pay(args),
            "note" => self.note(args),
            "toggle" => self.toggle(args),
            "list" | "ls" => self.list(),
            "show" => self.show(args),
            "summary" => self.summary(),
            "export" => self.export(args),
            "import" => self.import(args),
            "help" | "?" => {
                output::section("Commands");
                for (_, synopsis, description) in COMMANDS {
                    output::info(format!("{synopsis:<38}{description}"));
                }
                Ok(LoopControl::Continue)
            }
            "exit" | "quit" => Ok(LoopControl::Exit),
            other => {
                output::warning(format!("Unknown command `{other}`. Type `help`."));
                Ok(LoopControl::Continue)
            }
        }
    }

    fn add(&mut self, args: &[&str]) -> Result<LoopControl> {
        let (debtor, amount) = match args {
            [debtor, amount, ..] => (*debtor, parse_amount(amount)?),
            _ => return Err(usage("add")),
        };
        let mut draft = DebtDraft::new(debtor, amount);
        if args.len() > 2 {
            draft = draft.with_description(args[2..].join(" "));
        }
        let debt = &self.tracker.create_debt(draft)?[0];
        output::success(format!(
            "Debt {} created for {} ({})",
            short_id(debt),
            debt.debtor_name(),
            self.config.format_amount(debt.amount)
        ));
        Ok(LoopControl::Continue)
    }

    fn pay(&mut self, args: &[&str]) -> Result<LoopControl> {
        let (id, amount) = match args {
            [id, amount, ..] => (self.tracker.resolve_id(id)?, parse_amount(amount)?),
            _ => return Err(usage("pay")),
        };
        let mut draft = PaymentDraft::new(amount);
        if let Some(method) = args.get(2) {
            draft = draft.with_method(*method);
        }
        self.tracker.record_payment(id, draft)?;
        if let Some(debt) = self.tracker.debt(id) {
            let status = if debt.is_paid { "paid" } else { "open" };
            output::success(format!(
                "Payment recorded. Remaining {} ({status})",
                self.config.format_amount(debt.remaining())
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn note(&mut self, args: &[&str]) -> Result<LoopControl> {
        let Some((id, rest)) = args.split_first() else {
            return Err(usage("note"));
        };
        let id = self.tracker.resolve_id(id)?;
        self.tracker.add_collection_note(id, rest.join(" "))?;
        output::success("Note added.");
        Ok(LoopControl::Continue)
    }

    fn toggle(&mut self, args: &[&str]) -> Result<LoopControl> {
        let [id] = args else {
            return Err(usage("toggle"));
        };
        let id = self.tracker.resolve_id(id)?;
        self.tracker.toggle_manual_paid(id)?;
        let paid = self.tracker.debt(id).map(|debt| debt.is_paid).unwrap_or(false);
        output::success(if paid {
            "Marked as paid."
        } else {
            "Marked as open."
        });
        Ok(LoopControl::Continue)
    }

    fn list(&self) -> Result<LoopControl> {
        let debts = self.tracker.debts();
        if debts.is_empty() {
            output::info("No debts recorded.");
            return Ok(LoopControl::Continue);
        }
        output::section("Debts");
        for debt in debts {
            output::info(self.debt_line(debt));
        }
        Ok(LoopControl::Continue)
    }

    fn show(&self, args: &[&str]) -> Result<LoopControl> {
        let [id] = args else {
            return Err(usage("show"));
        };
        let id = self.tracker.resolve_id(id)?;
        let debt = self.tracker.debt(id).ok_or(LedgerError::DebtNotFound(id))?;
        let summary = debt.summary();
        output::section(&summary.debtor_name);
        output::info(format!(
            "[{}] {} lent, {} paid, {} remaining",
            if summary.is_paid { "paid" } else { "open" },
            self.config.format_amount(summary.amount),
            self.config.format_amount(summary.total_paid),
            self.config.format_amount(summary.remaining)
        ));
        output::info(format!("Created {}", debt.date.format("%Y-%m-%d %H:%M")));
        if let Some(description) = debt.description() {
            output::info(format!("Description: {description}"));
        }
        if let Some(due) = debt.due_date() {
            output::info(format!("Due: {}", display_value(due)));
        }
        output::info(format!("Payments ({}):", summary.payment_count));
        for payment in &debt.payment_history {
            let method = payment.method().unwrap_or("-");
            output::info(format!(
                "  {}  {}",
                self.config.format_amount(payment.amount),
                method
            ));
        }
        output::info(format!("Notes ({}):", summary.note_count));
        for note in &debt.collection_notes {
            output::info(format!("  - {note}"));
        }
        Ok(LoopControl::Continue)
    }

    fn summary(&self) -> Result<LoopControl> {
        let totals = self.tracker.summary();
        output::section("Summary");
        output::info(format!(
            "{} debts ({} open, {} paid)",
            totals.debt_count, totals.open_count, totals.paid_count
        ));
        output::info(format!(
            "Lent {} / collected {} / outstanding {}",
            self.config.format_amount(totals.total_principal),
            self.config.format_amount(totals.total_collected),
            self.config.format_amount(totals.total_outstanding)
        ));
        Ok(LoopControl::Continue)
    }

    fn export(&self, args: &[&str]) -> Result<LoopControl> {
        let [path] = args else {
            return Err(usage("export"));
        };
        self.tracker.export_to_path(Path::new(path))?;
        output::success(format!("Exported to {path}"));
        Ok(LoopControl::Continue)
    }

    fn import(&mut self, args: &[&str]) -> Result<LoopControl> {
        let [path] = args else {
            return Err(usage("import"));
        };
        let count = self.tracker.import_from_path(Path::new(path))?.len();
        output::success(format!("Imported {count} debts from {path}"));
        Ok(LoopControl::Continue)
    }

    fn debt_line(&self, debt: &Debt) -> String {
        let status = if debt.is_paid { "paid" } else { "open" };
        format!(
            "[{status}] {}  {}  {}  paid {}  remaining {}",
            short_id(debt),
            debt.debtor_name(),
            self.config.format_amount(debt.amount),
            self.config.format_amount(debt.total_paid()),
            self.config.format_amount(debt.remaining())
        )
    }
}

fn short_id(debt: &Debt) -> String {
    debt.id.to_string()[..8].to_string()
}

/// Text values print bare; anything else prints as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_amount(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LedgerError::Validation(format!("`{raw}` is not a number")))
}

fn usage(command: &str) -> LedgerError {
    let text = COMMANDS
        .iter()
        .find(|(name, _, _)| *name == command)
        .map(|(_, synopsis, _)| *synopsis)
        .unwrap_or(command);
    LedgerError::Validation(format!("usage: {text}"))
}
