//! Terminal output and confirmation prompts.

#[cfg(test)]
#[path = "output_test.rs"]
mod output_test;

use std::io::{self, BufRead, Write};

use api::actions::{Confirmation, Notice, Outcome};
use serde::Serialize;

use crate::error::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_notice(notice: &Notice) {
    println!("{}", notice.message);
}

pub fn print_outcome(outcome: &Outcome<Notice>) {
    match outcome {
        Outcome::Done(notice) => print_notice(notice),
        Outcome::Cancelled => eprintln!("Cancelled."),
    }
}

/// `--yes` confirms without asking; otherwise ask on stderr and read stdin.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<Confirmation, CliError> {
    if assume_yes {
        return Ok(Confirmation::Confirmed);
    }
    eprint!("{prompt} [y/N] ");
    io::stderr().flush().map_err(CliError::Stdin)?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).map_err(CliError::Stdin)?;
    Ok(parse_answer(&line))
}

/// Only an explicit yes confirms.
pub fn parse_answer(line: &str) -> Confirmation {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes").into()
}
