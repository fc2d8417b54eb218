//! Console command grammar.
//!
//! Each input line is split with shell-like quoting and parsed by clap, so
//! `help` and per-command `--help` come for free.

use std::str::FromStr;

use clap::{Parser, Subcommand};

use crate::domain::{FormField, RecordId};

/// Errors raised while splitting an input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// A quote was opened but never closed, or a trailing backslash escapes
    /// nothing.
    #[error("unbalanced quotes or trailing escape in input")]
    Unbalanced,
}

/// Split `line` into words using POSIX shell quoting rules.
///
/// Single and double quotes group text and backslashes escape the next
/// character; quotes are removed and an empty quoted string yields an empty
/// token.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    shell_words::split(line).map_err(|_| TokenizeError::Unbalanced)
}

/// A table row addressed by 1-based position or by `id:<identifier>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRef {
    /// 1-based row number in the displayed table.
    Position(usize),
    /// Record identifier, looked up regardless of position.
    Id(RecordId),
}

impl FromStr for RowRef {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(id) = raw.strip_prefix("id:") {
            return RecordId::new(id)
                .map(Self::Id)
                .map_err(|error| error.to_string());
        }
        match raw.parse::<usize>() {
            Ok(0) | Err(_) => Err(format!(
                "expected a row number starting at 1 or `id:<identifier>`, got `{raw}`"
            )),
            Ok(position) => Ok(Self::Position(position)),
        }
    }
}

/// One parsed console line.
#[derive(Debug, Parser)]
#[command(
    name = "records-console",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
pub struct CommandLine {
    /// Command named on the line.
    #[command(subcommand)]
    pub command: Command,
}

/// Console commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the record table.
    #[command(alias = "ls")]
    List,
    /// Fetch the record list from the server.
    Refresh,
    /// Show the form with any visible errors.
    Form,
    /// Set a form field (name, email, age, phone, city, idNumber).
    Set {
        /// Field to change.
        field: FormField,
        /// New value; several words are joined with spaces.
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        value: Vec<String>,
    },
    /// Mark a form field as visited.
    Touch {
        /// Field to mark.
        field: FormField,
    },
    /// Create the record, or save it when editing.
    Submit,
    /// Save the record being edited.
    Update,
    /// Empty the form and leave edit mode.
    Clear,
    /// Load a row into the form for editing.
    Edit {
        /// Row number or `id:<identifier>`.
        row: RowRef,
    },
    /// Show the details of a row.
    View {
        /// Row number or `id:<identifier>`.
        row: RowRef,
    },
    /// Delete a row.
    #[command(alias = "rm")]
    Delete {
        /// Row number or `id:<identifier>`.
        row: RowRef,
    },
    /// Close the detail view.
    Close,
    /// Hide the current notification.
    Dismiss,
    /// Sign in.
    Login {
        /// Account e-mail address.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Create an account.
    Register {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account e-mail address.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Leave the console.
    #[command(alias = "exit")]
    Quit,
}
