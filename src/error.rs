//! Operator command errors.

use thiserror::Error;

/// Errors from parsing an operator console command.
///
/// These are user-visible: the host prints the message on the operator
/// channel and no state changes. Nothing here is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Empty input line.
    #[error("empty command")]
    Empty,

    /// A verb that needs an argument got none.
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    /// Unrecognized verb.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `set-mode` with something other than `invisible` or `ghost`.
    #[error("unknown mode: {0} (expected invisible or ghost)")]
    UnknownMode(String),
}
