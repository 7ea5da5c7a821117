//! Operator console commands.
//!
//! The host owns the console itself; this module parses its text commands.
//! Each command maps 1:1 onto a block-store or mode operation, and a
//! malformed line yields a [`CommandError`] for the host to print — never
//! a crash.

use crate::error::CommandError;
use crate::store::Mode;

/// Welcome/help text for the operator console.
pub const HELP_TEXT: &str = "\
Blocked users are hidden from rooms and cannot reach you. The following \
commands exist (you may need to reload the room for changes to take effect):

  block <user>
  unblock <user>
  list-blocked
  set-mode invisible   (default)
  set-mode ghost";

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `block <name>`
    Block(String),
    /// `unblock <name>`
    Unblock(String),
    /// `list-blocked`
    ListBlocked,
    /// `set-mode invisible|ghost`
    SetMode(Mode),
}

impl ConsoleCommand {
    /// Parse one console line.
    ///
    /// Verbs are case-insensitive; the block/unblock argument is kept as
    /// typed (normalization happens in the store).
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;
        match verb.to_ascii_lowercase().as_str() {
            "block" => {
                let name = words.next().ok_or(CommandError::MissingArgument("block"))?;
                Ok(Self::Block(name.to_string()))
            }
            "unblock" => {
                let name = words
                    .next()
                    .ok_or(CommandError::MissingArgument("unblock"))?;
                Ok(Self::Unblock(name.to_string()))
            }
            "list-blocked" => Ok(Self::ListBlocked),
            "set-mode" => {
                let arg = words
                    .next()
                    .ok_or(CommandError::MissingArgument("set-mode"))?;
                let mode =
                    Mode::parse(arg).ok_or_else(|| CommandError::UnknownMode(arg.to_string()))?;
                Ok(Self::SetMode(mode))
            }
            _ => Err(CommandError::UnknownCommand(verb.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_with_name_as_typed() {
        assert_eq!(
            ConsoleCommand::parse("block Alice"),
            Ok(ConsoleCommand::Block("Alice".to_string()))
        );
    }

    #[test]
    fn parses_unblock() {
        assert_eq!(
            ConsoleCommand::parse("  unblock bob  "),
            Ok(ConsoleCommand::Unblock("bob".to_string()))
        );
    }

    #[test]
    fn parses_list_blocked() {
        assert_eq!(
            ConsoleCommand::parse("list-blocked"),
            Ok(ConsoleCommand::ListBlocked)
        );
    }

    #[test]
    fn parses_set_mode_case_insensitively() {
        assert_eq!(
            ConsoleCommand::parse("set-mode GHOST"),
            Ok(ConsoleCommand::SetMode(Mode::Ghost))
        );
        assert_eq!(
            ConsoleCommand::parse("SET-MODE invisible"),
            Ok(ConsoleCommand::SetMode(Mode::Invisible))
        );
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(
            ConsoleCommand::parse("block"),
            Err(CommandError::MissingArgument("block"))
        );
        assert_eq!(
            ConsoleCommand::parse("set-mode"),
            Err(CommandError::MissingArgument("set-mode"))
        );
    }

    #[test]
    fn unknown_verb_is_reported() {
        assert_eq!(
            ConsoleCommand::parse("obliterate Alice"),
            Err(CommandError::UnknownCommand("obliterate".to_string()))
        );
    }

    #[test]
    fn unknown_mode_is_reported() {
        assert_eq!(
            ConsoleCommand::parse("set-mode opaque"),
            Err(CommandError::UnknownMode("opaque".to_string()))
        );
    }

    #[test]
    fn empty_line_is_reported() {
        assert_eq!(ConsoleCommand::parse("   "), Err(CommandError::Empty));
    }
}
