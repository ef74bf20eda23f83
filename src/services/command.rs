//! Cheat command parsing
//!
//! The host hands over the full text typed into the cheat box, command name
//! included: `RemovePhantomBudgetItems <category> [all]`.

use thiserror::Error;

use crate::models::DepartmentPurpose;

use super::resolver;

/// The cheat string the command is registered under
pub const CHEAT_STRING: &str = "RemovePhantomBudgetItems";

/// Shown when the command has the wrong number of arguments
pub const USAGE: &str = "Usage: RemovePhantomBudgetItems <category> [all]\n\
<category>: One of Fire, Police, Jail, Power, Education or Health.\n\
[all] A non-default option that clears the entire budget category, instead of only plugin(s) that no longer exist.";

/// Operator input that cannot be acted on
///
/// The display text is what the operator sees in the dialog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Wrong number of arguments
    #[error("{}", USAGE)]
    Usage,

    /// The category name did not resolve; holds the text as typed
    #[error("Unknown Budget Category: {0}")]
    UnknownCategory(String),
}

/// A parsed `RemovePhantomBudgetItems` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhantomCommand {
    /// The category exactly as the operator typed it
    pub category_text: String,

    /// Department/purpose pairs the category resolved to
    pub targets: Vec<DepartmentPurpose>,

    /// Remove every item instead of only the orphaned ones
    pub clear_all: bool,
}

impl PhantomCommand {
    /// Parse the full cheat text
    ///
    /// Tokens are separated by whitespace. A third token other than `all`
    /// (any case) is accepted and leaves `clear_all` off.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let arguments: Vec<&str> = text.split_whitespace().collect();

        if arguments.len() != 2 && arguments.len() != 3 {
            return Err(CommandError::Usage);
        }

        let category_text = arguments[1];
        let clear_all = arguments
            .get(2)
            .is_some_and(|flag| flag.eq_ignore_ascii_case("all"));

        let targets = resolver::resolve(category_text);
        if targets.is_empty() {
            return Err(CommandError::UnknownCategory(category_text.to_string()));
        }

        Ok(Self {
            category_text: category_text.to_string(),
            targets,
            clear_all,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolver::{EDUCATION_COVERAGE, EDUCATION_STAFF, FIRE, POWER};

    #[test]
    fn test_parse_targeted() {
        let command = PhantomCommand::parse("RemovePhantomBudgetItems fire").unwrap();
        assert_eq!(command.category_text, "fire");
        assert_eq!(command.targets, vec![FIRE]);
        assert!(!command.clear_all);
    }

    #[test]
    fn test_parse_all_flag_any_case() {
        let command = PhantomCommand::parse("RemovePhantomBudgetItems Power ALL").unwrap();
        assert_eq!(command.targets, vec![POWER]);
        assert!(command.clear_all);
    }

    #[test]
    fn test_other_third_token_is_not_all() {
        let command = PhantomCommand::parse("RemovePhantomBudgetItems Education everything").unwrap();
        assert_eq!(command.targets, vec![EDUCATION_STAFF, EDUCATION_COVERAGE]);
        assert!(!command.clear_all);
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(PhantomCommand::parse("RemovePhantomBudgetItems"), Err(CommandError::Usage));
        assert_eq!(PhantomCommand::parse(""), Err(CommandError::Usage));
        assert_eq!(
            PhantomCommand::parse("RemovePhantomBudgetItems Fire all now"),
            Err(CommandError::Usage)
        );
    }

    #[test]
    fn test_unknown_category_keeps_input_text() {
        let err = PhantomCommand::parse("RemovePhantomBudgetItems Atomic").unwrap_err();
        assert_eq!(err, CommandError::UnknownCategory("Atomic".into()));
        assert_eq!(err.to_string(), "Unknown Budget Category: Atomic");
    }

    #[test]
    fn test_usage_message_text() {
        let text = CommandError::Usage.to_string();
        assert!(text.starts_with("Usage: RemovePhantomBudgetItems <category> [all]\n"));
        assert!(text.contains("One of Fire, Police, Jail, Power, Education or Health."));
        assert_eq!(text.lines().count(), 3);
    }
}
