use thiserror::Error;

/// An error produced while matching a token sequence against a grammar.
///
/// Matching stops at the first error; no partial or recovered parse is exposed.
/// Each variant carries the offending token or declared name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The token looks like an option but matches no declared name at the active
    /// grammar level.
    #[error("Option '{0}' does not exist.")]
    UnknownOption(String),

    /// An option requiring a value has none available.
    #[error("Option '{0}' requires a value.")]
    MissingOptionValue(String),

    /// A value-less option was given an attached value.
    #[error("Option '{option}' does not take a value (got '{value}').")]
    UnexpectedValue {
        /// The option as specified on the command line.
        option: String,
        /// The attached value.
        value: String,
    },

    /// A non-repeatable option was matched more than once.
    #[error("Cannot repeat the option '{0}'.")]
    DuplicateOption(String),

    /// More positional tokens were provided than declared slots, with no variadic
    /// slot to absorb them.
    #[error("Unexpected positional argument '{0}'.")]
    UnexpectedPositionalArgument(String),

    /// A required positional slot was left unfilled at the end of input.
    #[error("Not enough tokens provided to positional argument '{0}'.")]
    MissingRequiredPositionalArgument(String),

    /// A token at a sub-command eligible position matched neither a declared
    /// sub-command name nor a positional slot.
    #[error("Unknown sub-command '{0}'.")]
    UnknownSubCommand(String),
}

/// The successful outcome of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The token sequence matched the grammar.
    Command(ResultCommand),

    /// The registered help option was matched.
    /// The caller is expected to render help and stop before inspecting other results.
    Help,
}

impl ParseOutcome {
    /// The matched result, unless help was requested.
    pub fn command(self) -> Option<ResultCommand> {
        match self {
            ParseOutcome::Command(result) => Some(result),
            ParseOutcome::Help => None,
        }
    }
}

/// A matched option occurrence: the originating option and its captured values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultOption {
    name: String,
    occurrences: usize,
    values: Vec<String>,
}

impl ResultOption {
    /// The name under which the option was recorded: its long name when declared,
    /// otherwise its short name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How many times the option was specified.
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    /// The captured values, in command line order.
    /// Empty for value-less options.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The values bound to one positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPositional {
    name: String,
    values: Vec<String>,
}

impl ResultPositional {
    /// The declared name of the positional argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound values, in binding order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The outcome for one grammar level: matched options, bound positional values,
/// and the selected sub-command's own result, if any.
///
/// Read-only after construction; no side effects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultCommand {
    options: Vec<ResultOption>,
    positionals: Vec<ResultPositional>,
    sub_command: Option<(String, Box<ResultCommand>)>,
}

impl ResultCommand {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_option(
        &mut self,
        name: String,
        repeatable: bool,
        value: Option<String>,
    ) -> Result<(), ParseError> {
        match self
            .options
            .iter_mut()
            .find(|option| option.name == name)
        {
            Some(existing) => {
                if !repeatable {
                    return Err(ParseError::DuplicateOption(name));
                }

                existing.occurrences += 1;

                if let Some(value) = value {
                    existing.values.push(value);
                }
            }
            None => {
                self.options.push(ResultOption {
                    name,
                    occurrences: 1,
                    values: value.into_iter().collect(),
                });
            }
        }

        Ok(())
    }

    pub(crate) fn bind_positional(&mut self, name: &str, value: String) {
        match self.positionals.last_mut() {
            Some(group) if group.name == name => group.values.push(value),
            _ => self.positionals.push(ResultPositional {
                name: name.to_string(),
                values: vec![value],
            }),
        }
    }

    pub(crate) fn nest(&mut self, name: String, nested: ResultCommand) {
        if self.sub_command.replace((name, Box::new(nested))).is_some() {
            unreachable!("internal error - cannot select multiple sub-commands");
        }
    }

    /// Whether the option was seen at all.
    pub fn has_option(&self, name: &str) -> bool {
        self.options.iter().any(|option| option.name == name)
    }

    /// How many times the option was specified; `0` when absent.
    pub fn option_occurrences(&self, name: &str) -> usize {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| option.occurrences)
            .unwrap_or(0)
    }

    /// The values captured for the option, in command line order.
    /// Empty when the option is absent or value-less.
    pub fn option_values(&self, name: &str) -> &[String] {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| option.values.as_slice())
            .unwrap_or(&[])
    }

    /// The matched options, in first-occurrence order.
    pub fn options(&self) -> &[ResultOption] {
        &self.options
    }

    /// The positional token at `index`, counting bound tokens left to right across
    /// all positional arguments.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals
            .iter()
            .flat_map(|group| group.values.iter())
            .nth(index)
            .map(String::as_str)
    }

    /// The values bound to the positional argument `name`.
    /// Empty when nothing was bound to it.
    pub fn positional_values(&self, name: &str) -> &[String] {
        self.positionals
            .iter()
            .find(|group| group.name == name)
            .map(|group| group.values.as_slice())
            .unwrap_or(&[])
    }

    /// The bound positional arguments, in binding order.
    pub fn positionals(&self) -> &[ResultPositional] {
        &self.positionals
    }

    /// The selected sub-command and its own result, if one was selected.
    pub fn sub_command(&self) -> Option<(&str, &ResultCommand)> {
        self.sub_command
            .as_ref()
            .map(|(name, nested)| (name.as_str(), nested.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_option_single() {
        let mut result = ResultCommand::new();

        result
            .record_option("verbose".to_string(), false, None)
            .unwrap();

        assert!(result.has_option("verbose"));
        assert_eq!(result.option_occurrences("verbose"), 1);
        assert_eq!(result.option_values("verbose"), &[] as &[String]);
        assert!(!result.has_option("moot"));
        assert_eq!(result.option_occurrences("moot"), 0);
    }

    #[test]
    fn record_option_duplicate() {
        let mut result = ResultCommand::new();
        result
            .record_option("verbose".to_string(), false, None)
            .unwrap();

        let error = result
            .record_option("verbose".to_string(), false, None)
            .unwrap_err();

        assert_eq!(error, ParseError::DuplicateOption("verbose".to_string()));
    }

    #[test]
    fn record_option_repeatable() {
        let mut result = ResultCommand::new();

        result
            .record_option("tag".to_string(), true, Some("a".to_string()))
            .unwrap();
        result
            .record_option("tag".to_string(), true, Some("b".to_string()))
            .unwrap();

        assert_eq!(result.option_occurrences("tag"), 2);
        assert_eq!(
            result.option_values("tag"),
            &["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn bind_positional_groups() {
        let mut result = ResultCommand::new();

        result.bind_positional("src", "a.txt".to_string());
        result.bind_positional("item", "x".to_string());
        result.bind_positional("item", "y".to_string());

        assert_eq!(result.positional(0), Some("a.txt"));
        assert_eq!(result.positional(1), Some("x"));
        assert_eq!(result.positional(2), Some("y"));
        assert_eq!(result.positional(3), None);
        assert_eq!(result.positional_values("src"), &["a.txt".to_string()]);
        assert_eq!(
            result.positional_values("item"),
            &["x".to_string(), "y".to_string()]
        );
        assert_eq!(result.positional_values("moot"), &[] as &[String]);
    }

    #[test]
    fn nested_result() {
        let mut nested = ResultCommand::new();
        nested.bind_positional("src", "a.txt".to_string());
        let mut result = ResultCommand::new();

        result.nest("copy".to_string(), nested);

        let (name, inner) = result.sub_command().unwrap();
        assert_eq!(name, "copy");
        assert_eq!(inner.positional(0), Some("a.txt"));
    }

    #[test]
    fn outcome_command() {
        let outcome = ParseOutcome::Command(ResultCommand::new());
        assert!(outcome.command().is_some());

        assert_eq!(ParseOutcome::Help.command(), None);
    }
}
