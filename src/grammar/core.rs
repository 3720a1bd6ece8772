use thiserror::Error;

use crate::constant::{HELP_NAME, HELP_SHORT};
use crate::grammar::{OptionSpec, Positional};
use crate::matcher::{ParseError, ParseOutcome, TokenScanner};
use crate::model::Multiplicity;

/// An error produced while declaring a grammar.
///
/// Declaration operations validate incrementally, so an invalid [`Grammar`] can never
/// be handed to the matching engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    /// The name is already taken at this grammar level.
    #[error("Cannot duplicate the name '{0}'.")]
    DuplicateName(String),

    /// A positional argument was declared after the variadic positional.
    #[error("Cannot declare a positional argument after the variadic '{0}'.")]
    MisplacedVariadicPositional(String),

    /// The option has neither a long nor a short name.
    #[error("An option requires a long or short name.")]
    UnnamedOption,
}

/// A named nested grammar, selected on the command line by a bare token.
#[derive(Debug, Clone)]
pub struct SubCommand {
    name: String,
    grammar: Grammar,
}

impl SubCommand {
    /// The name that selects this sub-command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The nested grammar owned by this sub-command.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
}

/// The declared vocabulary for one command level: options, positional arguments,
/// and nested sub-commands.
///
/// A `Grammar` is built once via the fluent declaration methods, each of which
/// validates incrementally, and is read-only afterwards.
/// The matching engine ([`Grammar::parse`]) and the completion generator
/// ([`Completer`](crate::Completer)) are independent consumers of the same instance,
/// so a single `Grammar` may be reused across any number of parse or completion calls.
///
/// ### Example
/// ```
/// use cligram::{Grammar, OptionSpec, Positional};
///
/// let grammar = Grammar::new()
///     .about("Copy a file.")
///     .option(OptionSpec::new("verbose").short('v').repeatable()).unwrap()
///     .positional(Positional::new("src")).unwrap()
///     .positional(Positional::new("dst")).unwrap()
///     .help_option().unwrap();
///
/// assert_eq!(grammar.description(), Some("Copy a file."));
/// assert!(grammar.has_help_option());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    description: Option<String>,
    options: Vec<OptionSpec>,
    positionals: Vec<Positional>,
    sub_commands: Vec<SubCommand>,
    help: bool,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document the application description for this grammar level.
    /// If repeated, only the final description will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Declare an option.
    ///
    /// Fails with [`GrammarError::UnnamedOption`] when the spec carries neither a long
    /// nor a short name, and with [`GrammarError::DuplicateName`] when either name is
    /// already taken at this level.
    pub fn option(mut self, spec: OptionSpec) -> Result<Self, GrammarError> {
        if spec.long() == Some("") || (spec.long().is_none() && spec.short().is_none()) {
            return Err(GrammarError::UnnamedOption);
        }

        for existing in &self.options {
            if let (Some(existing_long), Some(long)) = (existing.long(), spec.long()) {
                if existing_long == long {
                    return Err(GrammarError::DuplicateName(long.to_string()));
                }
            }

            if let (Some(existing_short), Some(short)) = (existing.short(), spec.short()) {
                if existing_short == short {
                    return Err(GrammarError::DuplicateName(short.to_string()));
                }
            }
        }

        self.options.push(spec);
        Ok(self)
    }

    /// Declare a positional argument.
    ///
    /// Positional arguments bind tokens in declaration order.
    /// Fails with [`GrammarError::MisplacedVariadicPositional`] when any positional is
    /// declared after a variadic one (the variadic must be last), and with
    /// [`GrammarError::DuplicateName`] on a repeated name.
    pub fn positional(mut self, positional: Positional) -> Result<Self, GrammarError> {
        if self
            .positionals
            .iter()
            .any(|existing| existing.name() == positional.name())
        {
            return Err(GrammarError::DuplicateName(positional.name().to_string()));
        }

        if let Some(variadic) = self
            .positionals
            .iter()
            .find(|existing| existing.multiplicity() == Multiplicity::Variadic)
        {
            return Err(GrammarError::MisplacedVariadicPositional(
                variadic.name().to_string(),
            ));
        }

        self.positionals.push(positional);
        Ok(self)
    }

    /// Declare a sub-command owning the nested `grammar`.
    ///
    /// Fails with [`GrammarError::DuplicateName`] when the name is already taken among
    /// the sibling sub-commands.
    ///
    /// ### Example
    /// ```
    /// use cligram::{Grammar, Positional};
    ///
    /// let copy = Grammar::new()
    ///     .positional(Positional::new("src")).unwrap()
    ///     .positional(Positional::new("dst")).unwrap();
    /// let grammar = Grammar::new()
    ///     .sub_command("copy", copy).unwrap();
    ///
    /// assert!(grammar.find_sub_command("copy").is_some());
    /// ```
    pub fn sub_command(
        mut self,
        name: impl Into<String>,
        grammar: Grammar,
    ) -> Result<Self, GrammarError> {
        let name = name.into();

        if self
            .sub_commands
            .iter()
            .any(|existing| existing.name() == name)
        {
            return Err(GrammarError::DuplicateName(name));
        }

        self.sub_commands.push(SubCommand { name, grammar });
        Ok(self)
    }

    /// Register the conventional help option (`-h`/`--help`, no value).
    ///
    /// When matched at any level, parsing short-circuits to [`ParseOutcome::Help`].
    /// Fails with [`GrammarError::DuplicateName`] when repeated, or when either
    /// spelling is already taken.
    pub fn help_option(self) -> Result<Self, GrammarError> {
        if self.help {
            return Err(GrammarError::DuplicateName(HELP_NAME.to_string()));
        }

        let mut with_help = self.option(OptionSpec::new(HELP_NAME).short(HELP_SHORT))?;
        with_help.help = true;
        Ok(with_help)
    }

    /// The application description, if one was declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The declared options, in declaration order.
    /// Includes the help option when registered.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The declared positional arguments, in declaration order.
    pub fn positionals(&self) -> &[Positional] {
        &self.positionals
    }

    /// The declared sub-commands, in declaration order.
    pub fn sub_commands(&self) -> &[SubCommand] {
        &self.sub_commands
    }

    /// The nested grammar of the sub-command `name`, if declared.
    pub fn find_sub_command(&self, name: &str) -> Option<&Grammar> {
        self.sub_commands
            .iter()
            .find(|sub_command| sub_command.name() == name)
            .map(SubCommand::grammar)
    }

    /// Whether the conventional help option is registered on this level.
    pub fn has_help_option(&self) -> bool {
        self.help
    }

    pub(crate) fn find_long(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.long() == Some(name))
    }

    pub(crate) fn find_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.short() == Some(short))
    }

    /// Match a token sequence against this grammar.
    ///
    /// The tokens are scanned once, left to right, with no backtracking.
    /// Scanning stops at the first error; no partial result is exposed.
    ///
    /// ### Example
    /// ```
    /// use cligram::{Grammar, OptionSpec, ParseOutcome, Positional};
    ///
    /// let grammar = Grammar::new()
    ///     .option(OptionSpec::new("verbose").short('v').repeatable()).unwrap()
    ///     .positional(Positional::new("file")).unwrap();
    ///
    /// match grammar.parse(&["-v", "input.txt"]).unwrap() {
    ///     ParseOutcome::Command(result) => {
    ///         assert!(result.has_option("verbose"));
    ///         assert_eq!(result.positional(0), Some("input.txt"));
    ///     }
    ///     ParseOutcome::Help => unreachable!(),
    /// }
    /// ```
    pub fn parse(&self, tokens: &[&str]) -> Result<ParseOutcome, ParseError> {
        TokenScanner::new(self).scan(tokens)
    }
}
