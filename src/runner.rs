use std::env;

use crate::grammar::Grammar;
use crate::matcher::{ParseError, ParseOutcome};

pub(crate) trait UserInterface {
    fn print_error(&self, error: ParseError);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print_error(&self, error: ParseError) {
        eprintln!("Parse error: {error}");
    }
}

/// The process-facing front end over a [`Grammar`].
///
/// Maps parsing onto the hosting program's exit-code contract: a parse failure is
/// reported and yields a non-zero exit status; a successful parse (including
/// help-requested) is returned to the caller, which keeps exit status `0` for its
/// own logic.
pub struct CommandLine {
    grammar: Grammar,
    user_interface: Box<dyn UserInterface>,
}

impl CommandLine {
    /// Create a command line front end reporting errors to the console.
    pub fn new(grammar: Grammar) -> Self {
        Self::with_interface(grammar, Box::new(ConsoleInterface::default()))
    }

    pub(crate) fn with_interface(
        grammar: Grammar,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            grammar,
            user_interface,
        }
    }

    /// The underlying grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parse the input tokens.
    ///
    /// On failure the error is reported through the user interface and the exit
    /// code `1` is returned for the hosting program to exit with.
    ///
    /// ### Example
    /// ```
    /// use cligram::{CommandLine, Grammar, ParseOutcome, Positional};
    ///
    /// let grammar = Grammar::new().positional(Positional::new("file")).unwrap();
    /// let command_line = CommandLine::new(grammar);
    ///
    /// match command_line.parse_tokens(&["input.txt"]).unwrap() {
    ///     ParseOutcome::Command(result) => {
    ///         assert_eq!(result.positional(0), Some("input.txt"));
    ///     }
    ///     ParseOutcome::Help => unreachable!(),
    /// }
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<ParseOutcome, i32> {
        match self.grammar.parse(tokens) {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                self.user_interface.print_error(error);
                Err(1)
            }
        }
    }

    /// Parse the command line of the hosting process ([`env::args`], program name
    /// skipped).
    ///
    /// On failure the error is reported and the process exits with code `1`
    /// (via [`std::process::exit`]).
    pub fn parse(self) -> ParseOutcome {
        let tokens: Vec<String> = env::args().skip(1).collect();

        match self.parse_tokens(
            tokens
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(outcome) => outcome,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod util {
    use std::sync::mpsc;

    use super::UserInterface;
    use crate::matcher::ParseError;

    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (error_tx, error_rx) = mpsc::channel();
        (SenderInterface { error_tx }, ReceiverInterface { error_rx })
    }

    pub(crate) struct SenderInterface {
        error_tx: mpsc::Sender<Option<String>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            self.error_tx.send(None).unwrap();
        }
    }

    impl UserInterface for SenderInterface {
        fn print_error(&self, error: ParseError) {
            self.error_tx.send(Some(error.to_string())).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        error_rx: mpsc::Receiver<Option<String>>,
    }

    impl ReceiverInterface {
        pub(crate) fn consume_error(self) -> Option<String> {
            let mut values = Vec::default();

            while let Some(message) = self.error_rx.recv().unwrap() {
                values.push(message);
            }

            if values.is_empty() {
                None
            } else {
                Some(values.join("\n"))
            }
        }
    }
}
