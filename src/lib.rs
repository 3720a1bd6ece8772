//! `cligram` is a declarative command line grammar parser with Bash completion generation.
//!
//! A program declares a [`Grammar`]: named options, positional arguments, and nested
//! sub-command grammars. The same grammar then serves two independent consumers:
//! * [`Grammar::parse`] matches an argument vector and produces a strongly-typed
//! [`ResultCommand`] or a structured [`ParseError`].
//! * [`Completer`] enumerates context-appropriate completion candidates for a partially
//! typed command line, and renders them into the `COMPREPLY` assignment expected by
//! Bash's programmable-completion hook.
//!
//! The grammar is validated as it is declared; an invalid grammar can never reach
//! either consumer. Once built it is immutable, so a single instance may be shared
//! across any number of parse or completion calls.
//!
//! # Usage
//! Declare the grammar, then parse:
//! ```
//! use cligram::{Grammar, OptionSpec, ParseOutcome, Positional};
//!
//! let grammar = Grammar::new()
//!     .about("Sum the items.")
//!     .option(OptionSpec::new("verbose").short('v').repeatable()).unwrap()
//!     .positional(Positional::new("item").variadic()).unwrap()
//!     .help_option().unwrap();
//!
//! match grammar.parse(&["-v", "1", "2", "3"]).unwrap() {
//!     ParseOutcome::Command(result) => {
//!         assert_eq!(result.option_occurrences("verbose"), 1);
//!         assert_eq!(result.positional_values("item").len(), 3);
//!     }
//!     ParseOutcome::Help => {
//!         // Render help and return; see `CommandLine` for the process contract.
//!     }
//! }
//! ```
//!
//! The same grammar drives completion:
//! ```
//! use cligram::{Completer, Grammar, OptionSpec};
//!
//! let grammar = Grammar::new()
//!     .option(OptionSpec::new("alpha")).unwrap()
//!     .option(OptionSpec::new("beta")).unwrap();
//!
//! let completer = Completer::new(&grammar);
//! assert_eq!(completer.compreply(&["--a"], 0), "COMPREPLY=('--alpha')");
//! ```
//!
//! # Cli Semantics
//! * Long options are matched as `--name`, `--name=value`, or `--name value`; the next
//! token is consumed as a value only when the option requires one, and only when that
//! token does not itself look like an option.
//! * Short options are matched as `-x`, bundled as `-xyz` (all but the last must be
//! value-less), with a trailing value attached (`-xVALUE`, `-x=VALUE`) or taken from
//! the next token (`-x VALUE`).
//! * A literal `--` ends option recognition; all following tokens are positional.
//! * The first bare token at a level that declares sub-commands selects the matching
//! sub-command, which then owns all remaining tokens. Levels without sub-commands
//! never attempt this classification.
//! * The conventional help option (`-h`/`--help`, registered via
//! [`Grammar::help_option`]) short-circuits to [`ParseOutcome::Help`] from any level.
//!
//! # Features
//! * `tracing_debug`: Emit `tracing` debug events from the matching and completion walks.
#![deny(missing_docs)]
mod completion;
mod constant;
mod grammar;
mod matcher;
mod model;
mod runner;

pub use completion::*;
pub use grammar::*;
pub use matcher::*;
pub use model::*;
pub use runner::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
