use crate::constant::HELP_NAME;
use crate::grammar::{Grammar, OptionSpec};
use crate::matcher::{ParseError, ParseOutcome, ResultCommand};
use crate::model::{Multiplicity, ValueArity};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// A lone '-' is a plain value (conventionally stdin), not an option.
pub(crate) fn looks_like_option(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1
}

#[derive(Debug)]
pub(crate) struct TokenScanner<'g> {
    grammar: &'g Grammar,
    result: ResultCommand,
    cursor: usize,
    escaped: bool,
    sub_candidate_seen: bool,
}

impl<'g> TokenScanner<'g> {
    pub(crate) fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            result: ResultCommand::new(),
            cursor: 0,
            escaped: false,
            sub_candidate_seen: false,
        }
    }

    // Single left-to-right scan, no backtracking.
    pub(crate) fn scan(mut self, tokens: &[&str]) -> Result<ParseOutcome, ParseError> {
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];
            index += 1;

            if self.escaped {
                self.bind(token)?;
                continue;
            }

            if token == "--" {
                self.escaped = true;
                continue;
            }

            if let Some(body) = token.strip_prefix("--") {
                if self.scan_long(body, tokens, &mut index)? {
                    return Ok(ParseOutcome::Help);
                }
            } else if looks_like_option(token) {
                if self.scan_short(&token[1..], tokens, &mut index)? {
                    return Ok(ParseOutcome::Help);
                }
            } else if !self.sub_candidate_seen && !self.grammar.sub_commands().is_empty() {
                // The first bare token at a level with sub-commands is the one
                // sub-command candidate; it wins over positional binding.
                self.sub_candidate_seen = true;

                if let Some(sub_grammar) = self.grammar.find_sub_command(token) {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Selected sub-command '{token}'; it owns the remaining tokens.");
                    }

                    return match TokenScanner::new(sub_grammar).scan(&tokens[index..])? {
                        ParseOutcome::Help => Ok(ParseOutcome::Help),
                        ParseOutcome::Command(nested) => {
                            self.result.nest(token.to_string(), nested);
                            Ok(ParseOutcome::Command(self.result))
                        }
                    };
                }

                self.bind(token).map_err(|error| match error {
                    ParseError::UnexpectedPositionalArgument(offender) => {
                        ParseError::UnknownSubCommand(offender)
                    }
                    other => other,
                })?;
            } else {
                self.bind(token)?;
            }
        }

        self.finish()
    }

    fn scan_long(
        &mut self,
        body: &str,
        tokens: &[&str],
        index: &mut usize,
    ) -> Result<bool, ParseError> {
        let grammar = self.grammar;
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let spec = grammar
            .find_long(name)
            .ok_or_else(|| ParseError::UnknownOption(format!("--{name}")))?;

        match (spec.arity(), attached) {
            (ValueArity::None, Some(value)) => Err(ParseError::UnexpectedValue {
                option: format!("--{name}"),
                value: value.to_string(),
            }),
            (ValueArity::None, None) => {
                if self.is_help(spec) {
                    return Ok(true);
                }

                self.record(spec, None)?;
                Ok(false)
            }
            (ValueArity::One, None) => {
                let value = self
                    .take_value(tokens, index)
                    .ok_or_else(|| ParseError::MissingOptionValue(format!("--{name}")))?;
                self.record(spec, Some(value))?;
                Ok(false)
            }
            (ValueArity::One, Some(value)) | (ValueArity::OptionalOne, Some(value)) => {
                self.record(spec, Some(value.to_string()))?;
                Ok(false)
            }
            (ValueArity::OptionalOne, None) => {
                self.record(spec, None)?;
                Ok(false)
            }
        }
    }

    fn scan_short(
        &mut self,
        body: &str,
        tokens: &[&str],
        index: &mut usize,
    ) -> Result<bool, ParseError> {
        let grammar = self.grammar;

        for (offset, single) in body.char_indices() {
            let spec = grammar
                .find_short(single)
                .ok_or_else(|| ParseError::UnknownOption(format!("-{single}")))?;
            let rest = &body[offset + single.len_utf8()..];

            match spec.arity() {
                ValueArity::None => {
                    if let Some(value) = rest.strip_prefix('=') {
                        return Err(ParseError::UnexpectedValue {
                            option: format!("-{single}"),
                            value: value.to_string(),
                        });
                    }

                    if self.is_help(spec) {
                        return Ok(true);
                    }

                    self.record(spec, None)?;
                }
                ValueArity::One => {
                    // The first value-taking character ends the bundle; the rest of
                    // the token is its attached value.
                    let value = match rest.strip_prefix('=') {
                        Some(value) => value.to_string(),
                        None if rest.is_empty() => self
                            .take_value(tokens, index)
                            .ok_or_else(|| ParseError::MissingOptionValue(format!("-{single}")))?,
                        None => rest.to_string(),
                    };
                    self.record(spec, Some(value))?;
                    return Ok(false);
                }
                ValueArity::OptionalOne => {
                    let value = match rest.strip_prefix('=') {
                        Some(value) => Some(value.to_string()),
                        None if rest.is_empty() => None,
                        None => Some(rest.to_string()),
                    };
                    self.record(spec, value)?;
                    return Ok(false);
                }
            }
        }

        Ok(false)
    }

    fn take_value(&self, tokens: &[&str], index: &mut usize) -> Option<String> {
        if *index < tokens.len() && !looks_like_option(tokens[*index]) {
            let value = tokens[*index].to_string();
            *index += 1;
            Some(value)
        } else {
            None
        }
    }

    fn record(&mut self, spec: &OptionSpec, value: Option<String>) -> Result<(), ParseError> {
        self.result
            .record_option(spec.canonical(), spec.is_repeatable(), value)
    }

    fn is_help(&self, spec: &OptionSpec) -> bool {
        self.grammar.has_help_option() && spec.long() == Some(HELP_NAME)
    }

    fn bind(&mut self, token: &str) -> Result<(), ParseError> {
        let positionals = self.grammar.positionals();

        match positionals.get(self.cursor) {
            Some(slot) => {
                match slot.multiplicity() {
                    Multiplicity::One | Multiplicity::OptionalOne => {
                        self.cursor += 1;
                    }
                    Multiplicity::Variadic => {
                        // Absorbs all further non-option tokens; the cursor stays put.
                    }
                }

                self.result.bind_positional(slot.name(), token.to_string());
                Ok(())
            }
            None => Err(ParseError::UnexpectedPositionalArgument(token.to_string())),
        }
    }

    fn finish(self) -> Result<ParseOutcome, ParseError> {
        for slot in &self.grammar.positionals()[self.cursor..] {
            if slot.multiplicity() == Multiplicity::One {
                return Err(ParseError::MissingRequiredPositionalArgument(
                    slot.name().to_string(),
                ));
            }
        }

        Ok(ParseOutcome::Command(self.result))
    }
}
