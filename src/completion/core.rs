use crate::completion::reply;
use crate::grammar::{Grammar, OptionSpec};
use crate::matcher::looks_like_option;
use crate::model::ValueArity;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The completion generator: enumerates candidate words for the token currently
/// being completed in the shell.
///
/// The generator walks the words typed so far with a relaxed variant of the
/// matching engine; it never errors on incomplete or malformed input, since a
/// user's in-progress typing is expected to be syntactically incomplete.
/// Inputs correspond to Bash's `COMP_WORDS` (the word array, program name
/// excluded) and `COMP_CWORD` (the cursor index).
///
/// ### Example
/// ```
/// use cligram::{Completer, Grammar, OptionSpec};
///
/// let grammar = Grammar::new()
///     .option(OptionSpec::new("alpha")).unwrap()
///     .option(OptionSpec::new("beta")).unwrap();
/// let completer = Completer::new(&grammar);
///
/// assert_eq!(completer.candidates(&["--a"], 0), vec!["--alpha".to_string()]);
/// assert_eq!(completer.compreply(&["--a"], 0), "COMPREPLY=('--alpha')");
/// ```
#[derive(Debug)]
pub struct Completer<'g> {
    grammar: &'g Grammar,
}

impl<'g> Completer<'g> {
    /// Create a completion generator over the grammar.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// The ordered candidate words for the word at `cursor`, possibly empty or
    /// partially typed.
    ///
    /// Option spellings are offered when the word under the cursor starts with `-`;
    /// otherwise sub-command names are offered, until one has been committed.
    /// Positional arguments have no enumerable completion set and produce nothing.
    /// Duplicates are removed; declaration order is preserved as the tie-break.
    pub fn candidates(&self, words: &[&str], cursor: usize) -> Vec<String> {
        let walk = Walk::over(self.grammar, &words[..cursor.min(words.len())]);
        let partial = words.get(cursor).copied().unwrap_or("");
        let mut candidates: Vec<String> = Vec::default();

        if walk.escaped {
            // Everything after '--' is positional; no opinion.
            return candidates;
        }

        if partial.starts_with('-') {
            for spec in walk.grammar.options() {
                if walk.used.contains(&spec.canonical()) {
                    continue;
                }

                if let Some(long) = spec.long() {
                    push_unique(&mut candidates, format!("--{long}"), partial);
                }

                if let Some(short) = spec.short() {
                    push_unique(&mut candidates, format!("-{short}"), partial);
                }
            }
        } else if !walk.saw_bare {
            for sub_command in walk.grammar.sub_commands() {
                push_unique(&mut candidates, sub_command.name().to_string(), partial);
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Enumerated {} candidate(s) for '{partial}'.", candidates.len());
        }

        candidates
    }

    /// The candidates for the word at `cursor`, rendered as the Bash
    /// `COMPREPLY=(..)` assignment.
    ///
    /// An empty candidate sequence renders to the empty string; the caller must not
    /// emit any shell statement in that case.
    pub fn compreply(&self, words: &[&str], cursor: usize) -> String {
        reply::render(&self.candidates(words, cursor))
    }
}

fn push_unique(candidates: &mut Vec<String>, candidate: String, partial: &str) {
    if candidate.starts_with(partial) && !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

// The relaxed walk: determines which grammar level the cursor belongs to, which
// non-repeatable options are exhausted, and whether option/sub-command positions
// have passed. Never errors.
struct Walk<'g> {
    grammar: &'g Grammar,
    used: Vec<String>,
    saw_bare: bool,
    escaped: bool,
}

impl<'g> Walk<'g> {
    fn over(grammar: &'g Grammar, words: &[&str]) -> Self {
        let mut walk = Self {
            grammar,
            used: Vec::default(),
            saw_bare: false,
            escaped: false,
        };
        let mut index = 0;

        while index < words.len() {
            let word = words[index];
            index += 1;

            if walk.escaped {
                continue;
            }

            if word == "--" {
                walk.escaped = true;
                continue;
            }

            if let Some(body) = word.strip_prefix("--") {
                walk.note_long(body, words, &mut index);
            } else if looks_like_option(word) {
                walk.note_short(&word[1..], words, &mut index);
            } else {
                let first_candidate = !walk.saw_bare;
                walk.saw_bare = true;

                if first_candidate {
                    if let Some(sub_grammar) = grammar.find_sub_command(word) {
                        // The committed sub-command owns the remaining words.
                        return Self::over(sub_grammar, &words[index..]);
                    }
                }
            }
        }

        walk
    }

    fn note_long(&mut self, body: &str, words: &[&str], index: &mut usize) {
        let grammar = self.grammar;
        let (name, attached) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match grammar.find_long(name) {
            Some(spec) => {
                if spec.arity() == ValueArity::One
                    && attached.is_none()
                    && *index < words.len()
                    && !looks_like_option(words[*index])
                {
                    // The next word is this option's value.
                    *index += 1;
                }

                self.mark(spec);
            }
            None => {
                // In-progress or misspelled typing; no opinion.
            }
        }
    }

    fn note_short(&mut self, body: &str, words: &[&str], index: &mut usize) {
        let grammar = self.grammar;

        for (offset, single) in body.char_indices() {
            let spec = match grammar.find_short(single) {
                Some(spec) => spec,
                None => return,
            };
            let rest = &body[offset + single.len_utf8()..];

            match spec.arity() {
                ValueArity::None => {
                    self.mark(spec);

                    if rest.starts_with('=') {
                        return;
                    }
                }
                ValueArity::One => {
                    if rest.is_empty()
                        && *index < words.len()
                        && !looks_like_option(words[*index])
                    {
                        *index += 1;
                    }

                    self.mark(spec);
                    return;
                }
                ValueArity::OptionalOne => {
                    self.mark(spec);
                    return;
                }
            }
        }
    }

    fn mark(&mut self, spec: &OptionSpec) {
        if !spec.is_repeatable() {
            self.used.push(spec.canonical());
        }
    }
}
