/// The number of values an option consumes.
///
/// This is a closed set; the matching engine branches exhaustively over these cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueArity {
    /// The option is a bare switch; any attached value is an error.
    None,
    /// The option requires precisely one value, attached (`--key=value`) or from the next token.
    One,
    /// The option may take one attached value (`--key=value`), or none at all.
    /// It never consumes the next token.
    OptionalOne,
}

impl std::fmt::Display for ValueArity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The number of tokens a positional argument binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Precisely one token; unfilled at the end of input is an error.
    One,
    /// At most one token; may be left unfilled.
    OptionalOne,
    /// All remaining non-option tokens, including none.
    /// Must be the last positional declared on a grammar level.
    Variadic,
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
