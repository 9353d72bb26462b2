use thiserror::Error;

/// Everything that can go wrong while declaring or extracting arguments.
///
/// None of these cross the accessor boundary: accessors record them in
/// [`ArgStore::diagnostics`](crate::ArgStore::diagnostics) and fall back to the
/// declared default, unless strict mode turns a fatal one into process exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// A flagged accessor was called with neither a short nor a long name.
    #[error("flag declaration needs a short or a long name")]
    MissingFlagNames,

    /// A long name was written with a single hyphen (`-name`).
    #[error("illegal long flag '{0}' (use '--name' or 'name' for long flags)")]
    MalformedLongFlag(String),

    /// A flag-only boolean was declared with `true` as its default.
    #[error("flag-only boolean {0} must default to false")]
    TrueDefaultForFlagOnly(String),

    #[error("invalid number '{value}' for {arg}")]
    InvalidNumber { arg: String, value: String },

    #[error("invalid boolean '{value}' for {arg}")]
    InvalidBoolean { arg: String, value: String },

    /// A hyphen-prefixed token was still present during positional scanning.
    #[error(
        "'{0}' looks like a flag: it is either unknown, or positional arguments were \
         extracted before all flagged ones"
    )]
    StrayFlag(String),

    /// A value-taking flag was extracted after positional extraction began.
    #[error("flag {0} extracted after positional arguments; positional indices may have shifted")]
    FlagAfterPositional(String),

    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
}

/// Coarse classification of [`ArgError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Programmer mistake in a declaration.
    Usage,
    /// User input that does not convert to the requested type.
    Format,
    /// Leftover flag-like tokens.
    Structural,
}

impl ArgError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingFlagNames
            | Self::MalformedLongFlag(_)
            | Self::TrueDefaultForFlagOnly(_) => ErrorClass::Usage,
            Self::InvalidNumber { .. } | Self::InvalidBoolean { .. } => ErrorClass::Format,
            Self::StrayFlag(_) | Self::FlagAfterPositional(_) | Self::UnknownFlag(_) => {
                ErrorClass::Structural
            }
        }
    }

    /// Whether strict mode terminates the process on this error.
    ///
    /// Unrecognized boolean words always fall back to the default.
    pub fn is_fatal_in_strict(&self) -> bool {
        match self.class() {
            ErrorClass::Usage => true,
            ErrorClass::Format => matches!(self, Self::InvalidNumber { .. }),
            ErrorClass::Structural => false,
        }
    }
}
