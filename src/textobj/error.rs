use thiserror::Error;

/// Why no argument could be resolved at a position.
///
/// The display strings are meant to be shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No enclosing bracket pair was found before running out of text.
    #[error("not inside argument list")]
    NotInsideArgumentList,
    /// An enclosing pair exists but no non-empty argument could be carved out of it.
    #[error("not an argument")]
    NotAnArgument,
}
