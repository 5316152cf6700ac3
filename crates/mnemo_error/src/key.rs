//! Call key normalization error types.

/// Kinds of call key errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum KeyErrorKind {
    /// The argument list was absent (`null`) rather than empty
    #[display("Argument list is missing; a zero-argument call must pass an empty sequence")]
    MissingArguments,
    /// The argument payload was not a sequence
    #[display("Argument payload is not a sequence: {}", _0)]
    NotASequence(String),
}

/// Call key error with location tracking.
///
/// A missing argument list indicates a bug in the interception collaborator,
/// not a cache condition, so construction fails fast instead of producing a
/// degenerate key.
///
/// # Examples
///
/// ```
/// use mnemo_error::{KeyError, KeyErrorKind};
///
/// let err = KeyError::new(KeyErrorKind::MissingArguments);
/// assert!(format!("{}", err).contains("Argument list is missing"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Key Error: {} at line {} in {}", kind, line, file)]
pub struct KeyError {
    /// The kind of error that occurred
    pub kind: KeyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl KeyError {
    /// Create a new key error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: KeyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
