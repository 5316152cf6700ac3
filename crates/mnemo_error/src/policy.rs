//! Cache policy error types.

/// Kinds of cache policy errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PolicyErrorKind {
    /// Time-to-live must be a positive duration
    #[display("Time-to-live must be a positive duration")]
    ZeroTtl,
    /// Maximum size must be at least one entry
    #[display("Maximum size must be at least one entry")]
    ZeroMaxSize,
    /// Required policy field was not supplied
    #[display("Missing policy field: {}", _0)]
    MissingField(String),
}

/// Cache policy error with location tracking.
///
/// Raised when a callable is registered with out-of-range policy values.
/// Policy bounds are validated once, at construction; a cache is never built
/// from an invalid policy.
///
/// # Examples
///
/// ```
/// use mnemo_error::{PolicyError, PolicyErrorKind};
///
/// let err = PolicyError::new(PolicyErrorKind::ZeroMaxSize);
/// assert!(format!("{}", err).contains("at least one entry"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Policy Error: {} at line {} in {}", kind, line, file)]
pub struct PolicyError {
    /// The kind of error that occurred
    pub kind: PolicyErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PolicyError {
    /// Create a new policy error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PolicyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
