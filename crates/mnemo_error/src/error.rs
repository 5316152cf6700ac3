//! Top-level error wrapper types.

use crate::{ComputeError, KeyError, PolicyError};

/// This is the foundation error enum for the Mnemo workspace. Each variant
/// corresponds to one failure class of the interception pipeline.
///
/// # Examples
///
/// ```
/// use mnemo_error::{MnemoError, KeyError, KeyErrorKind};
///
/// let key_err = KeyError::new(KeyErrorKind::MissingArguments);
/// let err: MnemoError = key_err.into();
/// assert!(format!("{}", err).contains("Key Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MnemoErrorKind {
    /// Invalid cache policy bounds
    #[from(PolicyError)]
    Policy(PolicyError),
    /// Call key normalization failure
    #[from(KeyError)]
    Key(KeyError),
    /// Underlying method body failure
    #[from(ComputeError)]
    Compute(ComputeError),
}

/// Mnemo error with kind discrimination.
///
/// # Examples
///
/// ```
/// use mnemo_error::{MnemoResult, PolicyError, PolicyErrorKind};
///
/// fn might_fail() -> MnemoResult<()> {
///     Err(PolicyError::new(PolicyErrorKind::ZeroTtl))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Mnemo Error: {}", _0)]
pub struct MnemoError(Box<MnemoErrorKind>);

impl MnemoError {
    /// Create a new error from a kind.
    pub fn new(kind: MnemoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MnemoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MnemoErrorKind
impl<T> From<T> for MnemoError
where
    T: Into<MnemoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Mnemo operations.
///
/// # Examples
///
/// ```
/// use mnemo_error::{MnemoResult, KeyError, KeyErrorKind};
///
/// fn normalize() -> MnemoResult<()> {
///     Err(KeyError::new(KeyErrorKind::MissingArguments))?
/// }
/// ```
pub type MnemoResult<T> = std::result::Result<T, MnemoError>;
