//! Underlying computation failure.

use std::fmt;

/// Failure of the underlying method body during a cache miss.
///
/// The original cause is carried as the error source so callers can
/// distinguish their own method's failure from a cache-layer problem.
/// The failed computation is never stored; the next call with the same
/// arguments re-invokes the method.
#[derive(Debug)]
pub struct ComputeError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl ComputeError {
    /// Wrap an underlying failure.
    pub fn new(source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self { source }
    }

    /// Get the underlying cause.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync) {
        self.source.as_ref()
    }
}

impl fmt::Display for ComputeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Computation failed: {}", self.source)
    }
}

impl std::error::Error for ComputeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
