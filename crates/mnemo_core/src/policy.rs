//! Per-callable cache policy.

use derive_getters::Getters;
use mnemo_error::{PolicyError, PolicyErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Eviction policy for one callable's cache.
///
/// A policy is attached to a callable at declaration time and read exactly
/// once, when that callable's cache is created. It is immutable thereafter;
/// changing retention for a callable means restarting the process with a new
/// declaration.
///
/// Bounds are validated at construction: the time-to-live must be positive
/// and the capacity must hold at least one entry. A cache is never built
/// from an invalid policy. [`new`](CachePolicy::new) and the builder apply
/// the check themselves; a policy obtained through deserialization or the
/// `with_` setters must be passed through [`validate`](CachePolicy::validate)
/// before cache creation.
///
/// # Examples
///
/// ```
/// use mnemo_core::CachePolicy;
/// use std::time::Duration;
///
/// let policy = CachePolicy::new(Duration::from_millis(200), 5).unwrap();
/// assert_eq!(*policy.max_size(), 5);
///
/// assert!(CachePolicy::new(Duration::ZERO, 5).is_err());
/// assert!(CachePolicy::new(Duration::from_secs(1), 0).is_err());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(build_fn(validate = "Self::validate"))]
pub struct CachePolicy {
    /// How long a written entry stays valid
    #[serde(default = "default_ttl")]
    #[builder(default = "default_ttl()")]
    ttl: Duration,

    /// Maximum number of live entries (LRU eviction beyond this)
    #[serde(default = "default_max_size")]
    #[builder(default = "default_max_size()")]
    max_size: usize,
}

fn default_ttl() -> Duration {
    Duration::from_secs(300) // 5 minutes
}

fn default_max_size() -> usize {
    1000
}

impl CachePolicy {
    /// Create a validated policy.
    pub fn new(ttl: Duration, max_size: usize) -> Result<Self, PolicyError> {
        let policy = Self { ttl, max_size };
        policy.validate()?;
        Ok(policy)
    }

    /// Check the policy bounds: `ttl > 0` and `max_size >= 1`.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.ttl.is_zero() {
            return Err(PolicyError::new(PolicyErrorKind::ZeroTtl));
        }
        if self.max_size == 0 {
            return Err(PolicyError::new(PolicyErrorKind::ZeroMaxSize));
        }
        Ok(())
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: default_ttl(),
            max_size: default_max_size(),
        }
    }
}

impl CachePolicyBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ttl) = &self.ttl
            && ttl.is_zero()
        {
            return Err(PolicyError::new(PolicyErrorKind::ZeroTtl).to_string());
        }
        if let Some(0) = self.max_size {
            return Err(PolicyError::new(PolicyErrorKind::ZeroMaxSize).to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_ttl() {
        let err = CachePolicy::new(Duration::ZERO, 10).unwrap_err();
        assert_eq!(err.kind, PolicyErrorKind::ZeroTtl);
    }

    #[test]
    fn rejects_zero_max_size() {
        let err = CachePolicy::new(Duration::from_secs(1), 0).unwrap_err();
        assert_eq!(err.kind, PolicyErrorKind::ZeroMaxSize);
    }

    #[test]
    fn builder_applies_defaults() {
        let policy = CachePolicyBuilder::default().build().unwrap();
        assert_eq!(policy, CachePolicy::default());
    }

    #[test]
    fn builder_rejects_invalid_bounds() {
        let result = CachePolicyBuilder::default().max_size(0).build();
        assert!(result.is_err());

        let result = CachePolicyBuilder::default().ttl(Duration::ZERO).build();
        assert!(result.is_err());
    }

    #[test]
    fn round_trips_through_serde() {
        let policy = CachePolicy::new(Duration::from_millis(200), 5).unwrap();
        let json = serde_json::to_string(&policy).unwrap();
        let back: CachePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, back);
    }
}
