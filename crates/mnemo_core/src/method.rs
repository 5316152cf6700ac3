//! Stable callable identity.

/// Identity of one interceptable method, shared across all instances and
/// calls of that method.
///
/// A `MethodId` is an interned-name handle assigned once at registration
/// time. It is the registry's lookup key: two calls dispatched with the same
/// `MethodId` share one cache, two distinct `MethodId`s never do, even when
/// their policies are identical.
///
/// # Examples
///
/// ```
/// use mnemo_core::MethodId;
///
/// const SIZE: MethodId = MethodId::new("CachedMethods::size");
///
/// assert_eq!(SIZE, MethodId::new("CachedMethods::size"));
/// assert_ne!(SIZE, MethodId::new("CachedMethods::sum_of_sizes"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}", _0)]
pub struct MethodId(&'static str);

impl MethodId {
    /// Create an identity from a stable method name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Get the method name.
    pub fn name(&self) -> &'static str {
        self.0
    }
}
