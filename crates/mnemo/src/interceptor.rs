//! Interception entry point.

use crate::CacheRegistry;
use mnemo_core::{CachePolicy, CallKey, MethodId};
use mnemo_error::MnemoResult;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Boxed failure raised by an underlying method body.
pub type ProceedError = Box<dyn std::error::Error + Send + Sync>;

/// Dispatcher invoked in place of an intercepted method call.
///
/// The interceptor owns the registry of per-callable caches and performs the
/// whole pipeline for one call: resolve (or lazily create) the callable's
/// cache, normalize the arguments into a [`CallKey`], and get-or-compute
/// against the cache with the real method body as the computation.
///
/// Beyond caching it changes nothing about call semantics: the body runs at
/// most once per miss, arguments are not mutated, failures are not retried,
/// and a failed body surfaces as [`MnemoErrorKind::Compute`] carrying the
/// original cause.
///
/// [`MnemoErrorKind::Compute`]: mnemo_error::MnemoErrorKind::Compute
///
/// # Examples
///
/// ```
/// use mnemo::{CachePolicy, MethodId, MethodInterceptor};
/// use serde_json::json;
/// use std::time::Duration;
///
/// const MEANING: MethodId = MethodId::new("CachedMethods::meaning_of_life");
///
/// let interceptor = MethodInterceptor::new();
/// let policy = CachePolicy::new(Duration::from_secs(60), 10).unwrap();
///
/// // Zero-argument call: the key is the empty sequence.
/// let value = interceptor
///     .invoke(MEANING, &policy, json!([]), || Ok(json!(42)))
///     .unwrap();
/// assert_eq!(value, json!(42));
/// ```
#[derive(Debug, Default)]
pub struct MethodInterceptor {
    registry: CacheRegistry<JsonValue>,
}

impl MethodInterceptor {
    /// Create an interceptor with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: CacheRegistry::new(),
        }
    }

    /// Intercept one call.
    ///
    /// `args` is the call's ordered argument list as a JSON array; `null`
    /// fails fast as a missing argument list. `proceed` is the real method
    /// body, invoked only on a miss.
    pub fn invoke<F>(
        &self,
        method: MethodId,
        policy: &CachePolicy,
        args: JsonValue,
        proceed: F,
    ) -> MnemoResult<JsonValue>
    where
        F: FnOnce() -> Result<JsonValue, ProceedError>,
    {
        let cache = self.registry.get_or_create(method, |_| policy.clone());
        let key = CallKey::from_value(args)?;
        let value = cache.get_or_compute(key, proceed)?;
        Ok(value)
    }

    /// The underlying registry, for introspection.
    pub fn registry(&self) -> &CacheRegistry<JsonValue> {
        &self.registry
    }
}

/// A callable bound to its identity, policy, and interceptor.
///
/// This is the explicit higher-order form of "wrap this callable": instead
/// of rewiring call sites, the caller builds a `CachedFn` once and invokes
/// [`call`](CachedFn::call) where it would have invoked the method.
///
/// # Examples
///
/// ```
/// use mnemo::{CachedFn, CachePolicy, MethodId, MethodInterceptor};
/// use serde_json::json;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let interceptor = Arc::new(MethodInterceptor::new());
/// let policy = CachePolicy::new(Duration::from_secs(1), 10).unwrap();
///
/// let size = CachedFn::new(
///     Arc::clone(&interceptor),
///     MethodId::new("CachedMethods::size"),
///     policy,
///     |args| {
///         let s = args[0].as_str().ok_or("expected a string")?;
///         Ok(json!(s.len()))
///     },
/// );
///
/// assert_eq!(size.call(json!(["Hi"])).unwrap(), json!(2));
/// ```
pub struct CachedFn<F> {
    interceptor: Arc<MethodInterceptor>,
    method: MethodId,
    policy: CachePolicy,
    body: F,
}

impl<F> CachedFn<F>
where
    F: Fn(&[JsonValue]) -> Result<JsonValue, ProceedError>,
{
    /// Bind a method body to its identity and policy.
    pub fn new(
        interceptor: Arc<MethodInterceptor>,
        method: MethodId,
        policy: CachePolicy,
        body: F,
    ) -> Self {
        Self {
            interceptor,
            method,
            policy,
            body,
        }
    }

    /// Invoke the wrapped callable through the cache.
    pub fn call(&self, args: JsonValue) -> MnemoResult<JsonValue> {
        // Keep a copy of the argument list for the body; the key consumes
        // the original payload.
        let body_args = match &args {
            JsonValue::Array(list) => list.clone(),
            _ => Vec::new(),
        };
        self.interceptor
            .invoke(self.method, &self.policy, args, || (self.body)(&body_args))
    }

    /// Identity of the wrapped callable.
    pub fn method(&self) -> MethodId {
        self.method
    }
}
