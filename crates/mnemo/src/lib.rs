//! Mnemo - Method-Level Memoization
//!
//! Mnemo intercepts calls to registered callables, derives a value-semantic
//! key from the call's arguments, and returns a previously computed result
//! when one exists and has not expired. On a miss the underlying call runs
//! exactly once and its result is stored in that callable's own bounded,
//! time-expiring cache.
//!
//! # Quick Start
//!
//! ```
//! use mnemo::{CachePolicy, MethodId, MethodInterceptor};
//! use serde_json::json;
//! use std::time::Duration;
//!
//! const SIZE: MethodId = MethodId::new("CachedMethods::size");
//!
//! let interceptor = MethodInterceptor::new();
//! let policy = CachePolicy::new(Duration::from_secs(1), 100).unwrap();
//!
//! let value = interceptor
//!     .invoke(SIZE, &policy, json!(["Hi"]), || Ok(json!(2)))
//!     .unwrap();
//! assert_eq!(value, json!(2));
//! ```
//!
//! # Architecture
//!
//! Mnemo is organized as a workspace with focused crates:
//!
//! - `mnemo_error` - Error types (policy, key, computation failures)
//! - `mnemo_core` - Core data types ([`CachePolicy`], [`MethodId`], [`CallKey`])
//! - `mnemo_cache` - The bounded TTL cache engine ([`TtlCache`])
//! - `mnemo` - This facade: [`CacheRegistry`], [`MethodInterceptor`], [`CachedFn`]
//!
//! Caching is purely in-memory and per-process; nothing survives restart.
//! The interceptor never retries, never mutates arguments, and surfaces a
//! failed underlying call as a distinguishable error carrying the cause.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod interceptor;
mod registry;

pub use interceptor::{CachedFn, MethodInterceptor, ProceedError};
pub use registry::CacheRegistry;

pub use mnemo_cache::TtlCache;
pub use mnemo_core::{CachePolicy, CachePolicyBuilder, CallKey, MethodId};
pub use mnemo_error::{
    ComputeError, KeyError, KeyErrorKind, MnemoError, MnemoErrorKind, MnemoResult, PolicyError,
    PolicyErrorKind,
};
