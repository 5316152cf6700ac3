//! Core data types for the Mnemo method memoization library.
//!
//! This crate provides the value types shared by the cache engine and the
//! interception facade: the cache policy attached to a callable, the stable
//! identity of a callable, and the value-semantic call key derived from one
//! call's argument list.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod key;
mod method;
mod policy;

pub use key::CallKey;
pub use method::MethodId;
pub use policy::{CachePolicy, CachePolicyBuilder};
