//! Bounded, time-expiring cache engine.
//!
//! This crate provides the per-callable cache instance used by the Mnemo
//! interception facade: bounded capacity with recency-based eviction,
//! expiration measured from write time, and a get-or-compute entry point
//! that collapses concurrent computations per key.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cache;

pub use cache::TtlCache;
