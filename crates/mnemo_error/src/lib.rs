//! Error types for the Mnemo library.
//!
//! This crate provides the foundation error types used throughout the Mnemo
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Precondition errors use `#[track_caller]` for automatic location
//!   capture; [`ComputeError`] instead carries the underlying cause as its
//!   error source
//!
//! # Examples
//!
//! ```
//! use mnemo_error::{MnemoResult, KeyError, KeyErrorKind};
//!
//! fn normalize() -> MnemoResult<()> {
//!     Err(KeyError::new(KeyErrorKind::MissingArguments))?
//! }
//!
//! match normalize() {
//!     Ok(_) => println!("Ok"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compute;
mod error;
mod key;
mod policy;

pub use compute::ComputeError;
pub use error::{MnemoError, MnemoErrorKind, MnemoResult};
pub use key::{KeyError, KeyErrorKind};
pub use policy::{PolicyError, PolicyErrorKind};
