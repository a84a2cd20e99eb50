//! enclibc ABI constants
//!
//! Single source of truth for the values that cross the boundary between the
//! runtime crates and the C code linked against them: integer limits of the
//! LP64 C model, the heap failure sentinel, and the error codes returned by
//! the `extern "C"` shims.
//!
//! Nothing in here carries logic beyond trivial conversions.

#![no_std]
#![forbid(unsafe_code)]

pub mod error;
pub mod heap;
pub mod limits;

pub use error::*;
pub use heap::*;
