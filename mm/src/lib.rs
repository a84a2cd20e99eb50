//! Heap growth primitives for the enclibc runtime.
//!
//! [`region`] owns the bounded break logic; [`sbrk`] wraps one region as the
//! process heap behind the classical `sbrk` entry point.

#![no_std]

pub mod region;
pub mod sbrk;

pub use enclibc_abi::{HEAP_FAILED, HeapError, HeapResult, is_heap_failure};
pub use region::{HeapRegion, SharedHeapRegion};
pub use sbrk::{HeapStats, heap_install, heap_sbrk, heap_stats, process_heap};
