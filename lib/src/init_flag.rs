//! Atomic initialization flags for runtime subsystems.
//!
//! `InitFlag` tracks whether a one-shot step has happened: attaching the log
//! sink, or entering the sink (the logger's reentrancy guard).
//!
//! # Memory Ordering
//!
//! - `init_once()` uses `SeqCst` swap so exactly one caller wins
//! - `mark_set()` and `reset()` use `Release` to publish side-effects
//! - `is_set_relaxed()` uses `Relaxed` for fast-path guards such as logging

use core::sync::atomic::{AtomicBool, Ordering};

#[repr(transparent)]
pub struct InitFlag {
    flag: AtomicBool,
}

impl InitFlag {
    /// Create a new unset flag.
    #[inline]
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Returns `true` if this call set the flag, `false` if it was already set.
    #[inline]
    pub fn init_once(&self) -> bool {
        !self.flag.swap(true, Ordering::SeqCst)
    }

    #[inline]
    pub fn is_set_relaxed(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn mark_set(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clear the flag so the step can run again.
    #[inline]
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for InitFlag {
    fn default() -> Self {
        Self::new()
    }
}
