//! Error codes returned across the C boundary

use core::ffi::c_int;
use core::fmt;

/// Implement common methods for runtime error enums.
///
/// Generates `as_c_int()`, `from_c_int()`, `is_success()`, and `is_error()` methods
/// for `#[repr(i32)]` error enums that follow the `0` / negative convention.
macro_rules! impl_runtime_error {
    ($ty:ty, fallback: $fallback:ident, variants: { $($val:literal => $variant:ident),* $(,)? }) => {
        impl $ty {
            /// Convert to C-style integer for `extern "C"` returns.
            #[inline]
            pub fn as_c_int(self) -> c_int {
                self as c_int
            }

            /// Convert from C-style integer.
            #[inline]
            pub fn from_c_int(val: c_int) -> Self {
                match val {
                    $($val => Self::$variant,)*
                    _ => Self::$fallback,
                }
            }

            /// Check if this is a success result.
            #[inline]
            pub fn is_success(self) -> bool {
                matches!(self, Self::Success)
            }

            /// Check if this is an error result.
            #[inline]
            pub fn is_error(self) -> bool {
                !self.is_success()
            }
        }
    };
}

/// Heap operation result type
pub type HeapResult<T> = Result<T, HeapError>;

/// Errors reported by the heap region and the process heap shim
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapError {
    /// Operation succeeded
    #[default]
    Success = 0,
    /// Fewer bytes left in the region than requested
    Exhausted = -1,
    /// Negative increment; regions never give memory back
    Shrink = -2,
    /// No process heap has been installed yet
    NotInstalled = -3,
    /// A process heap is already installed
    AlreadyInstalled = -4,
    /// Region descriptor is unusable (null base or wrapping range)
    InvalidRegion = -5,
    /// Alignment is zero or not a power of two
    InvalidAlignment = -6,
}

impl_runtime_error!(HeapError, fallback: InvalidRegion, variants: {
    0 => Success,
    -1 => Exhausted,
    -2 => Shrink,
    -3 => NotInstalled,
    -4 => AlreadyInstalled,
    -5 => InvalidRegion,
    -6 => InvalidAlignment,
});

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Success => "success",
            Self::Exhausted => "heap region exhausted",
            Self::Shrink => "heap region cannot shrink",
            Self::NotInstalled => "no process heap installed",
            Self::AlreadyInstalled => "process heap already installed",
            Self::InvalidRegion => "invalid heap region",
            Self::InvalidAlignment => "alignment is not a power of two",
        };
        f.write_str(msg)
    }
}
