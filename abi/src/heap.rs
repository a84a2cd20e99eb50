//! Heap growth sentinel shared by every `sbrk`-style entry point.

/// Address returned when a heap region cannot satisfy a growth request.
///
/// All bits set, i.e. `(void*)-1` on the C side. Never a valid break.
pub const HEAP_FAILED: usize = usize::MAX;

/// Check a returned break address against [`HEAP_FAILED`].
#[inline(always)]
pub const fn is_heap_failure(addr: usize) -> bool {
    addr == HEAP_FAILED
}
