//! Region-bounded heap growth.
//!
//! A region is a fixed span `[base, base + limit)` plus a break offset `brk`
//! with `0 <= brk <= limit`. Growth moves `brk` forward and hands back the
//! old break; nothing ever moves it backward. A failed request leaves the
//! region exactly as it was.
//!
//! [`HeapRegion`] is the exclusive form (`&mut self`). [`SharedHeapRegion`]
//! advances `brk` with a compare-and-swap loop so that concurrent callers
//! always receive disjoint ranges.

use core::marker::PhantomData;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

use enclibc_abi::{HEAP_FAILED, HeapError, HeapResult};
use enclibc_lib::{align_up_checked, klog_debug, klog_warn};

/// New break for `increment`, or why there is none.
fn advance(brk: usize, limit: usize, increment: isize) -> HeapResult<usize> {
    if increment < 0 {
        return Err(HeapError::Shrink);
    }
    let increment = increment as usize;
    if increment > limit - brk {
        return Err(HeapError::Exhausted);
    }
    Ok(brk + increment)
}

/// Offset of an `align`-aligned block of `size` bytes at or after `brk`,
/// and the break that follows it.
fn plan_aligned(
    base: usize,
    brk: usize,
    limit: usize,
    size: usize,
    align: usize,
) -> HeapResult<(usize, usize)> {
    if !align.is_power_of_two() {
        return Err(HeapError::InvalidAlignment);
    }
    let cursor = base + brk;
    let block = align_up_checked(cursor, align).ok_or(HeapError::Exhausted)? - base;
    let end = block.checked_add(size).ok_or(HeapError::Exhausted)?;
    if end > limit {
        return Err(HeapError::Exhausted);
    }
    Ok((block, end))
}

fn validate_raw(base: *mut u8, len: usize) -> HeapResult<NonNull<u8>> {
    let base = NonNull::new(base).ok_or(HeapError::InvalidRegion)?;
    if (base.as_ptr() as usize).checked_add(len).is_none() || len > isize::MAX as usize {
        return Err(HeapError::InvalidRegion);
    }
    Ok(base)
}

#[inline]
fn at(base: NonNull<u8>, offset: usize) -> NonNull<u8> {
    // SAFETY: callers only pass offsets within 0..=limit of a valid region.
    unsafe { base.add(offset) }
}

fn log_denied(increment: isize, remaining: usize, err: HeapError) {
    klog_warn!(
        "heap: grow by {} denied: {} ({} bytes left)",
        increment,
        err,
        remaining
    );
}

/// Exclusively owned heap region.
pub struct HeapRegion<'a> {
    base: NonNull<u8>,
    limit: usize,
    brk: usize,
    _mem: PhantomData<&'a mut [u8]>,
}

impl<'a> HeapRegion<'a> {
    /// Region over borrowed memory; the break starts at the first byte.
    pub fn new(mem: &'a mut [u8]) -> Self {
        let limit = mem.len();
        Self {
            base: NonNull::from(mem).cast(),
            limit,
            brk: 0,
            _mem: PhantomData,
        }
    }

    /// Region over a raw pre-mapped span.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be valid for reads and writes for `'a` and
    /// must not be accessed through any other path while the region lives.
    pub unsafe fn from_raw_parts(base: *mut u8, len: usize) -> HeapResult<Self> {
        let base = validate_raw(base, len)?;
        Ok(Self {
            base,
            limit: len,
            brk: 0,
            _mem: PhantomData,
        })
    }

    #[inline]
    pub fn base(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    #[inline]
    pub fn current_break(&self) -> *mut u8 {
        at(self.base, self.brk).as_ptr()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.brk
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.brk
    }

    /// Whether `addr` lies inside the region, granted or not.
    pub fn contains(&self, addr: *const u8) -> bool {
        let start = self.base.as_ptr() as usize;
        let addr = addr as usize;
        addr >= start && addr - start < self.limit
    }

    /// Move the break forward by `increment` bytes and return the old break.
    ///
    /// Zero reports the current break without touching anything. Negative
    /// increments are refused with [`HeapError::Shrink`].
    pub fn extend(&mut self, increment: isize) -> HeapResult<NonNull<u8>> {
        let old = self.brk;
        match advance(old, self.limit, increment) {
            Ok(new) => {
                self.brk = new;
                if increment != 0 {
                    klog_debug!("heap: break {} -> {} of {}", old, new, self.limit);
                }
                Ok(at(self.base, old))
            }
            Err(err) => {
                log_denied(increment, self.remaining(), err);
                Err(err)
            }
        }
    }

    /// Classical `sbrk`: old break, or [`HEAP_FAILED`] as an address.
    pub fn sbrk(&mut self, increment: isize) -> *mut u8 {
        match self.extend(increment) {
            Ok(old) => old.as_ptr(),
            Err(_) => HEAP_FAILED as *mut u8,
        }
    }

    /// Grow far enough to return an `align`-aligned block of `size` bytes.
    ///
    /// The padding in front of the block is consumed along with it.
    pub fn extend_aligned(&mut self, size: usize, align: usize) -> HeapResult<NonNull<u8>> {
        let base = self.base.as_ptr() as usize;
        let (block, end) = plan_aligned(base, self.brk, self.limit, size, align)
            .inspect_err(|&err| {
                klog_warn!("heap: aligned grow {}@{} denied: {}", size, align, err);
            })?;
        self.brk = end;
        Ok(at(self.base, block))
    }

    /// Hand the region to concurrent callers. The break carries over.
    pub fn into_shared(self) -> SharedHeapRegion<'a> {
        SharedHeapRegion {
            base: self.base,
            limit: self.limit,
            brk: AtomicUsize::new(self.brk),
            _mem: PhantomData,
        }
    }
}

// SAFETY: the region only ever hands out addresses; it never dereferences
// them, and the borrow it models is exclusive.
unsafe impl Send for HeapRegion<'_> {}

/// Heap region shared between concurrent callers.
pub struct SharedHeapRegion<'a> {
    base: NonNull<u8>,
    limit: usize,
    brk: AtomicUsize,
    _mem: PhantomData<&'a mut [u8]>,
}

// SAFETY: `brk` is only advanced by compare-and-swap, so two successful
// extensions never return overlapping ranges; `base` and `limit` are
// immutable after construction.
unsafe impl Send for SharedHeapRegion<'_> {}
unsafe impl Sync for SharedHeapRegion<'_> {}

impl<'a> SharedHeapRegion<'a> {
    pub fn new(mem: &'a mut [u8]) -> Self {
        HeapRegion::new(mem).into_shared()
    }

    /// # Safety
    ///
    /// Same contract as [`HeapRegion::from_raw_parts`].
    pub unsafe fn from_raw_parts(base: *mut u8, len: usize) -> HeapResult<Self> {
        unsafe { HeapRegion::from_raw_parts(base, len) }.map(HeapRegion::into_shared)
    }

    #[inline]
    pub fn base(&self) -> *mut u8 {
        self.base.as_ptr()
    }

    #[inline]
    pub fn current_break(&self) -> *mut u8 {
        at(self.base, self.brk.load(Ordering::Acquire)).as_ptr()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.limit
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.brk.load(Ordering::Acquire)
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.used()
    }

    pub fn contains(&self, addr: *const u8) -> bool {
        let start = self.base.as_ptr() as usize;
        let addr = addr as usize;
        addr >= start && addr - start < self.limit
    }

    /// Same contract as [`HeapRegion::extend`]; the bounds check and the
    /// advance form one compare-and-swap.
    pub fn extend(&self, increment: isize) -> HeapResult<NonNull<u8>> {
        let mut current = self.brk.load(Ordering::Acquire);
        if increment == 0 {
            return Ok(at(self.base, current));
        }

        loop {
            let new = match advance(current, self.limit, increment) {
                Ok(new) => new,
                Err(err) => {
                    log_denied(increment, self.limit - current, err);
                    return Err(err);
                }
            };
            match self
                .brk
                .compare_exchange_weak(current, new, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    klog_debug!("heap: break {} -> {} of {}", current, new, self.limit);
                    return Ok(at(self.base, current));
                }
                Err(actual) => current = actual,
            }
        }
    }

    pub fn sbrk(&self, increment: isize) -> *mut u8 {
        match self.extend(increment) {
            Ok(old) => old.as_ptr(),
            Err(_) => HEAP_FAILED as *mut u8,
        }
    }

    pub fn extend_aligned(&self, size: usize, align: usize) -> HeapResult<NonNull<u8>> {
        let base = self.base.as_ptr() as usize;
        let mut current = self.brk.load(Ordering::Acquire);
        loop {
            let (block, end) = match plan_aligned(base, current, self.limit, size, align) {
                Ok(plan) => plan,
                Err(err) => {
                    klog_warn!("heap: aligned grow {}@{} denied: {}", size, align, err);
                    return Err(err);
                }
            };
            match self
                .brk
                .compare_exchange_weak(current, end, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return Ok(at(self.base, block)),
                Err(actual) => current = actual,
            }
        }
    }
}
