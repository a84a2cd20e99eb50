//! Process-wide heap for C callers.
//!
//! Rust code passes a [`HeapRegion`](crate::region::HeapRegion) around
//! explicitly. C code linked into the enclave expects a single implicit
//! `sbrk`, so one [`SharedHeapRegion`] can be installed for the lifetime of
//! the process and is reached through the `encl_*` exports below.

use core::ffi::{c_int, c_void};

use spin::Once;

use enclibc_abi::{HEAP_FAILED, HeapError, HeapResult};
use enclibc_lib::{klog_info, klog_warn};

use crate::region::SharedHeapRegion;

static PROCESS_HEAP: Once<SharedHeapRegion<'static>> = Once::new();

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    pub capacity: usize,
    pub used: usize,
    pub remaining: usize,
}

/// Install the process heap over `base..base + len`. Only the first call wins.
///
/// # Safety
///
/// The span must stay valid and reserved for the heap for the rest of the
/// process.
pub unsafe fn heap_install(base: *mut u8, len: usize) -> HeapResult<()> {
    let region = unsafe { SharedHeapRegion::from_raw_parts(base, len) }?;

    let mut installed = false;
    PROCESS_HEAP.call_once(|| {
        installed = true;
        region
    });

    if !installed {
        klog_warn!("heap: install at {:p} ignored, heap already present", base);
        return Err(HeapError::AlreadyInstalled);
    }
    klog_info!("heap: installed {} bytes at {:p}", len, base);
    Ok(())
}

pub fn process_heap() -> HeapResult<&'static SharedHeapRegion<'static>> {
    PROCESS_HEAP.get().ok_or(HeapError::NotInstalled)
}

/// `sbrk` against the process heap; [`HEAP_FAILED`] when there is none.
pub fn heap_sbrk(increment: isize) -> *mut c_void {
    match process_heap() {
        Ok(heap) => heap.sbrk(increment) as *mut c_void,
        Err(err) => {
            klog_warn!("heap: sbrk({}) failed: {}", increment, err);
            HEAP_FAILED as *mut c_void
        }
    }
}

pub fn heap_stats() -> HeapResult<HeapStats> {
    let heap = process_heap()?;
    let used = heap.used();
    Ok(HeapStats {
        capacity: heap.capacity(),
        used,
        remaining: heap.capacity() - used,
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn encl_heap_install(base: *mut c_void, len: usize) -> c_int {
    match unsafe { heap_install(base as *mut u8, len) } {
        Ok(()) => HeapError::Success.as_c_int(),
        Err(err) => err.as_c_int(),
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn encl_sbrk(increment: isize) -> *mut c_void {
    heap_sbrk(increment)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn encl_heap_stats(out: *mut HeapStats) -> c_int {
    let stats = match heap_stats() {
        Ok(stats) => stats,
        Err(err) => return err.as_c_int(),
    };
    match unsafe { out.as_mut() } {
        Some(out) => {
            *out = stats;
            HeapError::Success.as_c_int()
        }
        None => -1,
    }
}
