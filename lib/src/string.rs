//! NUL-terminated byte string primitives.
//!
//! Each operation comes in two shapes: a raw-pointer `*_internal` function with
//! the classical C contract (exported to C as `encl_*`), and a slice form where
//! the end of the slice acts as an implicit terminator.

use core::ffi::{c_char, c_int};

use crate::memory;

#[inline(always)]
fn to_u8(c: c_char) -> u8 {
    c as u8
}

pub unsafe fn strlen_internal(ptr: *const c_char) -> usize {
    unsafe {
        if ptr.is_null() {
            return 0;
        }

        let mut len = 0usize;
        while *ptr.add(len) != 0 {
            len += 1;
        }
        len
    }
}

/// Never reads past `max` bytes.
pub unsafe fn strnlen_internal(ptr: *const c_char, max: usize) -> usize {
    unsafe {
        if ptr.is_null() {
            return 0;
        }

        let mut len = 0usize;
        while len < max && *ptr.add(len) != 0 {
            len += 1;
        }
        len
    }
}

pub unsafe fn strcmp_internal(lhs: *const c_char, rhs: *const c_char) -> c_int {
    unsafe {
        if lhs == rhs {
            return 0;
        }
        if lhs.is_null() {
            return -1;
        }
        if rhs.is_null() {
            return 1;
        }

        let mut l = lhs;
        let mut r = rhs;
        while *l != 0 && *l == *r {
            l = l.add(1);
            r = r.add(1);
        }

        to_u8(*l) as c_int - to_u8(*r) as c_int
    }
}

pub unsafe fn strncmp_internal(lhs: *const c_char, rhs: *const c_char, mut n: usize) -> c_int {
    unsafe {
        if n == 0 {
            return 0;
        }

        if lhs.is_null() {
            return if rhs.is_null() { 0 } else { -1 };
        }
        if rhs.is_null() {
            return 1;
        }

        let mut l = lhs;
        let mut r = rhs;

        while n > 0 && *l == *r {
            if *l == 0 {
                return 0;
            }
            l = l.add(1);
            r = r.add(1);
            n -= 1;
        }

        if n == 0 {
            0
        } else {
            to_u8(*l) as c_int - to_u8(*r) as c_int
        }
    }
}

/// Returns `strlen(src)`; a result `>= size` means `dest` holds a truncated copy.
pub unsafe fn strlcpy_internal(dest: *mut c_char, src: *const c_char, size: usize) -> usize {
    unsafe {
        let src_len = strlen_internal(src);
        if dest.is_null() || size == 0 {
            return src_len;
        }

        let n = if src_len < size { src_len } else { size - 1 };
        memory::memcpy_internal(dest as *mut u8, src as *const u8, n);
        *dest.add(n) = 0;
        src_len
    }
}

/// Returns the length the concatenation would have had with unlimited room.
/// If `dest` is not terminated within `size` bytes nothing is written.
pub unsafe fn strlcat_internal(dest: *mut c_char, src: *const c_char, size: usize) -> usize {
    unsafe {
        let dest_len = strnlen_internal(dest, size);
        let src_len = strlen_internal(src);
        if dest.is_null() || dest_len == size {
            return size + src_len;
        }

        let room = size - dest_len - 1;
        let n = if src_len < room { src_len } else { room };
        memory::memcpy_internal(dest.add(dest_len) as *mut u8, src as *const u8, n);
        *dest.add(dest_len + n) = 0;
        dest_len + src_len
    }
}

/// Length of `s` up to its first NUL, or the whole slice when it has none.
#[inline]
pub fn strlen_bounded(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Trim `s` to its C string payload.
#[inline]
pub fn cstr_bytes(s: &[u8]) -> &[u8] {
    &s[..strlen_bounded(s)]
}

pub fn strncmp_bytes(lhs: &[u8], rhs: &[u8], n: usize) -> c_int {
    let mut i = 0usize;
    while i < n {
        let l = lhs.get(i).copied().unwrap_or(0);
        let r = rhs.get(i).copied().unwrap_or(0);
        if l != r {
            return l as c_int - r as c_int;
        }
        if l == 0 {
            return 0;
        }
        i += 1;
    }
    0
}

pub fn strcmp_bytes(lhs: &[u8], rhs: &[u8]) -> c_int {
    strncmp_bytes(lhs, rhs, usize::MAX)
}

pub fn strlcpy_bytes(dest: &mut [u8], src: &[u8]) -> usize {
    let src = cstr_bytes(src);
    if let Some(last) = dest.len().checked_sub(1) {
        let n = src.len().min(last);
        dest[..n].copy_from_slice(&src[..n]);
        dest[n] = 0;
    }
    src.len()
}

pub fn strlcat_bytes(dest: &mut [u8], src: &[u8]) -> usize {
    let size = dest.len();
    let dest_len = strlen_bounded(dest);
    let src = cstr_bytes(src);
    if dest_len == size {
        return size + src.len();
    }

    let room = size - dest_len - 1;
    let n = src.len().min(room);
    dest[dest_len..dest_len + n].copy_from_slice(&src[..n]);
    dest[dest_len + n] = 0;
    dest_len + src.len()
}

crate::encl_export! {
    fn strlen(s: *const c_char) -> usize => strlen_internal;
    fn strnlen(s: *const c_char, max: usize) -> usize => strnlen_internal;
    fn strcmp(lhs: *const c_char, rhs: *const c_char) -> c_int => strcmp_internal;
    fn strncmp(lhs: *const c_char, rhs: *const c_char, n: usize) -> c_int => strncmp_internal;
    fn strlcpy(dest: *mut c_char, src: *const c_char, size: usize) -> usize => strlcpy_internal;
    fn strlcat(dest: *mut c_char, src: *const c_char, size: usize) -> usize => strlcat_internal;
}
