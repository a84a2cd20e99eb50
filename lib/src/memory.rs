//! Raw byte buffer primitives. No bounds checking: the caller owns the ranges.

use core::ffi::c_int;

/// Overlap-safe; copy direction follows the address order of the ranges.
pub unsafe fn memmove_internal(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    unsafe {
        if dest as *const u8 == src || n == 0 {
            return dest;
        }

        if dest < src as *mut u8 {
            let mut i = 0usize;
            while i < n {
                *dest.add(i) = *src.add(i);
                i += 1;
            }
        } else {
            let mut i = n;
            while i > 0 {
                i -= 1;
                *dest.add(i) = *src.add(i);
            }
        }

        dest
    }
}

pub unsafe fn memset_internal(dest: *mut u8, value: c_int, n: usize) -> *mut u8 {
    unsafe {
        let mut i = 0usize;
        let val = value as u8;
        while i < n {
            *dest.add(i) = val;
            i += 1;
        }
        dest
    }
}

pub unsafe fn memcpy_internal(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 {
    unsafe {
        let mut i = 0usize;
        while i < n {
            *dest.add(i) = *src.add(i);
            i += 1;
        }
        dest
    }
}

pub unsafe fn memcmp_internal(s1: *const u8, s2: *const u8, n: usize) -> c_int {
    unsafe {
        let mut i = 0usize;
        while i < n {
            let a = *s1.add(i);
            let b = *s2.add(i);
            if a != b {
                return if a < b { -1 } else { 1 };
            }
            i += 1;
        }
        0
    }
}

crate::encl_export! {
    fn memmove(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 => memmove_internal;
    fn memset(dest: *mut u8, value: c_int, n: usize) -> *mut u8 => memset_internal;
    fn memcpy(dest: *mut u8, src: *const u8, n: usize) -> *mut u8 => memcpy_internal;
    fn memcmp(s1: *const u8, s2: *const u8, n: usize) -> c_int => memcmp_internal;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memcpy_and_memset() {
        let src = *b"abcdef";
        let mut dest = [0u8; 6];
        let ret = unsafe { memcpy_internal(dest.as_mut_ptr(), src.as_ptr(), 4) };
        assert_eq!(ret, dest.as_mut_ptr());
        assert_eq!(&dest, b"abcd\0\0");

        unsafe { memset_internal(dest.as_mut_ptr().add(1), b'z' as c_int, 3) };
        assert_eq!(&dest, b"azzz\0\0");
    }

    #[test]
    fn memset_truncates_value_to_byte() {
        let mut dest = [0u8; 2];
        unsafe { memset_internal(dest.as_mut_ptr(), 0x1ff, 2) };
        assert_eq!(dest, [0xff, 0xff]);
    }

    #[test]
    fn memmove_handles_both_overlap_directions() {
        let mut buf = *b"123456789";
        unsafe { memmove_internal(buf.as_mut_ptr().add(2), buf.as_ptr(), 5) };
        assert_eq!(&buf, b"121234589");

        let mut buf = *b"123456789";
        unsafe { memmove_internal(buf.as_mut_ptr(), buf.as_ptr().add(2), 5) };
        assert_eq!(&buf, b"345676789");
    }

    #[test]
    fn memcmp_reports_sign_of_first_difference() {
        unsafe {
            assert_eq!(memcmp_internal(b"abc".as_ptr(), b"abc".as_ptr(), 3), 0);
            assert_eq!(memcmp_internal(b"abc".as_ptr(), b"abd".as_ptr(), 3), -1);
            assert_eq!(memcmp_internal(b"\xff".as_ptr(), b"\x01".as_ptr(), 1), 1);
            assert_eq!(memcmp_internal(b"x".as_ptr(), b"y".as_ptr(), 0), 0);
        }
    }

    #[test]
    fn exported_memcmp_forwards() {
        assert_eq!(unsafe { encl_memcmp(b"aa".as_ptr(), b"ab".as_ptr(), 2) }, -1);
    }
}
