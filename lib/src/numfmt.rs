//! Integer to ASCII digit rendering.
//!
//! Digits are produced right to left into a fixed scratch buffer owned by the
//! caller's frame; the returned slice borrows that buffer. No allocation and
//! no recursion, so it is safe to call from any stack depth.

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Room for `u64::MAX` in decimal (20 digits) plus a sign.
pub const DIGIT_BUF_LEN: usize = 24;

/// Width of a pointer rendered by [`DigitBuf::hex_fixed_u64`].
pub const POINTER_HEX_DIGITS: usize = 16;

pub struct DigitBuf {
    buf: [u8; DIGIT_BUF_LEN],
}

impl DigitBuf {
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: [0; DIGIT_BUF_LEN],
        }
    }

    fn fill_decimal(&mut self, value: u64) -> usize {
        let mut pos = DIGIT_BUF_LEN;
        let mut v = value;
        loop {
            pos -= 1;
            self.buf[pos] = b'0' + (v % 10) as u8;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        pos
    }

    pub fn decimal_u64(&mut self, value: u64) -> &[u8] {
        let start = self.fill_decimal(value);
        &self.buf[start..]
    }

    /// Negative values are rendered from their unsigned magnitude, so
    /// `i64::MIN` is never negated.
    pub fn decimal_i64(&mut self, value: i64) -> &[u8] {
        let mut start = self.fill_decimal(value.unsigned_abs());
        if value < 0 {
            start -= 1;
            self.buf[start] = b'-';
        }
        &self.buf[start..]
    }

    /// Lowercase, no prefix, no padding.
    pub fn hex_u64(&mut self, value: u64) -> &[u8] {
        let mut pos = DIGIT_BUF_LEN;
        let mut v = value;
        loop {
            pos -= 1;
            self.buf[pos] = HEX_DIGITS[(v & 0xF) as usize];
            v >>= 4;
            if v == 0 {
                break;
            }
        }
        &self.buf[pos..]
    }

    /// Exactly [`POINTER_HEX_DIGITS`] lowercase digits, zero padded.
    pub fn hex_fixed_u64(&mut self, value: u64) -> &[u8] {
        let start = DIGIT_BUF_LEN - POINTER_HEX_DIGITS;
        let mut i = 0usize;
        while i < POINTER_HEX_DIGITS {
            let shift = (POINTER_HEX_DIGITS - 1 - i) * 4;
            self.buf[start + i] = HEX_DIGITS[((value >> shift) & 0xF) as usize];
            i += 1;
        }
        &self.buf[start..]
    }
}

impl Default for DigitBuf {
    fn default() -> Self {
        Self::new()
    }
}
