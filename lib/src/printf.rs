//! Bounded printf-style renderer.
//!
//! A deliberately small grammar, parsed in one left-to-right pass:
//!
//! | Directive | Argument            | Output                          |
//! |-----------|---------------------|---------------------------------|
//! | `%s`      | [`Arg::Str`]        | bytes up to the first NUL       |
//! | `%u`      | `U32` / `Hex32`     | unsigned decimal                |
//! | `%d`      | `I32`               | signed decimal                  |
//! | `%x`      | `U32` / `Hex32`     | lowercase hex, no prefix        |
//! | `%lu`     | `U64` / `Hex64`     | unsigned decimal                |
//! | `%ld`     | `I64`               | signed decimal                  |
//! | `%lx`     | `U64` / `Hex64`     | lowercase hex, no prefix        |
//! | `%zu`     | `Usize`             | unsigned decimal                |
//! | `%zd`     | `Isize`             | signed decimal                  |
//! | `%p`      | `Ptr`               | `0x` + 16 lowercase hex digits  |
//!
//! There are no widths, precisions or flags. The template ends at the end of
//! the slice or at its first NUL byte.
//!
//! Anything else after a `%` (including `%%` and a trailing `%`) is an unknown
//! directive, handled according to [`UnknownDirective`]. The default copies
//! the raw directive text (`%` plus the following byte) into the output.
//!
//! An argument whose tag does not fit the directive, or a missing argument,
//! renders the raw directive text instead of a value. A mismatched argument is
//! still consumed so later directives keep their pairing.
//!
//! # Bounds
//!
//! At most `dest.len() - 1` payload bytes are written, followed by one NUL.
//! An empty `dest` is never touched. The return value is always the length of
//! the full rendering, so `ret >= dest.len()` signals truncation.

use core::ffi::CStr;
use core::fmt;

use crate::numfmt::DigitBuf;
use crate::string;

/// One tagged argument for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arg<'a> {
    Str(&'a [u8]),
    U32(u32),
    I32(i32),
    Hex32(u32),
    U64(u64),
    I64(i64),
    Hex64(u64),
    Usize(usize),
    Isize(isize),
    Ptr(usize),
}

/// A recognized conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Str,
    Uint,
    Int,
    Hex,
    LongUint,
    LongInt,
    LongHex,
    SizeUint,
    SizeInt,
    Pointer,
}

/// An argument resolved against its conversion, ready to be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value<'a> {
    Bytes(&'a [u8]),
    Unsigned(u64),
    Signed(i64),
    Hex(u64),
    Pointer(usize),
}

impl<'a> Arg<'a> {
    /// `None` when the tag does not fit `conv`.
    pub fn value_for(&self, conv: Conversion) -> Option<Value<'a>> {
        let value = match (conv, *self) {
            (Conversion::Str, Arg::Str(s)) => Value::Bytes(s),
            (Conversion::Uint, Arg::U32(v) | Arg::Hex32(v)) => Value::Unsigned(v as u64),
            (Conversion::Hex, Arg::U32(v) | Arg::Hex32(v)) => Value::Hex(v as u64),
            (Conversion::Int, Arg::I32(v)) => Value::Signed(v as i64),
            (Conversion::LongUint, Arg::U64(v) | Arg::Hex64(v)) => Value::Unsigned(v),
            (Conversion::LongHex, Arg::U64(v) | Arg::Hex64(v)) => Value::Hex(v),
            (Conversion::LongInt, Arg::I64(v)) => Value::Signed(v),
            (Conversion::SizeUint, Arg::Usize(v)) => Value::Unsigned(v as u64),
            (Conversion::SizeInt, Arg::Isize(v)) => Value::Signed(v as i64),
            (Conversion::Pointer, Arg::Ptr(p)) => Value::Pointer(p),
            _ => return None,
        };
        Some(value)
    }
}

macro_rules! impl_arg_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Arg<'_> {
                #[inline]
                fn from(v: $ty) -> Self {
                    Arg::$variant(v)
                }
            }
        )*
    };
}

impl_arg_from!(
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    usize => Usize,
    isize => Isize,
);

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(s)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Arg::Str(s)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s.as_bytes())
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    fn from(s: &'a CStr) -> Self {
        Arg::Str(s.to_bytes())
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(p: *const T) -> Self {
        Arg::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(p: *mut T) -> Self {
        Arg::Ptr(p as usize)
    }
}

/// A parsed piece of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive<'f> {
    Literal(&'f [u8]),
    /// The conversion and the raw directive text it was parsed from.
    Convert(Conversion, &'f [u8]),
    /// Raw text of a `%` sequence outside the grammar.
    Unknown(&'f [u8]),
}

/// Single-pass directive iterator over a template.
pub struct Directives<'f> {
    fmt: &'f [u8],
    pos: usize,
}

impl<'f> Directives<'f> {
    pub fn new(fmt: &'f [u8]) -> Self {
        Self {
            fmt: string::cstr_bytes(fmt),
            pos: 0,
        }
    }
}

fn parse_conversion(spec: &[u8]) -> (Option<Conversion>, usize) {
    match spec {
        [b's', ..] => (Some(Conversion::Str), 1),
        [b'u', ..] => (Some(Conversion::Uint), 1),
        [b'd', ..] => (Some(Conversion::Int), 1),
        [b'x', ..] => (Some(Conversion::Hex), 1),
        [b'p', ..] => (Some(Conversion::Pointer), 1),
        [b'l', b'u', ..] => (Some(Conversion::LongUint), 2),
        [b'l', b'd', ..] => (Some(Conversion::LongInt), 2),
        [b'l', b'x', ..] => (Some(Conversion::LongHex), 2),
        [b'z', b'u', ..] => (Some(Conversion::SizeUint), 2),
        [b'z', b'd', ..] => (Some(Conversion::SizeInt), 2),
        [_, ..] => (None, 1),
        [] => (None, 0),
    }
}

impl<'f> Iterator for Directives<'f> {
    type Item = Directive<'f>;

    fn next(&mut self) -> Option<Directive<'f>> {
        let fmt = self.fmt;
        let rest = fmt.get(self.pos..).filter(|r| !r.is_empty())?;

        if rest[0] != b'%' {
            let len = rest.iter().position(|&b| b == b'%').unwrap_or(rest.len());
            self.pos += len;
            return Some(Directive::Literal(&rest[..len]));
        }

        let (conv, used) = parse_conversion(&rest[1..]);
        let raw = &rest[..1 + used];
        self.pos += raw.len();
        Some(match conv {
            Some(conv) => Directive::Convert(conv, raw),
            None => Directive::Unknown(raw),
        })
    }
}

/// Supplies arguments to the renderer in directive order.
pub trait ArgSource<'a> {
    /// Consume the next argument and resolve it for `conv`.
    fn next_value(&mut self, conv: Conversion) -> Option<Value<'a>>;
}

/// Arguments from an ordered slice of [`Arg`].
pub struct SliceArgs<'s, 'a> {
    args: core::slice::Iter<'s, Arg<'a>>,
}

impl<'s, 'a> SliceArgs<'s, 'a> {
    pub fn new(args: &'s [Arg<'a>]) -> Self {
        Self { args: args.iter() }
    }

    /// Arguments not consumed by any directive.
    pub fn remaining(&self) -> usize {
        self.args.len()
    }
}

impl<'a> ArgSource<'a> for SliceArgs<'_, 'a> {
    fn next_value(&mut self, conv: Conversion) -> Option<Value<'a>> {
        self.args.next()?.value_for(conv)
    }
}

/// Policy for `%` sequences outside the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnknownDirective {
    /// Copy the raw directive text and keep going.
    #[default]
    EmitLiteral,
    /// End the rendering at the directive. The terminator is still written.
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RenderConfig {
    pub unknown: UnknownDirective,
}

impl RenderConfig {
    pub const fn new(unknown: UnknownDirective) -> Self {
        Self { unknown }
    }
}

/// Output cursor over a fixed buffer.
///
/// `pos` counts every byte pushed, whether or not it fit. Bytes are stored
/// only while one slot remains for the terminator.
pub struct BoundedWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl<'b> BoundedWriter<'b> {
    #[inline]
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        let limit = self.buf.len().saturating_sub(1);
        if self.pos < limit {
            let n = bytes.len().min(limit - self.pos);
            self.buf[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
        }
        self.pos = self.pos.saturating_add(bytes.len());
    }

    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.push(&[byte]);
    }

    /// Logical length: everything pushed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes physically stored, excluding the terminator.
    #[inline]
    pub fn written(&self) -> usize {
        self.pos.min(self.buf.len().saturating_sub(1))
    }

    pub fn is_truncated(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Terminate the output and return the logical length.
    pub fn finish(self) -> usize {
        let at = self.written();
        if let Some(slot) = self.buf.get_mut(at) {
            *slot = 0;
        }
        self.pos
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s.as_bytes());
        Ok(())
    }
}

fn render_value(out: &mut BoundedWriter<'_>, value: Value<'_>) {
    let mut digits = DigitBuf::new();
    match value {
        Value::Bytes(s) => out.push(string::cstr_bytes(s)),
        Value::Unsigned(v) => out.push(digits.decimal_u64(v)),
        Value::Signed(v) => out.push(digits.decimal_i64(v)),
        Value::Hex(v) => out.push(digits.hex_u64(v)),
        Value::Pointer(p) => {
            out.push(b"0x");
            out.push(digits.hex_fixed_u64(p as u64));
        }
    }
}

pub fn vsnprintf_with<'a, S: ArgSource<'a>>(
    config: RenderConfig,
    dest: &mut [u8],
    fmt: &[u8],
    args: &mut S,
) -> usize {
    let mut out = BoundedWriter::new(dest);

    for directive in Directives::new(fmt) {
        match directive {
            Directive::Literal(text) => out.push(text),
            Directive::Convert(conv, raw) => match args.next_value(conv) {
                Some(value) => render_value(&mut out, value),
                None => out.push(raw),
            },
            Directive::Unknown(raw) => match config.unknown {
                UnknownDirective::EmitLiteral => out.push(raw),
                UnknownDirective::Stop => break,
            },
        }
    }

    out.finish()
}

#[inline]
pub fn vsnprintf<'a, S: ArgSource<'a>>(dest: &mut [u8], fmt: &[u8], args: &mut S) -> usize {
    vsnprintf_with(RenderConfig::default(), dest, fmt, args)
}

pub fn snprintf(dest: &mut [u8], fmt: impl AsRef<[u8]>, args: &[Arg<'_>]) -> usize {
    vsnprintf(dest, fmt.as_ref(), &mut SliceArgs::new(args))
}

/// `snprintf!(buf, "%u-%x", 255u32, 255u32)`; each argument goes through
/// `Arg::from`, so integer literals need an explicit type.
#[macro_export]
macro_rules! snprintf {
    ($dest:expr, $fmt:expr $(, $arg:expr)*) => {
        $crate::printf::snprintf($dest, $fmt, &[$($crate::printf::Arg::from($arg)),*])
    };
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;
    use std::vec::Vec;

    use super::*;

    fn render(cap: usize, fmt: &str, args: &[Arg<'_>]) -> (usize, Vec<u8>) {
        let mut buf = std::vec![0xAAu8; cap];
        let n = snprintf(&mut buf, fmt, args);
        (n, buf)
    }

    fn text(buf: &[u8]) -> &[u8] {
        string::cstr_bytes(buf)
    }

    #[test]
    fn renders_unsigned_and_hex() {
        let (n, buf) = render(10, "%u-%x", &[Arg::U32(255), Arg::U32(255)]);
        assert_eq!(n, 6);
        assert_eq!(&buf[..7], b"255-ff\0");
    }

    #[test]
    fn truncation_reports_full_length() {
        let (n, buf) = render(4, "%u-%x", &[Arg::U32(255), Arg::U32(255)]);
        assert_eq!(n, 6);
        assert_eq!(&buf, b"255\0");
    }

    #[test]
    fn long_min_renders_without_overflow() {
        // 20 digits and sign need 21 bytes; capacity 20 keeps 19 of them.
        let (n, buf) = render(20, "%ld", &[Arg::I64(i64::MIN)]);
        assert_eq!(n, 20);
        assert_eq!(text(&buf), b"-922337203685477580");
        assert_eq!(buf[19], 0);

        let (n, buf) = render(32, "%ld", &[Arg::I64(i64::MIN)]);
        assert_eq!(n, 20);
        assert_eq!(text(&buf), b"-9223372036854775808");
    }

    #[test]
    fn zero_capacity_writes_nothing() {
        let mut empty: [u8; 0] = [];
        assert_eq!(snprintf(&mut empty, "hello %s", &[Arg::from("world")]), 11);
    }

    #[test]
    fn capacity_one_only_terminates() {
        let (n, buf) = render(1, "abc", &[]);
        assert_eq!(n, 3);
        assert_eq!(buf, [0]);
    }

    #[test]
    fn every_conversion() {
        let mut buf = [0u8; 128];
        let n = snprintf!(
            &mut buf,
            "%s|%u|%d|%x|%lu|%ld|%lx|%zu|%zd",
            "str",
            4_000_000_000u32,
            -42i32,
            0xBEEFu32,
            u64::MAX,
            -7i64,
            0xdead_beef_cafeu64,
            12usize,
            -12isize
        );
        let expected: &[u8] =
            b"str|4000000000|-42|beef|18446744073709551615|-7|deadbeefcafe|12|-12";
        assert_eq!(n, expected.len());
        assert_eq!(text(&buf), expected);
    }

    #[test]
    fn hex_tags_accepted_by_decimal_and_hex() {
        let (_, buf) = render(32, "%u %x %lu %lx", &[
            Arg::Hex32(16),
            Arg::Hex32(16),
            Arg::Hex64(16),
            Arg::Hex64(16),
        ]);
        assert_eq!(text(&buf), b"16 10 16 10");
    }

    #[test]
    fn int_min_and_zero() {
        let (_, buf) = render(32, "%d %d %u", &[Arg::I32(i32::MIN), Arg::I32(0), Arg::U32(0)]);
        assert_eq!(text(&buf), b"-2147483648 0 0");
    }

    #[test]
    fn pointer_is_fixed_width_with_prefix() {
        let (n, buf) = render(32, "[%p]", &[Arg::Ptr(0x1234)]);
        assert_eq!(n, 20);
        assert_eq!(text(&buf), b"[0x0000000000001234]");

        let p = 0xdead_usize as *const u8;
        let (_, buf) = render(32, "%p", &[Arg::from(p)]);
        assert_eq!(text(&buf), b"0x000000000000dead");
    }

    #[test]
    fn string_stops_at_nul_and_accepts_cstr() {
        let (n, buf) = render(16, "<%s><%s>", &[Arg::from(b"ab\0cd"), Arg::from(c"xyz")]);
        assert_eq!(n, 9);
        assert_eq!(text(&buf), b"<ab><xyz>");
    }

    #[test]
    fn template_ends_at_nul() {
        let (n, buf) = render(16, "abc\0%u", &[Arg::U32(1)]);
        assert_eq!(n, 3);
        assert_eq!(text(&buf), b"abc");
    }

    #[test]
    fn unknown_directive_emitted_literally_by_default() {
        let (n, buf) = render(32, "100%% %q %lq %z end%", &[]);
        assert_eq!(text(&buf), b"100%% %q %lq %z end%");
        assert_eq!(n, 20);
    }

    #[test]
    fn unknown_directive_stop_policy() {
        let mut buf = [0xAAu8; 32];
        let config = RenderConfig::new(UnknownDirective::Stop);
        let args = [Arg::U32(1), Arg::U32(2)];
        let n = vsnprintf_with(config, &mut buf, b"a%u b%y c%u", &mut SliceArgs::new(&args));
        assert_eq!(n, 4);
        assert_eq!(&buf[..5], b"a1 b\0");
    }

    #[test]
    fn mismatched_argument_renders_directive_and_is_consumed() {
        let args = [Arg::I32(-1), Arg::U32(5)];
        let mut source = SliceArgs::new(&args);
        let mut buf = [0u8; 32];
        let n = vsnprintf(&mut buf, b"%u/%u", &mut source);
        assert_eq!(text(&buf), b"%u/5");
        assert_eq!(n, 4);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn missing_argument_renders_directive() {
        let (n, buf) = render(32, "%d and %s", &[Arg::I32(3)]);
        assert_eq!(text(&buf), b"3 and %s");
        assert_eq!(n, 8);
    }

    #[test]
    fn directives_iterator_splits_template() {
        let parsed: Vec<_> = Directives::new(b"ab%lu%z%").collect();
        assert_eq!(
            parsed,
            std::vec![
                Directive::Literal(b"ab"),
                Directive::Convert(Conversion::LongUint, b"%lu"),
                Directive::Unknown(b"%z"),
                Directive::Unknown(b"%"),
            ]
        );
    }

    #[test]
    fn bounded_writer_never_exceeds_capacity() {
        let pieces: [&[u8]; 4] = [b"hello", b", ", b"world", b"!"];
        let full = b"hello, world!";
        for cap in 0..=full.len() + 2 {
            let mut backing = std::vec![0xAAu8; cap + 4];
            let (buf, guard) = backing.split_at_mut(cap);
            let mut w = BoundedWriter::new(buf);
            for piece in pieces {
                w.push(piece);
            }
            let n = w.finish();
            assert_eq!(n, full.len());
            assert!(guard.iter().all(|&b| b == 0xAA), "cap {cap} overran");
            if cap > 0 {
                let stored = n.min(cap - 1);
                assert_eq!(&backing[..stored], &full[..stored]);
                assert_eq!(backing[stored], 0);
            }
        }
    }

    #[test]
    fn truncated_output_is_prefix_of_full_rendering() {
        let args = [Arg::from("node"), Arg::I64(-31337), Arg::Hex64(0xabc), Arg::Ptr(7)];
        let fmt = "%s:%ld:%lx:%p";
        let (full_len, full) = render(64, fmt, &args);
        assert!(full_len < 64);
        for cap in 1..full_len + 2 {
            let (n, buf) = render(cap, fmt, &args);
            assert_eq!(n, full_len);
            let stored = text(&buf);
            assert!(stored.len() <= cap - 1);
            assert_eq!(stored, &full[..stored.len()]);
            if n < cap {
                assert_eq!(stored, text(&full));
            }
        }
    }

    #[test]
    fn signed_values_parse_back() {
        for v in [0i64, 1, -1, 42, -99_999, i64::MAX, i64::MIN] {
            let mut buf = [0u8; 32];
            snprintf!(&mut buf, "%ld", v);
            let s = core::str::from_utf8(text(&buf)).unwrap();
            assert_eq!(s.parse::<i64>().unwrap(), v);
        }
        for v in [i32::MIN, -1, 0, i32::MAX] {
            let mut buf = [0u8; 16];
            snprintf!(&mut buf, "%d", v);
            let s = core::str::from_utf8(text(&buf)).unwrap();
            assert_eq!(s.parse::<i32>().unwrap(), v);
            assert_eq!(s, v.to_string());
        }
    }

    #[test]
    fn fmt_write_goes_through_bounds() {
        use core::fmt::Write;

        let mut buf = [0u8; 8];
        let mut w = BoundedWriter::new(&mut buf);
        write!(w, "{}-{}", 12345, "abcdef").unwrap();
        assert!(w.is_truncated());
        assert_eq!(w.len(), 12);
        assert_eq!(w.written(), 7);
        w.finish();
        assert_eq!(&buf, b"12345-a\0");
    }
}
