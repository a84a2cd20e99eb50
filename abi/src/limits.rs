//! Integer limits of the LP64 C model the runtime is linked against.
//!
//! Spelled the classical way (`-1 - MAX` for the minimum) so the values read
//! the same as the C headers they replace.

pub const SCHAR_MIN: i8 = -128;
pub const SCHAR_MAX: i8 = 127;
pub const UCHAR_MAX: u8 = 255;
pub const CHAR_MIN: i8 = -128;
pub const CHAR_MAX: i8 = 127;
pub const CHAR_BIT: u32 = 8;

pub const SHRT_MIN: i16 = -1 - 0x7fff;
pub const SHRT_MAX: i16 = 0x7fff;
pub const USHRT_MAX: u16 = 0xffff;

pub const INT_MIN: i32 = -1 - 0x7fff_ffff;
pub const INT_MAX: i32 = 0x7fff_ffff;
pub const UINT_MAX: u32 = 0xffff_ffff;

pub const LONG_MAX: i64 = 0x7fff_ffff_ffff_ffff;
pub const LONG_MIN: i64 = -LONG_MAX - 1;
pub const ULONG_MAX: u64 = 2 * (LONG_MAX as u64) + 1;

pub const LLONG_MAX: i64 = 0x7fff_ffff_ffff_ffff;
pub const LLONG_MIN: i64 = -LLONG_MAX - 1;
pub const ULLONG_MAX: u64 = 2 * (LLONG_MAX as u64) + 1;

pub const INT8_MIN: i8 = -1 - 0x7f;
pub const INT8_MAX: i8 = 0x7f;
pub const UINT8_MAX: u8 = 0xff;
pub const INT16_MIN: i16 = -1 - 0x7fff;
pub const INT16_MAX: i16 = 0x7fff;
pub const UINT16_MAX: u16 = 0xffff;
pub const INT32_MIN: i32 = -1 - 0x7fff_ffff;
pub const INT32_MAX: i32 = 0x7fff_ffff;
pub const UINT32_MAX: u32 = 0xffff_ffff;
pub const INT64_MIN: i64 = -1 - 0x7fff_ffff_ffff_ffff;
pub const INT64_MAX: i64 = 0x7fff_ffff_ffff_ffff;
pub const UINT64_MAX: u64 = 0xffff_ffff_ffff_ffff;

pub const SIZE_MAX: u64 = UINT64_MAX;
