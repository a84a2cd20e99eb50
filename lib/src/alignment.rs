/// `true` for non-zero powers of two.
#[inline(always)]
pub const fn is_aligned(value: usize, alignment: usize) -> bool {
    alignment.is_power_of_two() && value & (alignment - 1) == 0
}

/// Align `value` down to the nearest multiple of `alignment`.
/// If `alignment` is zero, the input is returned unchanged.
#[inline(always)]
pub const fn align_down(value: usize, alignment: usize) -> usize {
    if alignment == 0 {
        return value;
    }
    value & !(alignment - 1)
}

/// Align `value` up to the nearest multiple of `alignment`.
///
/// `None` if `alignment` is not a power of two or the result would wrap.
#[inline(always)]
pub const fn align_up_checked(value: usize, alignment: usize) -> Option<usize> {
    if !alignment.is_power_of_two() {
        return None;
    }
    match value.checked_add(alignment - 1) {
        Some(adjusted) => Some(adjusted & !(alignment - 1)),
        None => None,
    }
}
