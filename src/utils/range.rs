//! Index normalization shared by the list, sorted-set and string range commands.

use std::ops::Range;

/// Normalizes an inclusive `[start, end]` pair of possibly negative indices into a half-open
/// range within `0..len`, the way LRANGE and ZRANGE read them. Negative indices count from the
/// end; an inverted or out of bounds pair yields an empty range.
pub fn fix_range(start: i64, end: i64, len: usize) -> Range<usize> {
    let len = len as i64;
    let start = if start < 0 { (start + len).max(0) } else { start };
    let end = if end < 0 { end + len } else { end };
    if start > end || start >= len {
        return 0..0;
    }
    let end = end.min(len - 1);
    start as usize..(end + 1) as usize
}

/// Like `fix_range`, with the slightly different clamping GETRANGE and BITCOUNT use: a negative
/// end is clamped to zero rather than emptying the range.
pub fn fix_range_string(start: i64, end: i64, len: usize) -> Range<usize> {
    let len = len as i64;
    if (start < 0 && end < 0 && start > end) || len == 0 {
        return 0..0;
    }
    let start = if start < 0 { (start + len).max(0) } else { start };
    let end = if end < 0 { (end + len).max(0) } else { end };
    let end = end.min(len - 1) + 1;
    if start >= end {
        return 0..0;
    }
    start as usize..end as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_indices_count_from_the_end() {
        assert_eq!(fix_range(0, -1, 5), 0..5);
        assert_eq!(fix_range(-2, -1, 5), 3..5);
        assert_eq!(fix_range(-100, 1, 5), 0..2);
    }

    #[test]
    fn out_of_bounds_and_inverted_ranges_are_empty() {
        assert_eq!(fix_range(3, 1, 5), 0..0);
        assert_eq!(fix_range(5, 10, 5), 0..0);
        assert_eq!(fix_range(0, -6, 5), 0..0);
        assert_eq!(fix_range(0, -1, 0), 0..0);
        assert_eq!(fix_range(1, 100, 5), 1..5);
    }

    #[test]
    fn string_ranges() {
        assert_eq!(fix_range_string(0, 3, 13), 0..4);
        assert_eq!(fix_range_string(-3, -1, 13), 10..13);
        assert_eq!(fix_range_string(0, -1, 13), 0..13);
        assert_eq!(fix_range_string(10, 100, 13), 10..13);
        assert_eq!(fix_range_string(-1, -5, 13), 0..0);
        assert_eq!(fix_range_string(5, 2, 13), 0..0);
        assert_eq!(fix_range_string(0, -100, 13), 0..1);
        assert_eq!(fix_range_string(0, 0, 0), 0..0);
    }
}
