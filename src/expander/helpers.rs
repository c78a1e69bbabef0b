//! Bit and word arithmetic shared by the register layer and the facade.
//!
//! These are plain functions so they can be reused when building higher-level
//! pin abstractions on top of [`Mcp23017`](crate::expander::Mcp23017).

/// Merges `data` into `old` under `mask`.
///
/// Bits set in `mask` take their value from `data`; bits clear in `mask`
/// keep their value from `old`.
///
/// # Example
/// ```
/// use mcp23017_shadow::expander::helpers::merge_masked;
///
/// // Only the low nibble is replaced.
/// assert_eq!(merge_masked(0xAB00, 0x00FF, 0x000F), 0xAB0F);
///
/// // A full mask replaces everything, an empty mask keeps everything.
/// assert_eq!(merge_masked(0x1234, 0xBEEF, 0xFFFF), 0xBEEF);
/// assert_eq!(merge_masked(0x1234, 0xBEEF, 0x0000), 0x1234);
/// ```
#[inline]
pub const fn merge_masked(old: u16, data: u16, mask: u16) -> u16 {
    (old & !mask) | (data & mask)
}

/// Splits a word into its `(port A, port B)` bytes.
#[inline]
pub const fn split_word(word: u16) -> (u8, u8) {
    let [a, b] = word.to_le_bytes();
    (a, b)
}

/// Joins port A and port B bytes into a word.
#[inline]
pub const fn join_word(port_a: u8, port_b: u8) -> u16 {
    u16::from_le_bytes([port_a, port_b])
}

/// Returns the bits of `word` selected by `mask`, shifted down so the lowest
/// set bit of `mask` lands on bit 0.
///
/// An empty mask yields 0.
///
/// # Example
/// ```
/// use mcp23017_shadow::expander::helpers::extract_aligned;
///
/// // Port B nibble GPB4..GPB7 read as a 4-bit value.
/// assert_eq!(extract_aligned(0xA500, 0xF000), 0xA);
/// assert_eq!(extract_aligned(0xFFFF, 0x0000), 0);
/// ```
#[inline]
pub const fn extract_aligned(word: u16, mask: u16) -> u16 {
    if mask == 0 {
        return 0;
    }
    (word & mask) >> mask.trailing_zeros()
}

#[test]
fn merge_masked_matches_definition() {
    let samples = [0x0000, 0xFFFF, 0xA5A5, 0x00FF, 0x8001, 0x1234];
    for old in samples {
        for data in samples {
            for mask in samples {
                let merged = merge_masked(old, data, mask);
                // Masked bits come from data, the rest from old.
                assert_eq!(merged & mask, data & mask);
                assert_eq!(merged & !mask, old & !mask);
            }
        }
    }
}

#[test]
fn word_byte_order_is_port_a_low() {
    assert_eq!(split_word(0xA55A), (0x5A, 0xA5));
    assert_eq!(join_word(0x5A, 0xA5), 0xA55A);
}

#[test]
fn extract_aligned_edge_cases() {
    // Single bit
    assert_eq!(extract_aligned(0x0100, 0x0100), 1);
    assert_eq!(extract_aligned(0xFEFF, 0x0100), 0);

    // Whole word
    assert_eq!(extract_aligned(0xBEEF, 0xFFFF), 0xBEEF);

    // Non-contiguous mask keeps gaps
    assert_eq!(extract_aligned(0x0014, 0x0014), 0b101);
}
