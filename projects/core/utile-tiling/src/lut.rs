//! Lookup tables for the u-interleaved space-filling curve.
//!
//! Within a tile, the pixel at local coordinates `(x, y)` lives at index
//!
//! ```text
//! | y3 | (x3 ^ y3) | y2 | (x2 ^ y2) | y1 | (x1 ^ y1) | y0 | (x0 ^ y0) |
//! ```
//!
//! Interleaving bits is trivial in hardware but not in software. The trick
//! is to split the pattern into two halves that XOR together:
//!
//! ```text
//!   | y3 | y3 | y2 | y2 | y1 | y1 | y0 | y0 |
//! ^ |  0 | x3 |  0 | x2 |  0 | x1 |  0 | x0 |
//! ```
//!
//! The top line depends only on Y, so the kernels look it up once per row.
//! The bottom line is X with its bits spaced out. Both halves are pure
//! functions of a 4-bit input and fit in 16-entry tables.

/// Duplicates every bit of the low nibble: `0b1010` becomes `0b11001100`.
///
/// The bits landing in the Y slots of the curve stay Y, and the bits
/// landing in the XOR slots also contribute the Y half of `x ^ y`.
#[rustfmt::skip]
pub(crate) const BIT_DUPLICATION: [u32; 16] = [
    0b00000000,
    0b00000011,
    0b00001100,
    0b00001111,
    0b00110000,
    0b00110011,
    0b00111100,
    0b00111111,
    0b11000000,
    0b11000011,
    0b11001100,
    0b11001111,
    0b11110000,
    0b11110011,
    0b11111100,
    0b11111111,
];

/// Spaces out the bits of the low nibble: `0b1111` becomes `0b1010101`.
#[rustfmt::skip]
pub(crate) const SPACE_4: [u32; 16] = [
    0b0000000,
    0b0000001,
    0b0000100,
    0b0000101,
    0b0010000,
    0b0010001,
    0b0010100,
    0b0010101,
    0b1000000,
    0b1000001,
    0b1000100,
    0b1000101,
    0b1010000,
    0b1010001,
    0b1010100,
    0b1010101,
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Bit-by-bit reference for the curve: `y3 (x3^y3) y2 (x2^y2) ...`
    fn interleave_reference(x: u32, y: u32) -> u32 {
        let mut index = 0;
        for bit in 0..4 {
            let xb = (x >> bit) & 1;
            let yb = (y >> bit) & 1;
            index |= yb << (2 * bit + 1);
            index |= (xb ^ yb) << (2 * bit);
        }
        index
    }

    #[test]
    fn bit_duplication_matches_law() {
        for i in 0..16u32 {
            let mut expected = 0;
            for bit in 0..4 {
                let b = (i >> bit) & 1;
                expected |= b << (2 * bit);
                expected |= b << (2 * bit + 1);
            }
            assert_eq!(BIT_DUPLICATION[i as usize], expected, "entry {i}");
        }
    }

    #[test]
    fn space_4_matches_law() {
        for i in 0..16u32 {
            let mut expected = 0;
            for bit in 0..4 {
                expected |= ((i >> bit) & 1) << (2 * bit);
            }
            assert_eq!(SPACE_4[i as usize], expected, "entry {i}");
        }
    }

    #[test]
    fn table_xor_equals_naive_interleave() {
        for y in 0..16u32 {
            for x in 0..16u32 {
                assert_eq!(
                    BIT_DUPLICATION[y as usize] ^ SPACE_4[x as usize],
                    interleave_reference(x, y),
                    "x={x} y={y}"
                );
            }
        }
    }
}
