/*
 * QR Code generator library
 *
 * Copyright (c) Project Nayuki. (MIT License)
 * https://www.nayuki.io/page/qr-code-generator-library
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of
 * this software and associated documentation files (the "Software"), to deal in
 * the Software without restriction, including without limitation the rights to
 * use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
 * the Software, and to permit persons to whom the Software is furnished to do so,
 * subject to the following conditions:
 * - The above copyright notice and this permission notice shall be included in
 *   all copies or substantial portions of the Software.
 * - The Software is provided "as is", without warranty of any kind, express or
 *   implied, including but not limited to the warranties of merchantability,
 *   fitness for a particular purpose and noninfringement. In no event shall the
 *   authors or copyright holders be liable for any claim, damages or other
 *   liability, whether in an action of contract, tort or otherwise, arising from,
 *   out of or in connection with the Software or the use or other dealings in the
 *   Software.
 */

//! Per-version capacity and geometry tables from ISO/IEC 18004 Annex.

use crate::types::{QrCodeEcc, Version};

/// Number of error-correction codewords per block, indexed by
/// `[ecc.ordinal()][version.value()]` (index 0 of the version axis is
/// unused padding).
static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // Low
    [-1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    // Medium
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28],
    // Quartile
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
    // High
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30],
];

/// Number of error-correction blocks, indexed the same way as
/// [`ECC_CODEWORDS_PER_BLOCK`].
static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // Low
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25],
    // Medium
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49],
    // Quartile
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68],
    // High
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81],
];

fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecc: QrCodeEcc) -> usize {
    table[ecc.ordinal()][ver.value() as usize] as usize
}

/// Returns the number of error-correction codewords per block for `ver`/`ecc`.
pub(crate) fn ecc_codewords_per_block(ver: Version, ecc: QrCodeEcc) -> usize {
    table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecc)
}

/// Returns the number of error-correction blocks for `ver`/`ecc`.
pub(crate) fn num_error_correction_blocks(ver: Version, ecc: QrCodeEcc) -> usize {
    table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecc)
}

/// Returns the number of data bits that can be stored in a symbol of the
/// given version, after all function modules are excluded. Includes
/// remainder bits, so the result might not be a multiple of 8. Range:
/// `[208, 29648]`.
pub(crate) fn num_raw_data_modules(ver: Version) -> usize {
    let v = ver.value() as usize;
    let mut result: usize = (16 * v + 128) * v + 64;
    if v >= 2 {
        let numalign = v / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if v >= 7 {
            result -= 18 * 2; // subtract version information area
        }
    }
    result
}

/// Returns the number of 8-bit data (non-error-correction) codewords a
/// symbol of the given version/ecc can hold, with remainder bits discarded.
pub(crate) fn num_data_codewords(ver: Version, ecc: QrCodeEcc) -> usize {
    num_raw_data_modules(ver) / 8 - ecc_codewords_per_block(ver, ecc) * num_error_correction_blocks(ver, ecc)
}

/// Returns the ascending coordinates (shared by both axes) at which
/// alignment patterns are centered for the given version. Empty for
/// version 1.
pub(crate) fn alignment_pattern_positions(ver: Version) -> Vec<i32> {
    let v = ver.value() as i32;
    if v == 1 {
        return Vec::new();
    }
    let numalign = v / 7 + 2;
    let step = (v * 8 + numalign * 3 + 5) / (numalign * 4 - 4) * 2;
    let size = ver.size();
    let mut result: Vec<i32> = (0..numalign - 1).map(|i| size - 7 - i * step).collect();
    result.push(6);
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_capacity_matches_iso_examples() {
        // Version 1, Low: 19 data codewords (ISO/IEC 18004 Table 7).
        assert_eq!(num_data_codewords(Version::new(1).unwrap(), QrCodeEcc::Low), 19);
        // Version 1, High: 9 data codewords.
        assert_eq!(num_data_codewords(Version::new(1).unwrap(), QrCodeEcc::High), 9);
        // Version 40, Low: 2956 + ... well-known figure for the largest symbol.
        assert_eq!(num_data_codewords(Version::new(40).unwrap(), QrCodeEcc::Low), 2956);
    }

    #[test]
    fn raw_data_modules_within_documented_range() {
        for v in 1..=40u8 {
            let n = num_raw_data_modules(Version::new(v).unwrap());
            assert!((208..=29648).contains(&n), "version {v} gave {n}");
        }
    }

    #[test]
    fn alignment_positions_empty_for_version_1() {
        assert!(alignment_pattern_positions(Version::new(1).unwrap()).is_empty());
    }

    #[test]
    fn alignment_positions_start_at_6_and_ascend() {
        let pos = alignment_pattern_positions(Version::new(7).unwrap());
        assert_eq!(pos[0], 6);
        assert!(pos.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn data_capacity_is_always_byte_aligned() {
        for v in 1..=40u8 {
            for &ecc in &[QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High] {
                let ver = Version::new(v).unwrap();
                assert!(num_data_codewords(ver, ecc) * 8 <= num_raw_data_modules(ver));
            }
        }
    }
}
