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

//! The small bounded-integer and enum types shared across the crate.

use crate::error::{invalid_argument, Result};

/// The error correction level used in a QR Code symbol.
///
/// Higher levels tolerate more damaged/obscured modules at the cost of data
/// capacity: Low ~7%, Medium ~15%, Quartile ~25%, High ~30% of codewords.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum QrCodeEcc {
    /// Tolerates about 7% erroneous codewords.
    Low,
    /// Tolerates about 15% erroneous codewords.
    Medium,
    /// Tolerates about 25% erroneous codewords.
    Quartile,
    /// Tolerates about 30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Returns an unsigned 2-bit ordinal (0 to 3), used to index the
    /// per-version capacity tables.
    pub(crate) fn ordinal(self) -> usize {
        match self {
            QrCodeEcc::Low => 0,
            QrCodeEcc::Medium => 1,
            QrCodeEcc::Quartile => 2,
            QrCodeEcc::High => 3,
        }
    }

    /// Returns the 2-bit code stamped into the format information strip.
    ///
    /// Note this is *not* the same as `ordinal()` — the bit pattern used in
    /// the format info field is permuted from the natural ordering.
    pub(crate) fn format_bits(self) -> u32 {
        match self {
            QrCodeEcc::Low => 1,
            QrCodeEcc::Medium => 0,
            QrCodeEcc::Quartile => 3,
            QrCodeEcc::High => 2,
        }
    }
}

/// A QR Code version number, in the range `[1, 40]`.
///
/// Determines the symbol's size (`4 * version + 17` modules per side) and
/// its data capacity.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Version(u8);

impl Version {
    /// The smallest QR Code version, producing a 21x21 symbol.
    pub const MIN: Version = Version(1);

    /// The largest QR Code version, producing a 177x177 symbol.
    pub const MAX: Version = Version(40);

    /// Creates a version from the given number.
    ///
    /// Returns [`crate::QrError::InvalidArgument`] if `ver` is outside
    /// `[1, 40]`.
    pub fn new(ver: u8) -> Result<Self> {
        if (Version::MIN.0..=Version::MAX.0).contains(&ver) {
            Ok(Version(ver))
        } else {
            Err(invalid_argument(format!("version number {ver} outside [1, 40]")))
        }
    }

    /// Returns the underlying value, in `[1, 40]`.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns this version's symbol size in modules (`4 * version + 17`).
    pub const fn size(self) -> i32 {
        (self.0 as i32) * 4 + 17
    }
}

/// A mask pattern index, in the range `[0, 7]`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask from the given number.
    ///
    /// Returns [`crate::QrError::InvalidArgument`] if `mask` is greater
    /// than 7.
    pub fn new(mask: u8) -> Result<Self> {
        if mask <= 7 {
            Ok(Mask(mask))
        } else {
            Err(invalid_argument(format!("mask value {mask} outside [0, 7]")))
        }
    }

    /// Returns the underlying value, in `[0, 7]`.
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Returns `true` iff bit `i` (counting from the least significant bit) of
/// `x` is set.
pub(crate) fn get_bit(x: u32, i: i32) -> bool {
    (x >> i) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_rejects_out_of_range() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert!(Version::new(1).is_ok());
        assert!(Version::new(40).is_ok());
    }

    #[test]
    fn version_size_formula() {
        assert_eq!(Version::new(1).unwrap().size(), 21);
        assert_eq!(Version::new(40).unwrap().size(), 177);
        assert_eq!(Version::new(7).unwrap().size(), 45);
    }

    #[test]
    fn mask_rejects_out_of_range() {
        assert!(Mask::new(8).is_err());
        assert!(Mask::new(7).is_ok());
        assert!(Mask::new(0).is_ok());
    }

    #[test]
    fn ecc_ordinal_and_format_bits_are_distinct_permutations() {
        let all = [QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High];
        let ordinals: Vec<usize> = all.iter().map(|e| e.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
        let format_bits: Vec<u32> = all.iter().map(|e| e.format_bits()).collect();
        assert_eq!(format_bits, vec![1, 0, 3, 2]);
    }

    #[test]
    fn get_bit_reads_lsb_first() {
        assert!(get_bit(0b1010, 1));
        assert!(!get_bit(0b1010, 0));
    }
}
