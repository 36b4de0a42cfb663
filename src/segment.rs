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

//! Segment construction: mode selection and bit packing.

use crate::bit_buffer::BitBuffer;
use crate::error::{invalid_argument, DataTooLong, QrError, Result};
use crate::types::Version;

/// The set of all legal characters in alphanumeric mode, where each
/// character's value is its index in this string.
const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Describes how a segment's data bits are interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QrSegmentMode {
    /// Digits `0`-`9` only.
    Numeric,
    /// Digits, uppercase letters, space, and `$%*+-./:`.
    Alphanumeric,
    /// Arbitrary binary data.
    Byte,
    /// Japanese characters, encoded via Shift JIS code points.
    ///
    /// Only meaningful when the `kanji` feature is enabled; see
    /// [`crate::segment_advanced`] for the one entry point that produces
    /// segments in this mode.
    Kanji,
    /// Extended Channel Interpretation designator.
    Eci,
}

impl QrSegmentMode {
    /// Returns the 4-bit mode indicator for this mode.
    pub(crate) fn mode_bits(self) -> u32 {
        match self {
            QrSegmentMode::Numeric => 0x1,
            QrSegmentMode::Alphanumeric => 0x2,
            QrSegmentMode::Byte => 0x4,
            QrSegmentMode::Kanji => 0xD,
            QrSegmentMode::Eci => 0x7,
        }
    }

    /// Returns the bit width of the character-count field for a segment in
    /// this mode at the given version, one of three values depending on
    /// which version tier `ver` falls into.
    pub(crate) fn num_char_count_bits(self, ver: Version) -> u8 {
        let tier = usize::from((ver.value() + 7) / 17);
        (match self {
            QrSegmentMode::Numeric => [10, 12, 14],
            QrSegmentMode::Alphanumeric => [9, 11, 13],
            QrSegmentMode::Byte => [8, 16, 16],
            QrSegmentMode::Kanji => [8, 10, 12],
            QrSegmentMode::Eci => [0, 0, 0],
        })[tier]
    }
}

/// An immutable `(mode, character count, bit payload)` triple.
///
/// The mid-level way to build one is a factory such as
/// [`QrSegment::make_numeric`]; [`QrSegment::new`] is the low-level
/// constructor for callers who already have a conforming bit buffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrSegment {
    pub(crate) mode: QrSegmentMode,
    pub(crate) numchars: usize,
    pub(crate) data: BitBuffer,
}

impl QrSegment {
    /// Creates a segment from already-encoded data.
    ///
    /// The character count must agree with `mode` and `data`'s length, but
    /// this constructor does not check it — that contract is the caller's.
    pub fn new(mode: QrSegmentMode, numchars: usize, data: BitBuffer) -> Self {
        Self { mode, numchars, data }
    }

    /// Returns this segment's mode.
    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    /// Returns this segment's character count field.
    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    /// Returns this segment's data bits.
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Encodes arbitrary binary data in byte mode.
    pub fn make_bytes(data: &[u8]) -> Result<Self> {
        let mut bb = BitBuffer::with_capacity(data.len() * 8);
        for &b in data {
            bb.append_bits(u32::from(b), 8)?;
        }
        Ok(QrSegment::new(QrSegmentMode::Byte, data.len(), bb))
    }

    /// Encodes a string of decimal digits in numeric mode.
    ///
    /// Returns [`QrError::InvalidArgument`] if `text` contains anything
    /// outside `0`-`9`. Digits are consumed in groups of three (10 bits),
    /// with a final group of two (7 bits) or one (4 bits) if the length
    /// isn't a multiple of three.
    pub fn make_numeric(text: &str) -> Result<Self> {
        if !QrSegment::is_numeric(text) {
            return Err(invalid_argument("numeric segment contains a non-digit character"));
        }
        let mut bb = BitBuffer::with_capacity(text.len() * 3 + text.len().div_ceil(3));
        for chunk in text.as_bytes().chunks(3) {
            let value: u32 = chunk.iter().fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
            bb.append_bits(value, (chunk.len() as u8) * 3 + 1)?;
        }
        Ok(QrSegment::new(QrSegmentMode::Numeric, text.len(), bb))
    }

    /// Encodes a string in alphanumeric mode: digits, uppercase letters,
    /// space, and ``$%*+-./:``.
    ///
    /// Returns [`QrError::InvalidArgument`] for any other character.
    /// Characters are consumed in pairs packed as `45*v1 + v2` in 11 bits,
    /// with a final singleton in 6 bits if the length is odd.
    pub fn make_alphanumeric(text: &str) -> Result<Self> {
        if !QrSegment::is_alphanumeric(text) {
            return Err(invalid_argument("alphanumeric segment contains an unencodable character"));
        }
        let mut bb = BitBuffer::with_capacity(text.len() * 5 + text.len().div_ceil(2));
        for chunk in text.as_bytes().chunks(2) {
            let value: u32 = chunk.iter().fold(0u32, |acc, &b| {
                acc * 45 + ALPHANUMERIC_CHARSET.find(char::from(b)).unwrap() as u32
            });
            bb.append_bits(value, (chunk.len() as u8) * 5 + 1)?;
        }
        Ok(QrSegment::new(QrSegmentMode::Alphanumeric, text.len(), bb))
    }

    /// Builds a single-segment list for `text`, selecting numeric if
    /// possible, else alphanumeric, else byte (UTF-8). Returns an empty
    /// list for an empty string.
    ///
    /// This is the basic, single-mode heuristic; it never mixes modes
    /// within one string. See [`crate::segment_advanced::make_segments_optimally`]
    /// for a cost-minimizing alternative that may switch modes mid-string.
    pub fn make_segments(text: &str) -> Result<Vec<Self>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let seg = if QrSegment::is_numeric(text) {
            QrSegment::make_numeric(text)?
        } else if QrSegment::is_alphanumeric(text) {
            QrSegment::make_alphanumeric(text)?
        } else {
            QrSegment::make_bytes(text.as_bytes())?
        };
        Ok(vec![seg])
    }

    /// Encodes an Extended Channel Interpretation designator.
    ///
    /// Returns [`QrError::InvalidArgument`] if `assign_val` is not in
    /// `[0, 1_000_000)`.
    pub fn make_eci(assign_val: u32) -> Result<Self> {
        let mut bb = BitBuffer::with_capacity(24);
        if assign_val < (1 << 7) {
            bb.append_bits(assign_val, 8)?;
        } else if assign_val < (1 << 14) {
            bb.append_bits(0b10, 2)?;
            bb.append_bits(assign_val, 14)?;
        } else if assign_val < 1_000_000 {
            bb.append_bits(0b110, 3)?;
            bb.append_bits(assign_val, 21)?;
        } else {
            return Err(invalid_argument("ECI assignment value out of range [0, 1_000_000)"));
        }
        Ok(QrSegment::new(QrSegmentMode::Eci, 0, bb))
    }

    /// Returns `true` iff every character of `text` is a decimal digit.
    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_digit())
    }

    /// Returns `true` iff every character of `text` is in the alphanumeric
    /// mode charset.
    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii() && ALPHANUMERIC_CHARSET.contains(c))
    }

    /// Sums the total bit length (mode indicator + character count field +
    /// payload) that `segs` would occupy at version `ver`.
    ///
    /// Returns [`QrError::DataTooLong`] with [`DataTooLong::SegmentTooLong`]
    /// if any segment's character count doesn't fit its mode's count field
    /// at this version, or with [`DataTooLong::DataOverCapacity`] is left to
    /// the caller to construct once the capacity at a chosen version is
    /// known — this function only reports raw bit length, never capacity.
    pub(crate) fn get_total_bits(segs: &[Self], ver: Version) -> Result<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let cc_bits = seg.mode.num_char_count_bits(ver);
            if let Some(limit) = 1usize.checked_shl(cc_bits.into()) {
                if seg.numchars >= limit {
                    return Err(QrError::DataTooLong(DataTooLong::SegmentTooLong));
                }
            }
            result = result
                .checked_add(4 + usize::from(cc_bits))
                .and_then(|r| r.checked_add(seg.data.len()))
                .ok_or(QrError::DataTooLong(DataTooLong::SegmentTooLong))?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_rejects_non_digits() {
        assert!(QrSegment::make_numeric("12a3").is_err());
        assert!(QrSegment::make_numeric("123").is_ok());
    }

    #[test]
    fn numeric_packs_groups_of_three_digits_into_ten_bits() {
        let seg = QrSegment::make_numeric("123456").unwrap();
        assert_eq!(seg.num_chars(), 6);
        assert_eq!(seg.data().len(), 20);
    }

    #[test]
    fn numeric_final_group_of_one_is_four_bits() {
        let seg = QrSegment::make_numeric("1234567").unwrap();
        assert_eq!(seg.data().len(), 10 + 10 + 4);
    }

    #[test]
    fn alphanumeric_rejects_lowercase() {
        assert!(QrSegment::make_alphanumeric("hello").is_err());
        assert!(QrSegment::make_alphanumeric("HELLO WORLD").is_ok());
    }

    #[test]
    fn alphanumeric_pairs_pack_into_eleven_bits() {
        let seg = QrSegment::make_alphanumeric("AB").unwrap();
        assert_eq!(seg.data().len(), 11);
    }

    #[test]
    fn bytes_segment_has_eight_bits_per_input_byte() {
        let seg = QrSegment::make_bytes(&[0, 1, 2, 3]).unwrap();
        assert_eq!(seg.num_chars(), 4);
        assert_eq!(seg.data().len(), 32);
    }

    #[test]
    fn eci_encoding_picks_width_by_magnitude() {
        assert_eq!(QrSegment::make_eci(20).unwrap().data().len(), 8);
        assert_eq!(QrSegment::make_eci(1000).unwrap().data().len(), 16);
        assert_eq!(QrSegment::make_eci(999_999).unwrap().data().len(), 24);
        assert!(QrSegment::make_eci(1_000_000).is_err());
    }

    #[test]
    fn make_segments_chooses_the_most_restrictive_mode() {
        assert_eq!(QrSegment::make_segments("123").unwrap()[0].mode(), QrSegmentMode::Numeric);
        assert_eq!(QrSegment::make_segments("ABC 123").unwrap()[0].mode(), QrSegmentMode::Alphanumeric);
        assert_eq!(QrSegment::make_segments("abc").unwrap()[0].mode(), QrSegmentMode::Byte);
        assert!(QrSegment::make_segments("").unwrap().is_empty());
    }

    #[test]
    fn get_total_bits_rejects_segment_that_overflows_count_field() {
        let ver = Version::new(1).unwrap();
        let long_digits = "1".repeat(1 << 10);
        let seg = QrSegment::make_numeric(&long_digits).unwrap();
        assert!(matches!(
            QrSegment::get_total_bits(&[seg], ver),
            Err(QrError::DataTooLong(DataTooLong::SegmentTooLong))
        ));
    }

    #[test]
    fn get_total_bits_sums_header_and_payload() {
        let ver = Version::new(1).unwrap();
        let seg = QrSegment::make_numeric("123").unwrap();
        // 4 (mode) + 10 (count bits at version 1) + 10 (payload for "123").
        assert_eq!(QrSegment::get_total_bits(&[seg], ver).unwrap(), 4 + 10 + 10);
    }

    use proptest::prelude::*;

    proptest! {
        /// `is_numeric` must agree with `make_numeric`'s own acceptance
        /// decision for any digit string, not just the hand-picked cases above.
        #[test]
        fn is_numeric_agrees_with_make_numeric(text in "[0-9]{0,40}") {
            prop_assert!(QrSegment::is_numeric(&text));
            prop_assert!(QrSegment::make_numeric(&text).is_ok());
        }

        /// Any string containing a character outside `0`-`9` must be
        /// rejected by both the predicate and the factory.
        #[test]
        fn is_numeric_rejects_any_non_digit(text in "[0-9]{0,10}[^0-9][0-9]{0,10}") {
            prop_assert!(!QrSegment::is_numeric(&text));
            prop_assert!(QrSegment::make_numeric(&text).is_err());
        }

        /// `is_alphanumeric` must agree with `make_alphanumeric`'s own
        /// acceptance decision across the whole legal charset.
        #[test]
        fn is_alphanumeric_agrees_with_make_alphanumeric(
            text in "[A-Z0-9 $%*+./:-]{0,40}"
        ) {
            prop_assert!(QrSegment::is_alphanumeric(&text));
            prop_assert!(QrSegment::make_alphanumeric(&text).is_ok());
        }

        /// `get_total_bits` must report `SegmentTooLong` whenever a
        /// segment's character count doesn't fit its mode's count field at
        /// the given version, and never panic or silently truncate.
        #[test]
        fn get_total_bits_never_panics_on_any_version(
            digits in 0usize..2000,
            ver_num in 1u8..=40,
        ) {
            let ver = Version::new(ver_num).unwrap();
            let text = "1".repeat(digits);
            let seg = QrSegment::make_numeric(&text).unwrap();
            let result = QrSegment::get_total_bits(&[seg], ver);
            let cc_bits = QrSegmentMode::Numeric.num_char_count_bits(ver);
            let fits = digits < (1usize << cc_bits);
            prop_assert_eq!(result.is_ok(), fits);
        }
    }
}
