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

//! The error type returned by this crate's fallible operations.

use std::fmt;

/// Everything that can go wrong while building a [`crate::QrCode`].
///
/// [`QrError::DataTooLong`] is singled out from the rest because it is the
/// one error a caller is expected to actually handle — by relaxing the error
/// correction level, widening the version range, or shortening the payload.
/// The other variants indicate a misuse of the API (bad arguments) rather
/// than a condition a caller would typically recover from at runtime.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QrError {
    /// An argument was out of range or otherwise not encodable: a
    /// non-encodable character for the requested mode, a negative or
    /// out-of-range count, a `mask` outside `0..=7`, a `version` outside
    /// `1..=40`, an ECI designator outside `0..1_000_000`, or a bit value
    /// that doesn't fit in its declared width.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No version in the requested `[min_version, max_version]` range can
    /// hold the segments at the requested error correction level.
    #[error("data too long: {0}")]
    DataTooLong(#[from] DataTooLong),

    /// A [`crate::bit_buffer::BitBuffer`] would have grown past `2^31 - 1`
    /// bits. Reaching this through the public API with valid inputs would
    /// be a bug in this crate, since no QR Code payload comes close to that
    /// many bits.
    #[error("bit buffer capacity exceeded (length {length} + width {width} > 2^31-1)")]
    CapacityExceeded {
        /// The buffer's length before the append that would have overflowed.
        length: usize,
        /// The width of the append that would have overflowed.
        width: u8,
    },

    /// [`crate::bit_buffer::BitBuffer::get_bit`] was called with an index
    /// outside `[0, length)`.
    #[error("bit index {index} out of range for buffer of length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The buffer's length.
        length: usize,
    },
}

/// Why a payload didn't fit: either one segment's character count overflowed
/// its length field, or the assembled bit stream exceeded the chosen
/// version's data capacity.
///
/// Kept as its own type (rather than folded into a string) so callers can
/// match on the specific reason instead of parsing an error message.
#[derive(Debug, Clone)]
pub enum DataTooLong {
    /// A segment's character count doesn't fit in its mode's length field
    /// at any version in the requested range.
    SegmentTooLong,
    /// The bit stream needed `needed_bits` but the largest version in range
    /// only offers `capacity_bits` at the requested error correction level.
    DataOverCapacity {
        /// Bits the segments actually need.
        needed_bits: usize,
        /// Bits available at the largest version tried.
        capacity_bits: usize,
    },
}

impl fmt::Display for DataTooLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTooLong::SegmentTooLong => write!(f, "a segment's character count overflows its length field"),
            DataTooLong::DataOverCapacity { needed_bits, capacity_bits } => write!(
                f,
                "data length = {needed_bits} bits, max capacity = {capacity_bits} bits",
            ),
        }
    }
}

impl std::error::Error for DataTooLong {}

/// Shorthand for this crate's fallible return type.
pub type Result<T> = std::result::Result<T, QrError>;

pub(crate) fn invalid_argument(msg: impl Into<String>) -> QrError {
    QrError::InvalidArgument(msg.into())
}
