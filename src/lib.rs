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

//! A QR Code (ISO/IEC 18004, Model 2) encoder.
//!
//! Takes a text or binary payload and an error correction level, and
//! produces a square grid of dark/light modules any compliant QR decoder
//! can read back. Covers all 40 versions, all four error correction
//! levels, and the numeric/alphanumeric/byte/ECI character modes.
//!
//! This crate only builds symbols — it has no opinion on how you render or
//! display them. Consume [`QrCode::size`] and [`QrCode::get_module`] to
//! draw your own raster, SVG, or terminal output.
//!
//! # Example
//!
//! ```
//! use qrforge::{QrCode, QrCodeEcc};
//!
//! let qr = QrCode::encode_text("Hello, world!", QrCodeEcc::Medium)?;
//! for y in 0..qr.size() {
//!     for x in 0..qr.size() {
//!         print!("{}", if qr.get_module(x, y) { "##" } else { "  " });
//!     }
//!     println!();
//! }
//! # Ok::<(), qrforge::QrError>(())
//! ```
//!
//! # Entry points, high to low level
//!
//! - [`QrCode::encode_text`] / [`QrCode::encode_binary`] — convenience over
//!   a single-mode segment heuristic.
//! - [`QrCode::encode_text_optimally`] — cost-minimizing multi-segment mode
//!   assignment via [`segment_advanced::make_segments_optimally`].
//! - [`QrCode::encode_segments`] / [`QrCode::encode_segments_advanced`] —
//!   caller-built segment lists, full control over version range, forced
//!   mask, and ECC boosting.
//! - [`QrCode::encode_codewords`] — caller-assembled data codewords.

mod bit_buffer;
mod error;
mod qrcode;
mod reed_solomon;
mod segment;
pub mod segment_advanced;
mod tables;
mod types;

pub use bit_buffer::BitBuffer;
pub use error::{DataTooLong, QrError};
pub use qrcode::QrCode;
pub use segment::{QrSegment, QrSegmentMode};
pub use types::{Mask, QrCodeEcc, Version};
