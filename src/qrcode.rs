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

//! The `QrCode` symbol: matrix construction, masking, and the encoder entry
//! points that build one from text, bytes, or caller-supplied segments.

use crate::bit_buffer::BitBuffer;
use crate::error::{invalid_argument, DataTooLong, QrError, Result};
use crate::reed_solomon;
use crate::segment::QrSegment;
use crate::tables;
use crate::types::{get_bit, Mask, QrCodeEcc, Version};

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// An immutable square grid of dark/light modules, plus the version, error
/// correction level, and mask that produced it.
///
/// Built by one of the `encode_*` entry points, from highest to lowest
/// level: [`QrCode::encode_text`] and [`QrCode::encode_binary`] for
/// everyday payloads, [`QrCode::encode_segments`] /
/// [`QrCode::encode_segments_advanced`] for a caller-built segment list,
/// and [`QrCode::encode_codewords`] for a caller who has already assembled
/// padded data codewords.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    version: Version,
    size: i32,
    errorcorrectionlevel: QrCodeEcc,
    mask: Mask,
    modules: Vec<bool>,
    isfunction: Vec<bool>,
}

impl QrCode {
    /*---- Static factory functions (high level) ----*/

    /// Encodes `text` at error correction level `ecl` or higher, using
    /// [`QrSegment::make_segments`]'s single-mode heuristic.
    ///
    /// The smallest version that fits is chosen automatically.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self> {
        let segs = QrSegment::make_segments(text)?;
        QrCode::encode_segments(&segs, ecl)
    }

    /// Encodes `data` as a single byte-mode segment at error correction
    /// level `ecl` or higher.
    pub fn encode_binary(data: &[u8], ecl: QrCodeEcc) -> Result<Self> {
        let segs = [QrSegment::make_bytes(data)?];
        QrCode::encode_segments(&segs, ecl)
    }

    /// Encodes `text` using [`crate::segment_advanced::make_segments_optimally`]'s
    /// cost-minimizing mode assignment instead of the basic single-mode
    /// heuristic, which can save space for mixed numeric/alphanumeric/byte
    /// content.
    ///
    /// `minversion`/`maxversion` bound both the segmentation search and the
    /// resulting symbol's version, the same way they do for
    /// [`QrCode::encode_segments_advanced`].
    pub fn encode_text_optimally(
        text: &str,
        ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
    ) -> Result<Self> {
        let segs = crate::segment_advanced::make_segments_optimally(text, ecl, minversion, maxversion)?;
        QrCode::encode_segments_advanced(&segs, ecl, minversion, maxversion, None, true)
    }

    /*---- Static factory functions (mid level) ----*/

    /// Encodes `segs` at error correction level `ecl` or higher, searching
    /// the full `[1, 40]` version range with automatic mask selection and
    /// ECC-level boosting.
    pub fn encode_segments(segs: &[QrSegment], ecl: QrCodeEcc) -> Result<Self> {
        QrCode::encode_segments_advanced(segs, ecl, Version::MIN, Version::MAX, None, true)
    }

    /// Encodes `segs` with full control over the search range, forced
    /// mask, and ECC boosting.
    ///
    /// The smallest version in `[minversion, maxversion]` that fits is
    /// chosen. If `boostecl`, the ECC level is raised above `ecl` as far as
    /// it can go without enlarging the chosen version. `mask` forces a
    /// specific mask pattern; `None` scores all 8 and keeps the lowest
    /// penalty (ties favor the lower mask id).
    ///
    /// Returns [`QrError::InvalidArgument`] if `minversion > maxversion`,
    /// or [`QrError::DataTooLong`] if no version in range fits.
    pub fn encode_segments_advanced(
        segs: &[QrSegment],
        mut ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
        boostecl: bool,
    ) -> Result<Self> {
        if minversion.value() > maxversion.value() {
            return Err(invalid_argument("minversion exceeds maxversion"));
        }

        // Find the minimal version number that fits this segment list.
        let mut version = minversion;
        let datausedbits: usize = loop {
            let datacapacitybits = tables::num_data_codewords(version, ecl) * 8;
            match QrSegment::get_total_bits(segs, version) {
                Ok(n) if n <= datacapacitybits => {
                    log::trace!("version {} fits {} bits in {} capacity", version.value(), n, datacapacitybits);
                    break n;
                }
                result => {
                    if version.value() >= maxversion.value() {
                        let needed = result.unwrap_or(usize::MAX);
                        log::debug!(
                            "no version in [{}, {}] holds the requested segments at this ecc level",
                            minversion.value(),
                            maxversion.value()
                        );
                        return Err(QrError::DataTooLong(DataTooLong::DataOverCapacity {
                            needed_bits: needed,
                            capacity_bits: datacapacitybits,
                        }));
                    }
                    version = Version::new(version.value() + 1)?;
                }
            }
        };

        // Raise the ECC level as far as it goes without enlarging the version.
        if boostecl {
            for &newecl in &[QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High] {
                if datausedbits <= tables::num_data_codewords(version, newecl) * 8 {
                    ecl = newecl;
                }
            }
        }

        // Concatenate segment headers and payloads.
        let mut bb = BitBuffer::new();
        for seg in segs {
            bb.append_bits(seg.mode.mode_bits(), 4)?;
            bb.append_bits(seg.numchars as u32, seg.mode.num_char_count_bits(version))?;
            bb.append_all(&seg.data)?;
        }
        debug_assert_eq!(bb.len(), datausedbits);

        // Terminator, then pad to a byte boundary, then alternate fill bytes.
        let datacapacitybits = tables::num_data_codewords(version, ecl) * 8;
        let numzerobits = std::cmp::min(4, datacapacitybits - bb.len());
        bb.append_bits(0, numzerobits as u8)?;
        let numzerobits = bb.len().wrapping_neg() & 7;
        bb.append_bits(0, numzerobits as u8)?;
        debug_assert_eq!(bb.len() % 8, 0);

        let mut padbyte: u32 = 0xEC;
        while bb.len() < datacapacitybits {
            bb.append_bits(padbyte, 8)?;
            padbyte ^= 0xEC ^ 0x11;
        }

        let datacodewords = bb.to_bytes();
        Ok(QrCode::encode_codewords(version, ecl, &datacodewords, mask))
    }

    /*---- Constructor (low level) ----*/

    /// Builds a symbol from already-assembled data codewords (segment
    /// headers, payload, terminator, and padding — but not error
    /// correction), given the version, ECC level, and an optional forced
    /// mask.
    ///
    /// Most callers should prefer [`QrCode::encode_segments`] or higher.
    /// `datacodewords.len()` must equal
    /// `tables::num_data_codewords(ver, ecl)`.
    pub fn encode_codewords(ver: Version, ecl: QrCodeEcc, datacodewords: &[u8], mut msk: Option<Mask>) -> Self {
        let size = ver.size();
        let mut result = Self {
            version: ver,
            size,
            mask: Mask::new(0).expect("0 is always a valid mask"),
            errorcorrectionlevel: ecl,
            modules: vec![false; (size * size) as usize],
            isfunction: vec![false; (size * size) as usize],
        };

        result.draw_function_patterns();
        let allcodewords = result.add_ecc_and_interleave(datacodewords);
        result.draw_codewords(&allcodewords);

        if msk.is_none() {
            let mut minpenalty = i32::MAX;
            for i in 0u8..8 {
                let candidate = Mask::new(i).expect("0..8 is always a valid mask");
                result.apply_mask(candidate);
                result.draw_format_bits(candidate);
                let penalty = result.get_penalty_score();
                log::trace!("mask {i} scores penalty {penalty}");
                if penalty < minpenalty {
                    msk = Some(candidate);
                    minpenalty = penalty;
                }
                result.apply_mask(candidate); // undo; XOR is its own inverse
            }
        }
        let msk = msk.expect("either forced or chosen by the loop above");
        log::debug!("version {} selected mask {}", ver.value(), msk.value());
        result.mask = msk;
        result.apply_mask(msk);
        result.draw_format_bits(msk);

        result.isfunction.clear();
        result.isfunction.shrink_to_fit();
        result
    }

    /*---- Public accessors ----*/

    /// Returns this symbol's version, in `[1, 40]`.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this symbol's side length in modules, `4 * version + 17`.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this symbol's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.errorcorrectionlevel
    }

    /// Returns the mask pattern actually used, in `[0, 7]`.
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the module color at `(x, y)`: `true` for dark, `false` for
    /// light. Out-of-range coordinates return `false`, which is convenient
    /// for callers rendering a quiet-zone border.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y) && self.module(x, y)
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[(y * self.size + x) as usize]
    }

    fn module_mut(&mut self, x: i32, y: i32) -> &mut bool {
        &mut self.modules[(y * self.size + x) as usize]
    }

    /*---- Function pattern drawing ----*/

    fn draw_function_patterns(&mut self) {
        let size = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        let alignpatpos = tables::alignment_pattern_positions(self.version);
        let numalign = alignpatpos.len();
        for i in 0..numalign {
            for j in 0..numalign {
                let is_finder_corner = (i == 0 && j == 0) || (i == 0 && j == numalign - 1) || (i == numalign - 1 && j == 0);
                if !is_finder_corner {
                    self.draw_alignment_pattern(alignpatpos[i], alignpatpos[j]);
                }
            }
        }

        self.draw_format_bits(Mask::new(0).expect("0 is always a valid mask"));
        self.draw_version();
    }

    fn draw_format_bits(&mut self, mask: Mask) {
        let bits: u32 = {
            let data = u32::from(self.errorcorrectionlevel.format_bits()) << 3 | u32::from(mask.value());
            let mut rem = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            (data << 10 | rem) ^ 0x5412
        };
        debug_assert_eq!(bits >> 15, 0);

        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        let size = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        let bits: u32 = {
            let data = u32::from(self.version.value());
            let mut rem = data;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
            }
            data << 12 | rem
        };
        debug_assert_eq!(bits >> 18, 0);

        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let xx = x + dx;
                let yy = y + dy;
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, dx.abs().max(dy.abs()) != 1);
            }
        }
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        *self.module_mut(x, y) = isdark;
        self.isfunction[(y * self.size + x) as usize] = true;
    }

    /*---- Codewords and masking ----*/

    fn add_ecc_and_interleave(&self, data: &[u8]) -> Vec<u8> {
        let ver = self.version;
        let ecl = self.errorcorrectionlevel;
        debug_assert_eq!(data.len(), tables::num_data_codewords(ver, ecl));

        let numblocks = tables::num_error_correction_blocks(ver, ecl);
        let blockecclen = tables::ecc_codewords_per_block(ver, ecl);
        let rawcodewords = tables::num_raw_data_modules(ver) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblocklen = rawcodewords / numblocks;

        let mut blocks = Vec::with_capacity(numblocks);
        let rsdiv = reed_solomon::compute_divisor(blockecclen);
        let mut k = 0;
        for i in 0..numblocks {
            let datlen = shortblocklen - blockecclen + usize::from(i >= numshortblocks);
            let mut dat = data[k..k + datlen].to_vec();
            k += datlen;
            let ecc = reed_solomon::compute_remainder(&dat, &rsdiv);
            if i < numshortblocks {
                dat.push(0);
            }
            dat.extend_from_slice(&ecc);
            blocks.push(dat);
        }

        let mut result = Vec::with_capacity(rawcodewords);
        for i in 0..=shortblocklen {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        result
    }

    fn draw_codewords(&mut self, data: &[u8]) {
        debug_assert_eq!(data.len(), tables::num_raw_data_modules(self.version) / 8);

        let mut i: usize = 0;
        let mut right = self.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { self.size - 1 - vert } else { vert };
                    if !self.isfunction[(y * self.size + x) as usize] && i < data.len() * 8 {
                        *self.module_mut(x, y) = get_bit(u32::from(data[i >> 3]), 7 - (i as i32 & 7));
                        i += 1;
                    }
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
    }

    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let invert = match mask.value() {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => x * y % 2 + x * y % 3 == 0,
                    6 => (x * y % 2 + x * y % 3) % 2 == 0,
                    7 => ((x + y) % 2 + x * y % 3) % 2 == 0,
                    _ => unreachable!("Mask::new restricts values to 0..=7"),
                };
                *self.module_mut(x, y) ^= invert & !self.isfunction[(y * self.size + x) as usize];
            }
        }
    }

    /// Scores the current module grid against the four ISO/IEC 18004
    /// penalty rules; lower is better. Used to pick the least conspicuous
    /// of the 8 mask patterns.
    fn get_penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size = self.size;

        // Rows: runs of >=5 same-color modules, and finder-like patterns.
        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.module(x, y) == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }

        // Columns: the same two rules, transposed.
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.module(x, y) == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        // 2x2 blocks of uniform color.
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.module(x, y);
                if color == self.module(x + 1, y) && color == self.module(x, y + 1) && color == self.module(x + 1, y + 1) {
                    result += PENALTY_N2;
                }
            }
        }

        // Balance of dark vs. light modules.
        let dark: i32 = self.modules.iter().copied().map(i32::from).sum();
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!((0..=9).contains(&k));
        result += k * PENALTY_N4;
        result
    }
}

/// Tracks the run-length history needed to detect rule-3 finder-like
/// patterns (dark-light-dark-dark-dark-light-dark, 4x module width,
/// bordered by >=4 modules of light on either side) as a row or column is
/// scanned left to right / top to bottom.
///
/// Keeping a 7-entry run history (rather than matching a fixed 11-bit
/// window, as in older implementations) is what correctly accounts for a
/// finder-like pattern whose light border extends past what a fixed window
/// would see.
struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: i32) -> Self {
        Self { qr_size: size, run_history: [0; 7] }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size;
        }
        let rh = &mut self.run_history;
        for i in (0..rh.len() - 1).rev() {
            rh[i + 1] = rh[i];
        }
        rh[0] = currentrunlength;
    }

    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        debug_assert!(n <= self.qr_size * 3);
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n) + i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size;
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_picks_version_one() {
        let qr = QrCode::encode_text("Hello, world!", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.version().value(), 1);
        assert_eq!(qr.size(), 21);
    }

    #[test]
    fn empty_text_still_produces_a_valid_symbol() {
        let qr = QrCode::encode_text("", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.version().value(), 1);
        // The dark module is always set regardless of payload.
        assert!(qr.get_module(8, qr.size() - 8));
    }

    #[test]
    fn out_of_bounds_module_reads_as_light() {
        let qr = QrCode::encode_text("x", QrCodeEcc::Low).unwrap();
        assert!(!qr.get_module(-1, -1));
        assert!(!qr.get_module(qr.size(), 0));
    }

    #[test]
    fn forced_mask_is_stamped_into_the_result() {
        let segs = QrSegment::make_segments("https://www.nayuki.io/").unwrap();
        let qr = QrCode::encode_segments_advanced(
            &segs,
            QrCodeEcc::High,
            Version::MIN,
            Version::MAX,
            Some(Mask::new(3).unwrap()),
            true,
        )
        .unwrap();
        assert_eq!(qr.mask().value(), 3);
    }

    #[test]
    fn invalid_version_range_is_rejected() {
        let segs = QrSegment::make_segments("x").unwrap();
        let low = Version::new(10).unwrap();
        let high = Version::new(1).unwrap();
        assert!(QrCode::encode_segments_advanced(&segs, QrCodeEcc::Low, low, high, None, true).is_err());
    }

    #[test]
    fn boost_ecl_raises_level_when_it_fits_for_free() {
        // A one-character payload at version 1 has enough slack to boost
        // all the way from Low to High without growing the version.
        let qr = QrCode::encode_text("A", QrCodeEcc::Low).unwrap();
        assert_eq!(qr.error_correction_level(), QrCodeEcc::High);
        assert_eq!(qr.version().value(), 1);
    }

    #[test]
    fn mixed_mode_segments_beat_single_mode_byte_encoding() {
        let alpha = QrSegment::make_alphanumeric("THE SQUARE ROOT OF 2 IS 1.").unwrap();
        let numeric = QrSegment::make_numeric("41421356237309504880168872420969807856967187537694807317667973799").unwrap();
        let qr_mixed = QrCode::encode_segments(&[alpha, numeric], QrCodeEcc::Low).unwrap();

        let concatenated = "THE SQUARE ROOT OF 2 IS 1.41421356237309504880168872420969807856967187537694807317667973799";
        let qr_text = QrCode::encode_text(concatenated, QrCodeEcc::Low).unwrap();

        assert!(qr_mixed.version().value() <= qr_text.version().value());
    }

    #[test]
    fn binary_payload_at_exact_max_capacity_succeeds_one_byte_over_fails() {
        let ver40 = Version::new(40).unwrap();
        let capacity_bytes = tables::num_data_codewords(ver40, QrCodeEcc::Low);
        // At the minimum overhead (a single byte-mode segment with a 16-bit
        // count field at v40), leave room for the 4-bit mode indicator, the
        // count field, and worst-case terminator/padding.
        let payload_len = capacity_bytes - 3;
        let data = vec![0u8; payload_len];
        assert!(QrCode::encode_binary(&data, QrCodeEcc::Low).is_ok());

        let too_long = vec![0u8; capacity_bytes * 8 + 1];
        assert!(matches!(
            QrCode::encode_binary(&too_long, QrCodeEcc::Low),
            Err(QrError::DataTooLong(_))
        ));
    }

    #[test]
    fn mask_selection_is_deterministic() {
        let a = QrCode::encode_text("determinism check", QrCodeEcc::Medium).unwrap();
        let b = QrCode::encode_text("determinism check", QrCodeEcc::Medium).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn function_modules_are_stable_across_all_eight_masks() {
        // Function modules (finder/timing/alignment/format/version/dark
        // module) must come out identical regardless of which mask wins,
        // since masking only ever touches data modules.
        let segs = QrSegment::make_segments("function pattern stability").unwrap();
        let mut previous: Option<QrCode> = None;
        for m in 0u8..8 {
            let qr = QrCode::encode_segments_advanced(
                &segs,
                QrCodeEcc::Medium,
                Version::MIN,
                Version::MAX,
                Some(Mask::new(m).unwrap()),
                false,
            )
            .unwrap();
            if let Some(prev) = &previous {
                // Finder pattern corners are function modules: identical across masks.
                for y in 0..7 {
                    for x in 0..7 {
                        assert_eq!(qr.get_module(x, y), prev.get_module(x, y));
                    }
                }
            }
            previous = Some(qr);
        }
    }

    /// Reverses the zigzag placement and masking this module performs, to
    /// recover the interleaved codeword stream, de-interleave it back into
    /// per-block data+ECC, and check the payload bytes embedded at the
    /// front of the first data codewords match what was requested. This is
    /// the closest a dependency-free test gets to an external-decoder
    /// round-trip: it exercises the same placement order the real decode
    /// path would use, without needing a decoder crate.
    #[test]
    fn byte_mode_round_trips_through_placement_and_masking() {
        let payload = b"round trip me";
        let qr = QrCode::encode_binary(payload, QrCodeEcc::Medium).unwrap();

        // Undo the mask to recover the raw (unmasked) codeword stream.
        let mut unmasked = qr.clone();
        unmasked.isfunction = vec![false; (unmasked.size * unmasked.size) as usize];
        unmasked.draw_function_patterns();
        unmasked.apply_mask(qr.mask());

        // Walk the same zigzag order draw_codewords uses, reading bits back out.
        let total_codewords = tables::num_raw_data_modules(qr.version()) / 8;
        let mut bits = Vec::with_capacity(total_codewords * 8);
        let mut right = unmasked.size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..unmasked.size {
                for j in 0..2 {
                    let x = right - j;
                    let upward = (right + 1) & 2 == 0;
                    let y = if upward { unmasked.size - 1 - vert } else { vert };
                    if !unmasked.isfunction[(y * unmasked.size + x) as usize] {
                        bits.push(unmasked.module(x, y));
                    }
                }
            }
            right -= 2;
        }

        let mut raw_codewords = vec![0u8; bits.len() / 8];
        for (i, &bit) in bits.iter().enumerate().take(raw_codewords.len() * 8) {
            raw_codewords[i >> 3] |= u8::from(bit) << (7 - (i & 7));
        }

        // De-interleave back into the data portion (same block geometry as add_ecc_and_interleave).
        let numblocks = tables::num_error_correction_blocks(qr.version(), qr.error_correction_level());
        let blockecclen = tables::ecc_codewords_per_block(qr.version(), qr.error_correction_level());
        let rawcodewords = raw_codewords.len();
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblocklen = rawcodewords / numblocks;

        let mut data_blocks = vec![Vec::new(); numblocks];
        let mut idx = 0;
        for i in 0..=shortblocklen {
            for j in 0..numblocks {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    if i < shortblocklen - blockecclen + usize::from(j >= numshortblocks) {
                        data_blocks[j].push(raw_codewords[idx]);
                    }
                    idx += 1;
                }
            }
        }
        let recovered_data: Vec<u8> = data_blocks.into_iter().flatten().collect();

        // The data stream starts with: 4-bit byte-mode indicator, 8-bit
        // count (version <= 9), then the payload bytes, byte-aligned.
        assert_eq!(recovered_data[0] >> 4, 0x4);
        let count = ((recovered_data[0] & 0xF) << 4) | (recovered_data[1] >> 4);
        assert_eq!(count as usize, payload.len());
        let mut recovered_payload = Vec::with_capacity(payload.len());
        for i in 0..payload.len() {
            let hi = recovered_data[1 + i] & 0xF;
            let lo = recovered_data[2 + i] >> 4;
            recovered_payload.push((hi << 4) | lo);
        }
        assert_eq!(recovered_payload, payload);
    }
}
