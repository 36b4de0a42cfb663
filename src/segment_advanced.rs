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

//! Cost-minimizing multi-segment mode assignment.
//!
//! [`make_segments_optimally`] may switch modes partway through a string,
//! unlike [`crate::QrSegment::make_segments`]'s single-mode heuristic. It is
//! a separate entry point precisely so callers opting into the basic
//! pipeline never see mixed-mode output they didn't ask for.

use crate::error::{invalid_argument, DataTooLong, QrError, Result};
use crate::segment::{QrSegment, QrSegmentMode};
use crate::tables;
use crate::types::{QrCodeEcc, Version};

#[cfg(feature = "kanji")]
const MODE_TYPES: [QrSegmentMode; 4] =
    [QrSegmentMode::Byte, QrSegmentMode::Alphanumeric, QrSegmentMode::Numeric, QrSegmentMode::Kanji];
#[cfg(not(feature = "kanji"))]
const MODE_TYPES: [QrSegmentMode; 3] = [QrSegmentMode::Byte, QrSegmentMode::Alphanumeric, QrSegmentMode::Numeric];

const NUM_MODES: usize = MODE_TYPES.len();

const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Finds a minimal-bit-cost segment list for `text` that fits some version
/// in `[min_version, max_version]` at error correction level `ecc`.
///
/// Returns [`QrError::DataTooLong`] if no version in range can hold the
/// optimal segmentation, or [`QrError::InvalidArgument`] if
/// `min_version > max_version`.
pub fn make_segments_optimally(
    text: &str,
    ecc: QrCodeEcc,
    min_version: Version,
    max_version: Version,
) -> Result<Vec<QrSegment>> {
    if min_version.value() > max_version.value() {
        return Err(invalid_argument("min_version exceeds max_version"));
    }
    let code_points: Vec<char> = text.chars().collect();

    let mut segs = Vec::new();
    let mut last_capacity_bits = 0;
    for version in min_version.value()..=max_version.value() {
        if version == min_version.value() || version == 10 || version == 27 {
            segs = make_segments_optimally_at_version(&code_points, Version::new(version)?)?;
        }
        let ver = Version::new(version)?;
        let capacity_bits = tables::num_data_codewords(ver, ecc) * 8;
        last_capacity_bits = capacity_bits;
        if let Ok(used_bits) = QrSegment::get_total_bits(&segs, ver) {
            if used_bits <= capacity_bits {
                return Ok(segs);
            }
        }
    }

    let needed_bits = QrSegment::get_total_bits(&segs, max_version).unwrap_or(usize::MAX);
    Err(QrError::DataTooLong(DataTooLong::DataOverCapacity { needed_bits, capacity_bits: last_capacity_bits }))
}

fn make_segments_optimally_at_version(code_points: &[char], version: Version) -> Result<Vec<QrSegment>> {
    let char_modes = compute_character_modes(code_points, version)?;
    split_into_segments(code_points, &char_modes)
}

/// Dynamic program over 1/6-bit-granularity costs: `char_modes[i][j]` is the
/// mode that should precede index `i` when the segment containing `i` ends
/// in `MODE_TYPES[j]`, minimizing total bits over all mode-switch choices.
fn compute_character_modes(code_points: &[char], version: Version) -> Result<Vec<QrSegmentMode>> {
    let mut head_costs = [0usize; NUM_MODES];
    for (i, mode) in MODE_TYPES.iter().enumerate() {
        head_costs[i] = (4 + mode.num_char_count_bits(version) as usize) * 6;
    }

    let mut char_modes = vec![[None::<QrSegmentMode>; NUM_MODES]; code_points.len()];
    let mut prev_costs = head_costs;

    for (i, &c) in code_points.iter().enumerate() {
        let mut cur_costs = [0usize; NUM_MODES];

        // Byte mode always extends.
        cur_costs[0] = prev_costs[0] + c.len_utf8() * 8 * 6;
        char_modes[i][0] = Some(MODE_TYPES[0]);

        if ALPHANUMERIC_CHARSET.contains(c) {
            cur_costs[1] = prev_costs[1] + 33; // 5.5 bits/char
            char_modes[i][1] = Some(MODE_TYPES[1]);
        }
        if c.is_ascii_digit() {
            cur_costs[2] = prev_costs[2] + 20; // 3.33 bits/char
            char_modes[i][2] = Some(MODE_TYPES[2]);
        }
        #[cfg(feature = "kanji")]
        if is_kanji(c) {
            cur_costs[3] = prev_costs[3] + 78; // 13 bits/char
            char_modes[i][3] = Some(MODE_TYPES[3]);
        }

        for j in 0..NUM_MODES {
            for k in 0..NUM_MODES {
                let new_cost = (cur_costs[k] + 5) / 6 * 6 + head_costs[j];
                if char_modes[i][k].is_some() && (char_modes[i][j].is_none() || new_cost < cur_costs[j]) {
                    cur_costs[j] = new_cost;
                    char_modes[i][j] = Some(MODE_TYPES[k]);
                }
            }
        }

        prev_costs = cur_costs;
    }

    let mut cur_mode = None::<QrSegmentMode>;
    let mut min_cost = 0;
    for i in 0..NUM_MODES {
        if cur_mode.is_none() || prev_costs[i] < min_cost {
            min_cost = prev_costs[i];
            cur_mode = Some(MODE_TYPES[i]);
        }
    }
    let mut cur_mode = cur_mode.ok_or_else(|| invalid_argument("no mode could represent an empty string"))?;

    let mut result = vec![QrSegmentMode::Byte; char_modes.len()];
    for i in (0..char_modes.len()).rev() {
        let j = MODE_TYPES.iter().position(|&m| m == cur_mode).expect("cur_mode is always one of MODE_TYPES");
        cur_mode = char_modes[i][j].expect("backward trace only follows modes that were reachable");
        result[i] = cur_mode;
    }
    Ok(result)
}

fn split_into_segments(code_points: &[char], char_modes: &[QrSegmentMode]) -> Result<Vec<QrSegment>> {
    if code_points.is_empty() {
        return Ok(Vec::new());
    }
    let mut result = Vec::new();
    let mut cur_mode = char_modes[0];
    let mut start = 0;
    let mut i = 0;
    loop {
        i += 1;
        if i < code_points.len() && char_modes[i] == cur_mode {
            continue;
        }

        let run = &code_points[start..i];
        let seg = match cur_mode {
            QrSegmentMode::Byte => {
                let s: String = run.iter().collect();
                QrSegment::make_bytes(s.as_bytes())?
            }
            QrSegmentMode::Numeric => {
                let s: String = run.iter().collect();
                QrSegment::make_numeric(&s)?
            }
            QrSegmentMode::Alphanumeric => {
                let s: String = run.iter().collect();
                QrSegment::make_alphanumeric(&s)?
            }
            #[cfg(feature = "kanji")]
            QrSegmentMode::Kanji => make_kanji(run)?,
            #[cfg(not(feature = "kanji"))]
            QrSegmentMode::Kanji => return Err(invalid_argument("kanji mode requires the `kanji` feature")),
            QrSegmentMode::Eci => return Err(invalid_argument("ECI segments are never produced by mode assignment")),
        };
        result.push(seg);

        if i >= code_points.len() {
            return Ok(result);
        }
        cur_mode = char_modes[i];
        start = i;
    }
}

/*---- Kanji mode ----*/
//
// Kanji segments pack each character's Shift JIS code point into 13 bits,
// via a lookup table mapping Unicode scalar values to Shift JIS. This
// crate ships no such table (it would need ~64Ki entries of vendored
// character-set data), so this mode is reachable only under the `kanji`
// feature and only produces an error until a table is supplied.

#[cfg(feature = "kanji")]
fn make_kanji(_code_points: &[char]) -> Result<QrSegment> {
    Err(invalid_argument(
        "kanji mode has no bundled Shift JIS table; this build cannot encode kanji segments",
    ))
}

#[cfg(feature = "kanji")]
fn is_kanji(_c: char) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_version_range() {
        let low = Version::new(10).unwrap();
        let high = Version::new(5).unwrap();
        assert!(make_segments_optimally("hello", QrCodeEcc::Low, low, high).is_err());
    }

    #[test]
    fn pure_numeric_input_collapses_to_one_segment() {
        let min = Version::new(1).unwrap();
        let max = Version::new(10).unwrap();
        let segs = make_segments_optimally("0123456789", QrCodeEcc::Low, min, max).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].mode(), QrSegmentMode::Numeric);
    }

    #[test]
    fn mixed_content_switches_modes_and_is_never_worse_than_byte_mode() {
        let min = Version::new(1).unwrap();
        let max = Version::new(10).unwrap();
        let text = "THE SQUARE ROOT OF 2 IS 1.41421356237309504880168872420969807856967187537694807317667973799";
        let optimal = make_segments_optimally(text, QrCodeEcc::Low, min, max).unwrap();
        let ver = Version::new(10).unwrap();
        let optimal_bits = QrSegment::get_total_bits(&optimal, ver).unwrap();
        let byte_only = vec![QrSegment::make_bytes(text.as_bytes()).unwrap()];
        let byte_bits = QrSegment::get_total_bits(&byte_only, ver).unwrap();
        assert!(optimal_bits < byte_bits);
    }

    #[test]
    fn empty_text_yields_no_segments() {
        let min = Version::new(1).unwrap();
        let max = Version::new(5).unwrap();
        let segs = make_segments_optimally("", QrCodeEcc::Low, min, max).unwrap();
        assert!(segs.is_empty());
    }

    #[test]
    fn over_capacity_reports_data_over_capacity() {
        let min = Version::new(1).unwrap();
        let max = Version::new(1).unwrap();
        let text = "A".repeat(200);
        match make_segments_optimally(&text, QrCodeEcc::High, min, max) {
            Err(QrError::DataTooLong(DataTooLong::DataOverCapacity { .. })) => {}
            other => panic!("expected DataOverCapacity, got {other:?}"),
        }
    }
}
