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

//! Reed–Solomon error correction over GF(256), reducing polynomial `0x11D`.

/// Returns the product of `x` and `y` in GF(2^8) modulo `0x11D`, via
/// Russian peasant multiplication. Kept table-free rather than precomputed,
/// since the whole generator is only ever built once per encode call.
fn multiply(x: u8, y: u8) -> u8 {
    let mut z: u8 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1D);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

/// Computes the coefficients of the Reed–Solomon generator (divisor)
/// polynomial of the given `degree`, i.e. the product
/// `(x - a^0)(x - a^1)...(x - a^{degree-1})` over GF(256) with `a = 0x02`,
/// stored highest-to-lowest power with the (always-1) leading coefficient
/// dropped.
///
/// `degree` must be in `[1, 255]`; this is an internal invariant enforced
/// by the table-driven ecc-per-block values, never user input, so it
/// asserts rather than returning a `Result`.
pub(crate) fn compute_divisor(degree: usize) -> Vec<u8> {
    assert!((1..=255).contains(&degree), "degree out of range");
    let mut result = vec![0u8; degree - 1];
    result.push(1);

    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            result[j] = multiply(result[j], root);
            if j + 1 < result.len() {
                result[j] ^= result[j + 1];
            }
        }
        root = multiply(root, 0x02);
    }
    result
}

/// Computes the Reed–Solomon remainder (the parity codewords) for `data`
/// against the given generator `divisor`, by polynomial long division.
pub(crate) fn compute_remainder(data: &[u8], divisor: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; divisor.len()];
    for &b in data {
        let factor = b ^ result.remove(0);
        result.push(0);
        for (x, &y) in result.iter_mut().zip(divisor.iter()) {
            *x ^= multiply(y, factor);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_is_commutative_and_has_identity() {
        assert_eq!(multiply(0x53, 0xCA), multiply(0xCA, 0x53));
        assert_eq!(multiply(0x01, 0x7F), 0x7F);
        assert_eq!(multiply(0x00, 0x7F), 0x00);
    }

    #[test]
    fn divisor_is_monic_of_requested_degree() {
        for degree in 1..=30usize {
            let div = compute_divisor(degree);
            assert_eq!(div.len(), degree);
        }
    }

    #[test]
    fn remainder_makes_codeword_evaluate_to_zero_at_roots() {
        // data ++ remainder, evaluated as a polynomial over GF(256) at each
        // root a^i (i in [0, degree)) of the generator, must equal zero:
        // that's exactly the defining property of the RS parity codewords.
        let data: Vec<u8> = vec![0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11];
        let degree = 7;
        let divisor = compute_divisor(degree);
        let remainder = compute_remainder(&data, &divisor);

        let mut codeword: Vec<u8> = data.clone();
        codeword.extend_from_slice(&remainder);

        // Evaluate codeword(a^i) via Horner's method in GF(256).
        let mut root: u8 = 1; // a^0
        for _ in 0..degree {
            let mut acc: u8 = 0;
            for &byte in &codeword {
                acc = multiply(acc, root) ^ byte;
            }
            assert_eq!(acc, 0, "codeword did not vanish at root {root}");
            root = multiply(root, 0x02);
        }
    }

    #[test]
    fn remainder_of_all_zero_data_is_all_zero() {
        let divisor = compute_divisor(10);
        let remainder = compute_remainder(&[0u8; 20], &divisor);
        assert!(remainder.iter().all(|&b| b == 0));
    }

    use proptest::prelude::*;

    proptest! {
        /// For any data and any generator degree, appending the computed
        /// remainder must make the resulting codeword vanish at every root
        /// of the generator — the defining property of RS parity, not just
        /// true for the one fixed example above.
        #[test]
        fn remainder_vanishes_at_roots_for_arbitrary_data(
            data in prop::collection::vec(any::<u8>(), 0..60),
            degree in 1usize..=20,
        ) {
            let divisor = compute_divisor(degree);
            let remainder = compute_remainder(&data, &divisor);
            let mut codeword = data.clone();
            codeword.extend_from_slice(&remainder);

            let mut root: u8 = 1;
            for _ in 0..degree {
                let mut acc: u8 = 0;
                for &byte in &codeword {
                    acc = multiply(acc, root) ^ byte;
                }
                prop_assert_eq!(acc, 0);
                root = multiply(root, 0x02);
            }
        }
    }
}
