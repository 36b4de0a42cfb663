/*
 * QR Code generator demo
 *
 * Run this command-line program with no arguments. It builds a handful of
 * demonstration QR Codes and prints each one to the console as text art.
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

use qrforge::{Mask, QrCode, QrCodeEcc, QrSegment, Version};

fn main() -> Result<(), qrforge::QrError> {
    env_logger::init();
    do_basic_demo()?;
    do_variety_demo()?;
    do_segment_demo()?;
    do_mask_demo()?;
    Ok(())
}

/*---- Demo suite ----*/

/// Builds a single QR Code and prints it to the console.
fn do_basic_demo() -> Result<(), qrforge::QrError> {
    let qr = QrCode::encode_text("Hello, world!", QrCodeEcc::Low)?;
    print_qr(&qr);
    Ok(())
}

/// Builds QR Codes that exercise different library features.
fn do_variety_demo() -> Result<(), qrforge::QrError> {
    // Numeric mode encoding (3.33 bits per digit).
    let qr = QrCode::encode_text("314159265358979323846264338327950288419716939937510", QrCodeEcc::Medium)?;
    print_qr(&qr);

    // Alphanumeric mode encoding (5.5 bits per character).
    let qr = QrCode::encode_text("DOLLAR-AMOUNT:$39.87 PERCENTAGE:100.00% OPERATIONS:+-*/", QrCodeEcc::High)?;
    print_qr(&qr);

    // Unicode text as UTF-8, byte mode.
    let qr = QrCode::encode_text("こんにちwa、世界！ αβγδ", QrCodeEcc::Quartile)?;
    print_qr(&qr);

    // A longer passage (Lewis Carroll's Alice in Wonderland) forces a larger version.
    let qr = QrCode::encode_text(
        concat!(
            "Alice was beginning to get very tired of sitting by her sister on the bank, ",
            "and of having nothing to do: once or twice she had peeped into the book her sister was reading, ",
            "but it had no pictures or conversations in it, 'and what is the use of a book,' thought Alice ",
            "'without pictures or conversations?' So she was considering in her own mind (as well as she could, ",
            "for the hot day made her feel very sleepy and stupid), whether the pleasure of making a ",
            "daisy-chain would be worth the trouble of getting up and picking the daisies, when suddenly ",
            "a White Rabbit with pink eyes ran close by her.",
        ),
        QrCodeEcc::High,
    )?;
    print_qr(&qr);
    Ok(())
}

/// Builds QR Codes from manually specified segments for better compactness
/// than the single-mode `encode_text` heuristic would achieve.
fn do_segment_demo() -> Result<(), qrforge::QrError> {
    // Illustration "silver": an alphanumeric label followed by a long numeric run.
    let silver0 = "THE SQUARE ROOT OF 2 IS 1.";
    let silver1 = "41421356237309504880168872420969807856967187537694807317667973799";
    let qr = QrCode::encode_text(&[silver0, silver1].concat(), QrCodeEcc::Low)?;
    print_qr(&qr);

    let segs = vec![QrSegment::make_alphanumeric(silver0)?, QrSegment::make_numeric(silver1)?];
    let qr = QrCode::encode_segments(&segs, QrCodeEcc::Low)?;
    print_qr(&qr);

    // Illustration "golden": byte mode label, numeric run, alphanumeric trailer.
    let golden0 = "Golden ratio phi = 1.";
    let golden1 = "6180339887498948482045868343656381177203091798057628621354486227052604628189024497072072041893911374";
    let golden2 = "......";
    let qr = QrCode::encode_text(&[golden0, golden1, golden2].concat(), QrCodeEcc::Low)?;
    print_qr(&qr);

    let segs = vec![
        QrSegment::make_bytes(golden0.as_bytes())?,
        QrSegment::make_numeric(golden1)?,
        QrSegment::make_alphanumeric(golden2)?,
    ];
    let qr = QrCode::encode_segments(&segs, QrCodeEcc::Low)?;
    print_qr(&qr);

    // The same text run through the cost-minimizing optimal segmenter, for comparison.
    let qr = QrCode::encode_text_optimally(&[golden0, golden1, golden2].concat(), QrCodeEcc::Low, Version::MIN, Version::MAX)?;
    print_qr(&qr);
    Ok(())
}

/// Builds QR Codes with the same contents but different mask patterns.
fn do_mask_demo() -> Result<(), qrforge::QrError> {
    let segs = QrSegment::make_segments("https://www.nayuki.io/")?;
    let qr = QrCode::encode_segments_advanced(&segs, QrCodeEcc::High, Version::MIN, Version::MAX, None, true)?; // automatic mask
    print_qr(&qr);
    let qr = QrCode::encode_segments_advanced(&segs, QrCodeEcc::High, Version::MIN, Version::MAX, Some(Mask::new(3)?), true)?; // forced mask 3
    print_qr(&qr);

    let segs = QrSegment::make_segments(
        "維基百科（Wikipedia，聆聽i/ˌwɪkᵻˈpiːdi.ə/）是一個自由內容、公開編輯且多語言的網路百科全書協作計畫",
    )?;
    for m in [0u8, 1, 5, 7] {
        let qr = QrCode::encode_segments_advanced(&segs, QrCodeEcc::Medium, Version::MIN, Version::MAX, Some(Mask::new(m)?), true)?;
        print_qr(&qr);
    }
    Ok(())
}

/*---- Utilities ----*/

/// Prints `qr` to the console as block-character text art, with a 4-module
/// quiet-zone border.
fn print_qr(qr: &QrCode) {
    let border = 4;
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c = if qr.get_module(x, y) { '█' } else { ' ' };
            print!("{0}{0}", c);
        }
        println!();
    }
    println!();
}
