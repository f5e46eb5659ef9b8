mod common;

use common::{Canvas, TestSymbol, encode_ascii, pad, with_ecc};
use rust_dmtx::decoder::modes::base256::randomize_255;
use rust_dmtx::{DmtxScanner, Frame, Message, RegionScanner, ScanConfig, SymbolSize};

fn frame_of(canvas: &Canvas) -> Frame {
    Frame::new(canvas.width, canvas.height, canvas.rgb_bytes()).unwrap()
}

fn scan_canvas(canvas: &Canvas, config: ScanConfig) -> Vec<Message> {
    DmtxScanner::new(config)
        .scan_all(&frame_of(canvas), config.stop_after)
        .unwrap()
}

fn assert_single(messages: &[Message], payload: &[u8], label: &str) {
    assert_eq!(messages.len(), 1, "{label}: {messages:?}");
    assert_eq!(messages[0].bytes, payload, "{label}");
}

#[test]
fn test_rotated_symbols() {
    let payloads: [&[u8]; 3] = [
        b"Rotated payload",
        b"123456",
        b"A longer payload for a bigger symbol!!",
    ];
    for payload in payloads {
        let symbol = TestSymbol::ascii(payload);
        for degrees in [0.0, 10.0, 17.0, 33.0, 45.0, 90.0, 135.0, 200.0, 287.0] {
            for scale in [3, 5] {
                let canvas = Canvas::with_symbol(&symbol, scale, degrees);
                let messages = scan_canvas(&canvas, ScanConfig::default());
                let label = format!("{} at {degrees} deg, scale {scale}", symbol.size);
                assert_single(&messages, payload, &label);
                assert_eq!(messages[0].symbol, symbol.size);
                assert_eq!(messages[0].corrections, 0);
            }
        }
    }
}

#[test]
fn test_rectangular_sizes() {
    for (rows, cols) in [(8, 18), (8, 32), (12, 26), (12, 36), (16, 36), (16, 48)] {
        let symbol = TestSymbol::ascii_in(b"Rect", rows, cols);
        let canvas = Canvas::with_symbol(&symbol, 4, 0.0);
        let messages = scan_canvas(&canvas, ScanConfig::default());
        assert_single(&messages, b"Rect", &format!("{rows}x{cols}"));
        assert_eq!((messages[0].symbol.rows, messages[0].symbol.cols), (rows, cols));
    }
}

#[test]
fn test_multi_region_symbols() {
    // 32x32 has four data regions, 52x52 also splits into two interleaved blocks
    let small = vec![b'y'; 60];
    let symbol = TestSymbol::ascii(&small);
    assert_eq!(symbol.size.rows, 32);
    for degrees in [0.0, 25.0] {
        let canvas = Canvas::with_symbol(&symbol, 5, degrees);
        assert_single(&scan_canvas(&canvas, ScanConfig::default()), &small, "32x32");
    }

    let large = vec![b'Q'; 200];
    let symbol = TestSymbol::ascii(&large);
    assert_eq!((symbol.size.rows, symbol.size.interleaved_blocks), (52, 2));
    for degrees in [0.0, 30.0] {
        let canvas = Canvas::with_symbol(&symbol, 3, degrees);
        assert_single(&scan_canvas(&canvas, ScanConfig::default()), &large, "52x52");
    }
}

#[test]
fn test_corners_follow_the_finder() {
    let symbol = TestSymbol::ascii(b"HELLO");
    let canvas = Canvas::with_symbol(&symbol, 4, 0.0);
    let messages = scan_canvas(&canvas, ScanConfig::default());
    assert_single(&messages, b"HELLO", "upright");

    // Bottom-left corner (finder vertex) sits at the lower left of the drawn symbol
    let quiet = (symbol.quiet_zone() * 4) as f32;
    let side = (symbol.size.rows * 4) as f32;
    let bottom_left = messages[0].corners[3];
    assert!((bottom_left.x - quiet).abs() < 2.0, "{bottom_left:?}");
    assert!((bottom_left.y - (quiet + side)).abs() < 2.0, "{bottom_left:?}");

    let centre = messages[0].center();
    assert!((centre.x - (quiet + side / 2.0)).abs() < 2.0);
    assert!((centre.y - (quiet + side / 2.0)).abs() < 2.0);
}

#[test]
fn test_shrunk_search_plane() {
    let payload = b"shrink test 1234";
    let symbol = TestSymbol::ascii(payload);
    for shrink in [1, 2, 3] {
        for degrees in [0.0, 20.0] {
            let canvas = Canvas::with_symbol(&symbol, 8, degrees);
            let config = ScanConfig::default().with_shrink_min(shrink);
            let messages = scan_canvas(&canvas, config);
            assert_single(&messages, payload, &format!("shrink {shrink} at {degrees} deg"));
        }
    }
}

#[test]
fn test_two_symbols_in_discovery_order() {
    let first = TestSymbol::ascii(b"FIRST");
    let second = TestSymbol::ascii(b"SECOND-CODE-42");
    let mut canvas = Canvas::new(260, 120);
    canvas.draw(&first, 4, 10, 20, 0.0);
    canvas.draw(&second, 4, 120, 10, 0.0);

    // The higher symbol is found first
    let messages = scan_canvas(&canvas, ScanConfig::default());
    let payloads: Vec<&[u8]> = messages.iter().map(|m| m.bytes.as_slice()).collect();
    assert_eq!(payloads, vec![&b"SECOND-CODE-42"[..], &b"FIRST"[..]]);

    let limited = scan_canvas(&canvas, ScanConfig::default().with_stop_after(Some(1)));
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].bytes, b"SECOND-CODE-42");

    let zero = scan_canvas(&canvas, ScanConfig::default().with_stop_after(Some(0)));
    assert_eq!(zero.len(), 1);
    assert_eq!(zero[0].bytes, b"SECOND-CODE-42");
}

#[test]
fn test_corrections_budget() {
    // "123456" fills the three data codewords of a 10x10 symbol exactly
    let size = SymbolSize::from_dimensions(10, 10).unwrap();
    let mut data = encode_ascii(b"123456");
    pad(&mut data, size.data_codewords);
    let mut stream = with_ecc(&data, &size);
    stream[0] ^= 0xFF;
    stream[4] ^= 0x0F;
    let canvas = Canvas::with_symbol(&TestSymbol::from_stream(&stream, size), 5, 0.0);

    let unlimited = scan_canvas(&canvas, ScanConfig::default());
    assert_single(&unlimited, b"123456", "unlimited");
    assert_eq!(unlimited[0].corrections, 2);

    let enough = scan_canvas(&canvas, ScanConfig::default().with_corrections_max(Some(2)));
    assert_single(&enough, b"123456", "budget 2");

    let strict = scan_canvas(&canvas, ScanConfig::default().with_corrections_max(Some(1)));
    assert!(strict.is_empty());
}

#[test]
fn test_macro_and_binary_payloads() {
    // 05 macro around "ABC"
    let mut data = vec![236];
    data.extend(encode_ascii(b"ABC"));
    let symbol = TestSymbol::from_data(data, SymbolSize::from_dimensions(12, 12).unwrap());
    let messages = scan_canvas(&Canvas::with_symbol(&symbol, 4, 0.0), ScanConfig::default());
    assert_single(&messages, b"[)>\x1E05\x1DABC\x1E\x04", "macro 05");

    // Base 256 run: latch at position 1, length at 2, bytes from 3
    let payload = [0x00, 0xFF, 0x80, 0x41];
    let mut data = vec![231, randomize_255(payload.len() as u8, 2)];
    data.extend(payload.iter().enumerate().map(|(i, &b)| randomize_255(b, 3 + i)));
    let symbol = TestSymbol::from_data(data, SymbolSize::from_dimensions(14, 14).unwrap());
    let messages = scan_canvas(&Canvas::with_symbol(&symbol, 5, 17.0), ScanConfig::default());
    assert_single(&messages, &payload, "base 256");
}

#[test]
fn test_blank_and_noise_frames() {
    let blank = Canvas::new(64, 48);
    assert!(scan_canvas(&blank, ScanConfig::default()).is_empty());

    // Scattered blobs that are not symbols
    let mut speckle = Canvas::new(120, 90);
    for (i, px) in speckle.pixels.iter_mut().enumerate() {
        if (i * 7919) % 13 == 0 {
            *px = 0;
        }
    }
    assert!(scan_canvas(&speckle, ScanConfig::default()).is_empty());
}
