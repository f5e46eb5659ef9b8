//! Synthetic ECC200 symbols for integration tests and benches
//!
//! Encodes payloads in ASCII encodation, appends interleaved Reed-Solomon
//! blocks, lays the codewords out with the library's own placement and
//! renders the modules onto a white canvas, optionally rotated.

#![allow(dead_code)]

use std::io::Cursor;

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, ImageOutputFormat, RgbImage, RgbaImage};

use rust_dmtx::SymbolSize;
use rust_dmtx::decoder::placement::Placement;
use rust_dmtx::decoder::reed_solomon::ReedSolomonEncoder;
use rust_dmtx::decoder::symbol_decoder::block_indices;

const PAD: u8 = 129;
const UPPER_SHIFT: u8 = 235;

/// ASCII encodation: digit pairs, upper shift for bytes above 127
pub fn encode_ascii(payload: &[u8]) -> Vec<u8> {
    let mut codewords = Vec::new();
    let mut i = 0;
    while i < payload.len() {
        let b = payload[i];
        if b.is_ascii_digit() && payload.get(i + 1).is_some_and(|n| n.is_ascii_digit()) {
            codewords.push(130 + (b - b'0') * 10 + (payload[i + 1] - b'0'));
            i += 2;
            continue;
        }
        if b >= 128 {
            codewords.push(UPPER_SHIFT);
            codewords.push(b - 128 + 1);
        } else {
            codewords.push(b + 1);
        }
        i += 1;
    }
    codewords
}

/// Fill up to `capacity` with the pad codeword, then 253-state randomized pads
pub fn pad(codewords: &mut Vec<u8>, capacity: usize) {
    if codewords.len() < capacity {
        codewords.push(PAD);
    }
    while codewords.len() < capacity {
        let position = codewords.len() + 1;
        let mut value = PAD as usize + (149 * position) % 253 + 1;
        if value > 254 {
            value -= 254;
        }
        codewords.push(value as u8);
    }
}

/// Append interleaved error codewords to a full set of data codewords
pub fn with_ecc(data: &[u8], size: &SymbolSize) -> Vec<u8> {
    assert_eq!(data.len(), size.data_codewords);
    let mut stream = data.to_vec();
    stream.resize(size.total_codewords(), 0);

    let encoder = ReedSolomonEncoder::new(size.block_ecc_codewords);
    for block in 0..size.interleaved_blocks {
        let indices = block_indices(size, block);
        let (data_indices, ecc_indices) = indices.split_at(size.block_data_len(block));
        let block_data: Vec<u8> = data_indices.iter().map(|&i| stream[i]).collect();
        for (&i, e) in ecc_indices.iter().zip(encoder.encode(&block_data)) {
            stream[i] = e;
        }
    }
    stream
}

/// Module grid of one symbol, `modules[row][col]`, `true` = dark
#[derive(Debug, Clone)]
pub struct TestSymbol {
    pub size: SymbolSize,
    pub modules: Vec<Vec<bool>>,
}

impl TestSymbol {
    /// Smallest square symbol holding `payload` in ASCII encodation
    pub fn ascii(payload: &[u8]) -> Self {
        let data = encode_ascii(payload);
        let size = SymbolSize::smallest_square_for(data.len()).expect("payload fits");
        Self::from_data(data, size)
    }

    /// `payload` in ASCII encodation inside a specific size
    pub fn ascii_in(payload: &[u8], rows: usize, cols: usize) -> Self {
        let size = SymbolSize::from_dimensions(rows, cols).expect("valid size");
        Self::from_data(encode_ascii(payload), size)
    }

    /// Raw data codewords, padded and protected
    pub fn from_data(mut data: Vec<u8>, size: SymbolSize) -> Self {
        assert!(data.len() <= size.data_codewords, "payload does not fit {size}");
        pad(&mut data, size.data_codewords);
        Self::from_stream(&with_ecc(&data, &size), size)
    }

    /// Lay out a complete interleaved codeword stream
    pub fn from_stream(stream: &[u8], size: SymbolSize) -> Self {
        let mut modules = vec![vec![false; size.cols]; size.rows];
        for (row, line) in modules.iter_mut().enumerate() {
            for (col, module) in line.iter_mut().enumerate() {
                if let Some(dark) = size.fixed_module(row, col) {
                    *module = dark;
                }
            }
        }

        let placement = Placement::new(size.mapping_rows(), size.mapping_cols());
        for row in 0..placement.rows() {
            for col in 0..placement.cols() {
                let (symbol_row, symbol_col) = size.mapping_to_symbol(row, col);
                modules[symbol_row][symbol_col] = match placement.slot(row, col) {
                    Some((index, bit)) => (stream[index] >> bit) & 1 == 1,
                    None => placement.unused_module_dark(row, col),
                };
            }
        }

        Self { size, modules }
    }

    /// Quiet zone used by [`Canvas::with_symbol`], in modules
    pub fn quiet_zone(&self) -> usize {
        3 + self.size.rows / 3
    }
}

/// Luma canvas, white by default
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![255; width * height],
        }
    }

    /// Canvas holding one symbol with a quiet zone, rotated about its centre
    pub fn with_symbol(symbol: &TestSymbol, scale: usize, degrees: f64) -> Self {
        let quiet = symbol.quiet_zone();
        let mut canvas = Self::new(
            (symbol.size.cols + 2 * quiet) * scale,
            (symbol.size.rows + 2 * quiet) * scale,
        );
        canvas.draw(symbol, scale, quiet * scale, quiet * scale, degrees);
        canvas
    }

    /// Draw `symbol` with its unrotated top-left at (`left`, `top`)
    pub fn draw(&mut self, symbol: &TestSymbol, scale: usize, left: usize, top: usize, degrees: f64) {
        let (rows, cols) = (symbol.size.rows as f64, symbol.size.cols as f64);
        let scale = scale as f64;
        let half_w = cols * scale / 2.0;
        let half_h = rows * scale / 2.0;
        let (cx, cy) = (left as f64 + half_w, top as f64 + half_h);
        let (sin, cos) = degrees.to_radians().sin_cos();

        for y in 0..self.height {
            for x in 0..self.width {
                let px = x as f64 + 0.5 - cx;
                let py = y as f64 + 0.5 - cy;
                let u = px * cos + py * sin;
                let v = -px * sin + py * cos;
                let gx = (u + half_w) / scale;
                let gy = (v + half_h) / scale;
                if gx < 0.0 || gy < 0.0 || gx >= cols || gy >= rows {
                    continue;
                }
                if symbol.modules[gy as usize][gx as usize] {
                    self.pixels[y * self.width + x] = 0;
                }
            }
        }
    }

    fn rgb(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let v = self.pixels[y as usize * self.width + x as usize];
            image::Rgb([v, v, v])
        })
    }

    fn rgba(&self) -> RgbaImage {
        DynamicImage::ImageRgb8(self.rgb()).to_rgba8()
    }

    /// Packed RGB bytes
    pub fn rgb_bytes(&self) -> Vec<u8> {
        self.rgb().into_raw()
    }

    pub fn png(&self) -> Vec<u8> {
        self.encode(ImageOutputFormat::Png)
    }

    pub fn jpeg(&self, quality: u8) -> Vec<u8> {
        self.encode(ImageOutputFormat::Jpeg(quality))
    }

    fn encode(&self, format: ImageOutputFormat) -> Vec<u8> {
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(self.rgb())
            .write_to(&mut Cursor::new(&mut out), format)
            .expect("encode test image");
        out
    }
}

/// Multi-frame GIF, one frame per canvas (all canvases the same size)
pub fn gif(frames: &[Canvas]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .encode_frames(frames.iter().map(|c| image::Frame::new(c.rgba())))
            .expect("encode test gif");
    }
    out
}

/// Canonical code text the scanner reports for `payload`
pub fn code_of(payload: &[u8]) -> String {
    payload.iter().map(|b| format!("{b:02X} ")).collect()
}
