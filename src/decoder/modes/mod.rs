//! ECC200 data encodation decoders
//!
//! The data codewords of a symbol start in ASCII encodation; latch codewords
//! switch to the other schemes:
//! - ASCII: single characters, digit pairs, control codewords
//! - C40 / Text: three characters per codeword pair
//! - ANSI X12: three characters per codeword pair, restricted set
//! - EDIFACT: four 6-bit characters per three codewords
//! - Base 256: length-prefixed binary, 255-state randomized

/// ASCII encodation
pub mod ascii;
/// Base 256 encodation
pub mod base256;
/// C40 and Text encodation
pub mod c40;
/// EDIFACT encodation
pub mod edifact;
/// ANSI X12 encodation
pub mod x12;

use ascii::AsciiDecoder;
use base256::Base256Decoder;
use c40::{C40Decoder, CharacterSet};
use edifact::EdifactDecoder;
use x12::X12Decoder;

/// Encodation scheme active at the current codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// ASCII, the scheme every symbol starts in
    Ascii,
    /// C40 triplets
    C40,
    /// Text triplets
    Text,
    /// ANSI X12 triplets
    X12,
    /// EDIFACT 6-bit values
    Edifact,
    /// Length-prefixed binary
    Base256,
    /// Pad codeword reached or data exhausted
    Done,
}

/// Cursor over the data codewords plus the bytes decoded so far
#[derive(Debug)]
pub struct DataStream<'a> {
    codewords: &'a [u8],
    pos: usize,
    output: Vec<u8>,
    trailer: Option<&'static [u8]>,
}

impl<'a> DataStream<'a> {
    /// Cursor at the first of `codewords`
    pub fn new(codewords: &'a [u8]) -> Self {
        Self {
            codewords,
            pos: 0,
            output: Vec::with_capacity(codewords.len() * 2),
            trailer: None,
        }
    }

    /// Codewords not yet consumed
    pub fn remaining(&self) -> usize {
        self.codewords.len() - self.pos
    }

    /// Zero-based index of the next codeword
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Look at the next codeword without consuming it
    pub fn peek(&self) -> Option<u8> {
        self.codewords.get(self.pos).copied()
    }

    /// Consume the next codeword
    pub fn next_codeword(&mut self) -> Option<u8> {
        let value = self.peek()?;
        self.pos += 1;
        Some(value)
    }

    /// Skip up to `count` codewords
    pub fn skip(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.codewords.len());
    }

    /// Unconsumed codewords
    pub fn rest(&self) -> &'a [u8] {
        &self.codewords[self.pos..]
    }

    /// Append one decoded byte
    pub fn push(&mut self, byte: u8) {
        self.output.push(byte);
    }

    /// Append several decoded bytes
    pub fn extend(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }

    /// Bytes appended once decoding finishes (05/06 macros)
    pub fn set_trailer(&mut self, trailer: &'static [u8]) {
        self.trailer = Some(trailer);
    }

    fn finish(mut self) -> Vec<u8> {
        if let Some(trailer) = self.trailer {
            self.output.extend_from_slice(trailer);
        }
        self.output
    }
}

/// Decode the corrected data codewords of a symbol into payload bytes
pub fn decode_data(codewords: &[u8]) -> Option<Vec<u8>> {
    let mut stream = DataStream::new(codewords);
    let mut mode = Mode::Ascii;

    loop {
        mode = match mode {
            Mode::Ascii => AsciiDecoder::decode(&mut stream)?,
            Mode::C40 => C40Decoder::decode(&mut stream, CharacterSet::C40)?,
            Mode::Text => C40Decoder::decode(&mut stream, CharacterSet::Text)?,
            Mode::X12 => X12Decoder::decode(&mut stream)?,
            Mode::Edifact => EdifactDecoder::decode(&mut stream)?,
            Mode::Base256 => Base256Decoder::decode(&mut stream)?,
            Mode::Done => break,
        };
    }

    Some(stream.finish())
}
