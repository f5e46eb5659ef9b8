//! EDIFACT encodation decoder
//! Three codewords carry four 6-bit values; value 0x1F returns to ASCII

use super::{DataStream, Mode};

const UNLATCH_VALUE: u8 = 0x1F;

/// Decoder for EDIFACT
pub struct EdifactDecoder;

impl EdifactDecoder {
    /// Decode until the unlatch value or end of data; returns the next mode
    pub fn decode(stream: &mut DataStream<'_>) -> Option<Mode> {
        let bytes = stream.rest();
        let mut reader = BitReader::new(bytes);

        loop {
            // Two or fewer codewords left are ASCII encoded
            if reader.available() <= 16 {
                break;
            }

            for _ in 0..4 {
                let mut value = reader.read(6)?;
                if value == UNLATCH_VALUE {
                    reader.align();
                    stream.skip(reader.consumed_bytes());
                    return Some(Mode::Ascii);
                }
                if value & 0x20 == 0 {
                    value |= 0x40;
                }
                stream.push(value);
            }

            if reader.available() == 0 {
                break;
            }
        }

        reader.align();
        stream.skip(reader.consumed_bytes());
        Some(Mode::Ascii)
    }
}

/// MSB-first reader over codeword bytes
struct BitReader<'a> {
    bytes: &'a [u8],
    bit: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit: 0 }
    }

    fn available(&self) -> usize {
        self.bytes.len() * 8 - self.bit
    }

    fn read(&mut self, count: usize) -> Option<u8> {
        if count > self.available() {
            return None;
        }
        let mut value = 0u8;
        for _ in 0..count {
            let byte = self.bytes[self.bit / 8];
            let set = (byte >> (7 - self.bit % 8)) & 1;
            value = (value << 1) | set;
            self.bit += 1;
        }
        Some(value)
    }

    fn align(&mut self) {
        self.bit = self.bit.div_ceil(8) * 8;
    }

    fn consumed_bytes(&self) -> usize {
        self.bit.div_ceil(8)
    }
}
