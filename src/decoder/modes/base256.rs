//! Base 256 encodation decoder
//! Every codeword, length field included, is randomized by the 255-state algorithm

use super::{DataStream, Mode};

/// Decoder for Base 256 runs
pub struct Base256Decoder;

impl Base256Decoder {
    /// Decode one run; returns to ASCII afterwards
    pub fn decode(stream: &mut DataStream<'_>) -> Option<Mode> {
        let d1 = next_unrandomized(stream)?;
        let count = match d1 {
            0 => stream.remaining(),
            1..=249 => d1 as usize,
            _ => 250 * (d1 as usize - 249) + next_unrandomized(stream)? as usize,
        };

        if count > stream.remaining() {
            return None;
        }
        for _ in 0..count {
            let byte = next_unrandomized(stream)?;
            stream.push(byte);
        }

        Some(Mode::Ascii)
    }
}

fn next_unrandomized(stream: &mut DataStream<'_>) -> Option<u8> {
    // Randomization uses the one-based codeword position
    let position = stream.position() + 1;
    let value = stream.next_codeword()?;
    Some(unrandomize_255(value, position))
}

/// Undo the 255-state randomization of a codeword at one-based `position`
pub fn unrandomize_255(value: u8, position: usize) -> u8 {
    let pseudo_random = ((149 * position) % 255 + 1) as i32;
    let tmp = value as i32 - pseudo_random;
    if tmp >= 0 { tmp as u8 } else { (tmp + 256) as u8 }
}

/// Apply the 255-state randomization to a codeword at one-based `position`
pub fn randomize_255(value: u8, position: usize) -> u8 {
    let pseudo_random = ((149 * position) % 255 + 1) as u32;
    let tmp = value as u32 + pseudo_random;
    if tmp <= 255 { tmp as u8 } else { (tmp - 256) as u8 }
}
