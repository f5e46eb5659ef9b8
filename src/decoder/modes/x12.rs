//! ANSI X12 encodation decoder

use super::c40::read_triplet;
use super::{DataStream, Mode};

const UNLATCH: u8 = 254;

/// Decoder for ANSI X12
pub struct X12Decoder;

impl X12Decoder {
    /// Decode triplets until unlatch or end of data; returns the next mode
    pub fn decode(stream: &mut DataStream<'_>) -> Option<Mode> {
        loop {
            match stream.peek() {
                None => return Some(Mode::Done),
                Some(UNLATCH) => {
                    stream.next_codeword();
                    return Some(Mode::Ascii);
                }
                Some(_) if stream.remaining() < 2 => return Some(Mode::Ascii),
                Some(_) => {}
            }

            for value in read_triplet(stream)? {
                let byte = match value {
                    0 => b'\r',
                    1 => b'*',
                    2 => b'>',
                    3 => b' ',
                    4..=13 => b'0' + value - 4,
                    14..=39 => b'A' + value - 14,
                    _ => return None,
                };
                stream.push(byte);
            }
        }
    }
}
