//! C40 and Text encodation decoder
//! Codeword pairs carry three values: (c1 * 256 + c2 - 1) = v1 * 1600 + v2 * 40 + v3

use super::ascii::GS;
use super::{DataStream, Mode};

const UNLATCH: u8 = 254;

/// Basic set of the two schemes: C40 has upper case letters, Text lower case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterSet {
    /// Upper case basic set
    C40,
    /// Lower case basic set
    Text,
}

/// Shift 2 punctuation, values 0..=26
const SHIFT2_SET: &[u8; 27] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_";

/// Decoder shared by C40 and Text
pub struct C40Decoder;

impl C40Decoder {
    /// Decode triplets until unlatch or end of data; returns the next mode
    pub fn decode(stream: &mut DataStream<'_>, set: CharacterSet) -> Option<Mode> {
        let mut shift = 0u8;
        let mut upper_shift = false;

        loop {
            match stream.peek() {
                None => return Some(Mode::Done),
                Some(UNLATCH) => {
                    stream.next_codeword();
                    return Some(Mode::Ascii);
                }
                // A lone trailing codeword is ASCII encoded
                Some(_) if stream.remaining() < 2 => return Some(Mode::Ascii),
                Some(_) => {}
            }

            let values = read_triplet(stream)?;
            for value in values {
                let decoded = match shift {
                    0 => match value {
                        0..=2 => {
                            shift = value + 1;
                            continue;
                        }
                        3 => b' ',
                        4..=13 => b'0' + value - 4,
                        14..=39 => match set {
                            CharacterSet::C40 => b'A' + value - 14,
                            CharacterSet::Text => b'a' + value - 14,
                        },
                        _ => return None,
                    },
                    1 => value,
                    2 => match value {
                        0..=26 => SHIFT2_SET[value as usize],
                        27 => {
                            shift = 0;
                            stream.push(GS);
                            continue;
                        }
                        30 => {
                            shift = 0;
                            upper_shift = true;
                            continue;
                        }
                        _ => return None,
                    },
                    _ => match set {
                        CharacterSet::C40 => 96 + value,
                        CharacterSet::Text => match value {
                            0 => b'`',
                            1..=26 => b'A' + value - 1,
                            _ => 123 + value - 27,
                        },
                    },
                };
                shift = 0;
                stream.push(if upper_shift { decoded.wrapping_add(128) } else { decoded });
                upper_shift = false;
            }
        }
    }
}

/// Read one codeword pair as three base-40 values
pub(crate) fn read_triplet(stream: &mut DataStream<'_>) -> Option<[u8; 3]> {
    let c1 = stream.next_codeword()? as u16;
    let c2 = stream.next_codeword()? as u16;
    let v = (c1 * 256 + c2).checked_sub(1)?;
    if v >= 64000 {
        return None;
    }
    Some([(v / 1600) as u8, ((v / 40) % 40) as u8, (v % 40) as u8])
}
