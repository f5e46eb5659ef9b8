//! ASCII encodation decoder (the default scheme at symbol start)

use super::{DataStream, Mode};

const PAD: u8 = 129;
const LATCH_C40: u8 = 230;
const LATCH_BASE256: u8 = 231;
const FNC1: u8 = 232;
const STRUCTURED_APPEND: u8 = 233;
const READER_PROGRAMMING: u8 = 234;
const UPPER_SHIFT: u8 = 235;
const MACRO_05: u8 = 236;
const MACRO_06: u8 = 237;
const LATCH_X12: u8 = 238;
const LATCH_TEXT: u8 = 239;
const LATCH_EDIFACT: u8 = 240;
const ECI: u8 = 241;
const UNLATCH: u8 = 254;

/// Group separator emitted for FNC1
pub const GS: u8 = 0x1D;

const MACRO_05_HEADER: &[u8] = b"[)>\x1E05\x1D";
const MACRO_06_HEADER: &[u8] = b"[)>\x1E06\x1D";
const MACRO_TRAILER: &[u8] = b"\x1E\x04";

/// Decoder for the ASCII scheme
pub struct AsciiDecoder;

impl AsciiDecoder {
    /// Decode until a latch or the pad codeword; returns the next mode
    pub fn decode(stream: &mut DataStream<'_>) -> Option<Mode> {
        let mut upper_shift = false;

        while let Some(value) = stream.next_codeword() {
            match value {
                1..=128 => {
                    let shift = if upper_shift { 128 } else { 0 };
                    stream.push(value - 1 + shift);
                    upper_shift = false;
                }
                PAD => return Some(Mode::Done),
                130..=229 => {
                    let digits = value - 130;
                    stream.push(b'0' + digits / 10);
                    stream.push(b'0' + digits % 10);
                }
                LATCH_C40 => return Some(Mode::C40),
                LATCH_BASE256 => return Some(Mode::Base256),
                FNC1 => stream.push(GS),
                STRUCTURED_APPEND => stream.skip(3),
                READER_PROGRAMMING => {}
                UPPER_SHIFT => upper_shift = true,
                MACRO_05 => {
                    stream.extend(MACRO_05_HEADER);
                    stream.set_trailer(MACRO_TRAILER);
                }
                MACRO_06 => {
                    stream.extend(MACRO_06_HEADER);
                    stream.set_trailer(MACRO_TRAILER);
                }
                LATCH_X12 => return Some(Mode::X12),
                LATCH_TEXT => return Some(Mode::Text),
                LATCH_EDIFACT => return Some(Mode::Edifact),
                ECI => {
                    // Designator length follows from its first codeword
                    let first = stream.next_codeword()?;
                    if first > 127 {
                        stream.skip(if first <= 191 { 1 } else { 2 });
                    }
                }
                UNLATCH => {}
                _ => return None,
            }
        }

        Some(Mode::Done)
    }
}
