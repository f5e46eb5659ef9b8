//! Canonical text form of decoded payloads
//!
//! Every byte becomes two uppercase hexadecimal digits followed by a single
//! space, so `[0x41, 0x0A]` renders as `"41 0A "`. The trailing space is part
//! of the format.

use std::fmt::Write;

use crate::models::Message;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Render raw payload bytes in canonical hex form
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for &b in bytes {
        out.push(HEX_DIGITS[(b >> 4) as usize] as char);
        out.push(HEX_DIGITS[(b & 0x0F) as usize] as char);
        out.push(' ');
    }
    out
}

/// Canonical code text of a decoded message
pub fn to_text(message: &Message) -> String {
    encode_hex(&message.bytes)
}

/// Byte-by-byte formatter used for log output of long payloads
pub(crate) fn preview(bytes: &[u8], limit: usize) -> String {
    let mut out = String::new();
    for &b in bytes.iter().take(limit) {
        if b.is_ascii_graphic() || b == b' ' {
            out.push(b as char);
        } else {
            let _ = write!(out, "\\x{b:02X}");
        }
    }
    if bytes.len() > limit {
        out.push_str("...");
    }
    out
}
