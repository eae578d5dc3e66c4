//! base16384 text encoding.
//!
//! Every 7 input bytes (56 bits) become four 14-bit values, each stored as a
//! CJK code point starting at U+4E00. A trailing group of `n < 7` bytes is
//! zero-padded to the next 14-bit boundary and followed by the marker
//! U+3D00 + `n` so the decoder knows how many bytes were real.

const CODE_BASE: u32 = 0x4E00;
const TAIL_MARKER: u32 = 0x3D00;
const GROUP_BYTES: usize = 7;

pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(data.len()) * 3);

    let mut chunks = data.chunks_exact(GROUP_BYTES);
    for group in &mut chunks {
        push_group(&mut out, group, 4);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let units = (tail.len() * 8).div_ceil(14);
        push_group(&mut out, tail, units);
        push_char(&mut out, TAIL_MARKER + tail.len() as u32);
    }

    out
}

/// Number of code points `encode` produces for `len` input bytes
pub fn encoded_len(len: usize) -> usize {
    let tail = len % GROUP_BYTES;
    let tail_units = if tail == 0 { 0 } else { (tail * 8).div_ceil(14) + 1 };
    len / GROUP_BYTES * 4 + tail_units
}

fn push_group(out: &mut String, bytes: &[u8], units: usize) {
    let mut padded = [0u8; 8];
    padded[..bytes.len()].copy_from_slice(bytes);
    // 56 meaningful bits sit at the top of the big-endian u64
    let bits = u64::from_be_bytes(padded);

    for i in 0..units {
        let shift = 64 - 14 * (i + 1);
        let value = ((bits >> shift) & 0x3FFF) as u32;
        push_char(out, CODE_BASE + value);
    }
}

fn push_char(out: &mut String, code: u32) {
    // Both ranges (U+3D01..U+3D06, U+4E00..U+8DFF) are valid scalar values
    if let Some(c) = char::from_u32(code) {
        out.push(c);
    }
}
