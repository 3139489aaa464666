//! Domain names on the wire: length-prefixed labels, zero terminator.
//!
//! Compression pointers (length bytes with the two high bits set, RFC 1035
//! §4.1.4) are rejected rather than followed — a single shared cursor cannot
//! decode past a back-reference correctly, and this proxy never needs to.

use crate::errors::ProtoError;
use crate::wire::{WireReader, WireWriter};

const MAX_LABEL_LEN: usize = 63;
const POINTER_MASK: u8 = 0xC0;

/// Writes `name` as length-prefixed labels plus the zero terminator.
/// Empty or all-whitespace input encodes to the terminator alone. Empty
/// segments (trailing dot, consecutive dots) are skipped: a zero-length
/// label on the wire is the terminator, so emitting one mid-name would
/// desynchronize every field after it.
pub fn encode_name(name: &str, out: &mut WireWriter) -> Result<(), ProtoError> {
    if !name.trim().is_empty() {
        for label in name.split('.').filter(|label| !label.is_empty()) {
            if label.len() > MAX_LABEL_LEN {
                return Err(ProtoError::LabelTooLong(label.to_string()));
            }
            out.put_u8(label.len() as u8);
            out.put_slice(label.as_bytes());
        }
    }
    out.put_u8(0);
    Ok(())
}

/// Reads a label sequence, advancing the cursor past the terminator.
/// Labels are joined with `.`; an immediate zero byte yields the empty name.
pub fn decode_name(r: &mut WireReader<'_>) -> Result<String, ProtoError> {
    let mut name = String::new();
    loop {
        let at = r.pos();
        let len = r.read_u8()?;
        if len == 0 {
            return Ok(name);
        }
        if len & POINTER_MASK != 0 {
            return Err(ProtoError::CompressedName(at));
        }
        let label = r.read_slice(len as usize)?;
        if !name.is_empty() {
            name.push('.');
        }
        match std::str::from_utf8(label) {
            Ok(s) => name.push_str(s),
            Err(_) => return Err(ProtoError::InvalidName(format!("label at offset {}", at))),
        }
    }
}

/// Byte length of the encoded form: one prefix byte per label, the label
/// bytes themselves, and the terminator.
pub fn encoded_len(name: &str) -> usize {
    if name.trim().is_empty() {
        return 1;
    }
    name.split('.')
        .filter(|label| !label.is_empty())
        .map(|label| 1 + label.len())
        .sum::<usize>()
        + 1
}
