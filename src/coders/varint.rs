//! Unsigned LEB128 varints for 32-bit lengths.
//!
//! Seven payload bits per byte, least significant group first; the high bit
//! marks that another byte follows. A `u32` takes between 1 and 5 bytes.

use crate::error::{CoderError, Result};
use std::io::{Read, Write};

/// Longest encoding of a `u32`.
pub const MAX_VARINT_LEN_U32: usize = 5;

/// Write `value` as a varint.
///
/// # Errors
///
/// Returns [`CoderError::Io`] if `out` rejects the write.
pub fn encode_u32(mut value: u32, out: &mut dyn Write) -> Result<()> {
    let mut buf = [0u8; MAX_VARINT_LEN_U32];
    let mut n = 0;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf[n] = byte;
            n += 1;
            break;
        }
        buf[n] = byte | 0x80;
        n += 1;
    }
    out.write_all(&buf[..n])?;
    Ok(())
}

/// Read one varint.
///
/// # Errors
///
/// Returns [`CoderError::Io`] if `input` fails or ends mid-varint, and
/// [`CoderError::Encoding`] if the varint is longer than five bytes or does not
/// fit in 32 bits.
pub fn decode_u32(input: &mut dyn Read) -> Result<u32> {
    let mut result: u32 = 0;
    for i in 0..MAX_VARINT_LEN_U32 {
        let mut byte = [0u8; 1];
        input.read_exact(&mut byte)?;
        let bits = u32::from(byte[0] & 0x7f);
        let shift = 7 * i as u32;
        // The fifth byte may only carry the top four bits.
        if i == MAX_VARINT_LEN_U32 - 1 && bits > 0x0f {
            return Err(CoderError::encoding("varint overflows 32 bits"));
        }
        result |= bits << shift;
        if byte[0] & 0x80 == 0 {
            return Ok(result);
        }
    }
    Err(CoderError::encoding(format!(
        "varint longer than {MAX_VARINT_LEN_U32} bytes"
    )))
}

/// Number of bytes [`encode_u32`] writes for `value`.
#[must_use]
pub fn encoded_len_u32(value: u32) -> usize {
    let bits = 32 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}
