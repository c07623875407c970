//! UTF-8 string coder.
//!
//! In the nested context a string is written as a varint byte length followed
//! by its UTF-8 bytes; in the outer context only the bytes are written and the
//! decoder reads to the end of the stream. Lengths are capped at `i32::MAX`
//! bytes so the framing stays compatible with 32-bit-length readers.

use super::varint::{decode_u32, encode_u32, encoded_len_u32};
use super::{Coder, Context};
use crate::error::{CoderError, Result};
use crate::type_token::TypeTag;
use std::io::{Read, Write};
use tracing::trace;

/// Largest string, in bytes, the coder accepts.
pub const MAX_STRING_LEN: usize = i32::MAX as usize;

/// Coder for `String` values as UTF-8 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringUtf8Coder;

impl StringUtf8Coder {
    /// Encode a borrowed `str`; [`Coder::encode_in_context`] forwards here.
    ///
    /// # Errors
    ///
    /// [`CoderError::Encoding`] if `value` is longer than [`MAX_STRING_LEN`],
    /// [`CoderError::Io`] if `out` rejects a write.
    pub fn encode_str(&self, value: &str, out: &mut dyn Write, ctx: Context) -> Result<()> {
        let bytes = value.as_bytes();
        if ctx == Context::Nested {
            encode_u32(checked_len(bytes.len())?, out)?;
        }
        out.write_all(bytes)?;
        trace!(len = bytes.len(), ?ctx, "encoded utf-8 string");
        Ok(())
    }

    /// Encoded size of a borrowed `str` in the nested context.
    ///
    /// # Errors
    ///
    /// [`CoderError::Encoding`] if `value` is longer than [`MAX_STRING_LEN`].
    pub fn encoded_str_size(&self, value: &str) -> Result<u64> {
        let len = checked_len(value.len())?;
        Ok((encoded_len_u32(len) + value.len()) as u64)
    }
}

fn checked_len(len: usize) -> Result<u32> {
    if len > MAX_STRING_LEN {
        return Err(CoderError::encoding(format!(
            "string of {len} bytes exceeds the {MAX_STRING_LEN} byte limit"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(len as u32)
}

fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| CoderError::encoding(format!("invalid UTF-8 in encoded string: {e}")))
}

impl Coder<String> for StringUtf8Coder {
    fn encode_in_context(&self, value: &String, out: &mut dyn Write, ctx: Context) -> Result<()> {
        self.encode_str(value, out, ctx)
    }

    fn decode_in_context(&self, input: &mut dyn Read, ctx: Context) -> Result<String> {
        let bytes = match ctx {
            Context::Nested => {
                let len = decode_u32(input)? as usize;
                if len > MAX_STRING_LEN {
                    return Err(CoderError::encoding(format!(
                        "declared string length {len} exceeds the {MAX_STRING_LEN} byte limit"
                    )));
                }
                // Read through `take` so a bogus length cannot force a huge allocation.
                let mut buf = Vec::new();
                input.take(len as u64).read_to_end(&mut buf)?;
                if buf.len() != len {
                    return Err(CoderError::Io(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        format!("expected {len} string bytes, stream ended after {}", buf.len()),
                    )));
                }
                buf
            }
            Context::Outer => {
                let mut buf = Vec::new();
                input.read_to_end(&mut buf)?;
                buf
            }
        };
        trace!(len = bytes.len(), ?ctx, "decoded utf-8 string");
        into_utf8(bytes)
    }

    fn encoded_size(&self, value: &String) -> Result<u64> {
        self.encoded_str_size(value)
    }

    fn encoded_type(&self) -> TypeTag {
        TypeTag::of::<String>()
    }
}
