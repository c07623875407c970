//! Whole-buffer helpers around a [`Coder`].

use super::{Coder, Context};
use crate::error::{CoderError, Result};
use std::io::Cursor;

/// Encode `value` into a fresh byte vector.
///
/// # Errors
///
/// Any error the coder reports while encoding.
pub fn encode_to_vec<T, C>(coder: &C, value: &T, ctx: Context) -> Result<Vec<u8>>
where
    C: Coder<T> + ?Sized,
{
    let mut out = Vec::new();
    coder.encode_in_context(value, &mut out, ctx)?;
    Ok(out)
}

/// Decode exactly one value from `bytes`.
///
/// In the nested context every byte must be consumed; leftovers mean the
/// buffer did not hold a single encoded value.
///
/// # Errors
///
/// Any error the coder reports while decoding, or [`CoderError::Encoding`] if
/// bytes remain afterwards.
pub fn decode_from_slice<T, C>(coder: &C, bytes: &[u8], ctx: Context) -> Result<T>
where
    C: Coder<T> + ?Sized,
{
    let mut cur = Cursor::new(bytes);
    let value = coder.decode_in_context(&mut cur, ctx)?;
    let consumed = usize::try_from(cur.position()).unwrap_or(usize::MAX);
    if consumed < bytes.len() {
        return Err(CoderError::encoding(format!(
            "{} trailing bytes after decoded value",
            bytes.len() - consumed
        )));
    }
    Ok(value)
}
