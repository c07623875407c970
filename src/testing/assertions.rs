//! Property assertions for [`Coder`] implementations.
//!
//! The `assert_*` functions panic with a detailed message on failure, like
//! `assert_eq!`. [`round_trip`] is the non-panicking building block they share.

use crate::coders::{Coder, Context, decode_from_slice, encode_to_vec};
use crate::error::CoderError;
use anyhow::{Context as _, Result};
use std::fmt::Debug;

/// Encode `value` and decode it again in `ctx`.
///
/// # Errors
///
/// Returns the coder's error, annotated with the failing stage.
pub fn round_trip<T, C>(coder: &C, value: &T, ctx: Context) -> Result<T>
where
    C: Coder<T> + ?Sized,
{
    let bytes = encode_to_vec(coder, value, ctx).with_context(|| format!("encode in {ctx:?}"))?;
    decode_from_slice(coder, &bytes, ctx).with_context(|| format!("decode in {ctx:?}"))
}

/// Assert that `value` survives a round trip in both contexts.
///
/// Besides `==`, the decoded value must re-encode to the original bytes, so
/// differences that equality ignores (such as a row's key order) still fail.
///
/// # Panics
///
/// Panics if encoding or decoding fails, the decoded value differs, or it
/// re-encodes to different bytes.
///
/// # Example
///
/// ```
/// use rowcoder::coders::StringUtf8Coder;
/// use rowcoder::testing::assert_round_trip;
///
/// assert_round_trip(&StringUtf8Coder, &"héllo".to_string());
/// ```
pub fn assert_round_trip<T, C>(coder: &C, value: &T)
where
    T: Debug + PartialEq,
    C: Coder<T> + ?Sized,
{
    for ctx in [Context::Nested, Context::Outer] {
        let checked = encode_to_vec(coder, value, ctx)
            .context("encode")
            .and_then(|bytes| {
                let back: T = decode_from_slice(coder, &bytes, ctx).context("decode")?;
                let again = encode_to_vec(coder, &back, ctx).context("re-encode")?;
                Ok((bytes, back, again))
            });
        match checked {
            Ok((bytes, back, again)) => {
                assert_eq!(
                    &back, value,
                    "Round trip mismatch in {ctx:?} context:\n  Expected: {value:?}\n  Actual: {back:?}"
                );
                assert_eq!(
                    bytes, again,
                    "Re-encoding the decoded value changed the bytes in {ctx:?} context:\n  Original: {value:?}\n  Decoded: {back:?}"
                );
            }
            Err(e) => panic!("Round trip failed in {ctx:?} context: {e:#}\n  Value: {value:?}"),
        }
    }
}

/// Assert that [`Coder::encoded_size`] equals the length of the nested encoding.
///
/// # Panics
///
/// Panics if either call fails or the sizes differ.
pub fn assert_encoded_size_matches<T, C>(coder: &C, value: &T)
where
    T: Debug,
    C: Coder<T> + ?Sized,
{
    let bytes = encode_to_vec(coder, value, Context::Nested)
        .unwrap_or_else(|e| panic!("Encoding failed: {e}\n  Value: {value:?}"));
    let reported = coder
        .encoded_size(value)
        .unwrap_or_else(|e| panic!("Size estimation failed: {e}\n  Value: {value:?}"));
    assert_eq!(
        reported,
        bytes.len() as u64,
        "Encoded size mismatch:\n  Reported: {reported}\n  Written: {}\n  Value: {value:?}",
        bytes.len()
    );
}

/// Assert that the coder declares determinism and behaves accordingly.
///
/// Checks that [`Coder::verify_deterministic`] succeeds (twice), that encoding
/// `value` twice gives identical bytes, and that re-encoding the decoded value
/// reproduces those bytes.
///
/// # Panics
///
/// Panics on any failure or byte mismatch.
pub fn assert_deterministic<T, C>(coder: &C, value: &T)
where
    T: Debug,
    C: Coder<T> + ?Sized,
{
    for _ in 0..2 {
        if let Err(e) = coder.verify_deterministic() {
            panic!("Coder does not declare determinism: {e}");
        }
    }
    let encode = |v: &T| {
        encode_to_vec(coder, v, Context::Nested)
            .unwrap_or_else(|e| panic!("Encoding failed: {e}\n  Value: {v:?}"))
    };
    let first = encode(value);
    let second = encode(value);
    assert_eq!(
        first, second,
        "Encoding is not stable across calls\n  Value: {value:?}"
    );
    let decoded: T = decode_from_slice(coder, &first, Context::Nested)
        .unwrap_or_else(|e| panic!("Decoding failed: {e}\n  Value: {value:?}"));
    let again = encode(&decoded);
    assert_eq!(
        first, again,
        "Re-encoding the decoded value changed the bytes\n  Original: {value:?}\n  Decoded: {decoded:?}"
    );
}

/// Assert that decoding `bytes` fails, and return the error for inspection.
///
/// # Panics
///
/// Panics if decoding succeeds.
pub fn assert_decode_fails<T, C>(coder: &C, bytes: &[u8], ctx: Context) -> CoderError
where
    T: Debug,
    C: Coder<T> + ?Sized,
{
    match decode_from_slice::<T, C>(coder, bytes, ctx) {
        Ok(v) => panic!("Expected decoding to fail, got {v:?}\n  Bytes: {bytes:?}"),
        Err(e) => e,
    }
}
