//! The coder contract and the coders built on it.
//!
//! A [`Coder<T>`] turns values of `T` into bytes and back, the way a
//! Beam-style pipeline expects a pluggable coder to behave:
//!
//! - [`encode`](Coder::encode) / [`decode`](Coder::decode) in the
//!   [`Context::Nested`] context, where each record must be self-delimiting
//!   because more bytes may follow it in the same stream;
//! - [`encode_in_context`](Coder::encode_in_context) /
//!   [`decode_in_context`](Coder::decode_in_context) for hosts that know a record
//!   is the last thing in its stream ([`Context::Outer`]);
//! - [`encoded_size`](Coder::encoded_size) for memory and batching decisions;
//! - [`verify_deterministic`](Coder::verify_deterministic), which a host calls
//!   before grouping by encoded bytes;
//! - [`encoded_type`](Coder::encoded_type) for type checks at pipeline
//!   construction time.
//!
//! ## Built-in coders
//!
//! - [`StringUtf8Coder`] - UTF-8 text with a varint length prefix
//! - [`RowJsonCoder`] - [`Row`](crate::Row) as compact JSON text, framed by `StringUtf8Coder`
//!
//! ## Implementing a coder
//!
//! ```
//! use rowcoder::coders::{Coder, Context};
//! use rowcoder::type_token::TypeTag;
//! use rowcoder::Result;
//! use std::io::{Read, Write};
//!
//! struct BoolCoder;
//!
//! impl Coder<bool> for BoolCoder {
//!     fn encode_in_context(&self, value: &bool, out: &mut dyn Write, _ctx: Context) -> Result<()> {
//!         out.write_all(&[u8::from(*value)])?;
//!         Ok(())
//!     }
//!
//!     fn decode_in_context(&self, input: &mut dyn Read, _ctx: Context) -> Result<bool> {
//!         let mut b = [0u8; 1];
//!         input.read_exact(&mut b)?;
//!         Ok(b[0] != 0)
//!     }
//!
//!     fn encoded_size(&self, _value: &bool) -> Result<u64> {
//!         Ok(1)
//!     }
//!
//!     fn encoded_type(&self) -> TypeTag {
//!         TypeTag::of::<bool>()
//!     }
//! }
//! ```

pub mod row_json;
pub mod string_utf8;
pub mod util;
pub mod varint;

pub use row_json::RowJsonCoder;
pub use string_utf8::StringUtf8Coder;
pub use util::{decode_from_slice, encode_to_vec};

use crate::error::Result;
use crate::type_token::TypeTag;
use std::io::{Read, Write};

/// Where an encoded value sits in its byte stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Context {
    /// More data may follow; the encoding must carry its own length.
    #[default]
    Nested,
    /// The value is the last thing in the stream and may run to its end.
    Outer,
}

/// A paired encoder/decoder between values of `T` and bytes.
///
/// Implementations must be safe to share across threads and must not keep
/// per-call state.
pub trait Coder<T>: Send + Sync {
    /// Encode `value` into `out` for the given context.
    ///
    /// # Errors
    ///
    /// [`CoderError::Io`](crate::CoderError::Io) if `out` rejects a write,
    /// [`CoderError::Encoding`](crate::CoderError::Encoding) if `value` has no
    /// representation in this coder's format.
    fn encode_in_context(&self, value: &T, out: &mut dyn Write, ctx: Context) -> Result<()>;

    /// Decode one value from `input` for the given context.
    ///
    /// # Errors
    ///
    /// [`CoderError::Io`](crate::CoderError::Io) if `input` fails or ends early,
    /// [`CoderError::Encoding`](crate::CoderError::Encoding) if the bytes are
    /// not a valid encoding.
    fn decode_in_context(&self, input: &mut dyn Read, ctx: Context) -> Result<T>;

    /// Number of bytes [`encode`](Coder::encode) would write for `value`.
    ///
    /// # Errors
    ///
    /// The same encoding failures as [`encode`](Coder::encode).
    fn encoded_size(&self, value: &T) -> Result<u64>;

    /// The type this coder encodes.
    fn encoded_type(&self) -> TypeTag;

    /// Encode in the nested context.
    ///
    /// # Errors
    ///
    /// See [`encode_in_context`](Coder::encode_in_context).
    fn encode(&self, value: &T, out: &mut dyn Write) -> Result<()> {
        self.encode_in_context(value, out, Context::Nested)
    }

    /// Decode in the nested context.
    ///
    /// # Errors
    ///
    /// See [`decode_in_context`](Coder::decode_in_context).
    fn decode(&self, input: &mut dyn Read) -> Result<T> {
        self.decode_in_context(input, Context::Nested)
    }

    /// Declare that equal values always encode to equal bytes.
    ///
    /// This is an assertion, not a check: it has no side effects and may be
    /// called any number of times.
    ///
    /// # Errors
    ///
    /// [`CoderError::NonDeterministic`](crate::CoderError::NonDeterministic)
    /// for coders that cannot make the promise.
    fn verify_deterministic(&self) -> Result<()> {
        Ok(())
    }
}
