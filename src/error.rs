//! Error type shared by every coder in the crate.
//!
//! Coders report exactly two kinds of runtime failure, and callers are expected
//! to tell them apart:
//!
//! - [`CoderError::Io`] - the sink or source rejected the operation (including
//!   a stream that ends before a length-prefixed record is complete).
//! - [`CoderError::Encoding`] - a value has no wire representation, or the
//!   bytes read back are not valid UTF-8 / JSON / row-shaped.
//!
//! A third variant, [`CoderError::NonDeterministic`], is only produced by
//! [`Coder::verify_deterministic`](crate::coders::Coder::verify_deterministic)
//! for coders that cannot promise byte-stable output.
//!
//! Nothing in this crate retries or swallows an error; every failure is
//! returned to the immediate caller as-is.

use std::io;

/// Result alias used throughout the crate.
pub type Result<T, E = CoderError> = std::result::Result<T, E>;

/// Failure raised while encoding or decoding a value.
#[derive(Debug, thiserror::Error)]
pub enum CoderError {
    /// The underlying reader or writer failed.
    #[error("coder I/O failure: {0}")]
    Io(#[from] io::Error),

    /// The value (or the bytes read back) cannot be represented in the wire format.
    #[error("coder encoding failure: {message}")]
    Encoding { message: String },

    /// The coder cannot guarantee that equal values encode to equal bytes.
    #[error("coder is not deterministic: {reason}")]
    NonDeterministic { reason: String },
}

impl CoderError {
    /// Build a [`CoderError::Encoding`] from anything printable.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Build a [`CoderError::NonDeterministic`] from anything printable.
    pub fn non_deterministic(reason: impl Into<String>) -> Self {
        Self::NonDeterministic {
            reason: reason.into(),
        }
    }

    /// True if this is an I/O failure of the sink or source.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// True if this is a serialization or parse failure.
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }
}

// serde_json reports writer failures through its own error type; route those back
// to `Io` so the two failure kinds stay distinct for the caller.
impl From<serde_json::Error> for CoderError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(io::Error::from(err))
        } else {
            Self::encoding(err.to_string())
        }
    }
}
