//! # rowcoder
//!
//! A **deterministic JSON coder** for semi-structured row records, built for
//! Beam-style batch and stream pipelines. A [`Row`] (an insertion-ordered
//! mapping of column names to nested, nullable values) is written as compact
//! UTF-8 JSON text and framed with a varint length prefix, so many rows can
//! share one byte stream.
//!
//! ## Key Features
//!
//! - **Deterministic** - the same row always encodes to the same bytes, so
//!   encoded rows can be used as grouping keys
//! - **Null-preserving** - fields holding null are written, never dropped
//! - **Readable dates** - date/time values are written as ISO-8601 text, not epoch numbers
//! - **Order-preserving** - JSON keys follow the row's insertion order
//! - **Closed value model** - [`RowValue`] is an exhaustive enum, no reflection
//! - **Distinct failures** - I/O errors and encoding errors are separate [`CoderError`] variants
//!
//! ## Quick Start
//!
//! ```
//! use rowcoder::coders::{Coder, RowJsonCoder};
//! use rowcoder::{Row, RowValue};
//! use std::io::Cursor;
//!
//! # fn main() -> rowcoder::Result<()> {
//! let coder = RowJsonCoder::default();
//!
//! let row = Row::new()
//!     .with("user", "ada")
//!     .with("visits", 3)
//!     .with("referrer", RowValue::Null)
//!     .with("address", Row::new().with("city", "London"));
//!
//! let mut bytes = Vec::new();
//! coder.encode(&row, &mut bytes)?;
//!
//! let back = coder.decode(&mut Cursor::new(bytes))?;
//! assert_eq!(back, row);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Coders
//!
//! The [`Coder`] trait is the contract a pipeline host relies on: encode,
//! decode, size estimation, a determinism declaration, and a type tag. Two
//! coders ship with the crate:
//! - [`StringUtf8Coder`] - UTF-8 strings with varint framing
//! - [`RowJsonCoder`] - rows as JSON text, framed by `StringUtf8Coder`
//!
//! ### Contexts
//!
//! A value encoded in [`Context::Nested`] carries its own length; one encoded
//! in [`Context::Outer`] runs to the end of the stream.
//!
//! ### Configuration
//!
//! [`MapperConfig`] controls null handling and temporal formatting. Build it
//! once, wrap it in an `Arc`, and share it between coders.
//!
//! ## Module Overview
//!
//! - [`row`] - `Row`, `RowValue`, `Number` and their JSON mapping
//! - [`coders`] - the `Coder` trait, varints, and the built-in coders
//! - [`config`] - mapper configuration
//! - [`error`] - `CoderError` and the crate `Result`
//! - [`type_token`] - runtime type tags
//! - [`testing`] - coder property assertions and fixture rows

pub mod coders;
pub mod config;
pub mod error;
pub mod row;
pub mod testing;
pub mod type_token;

// General re-exports
pub use coders::{Coder, Context, RowJsonCoder, StringUtf8Coder};
pub use config::{MapperConfig, TemporalFormat};
pub use error::{CoderError, Result};
pub use row::{Number, Row, RowValue};
pub use type_token::TypeTag;
