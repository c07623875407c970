//! Testing utilities for coders.
//!
//! This module gives hosts (and this crate's own tests) a small set of
//! property checks that every well-behaved [`Coder`](crate::coders::Coder)
//! should pass:
//!
//! - **Round trip**: decoding an encoding gives back an equal value, in both
//!   the nested and the outer context
//! - **Size**: [`encoded_size`](crate::coders::Coder::encoded_size) matches the
//!   bytes actually written
//! - **Determinism**: encoding twice, or re-encoding a decoded value, gives the
//!   same bytes
//! - **Rejection**: malformed input fails instead of decoding to something
//!   empty
//!
//! plus fixture rows covering every [`RowValue`](crate::RowValue) variant.
//!
//! # Quick Start
//!
//! ```
//! use rowcoder::coders::RowJsonCoder;
//! use rowcoder::testing::*;
//!
//! let coder = RowJsonCoder::default();
//! for row in sample_rows() {
//!     assert_round_trip(&coder, &row);
//!     assert_encoded_size_matches(&coder, &row);
//!     assert_deterministic(&coder, &row);
//! }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
