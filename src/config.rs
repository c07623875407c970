//! Mapping configuration for the row JSON coder.
//!
//! A [`MapperConfig`] is built once (usually with `MapperConfig::default()`),
//! wrapped in an [`Arc`](std::sync::Arc), and handed to every
//! [`RowJsonCoder`](crate::coders::RowJsonCoder) that should share it. It is
//! never mutated after construction, so coders on different threads can read it
//! without locking.
//!
//! # Usage
//!
//! ```
//! use rowcoder::config::{MapperConfig, TemporalFormat};
//! use rowcoder::coders::RowJsonCoder;
//! use std::sync::Arc;
//!
//! let config = Arc::new(MapperConfig {
//!     write_nulls: true,
//!     temporal_format: TemporalFormat::Iso8601,
//! });
//!
//! let a = RowJsonCoder::new(Arc::clone(&config));
//! let b = RowJsonCoder::new(config);
//! assert_eq!(a.config(), b.config());
//! ```

use serde::{Deserialize, Serialize};

/// How date/time values are written to JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalFormat {
    /// ISO-8601 text, e.g. `"2023-05-01T00:00:00Z"`.
    #[default]
    Iso8601,
    /// Milliseconds since the UNIX epoch. Only instants and civil date-times
    /// (taken as UTC) have a numeric form; dates and times of day stay textual.
    EpochMillis,
}

/// Immutable configuration for turning rows into JSON text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Keep fields whose value is null (`"a":null`). When `false`, null fields
    /// of a row are left out; nulls inside arrays are always written.
    pub write_nulls: bool,
    /// Representation of date/time values.
    pub temporal_format: TemporalFormat,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            write_nulls: true,
            temporal_format: TemporalFormat::Iso8601,
        }
    }
}
