//! Deterministic JSON coder for [`Row`] values.
//!
//! Encoding is two stages: the row is written as compact JSON text according
//! to the coder's [`MapperConfig`], then that text goes through
//! [`StringUtf8Coder`] for framing. Decoding runs the same stages backwards.
//!
//! # Normalization
//!
//! - Null fields are written as `null`, not dropped (default config).
//! - Date/time values are written as ISO-8601 text, never as epoch numbers
//!   (default config).
//! - Keys keep the row's insertion order.
//!
//! The output depends only on the row's content and key order, so the coder
//! is deterministic and safe to use for grouping by encoded bytes.
//!
//! # Usage
//!
//! ```
//! use rowcoder::coders::{Coder, RowJsonCoder};
//! use rowcoder::{Row, RowValue};
//! use std::io::Cursor;
//!
//! # fn main() -> rowcoder::Result<()> {
//! let coder = RowJsonCoder::default();
//! let row = Row::new().with("a", RowValue::Null).with("b", "x");
//!
//! let mut buf = Vec::new();
//! coder.encode(&row, &mut buf)?;
//! assert_eq!(buf.len() as u64, coder.encoded_size(&row)?);
//!
//! let back = coder.decode(&mut Cursor::new(buf))?;
//! assert_eq!(back, row);
//! # Ok(())
//! # }
//! ```

use super::{Coder, Context, StringUtf8Coder};
use crate::config::MapperConfig;
use crate::error::Result;
use crate::row::Row;
use crate::row::json::Mapped;
use crate::type_token::TypeTag;
use std::io::{Read, Write};
use std::sync::Arc;
use tracing::trace;

/// Coder for [`Row`] values as UTF-8 JSON text.
///
/// Cloning is cheap: clones share the same `Arc<MapperConfig>`.
#[derive(Clone, Debug, Default)]
pub struct RowJsonCoder {
    config: Arc<MapperConfig>,
    text: StringUtf8Coder,
}

impl RowJsonCoder {
    /// Build a coder around a shared config.
    #[must_use]
    pub fn new(config: Arc<MapperConfig>) -> Self {
        Self {
            config,
            text: StringUtf8Coder,
        }
    }

    /// Build a coder that owns `config`.
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self::new(Arc::new(config))
    }

    /// The config this coder writes with.
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Serialize `row` to compact JSON text.
    ///
    /// # Errors
    ///
    /// [`CoderError::Encoding`](crate::CoderError::Encoding) if a value has no
    /// JSON form (`NaN` or an infinite float), or rows and arrays nest deeper
    /// than [`MAX_NESTING_DEPTH`](crate::row::json::MAX_NESTING_DEPTH).
    pub fn to_json_string(&self, row: &Row) -> Result<String> {
        Ok(serde_json::to_string(&Mapped::new(row, &self.config))?)
    }

    /// Parse JSON text into a new row.
    ///
    /// # Errors
    ///
    /// [`CoderError::Encoding`](crate::CoderError::Encoding) if `text` is not
    /// valid JSON or its top-level value is not an object.
    pub fn from_json_str(&self, text: &str) -> Result<Row> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Coder<Row> for RowJsonCoder {
    fn encode_in_context(&self, row: &Row, out: &mut dyn Write, ctx: Context) -> Result<()> {
        let text = self.to_json_string(row)?;
        trace!(fields = row.len(), json_len = text.len(), "encoding row");
        self.text.encode_str(&text, out, ctx)
    }

    fn decode_in_context(&self, input: &mut dyn Read, ctx: Context) -> Result<Row> {
        let text = self.text.decode_in_context(input, ctx)?;
        let row = self.from_json_str(&text)?;
        trace!(fields = row.len(), json_len = text.len(), "decoded row");
        Ok(row)
    }

    /// Runs the full JSON serialization; as costly as an encode.
    fn encoded_size(&self, row: &Row) -> Result<u64> {
        let text = self.to_json_string(row)?;
        self.text.encoded_str_size(&text)
    }

    fn encoded_type(&self) -> TypeTag {
        TypeTag::of::<Row>()
    }
}
