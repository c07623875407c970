//! Runtime type tags for coder type-compatibility checks.
//!
//! Every [`Coder`](crate::coders::Coder) declares the type it encodes through
//! [`Coder::encoded_type`](crate::coders::Coder::encoded_type). A host that
//! wires coders together at construction time can compare tags instead of
//! carrying generic parameters around:
//!
//! ```
//! use rowcoder::coders::{Coder, RowJsonCoder, StringUtf8Coder};
//! use rowcoder::type_token::TypeTag;
//! use rowcoder::Row;
//!
//! let rows = RowJsonCoder::default();
//! assert!(rows.encoded_type().is::<Row>());
//! assert_ne!(rows.encoded_type(), StringUtf8Coder.encoded_type());
//! assert_eq!(TypeTag::of::<String>(), StringUtf8Coder.encoded_type());
//! ```

use std::any::{type_name, TypeId};
use std::fmt;

/// A lightweight runtime type tag.
///
/// `TypeTag` carries the `TypeId` and a readable type name. Equality only
/// looks at the `TypeId`; the name is for messages.
#[derive(Clone, Copy, Debug, Eq)]
pub struct TypeTag {
    /// Stable Rust type identifier.
    pub id: TypeId,
    /// Human-readable type name (best-effort).
    pub name: &'static str,
}

impl TypeTag {
    /// Construct a tag for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// True if this tag was built for `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for TypeTag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_compare_by_type() {
        assert_eq!(TypeTag::of::<u32>(), TypeTag::of::<u32>());
        assert_ne!(TypeTag::of::<u32>(), TypeTag::of::<i32>());
        assert!(TypeTag::of::<String>().is::<String>());
        assert_eq!(TypeTag::of::<u32>().to_string(), "u32");
    }
}
