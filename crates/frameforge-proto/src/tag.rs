//! Field tags: the identifiers that give meaning to a byte position in a
//! [`crate::schema::FrameSchema`].

/// The reserved, protocol-level meanings a schema position can carry.
///
/// `Sync` positions together must equal the configured sync sequence
/// verbatim. `Frame` positions together encode, big-endian, the unsigned
/// byte frame id used to pick a schema out of a [`crate::frame_map::FrameMap`].
/// `Checksum` positions encode the transmitted checksum. `Term` positions are
/// padding or terminator bytes whose value is never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinField {
    /// Contiguous run that must equal the configured sync sequence.
    Sync,
    /// Contiguous run that encodes the frame id, big-endian.
    Frame,
    /// Run that encodes the transmitted checksum.
    Checksum,
    /// Ignored padding / terminator bytes.
    Term,
}

/// Smallest raw value occupied by a reserved tag. User tags must be
/// non-negative and strictly less than this.
///
/// Mirrors `FIELD_SYNC`/`FIELD_FRAME` in the original `serial_library`
/// header, extended with `CHECKSUM` and `TERM` sentinels below `FIELD_FRAME`.
pub const RESERVED_MIN: i32 = i32::MAX - 3;

impl BuiltinField {
    /// The raw sentinel value this builtin field occupies, were field tags
    /// flattened back to a single signed integer space (as the original
    /// `SerialFieldId` did). Exposed for diagnostics only; schema code
    /// compares [`FieldTag`] values directly rather than raw integers.
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::Term => RESERVED_MIN,
            Self::Checksum => RESERVED_MIN + 1,
            Self::Frame => RESERVED_MIN + 2,
            Self::Sync => RESERVED_MIN + 3,
        }
    }
}

/// A field identifier: either one of the four reserved [`BuiltinField`]s or a
/// user-defined, non-negative tag.
///
/// This is the two-variant sum type the original integer-tag scheme
/// collapses into: `builtin(SYNC|FRAME|CHECKSUM|TERM)` vs `user(id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// A reserved, protocol-level field.
    Builtin(BuiltinField),
    /// A user-defined field, unique within a schema only by convention.
    User(i32),
}

impl FieldTag {
    /// The `SYNC` builtin tag.
    pub const SYNC: Self = Self::Builtin(BuiltinField::Sync);
    /// The `FRAME` builtin tag.
    pub const FRAME: Self = Self::Builtin(BuiltinField::Frame);
    /// The `CHECKSUM` builtin tag.
    pub const CHECKSUM: Self = Self::Builtin(BuiltinField::Checksum);
    /// The `TERM` builtin tag.
    pub const TERM: Self = Self::Builtin(BuiltinField::Term);

    /// Construct a user field tag, rejecting ids that collide with the
    /// reserved range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SchemaError::InvalidUserTag`] if `id` is
    /// negative or falls within the range reserved for builtin tags.
    pub fn user(id: i32) -> Result<Self, crate::error::SchemaError> {
        if id < 0 || id >= RESERVED_MIN {
            return Err(crate::error::SchemaError::InvalidUserTag(id));
        }
        Ok(Self::User(id))
    }

    /// True if this tag is one of the four reserved builtins.
    #[must_use]
    pub const fn is_builtin(self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    #[test]
    fn user_tag_accepts_valid_ids() {
        assert_eq!(FieldTag::user(0).unwrap(), FieldTag::User(0));
        assert_eq!(FieldTag::user(42).unwrap(), FieldTag::User(42));
    }

    #[test]
    fn user_tag_rejects_negative() {
        assert_eq!(FieldTag::user(-1), Err(SchemaError::InvalidUserTag(-1)));
    }

    #[test]
    fn user_tag_rejects_reserved_range() {
        assert!(FieldTag::user(RESERVED_MIN).is_err());
        assert!(FieldTag::user(i32::MAX).is_err());
    }

    #[test]
    fn builtins_are_builtin() {
        assert!(FieldTag::SYNC.is_builtin());
        assert!(FieldTag::FRAME.is_builtin());
        assert!(FieldTag::CHECKSUM.is_builtin());
        assert!(FieldTag::TERM.is_builtin());
        assert!(!FieldTag::User(3).is_builtin());
    }
}
