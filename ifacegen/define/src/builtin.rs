//! Built-in type identifiers.
//!
//! The extractor reports primitive and standard-library types by their
//! source identifiers (`int64`, `time.Time`, `[]byte`, ...). [`Builtin`] is
//! the closed set of identifiers that have a fixed, table-driven mapping in
//! both synthesizers. Anything else is a user type.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Prefix marking an array (slice) type identifier.
pub const ARRAY_MARKER: &str = "[]";

/// A built-in type identifier with a fixed mapping.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use ifacegen_define::Builtin;
///
/// assert_eq!(Builtin::from_str("int64").unwrap(), Builtin::Int64);
/// assert_eq!(Builtin::of("[]byte"), Some(Builtin::Byte));
/// assert_eq!(Builtin::of("interface{}"), Some(Builtin::Any));
/// assert_eq!(Builtin::Timestamp.to_string(), "time.Time");
/// assert_eq!(Builtin::of("User"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
pub enum Builtin {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "int8")]
    Int8,
    #[strum(serialize = "int16")]
    Int16,
    #[strum(serialize = "int32")]
    Int32,
    #[strum(serialize = "int64")]
    Int64,
    #[strum(serialize = "uint")]
    Uint,
    #[strum(serialize = "uint8")]
    Uint8,
    #[strum(serialize = "uint16")]
    Uint16,
    #[strum(serialize = "uint32")]
    Uint32,
    #[strum(serialize = "uint64")]
    Uint64,
    /// A raw byte; an array of bytes is an opaque binary payload.
    #[strum(serialize = "byte")]
    Byte,
    #[strum(serialize = "float32")]
    Float32,
    #[strum(serialize = "float64")]
    Float64,
    #[strum(serialize = "time.Time")]
    Timestamp,
    #[strum(serialize = "uuid.UUID")]
    Uuid,
    /// Open/unknown-shape value.
    #[strum(to_string = "Interface", serialize = "interface{}", serialize = "any")]
    Any,
}

impl Builtin {
    /// Looks up the built-in for a declared type identifier.
    ///
    /// One leading array marker and one pointer marker are ignored, so
    /// `[]byte`, `*time.Time` and `byte` all resolve. Unknown identifiers
    /// return `None`.
    pub fn of(type_name: &str) -> Option<Self> {
        let base = type_name.strip_prefix(ARRAY_MARKER).unwrap_or(type_name);
        let base = base.strip_prefix('*').unwrap_or(base);
        base.parse().ok()
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Kinds whose values travel as plain strings (examples stay literal).
    pub fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Timestamp | Self::Uuid)
    }
}
