//! Bidirectional string/value conversion for the supported scalar types.
//!
//! [`Scalar`] is the caster contract: every supported type knows how to
//! render itself as a token and how to strictly parse a token back. Values
//! crossing the type-erased registry travel as a [`Value`], a closed tagged
//! union tagged with a [`ValueKind`], so a retrieval with the wrong type is a
//! reported error rather than a reinterpretation.
//!
//! # Examples
//!
//! ```
//! use typed_cmdline_core::{cast_from_string, cast_to_string, ArgError, ValueKind};
//!
//! assert_eq!(cast_from_string::<i32>("42"), Ok(42));
//! assert_eq!(cast_to_string(&true), "true");
//!
//! // Leftover characters are never silently dropped.
//! assert_eq!(
//!     cast_from_string::<i32>("42abc"),
//!     Err(ArgError::TypeCast { target: ValueKind::I32, token: "42abc".into() }),
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ArgError, Result};

/// Runtime tag for the supported scalar types.
///
/// The `Display` impl yields the Rust type name, which is what error
/// messages use to name a cast target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl ValueKind {
    /// Returns the Rust type name for this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::Isize => "isize",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::Usize => "usize",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::String => "String",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A type-erased argument value.
///
/// # Examples
///
/// ```
/// use typed_cmdline_core::{Scalar, Value, ValueKind};
///
/// let value = 0.01f32.into_value();
/// assert_eq!(value.kind(), ValueKind::F32);
/// assert_eq!(value.to_string(), "0.01");
/// assert_eq!(f32::from_value(&value), Some(0.01));
/// assert_eq!(i32::from_value(&value), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
}

impl Value {
    /// Returns the kind tag of the held value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::Isize(_) => ValueKind::Isize,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::Usize(_) => ValueKind::Usize,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::String(_) => ValueKind::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Isize(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::Usize(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Caster contract for a supported scalar type.
///
/// Implemented for `bool`, the signed and unsigned integer types, `f32`,
/// `f64`, and `String`. Aggregates are not supported, and the set is closed:
/// the trait cannot be implemented outside this crate.
///
/// ```compile_fail
/// use typed_cmdline_core::{Scalar, Value, ValueKind};
///
/// #[derive(Debug, Clone, PartialEq, Default)]
/// struct Port(u16);
///
/// impl Scalar for Port {
///     const KIND: ValueKind = ValueKind::U16;
///     fn cast_from(token: &str) -> typed_cmdline_core::Result<Self> {
///         u16::cast_from(token).map(Port)
///     }
///     fn cast_to_string(&self) -> String {
///         self.0.to_string()
///     }
///     fn into_value(self) -> Value {
///         Value::U16(self.0)
///     }
///     fn from_value(value: &Value) -> Option<Self> {
///         u16::from_value(value).map(Port)
///     }
/// }
/// ```
pub trait Scalar:
    sealed::Sealed + Clone + PartialEq + Default + fmt::Debug + Send + Sync + 'static
{
    /// Runtime tag for this type.
    const KIND: ValueKind;

    /// Parses a token, consuming all of it.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::TypeCast`] on leftover characters, numeric
    /// malformation, a float that is out of range or not finite, or a
    /// boolean token other than `true`/`false`.
    fn cast_from(token: &str) -> Result<Self>;

    /// Renders the canonical, locale-independent token for this value.
    fn cast_to_string(&self) -> String;

    /// Whether this value counts as "no default" when given as a default
    /// (zero, `false`, or the empty string).
    fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Wraps this value in the tagged union.
    fn into_value(self) -> Value;

    /// Recovers a value of this type, or `None` if `value` holds another kind.
    fn from_value(value: &Value) -> Option<Self>;
}

fn cast_error(target: ValueKind, token: &str) -> ArgError {
    ArgError::TypeCast {
        target,
        token: token.to_string(),
    }
}

macro_rules! impl_from_str_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn cast_from(token: &str) -> Result<Self> {
                    token
                        .parse::<$ty>()
                        .map_err(|_| cast_error(Self::KIND, token))
                }

                fn cast_to_string(&self) -> String {
                    self.to_string()
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

// Out-of-range tokens overflow to infinity in `FromStr`, so only finite
// results are accepted; "inf" and "NaN" spellings are rejected as well.
macro_rules! impl_float_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const KIND: ValueKind = ValueKind::$variant;

                fn cast_from(token: &str) -> Result<Self> {
                    match token.parse::<$ty>() {
                        Ok(v) if v.is_finite() => Ok(v),
                        _ => Err(cast_error(Self::KIND, token)),
                    }
                }

                fn cast_to_string(&self) -> String {
                    self.to_string()
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_str_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

impl_float_scalar! {
    f32 => F32,
    f64 => F64,
}

impl sealed::Sealed for bool {}

impl Scalar for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn cast_from(token: &str) -> Result<Self> {
        match token {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(cast_error(Self::KIND, token)),
        }
    }

    fn cast_to_string(&self) -> String {
        self.to_string()
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl sealed::Sealed for String {}

impl Scalar for String {
    const KIND: ValueKind = ValueKind::String;

    // Text to text is the identity.
    fn cast_from(token: &str) -> Result<Self> {
        Ok(token.to_string())
    }

    fn cast_to_string(&self) -> String {
        self.clone()
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Parses `token` as a `T`.
///
/// # Errors
///
/// Returns [`ArgError::TypeCast`] naming `T` and the token when the token is
/// not a complete, well-formed `T`.
pub fn cast_from_string<T: Scalar>(token: &str) -> Result<T> {
    let result = T::cast_from(token);
    trace!(target_kind = %T::KIND, token, ok = result.is_ok(), "Cast token");
    result
}

/// Renders `value` as its canonical token.
pub fn cast_to_string<T: Scalar>(value: &T) -> String {
    value.cast_to_string()
}
