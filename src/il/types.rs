//! Type information and operator tags carried by IL instructions.
//!
//! This module provides the small, closed vocabularies the matchers compare
//! against: metadata handles ([`FieldRef`], [`MethodRef`], [`TypeRef`]), a
//! simplified CIL type ([`IlType`]) used to classify variables as reference- or
//! value-kind, the evaluation-stack type ([`StackType`]), and the operator tags of
//! comparison, arithmetic and conversion instructions.
//!
//! # Design Rationale
//!
//! - **Fast to compare**: Every handle is a `Copy` wrapper around a [`Token`]
//! - **Self-contained**: No metadata resolver is needed to classify a variable
//! - **Enumerable**: Operator tags derive `EnumIter` so exhaustive tests can walk them

use std::fmt;

use strum::{EnumCount, EnumIter};

use crate::{token::Token, Error, Result};

/// Reference to a type in metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeRef(pub Token);

impl TypeRef {
    /// Creates a new type reference from a metadata token.
    #[must_use]
    pub const fn new(token: Token) -> Self {
        Self(token)
    }

    /// Returns the underlying metadata token.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type({})", self.0)
    }
}

/// Reference to a method in metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodRef(pub Token);

impl MethodRef {
    /// Creates a new method reference from a metadata token.
    #[must_use]
    pub const fn new(token: Token) -> Self {
        Self(token)
    }

    /// Returns the underlying metadata token.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.0
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method({})", self.0)
    }
}

/// Reference to a field in metadata.
///
/// Two field references are the same field iff their tokens are equal. Whether a
/// field is static or instance is not stored here: it is implied by the address
/// instruction (`ldsflda` vs `ldflda`) that names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef(pub Token);

impl FieldRef {
    /// Creates a new field reference from a metadata token, without validation.
    #[must_use]
    pub const fn new(token: Token) -> Self {
        Self(token)
    }

    /// Creates a field reference, checking that the token names a field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldToken`] unless the token belongs to the
    /// `Field` or `MemberRef` table.
    pub fn from_token(token: Token) -> Result<Self> {
        if token.is_field_like() {
            Ok(Self(token))
        } else {
            Err(Error::InvalidFieldToken(token))
        }
    }

    /// Returns the underlying metadata token.
    #[must_use]
    pub const fn token(&self) -> Token {
        self.0
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field({})", self.0)
    }
}

/// Simplified CIL type of a variable or memory location.
///
/// Only as much of the type system as the matchers need: enough to decide
/// whether a variable holds a reference (and is therefore loaded by value) or a
/// value type (and is therefore accessed through its address).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum IlType {
    /// No value (void).
    Void,
    /// System.Boolean.
    Bool,
    /// System.SByte.
    I8,
    /// System.Byte.
    U8,
    /// System.Int16.
    I16,
    /// System.UInt16.
    U16,
    /// System.Int32.
    I32,
    /// System.UInt32.
    U32,
    /// System.Int64.
    I64,
    /// System.UInt64.
    U64,
    /// System.IntPtr.
    NativeInt,
    /// System.UIntPtr.
    NativeUInt,
    /// System.Single.
    F32,
    /// System.Double.
    F64,
    /// System.Char.
    Char,
    /// System.Object.
    Object,
    /// System.String.
    String,
    /// A specific class type.
    Class(TypeRef),
    /// A value type (struct), stored inline.
    ValueType(TypeRef),
    /// Array of the element type with the given rank.
    Array(Box<IlType>, u32),
    /// Unmanaged pointer.
    Pointer(Box<IlType>),
    /// Managed reference (byref).
    ByRef(Box<IlType>),
    /// Generic type parameter (`!n`).
    GenericParam(u32),
    /// Generic method parameter (`!!n`).
    MethodGenericParam(u32),
    /// Type not known.
    #[default]
    Unknown,
}

impl IlType {
    /// Classifies the type as reference-kind or value-kind.
    ///
    /// Returns `Some(true)` for object references (classes, strings, arrays),
    /// `Some(false)` for value types, primitives and pointers, and `None` when the
    /// kind can't be decided (generic parameters, unknown or void).
    #[must_use]
    pub const fn is_reference_type(&self) -> Option<bool> {
        match self {
            Self::Object | Self::String | Self::Class(_) | Self::Array(_, _) => Some(true),
            Self::ValueType(_) | Self::Pointer(_) | Self::ByRef(_) => Some(false),
            Self::GenericParam(_) | Self::MethodGenericParam(_) | Self::Unknown | Self::Void => {
                None
            }
            _ => Some(false),
        }
    }

    /// Maps the type to the evaluation stack type a value of it occupies.
    #[must_use]
    pub const fn stack_type(&self) -> StackType {
        match self {
            Self::Bool
            | Self::I8
            | Self::U8
            | Self::I16
            | Self::U16
            | Self::I32
            | Self::U32
            | Self::Char => StackType::I4,
            Self::I64 | Self::U64 => StackType::I8,
            Self::NativeInt | Self::NativeUInt | Self::Pointer(_) => StackType::I,
            Self::F32 => StackType::F4,
            Self::F64 => StackType::F8,
            Self::Object | Self::String | Self::Class(_) | Self::Array(_, _) => StackType::O,
            Self::ByRef(_) => StackType::Ref,
            Self::Void => StackType::Void,
            Self::ValueType(_)
            | Self::GenericParam(_)
            | Self::MethodGenericParam(_)
            | Self::Unknown => StackType::Unknown,
        }
    }
}

impl fmt::Display for IlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Bool => write!(f, "bool"),
            Self::I8 => write!(f, "sbyte"),
            Self::U8 => write!(f, "byte"),
            Self::I16 => write!(f, "short"),
            Self::U16 => write!(f, "ushort"),
            Self::I32 => write!(f, "int"),
            Self::U32 => write!(f, "uint"),
            Self::I64 => write!(f, "long"),
            Self::U64 => write!(f, "ulong"),
            Self::NativeInt => write!(f, "nint"),
            Self::NativeUInt => write!(f, "nuint"),
            Self::F32 => write!(f, "float"),
            Self::F64 => write!(f, "double"),
            Self::Char => write!(f, "char"),
            Self::Object => write!(f, "object"),
            Self::String => write!(f, "string"),
            Self::Class(t) | Self::ValueType(t) => write!(f, "{t}"),
            Self::Array(elem, rank) => {
                write!(f, "{elem}[")?;
                for _ in 1..*rank {
                    write!(f, ",")?;
                }
                write!(f, "]")
            }
            Self::Pointer(inner) => write!(f, "{inner}*"),
            Self::ByRef(inner) => write!(f, "{inner}&"),
            Self::GenericParam(idx) => write!(f, "!{idx}"),
            Self::MethodGenericParam(idx) => write!(f, "!!{idx}"),
            Self::Unknown => write!(f, "?"),
        }
    }
}

/// Type of a value on the CIL evaluation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCount, strum::Display)]
pub enum StackType {
    /// Not yet known.
    #[default]
    #[strum(serialize = "?")]
    Unknown,
    /// 32-bit integer.
    #[strum(serialize = "i4")]
    I4,
    /// Native-sized integer (also unmanaged pointers).
    #[strum(serialize = "i")]
    I,
    /// 64-bit integer.
    #[strum(serialize = "i8")]
    I8,
    /// 32-bit float.
    #[strum(serialize = "f4")]
    F4,
    /// 64-bit float.
    #[strum(serialize = "f8")]
    F8,
    /// Object reference.
    #[strum(serialize = "o")]
    O,
    /// Managed reference.
    #[strum(serialize = "ref")]
    Ref,
    /// No value.
    #[strum(serialize = "void")]
    Void,
}

/// Kind of a comparison instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
pub enum ComparisonKind {
    /// `left == right`
    #[strum(serialize = "==")]
    Equality,
    /// `left != right`
    #[strum(serialize = "!=")]
    Inequality,
    /// `left < right`
    #[strum(serialize = "<")]
    LessThan,
    /// `left <= right`
    #[strum(serialize = "<=")]
    LessThanOrEqual,
    /// `left > right`
    #[strum(serialize = ">")]
    GreaterThan,
    /// `left >= right`
    #[strum(serialize = ">=")]
    GreaterThanOrEqual,
}

impl ComparisonKind {
    /// Returns the comparison that yields the opposite result for the same operands.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Equality => Self::Inequality,
            Self::Inequality => Self::Equality,
            Self::LessThan => Self::GreaterThanOrEqual,
            Self::LessThanOrEqual => Self::GreaterThan,
            Self::GreaterThan => Self::LessThanOrEqual,
            Self::GreaterThanOrEqual => Self::LessThan,
        }
    }

    /// Returns `true` for `==` and `!=`.
    #[must_use]
    pub const fn is_equality_or_inequality(self) -> bool {
        matches!(self, Self::Equality | Self::Inequality)
    }
}

/// Operator of a binary arithmetic or bitwise instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BinaryNumericOperator {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Remainder.
    Rem,
    /// Bitwise and.
    #[strum(serialize = "bit.and")]
    BitAnd,
    /// Bitwise or.
    #[strum(serialize = "bit.or")]
    BitOr,
    /// Bitwise xor.
    #[strum(serialize = "bit.xor")]
    BitXor,
    /// Shift left.
    #[strum(serialize = "shl")]
    ShiftLeft,
    /// Shift right.
    #[strum(serialize = "shr")]
    ShiftRight,
}

/// Signedness of an arithmetic or conversion instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    /// Signed, or signedness does not affect the result.
    #[default]
    None,
    /// Operands are treated as unsigned.
    Unsigned,
}

/// What a `conv` instruction does to its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ConversionKind {
    /// The conversion is not valid for the operand type.
    Invalid,
    /// Changes only the type, not the bits (e.g. `int` to `uint`).
    Nop,
    /// Drops the high bits of an integer.
    Truncate,
    /// Widens an integer, replicating the sign bit.
    SignExtend,
    /// Widens an integer, filling with zero bits.
    ZeroExtend,
    /// Integer to floating point.
    IntToFloat,
    /// Floating point to integer.
    FloatToInt,
    /// `float` to `double` or back.
    FloatPrecisionChange,
    /// Unmanaged pointer to managed reference.
    StartGcTracking,
    /// Managed reference to unmanaged pointer.
    StopGcTracking,
    /// Object reference to an interior pointer.
    ObjectInterior,
}
