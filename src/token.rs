//! Metadata tokens used to name fields, methods and types inside the IL tree.
//!
//! The matcher library never resolves a token against a metadata stream; a token is
//! only ever compared for equality. The table byte is inspected when a handle is
//! built from a raw token so that, for example, a method token can't masquerade as
//! a field reference.

use std::fmt;

/// A metadata token referencing a row in one of the ECMA-335 metadata tables.
///
/// - The high byte (bits 24-31) is the table id
/// - The low 24 bits (bits 0-23) are the row index within that table
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// `Field` table id.
    pub const TABLE_FIELD: u8 = 0x04;
    /// `MethodDef` table id.
    pub const TABLE_METHOD_DEF: u8 = 0x06;
    /// `MemberRef` table id.
    pub const TABLE_MEMBER_REF: u8 = 0x0A;

    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Token(value)
    }

    /// Builds a token from a table id and a row index.
    ///
    /// Row bits above the 24-bit range are discarded.
    #[must_use]
    pub const fn from_parts(table: u8, row: u32) -> Self {
        Token(((table as u32) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the table id from the token (high byte)
    #[must_use]
    pub const fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the token can name a field (`Field` or `MemberRef` table).
    #[must_use]
    pub const fn is_field_like(&self) -> bool {
        matches!(self.table(), Self::TABLE_FIELD | Self::TABLE_MEMBER_REF)
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}
