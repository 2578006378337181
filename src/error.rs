use thiserror::Error;

use crate::{il::VariableId, token::Token};

/// The generic Error type, which covers every error this library can return.
///
/// Matchers themselves never fail: a shape that doesn't match is an ordinary
/// `false` / `None`. Errors only arise while building the IL tree that the
/// matchers inspect, when a handle or declaration would violate the invariants
/// the matchers rely on (identity of variables, one receiver per function, field
/// handles that really name fields).
///
/// # Error Categories
///
/// ## Handle Construction
/// - [`Error::InvalidFieldToken`] - A token from a non-field table was used as a field
///
/// ## Variable Table
/// - [`Error::VariableNotFound`] - A [`VariableId`] does not belong to the function
/// - [`Error::DuplicateParameter`] - A parameter slot (or the receiver) was declared twice
///
/// # Examples
///
/// ```rust
/// use cilmatch::{il::FieldRef, token::Token, Error};
///
/// match FieldRef::from_token(Token::new(0x0600_0001)) {
///     Err(Error::InvalidFieldToken(token)) => assert_eq!(token.table(), 0x06),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The token does not point into the `Field` or `MemberRef` table.
    ///
    /// Field handles are compared by token, so accepting a method or type token
    /// would let unrelated entities compare equal to fields.
    #[error("Token {0} does not reference a field")]
    InvalidFieldToken(Token),

    /// The variable id is not part of this function's variable table.
    #[error("Variable {0} not found")]
    VariableNotFound(VariableId),

    /// A parameter with this index was already declared.
    ///
    /// The receiver uses the reserved index `-1`.
    #[error("Parameter with index {0} is already declared")]
    DuplicateParameter(i32),
}
