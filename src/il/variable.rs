//! IL variable representation and identifiers.
//!
//! Variables are identity-compared: two [`IlVariable`]s are the same variable iff
//! they carry the same [`VariableId`], no matter how similar their kind, index or
//! type are. Ids are handed out by [`crate::il::IlFunction`], which owns the
//! variable table; instructions share variables through [`IlVariableRc`].
//!
//! # Variable Kinds
//!
//! | Source                        | Kind                   | Index            |
//! |-------------------------------|------------------------|------------------|
//! | `ldarg.0` of an instance method | `Parameter`          | `-1` (`this`)    |
//! | other `ldarg.N`               | `Parameter`            | `N` (shifted)    |
//! | `ldloc.N`                     | `Local` / `PinnedLocal`| `N`              |
//! | evaluation stack temporaries  | `StackSlot`            | slot number      |
//! | exception object in a handler | `ExceptionStackSlot`   | handler number   |

use std::{fmt, hash::Hash, sync::Arc};

use crate::il::IlType;

/// Unique identifier of a variable within one [`crate::il::IlFunction`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    /// Creates a new variable identifier.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the index into the owning function's variable table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V_{}", self.0)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V_{}", self.0)
    }
}

/// Where a variable comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Local variable declared in the method body.
    Local,
    /// Local variable declared `pinned`.
    PinnedLocal,
    /// Method parameter, including the implicit receiver.
    Parameter,
    /// Evaluation stack temporary.
    StackSlot,
    /// The exception object pushed on entry to a catch or filter block.
    ExceptionStackSlot,
}

/// A declared variable.
///
/// Equality and hashing use only the [`VariableId`].
#[derive(Debug, Clone)]
pub struct IlVariable {
    id: VariableId,
    kind: VariableKind,
    index: i32,
    ty: IlType,
    name: Option<String>,
}

/// Shared handle to a variable, as stored in instructions.
pub type IlVariableRc = Arc<IlVariable>;

impl IlVariable {
    /// Parameter index reserved for the implicit receiver (`this`).
    pub const THIS_INDEX: i32 = -1;

    /// Creates a variable. Normally called by [`crate::il::IlFunction`].
    #[must_use]
    pub fn new(id: VariableId, kind: VariableKind, index: i32, ty: IlType) -> Self {
        Self {
            id,
            kind,
            index,
            ty,
            name: None,
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub(crate) fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the identity of this variable.
    #[must_use]
    pub const fn id(&self) -> VariableId {
        self.id
    }

    /// Returns the kind of this variable.
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Returns the slot index; [`Self::THIS_INDEX`] for the receiver.
    #[must_use]
    pub const fn index(&self) -> i32 {
        self.index
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn ty(&self) -> &IlType {
        &self.ty
    }

    /// Returns the display name, if one was attached.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if this is the implicit receiver parameter.
    #[must_use]
    pub fn is_this(&self) -> bool {
        self.kind == VariableKind::Parameter && self.index < 0
    }

    /// Reference-kind classification of the variable's type; see [`IlType::is_reference_type`].
    #[must_use]
    pub const fn is_reference_type(&self) -> Option<bool> {
        self.ty.is_reference_type()
    }
}

impl PartialEq for IlVariable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for IlVariable {}

impl Hash for IlVariable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for IlVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return write!(f, "{name}");
        }
        match self.kind {
            VariableKind::Parameter if self.index < 0 => write!(f, "this"),
            VariableKind::Parameter => write!(f, "arg{}", self.index),
            VariableKind::Local | VariableKind::PinnedLocal => write!(f, "loc{}", self.index),
            VariableKind::StackSlot => write!(f, "S_{}", self.index),
            VariableKind::ExceptionStackSlot => write!(f, "E_{}", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_equality() {
        let a = IlVariable::new(VariableId::new(0), VariableKind::Local, 0, IlType::I32);
        let b = IlVariable::new(VariableId::new(1), VariableKind::Local, 0, IlType::I32);
        let a_again = IlVariable::new(VariableId::new(0), VariableKind::Local, 3, IlType::String);

        assert_ne!(a, b);
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_is_this() {
        let this = IlVariable::new(
            VariableId::new(0),
            VariableKind::Parameter,
            IlVariable::THIS_INDEX,
            IlType::Object,
        );
        let arg0 = IlVariable::new(VariableId::new(1), VariableKind::Parameter, 0, IlType::I32);
        let local = IlVariable::new(VariableId::new(2), VariableKind::Local, -1, IlType::I32);

        assert!(this.is_this());
        assert!(!arg0.is_this());
        assert!(!local.is_this());
    }

    #[test]
    fn test_display() {
        let this = IlVariable::new(VariableId::new(0), VariableKind::Parameter, -1, IlType::Object);
        let arg = IlVariable::new(VariableId::new(1), VariableKind::Parameter, 2, IlType::I32);
        let loc = IlVariable::new(VariableId::new(2), VariableKind::Local, 1, IlType::I32);
        let pinned = IlVariable::new(VariableId::new(3), VariableKind::PinnedLocal, 2, IlType::I32);
        let named = loc.clone().with_name("count");

        assert_eq!(this.to_string(), "this");
        assert_eq!(arg.to_string(), "arg2");
        assert_eq!(loc.to_string(), "loc1");
        assert_eq!(pinned.to_string(), "loc2");
        assert_eq!(named.to_string(), "count");
        assert_eq!(named.name(), Some("count"));
        assert_eq!(VariableId::new(7).to_string(), "V_7");
    }
}
