//! Control-flow target handles.
//!
//! The matchers never walk the control-flow graph; they only compare the targets
//! named by `br` and `leave` instructions. Both handle types are therefore plain
//! identity tokens allocated by [`crate::il::IlFunction`].

use std::fmt;

/// A basic block, the target of an unconditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block(u32);

impl Block {
    /// Creates a block handle.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

/// What a block container structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// The body of a function; leaving it returns from the function.
    Function,
    /// A plain nested block.
    Block,
    /// A loop body.
    Loop,
    /// The body of a switch.
    Switch,
}

/// A structured container of blocks, the target of a `leave`.
///
/// Identity is the id; the kind is fixed when the container is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockContainer {
    id: u32,
    kind: ContainerKind,
}

impl BlockContainer {
    /// Creates a container handle.
    #[must_use]
    pub const fn new(id: u32, kind: ContainerKind) -> Self {
        Self { id, kind }
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.id
    }

    /// Returns the container kind.
    #[must_use]
    pub const fn kind(self) -> ContainerKind {
        self.kind
    }

    /// Returns `true` if this container is the body of a function.
    #[must_use]
    pub const fn is_function_body(self) -> bool {
        matches!(self.kind, ContainerKind::Function)
    }
}

impl fmt::Display for BlockContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.id)
    }
}
