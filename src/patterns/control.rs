//! Control-flow matchers: branches, leaves, returns, conditionals and handler entry.

use crate::il::{Block, BlockContainer, IlInstruction, IlVariableRc};

impl IlInstruction {
    /// Matches a `leave` out of a function body, extracting the returned value.
    ///
    /// The value is `nop` for a `void` return.
    #[must_use]
    pub fn match_return(&self) -> Option<&IlInstruction> {
        match self {
            Self::Leave { target, value } if target.is_function_body() => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Matches `br`, extracting the target block.
    #[must_use]
    pub const fn match_branch(&self) -> Option<Block> {
        match self {
            Self::Branch { target } => Some(*target),
            _ => None,
        }
    }

    /// Returns `true` for `br target`.
    #[must_use]
    pub fn is_branch_to(&self, target: Block) -> bool {
        matches!(self, Self::Branch { target: t } if *t == target)
    }

    /// Matches any `leave`, extracting the target container and the value passed out.
    #[must_use]
    pub fn match_leave(&self) -> Option<(BlockContainer, &IlInstruction)> {
        match self {
            Self::Leave { target, value } => Some((*target, value.as_ref())),
            _ => None,
        }
    }

    /// Matches a `leave` out of `target`, extracting the value passed out.
    #[must_use]
    pub fn match_leave_to(&self, target: BlockContainer) -> Option<&IlInstruction> {
        match self {
            Self::Leave { target: t, value } if *t == target => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Matches a `leave` that passes no value, extracting the target container.
    #[must_use]
    pub fn match_void_leave(&self) -> Option<BlockContainer> {
        match self {
            Self::Leave { target, value } if value.is_nop() => Some(*target),
            _ => None,
        }
    }

    /// Returns `true` for a `leave` out of `target` that passes no value.
    #[must_use]
    pub fn is_void_leave_to(&self, target: BlockContainer) -> bool {
        self.match_void_leave() == Some(target)
    }

    /// Matches `if`, extracting condition, true arm and false arm.
    #[must_use]
    pub fn match_if(&self) -> Option<(&IlInstruction, &IlInstruction, &IlInstruction)> {
        match self {
            Self::If {
                condition,
                true_inst,
                false_inst,
            } => Some((condition.as_ref(), true_inst.as_ref(), false_inst.as_ref())),
            _ => None,
        }
    }

    /// Matches an `if` whose false arm is `nop`, extracting condition and true arm.
    #[must_use]
    pub fn match_if_then(&self) -> Option<(&IlInstruction, &IlInstruction)> {
        match self {
            Self::If {
                condition,
                true_inst,
                false_inst,
            } if false_inst.is_nop() => Some((condition.as_ref(), true_inst.as_ref())),
            _ => None,
        }
    }

    /// Matches the entry of a catch handler, extracting the exception variable.
    #[must_use]
    pub const fn match_catch_handler(&self) -> Option<&IlVariableRc> {
        match self {
            Self::CatchHandler { variable, .. } => Some(variable),
            _ => None,
        }
    }
}
