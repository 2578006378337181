//! Boolean idioms hidden inside `if` and comparison instructions.
//!
//! Short-circuit operators are not separate instructions in the IL tree; they are
//! conditionals with a constant arm:
//!
//! ```text
//! a && b   =>  if (a) b else ldc.i4 0
//! a || b   =>  if (a) ldc.i4 1 else b
//! ```
//!
//! Unlike C# `&&` and `||`, the right-hand side may be any `i4` value, not only a
//! boolean: the idiom passes it through unchanged. The left-hand side is the
//! condition of the `if` and so is always evaluated as a boolean.
//!
//! Equality has two canonical encodings, `comp(a == b)` and
//! `logic.not(comp(a != b))`; both are reported by [`IlInstruction::match_comp_equals`]
//! with the same operand pair.

use crate::il::{ComparisonKind, IlInstruction};

impl IlInstruction {
    /// Matches `if (lhs) rhs else ldc.i4 0`, extracting `(lhs, rhs)`.
    #[must_use]
    pub fn match_logic_and(&self) -> Option<(&IlInstruction, &IlInstruction)> {
        match self {
            Self::If {
                condition,
                true_inst,
                false_inst,
            } if false_inst.is_const_i4(0) => Some((condition.as_ref(), true_inst.as_ref())),
            _ => None,
        }
    }

    /// Matches `if (lhs) ldc.i4 1 else rhs`, extracting `(lhs, rhs)`.
    #[must_use]
    pub fn match_logic_or(&self) -> Option<(&IlInstruction, &IlInstruction)> {
        match self {
            Self::If {
                condition,
                true_inst,
                false_inst,
            } if true_inst.is_const_i4(1) => Some((condition.as_ref(), false_inst.as_ref())),
            _ => None,
        }
    }

    /// Matches `logic.not`, extracting its argument.
    #[must_use]
    pub fn match_logic_not(&self) -> Option<&IlInstruction> {
        match self {
            Self::LogicNot { argument } => Some(argument.as_ref()),
            _ => None,
        }
    }

    /// Matches `comp` of the given kind, extracting `(left, right)`.
    #[must_use]
    pub fn match_compare(&self, kind: ComparisonKind) -> Option<(&IlInstruction, &IlInstruction)> {
        match self {
            Self::Compare {
                kind: k,
                left,
                right,
                ..
            } if *k == kind => Some((left.as_ref(), right.as_ref())),
            _ => None,
        }
    }

    /// Matches `comp(left == right)` or `logic.not(comp(left != right))`.
    #[must_use]
    pub fn match_comp_equals(&self) -> Option<(&IlInstruction, &IlInstruction)> {
        self.match_comparison_or_negated(ComparisonKind::Equality)
    }

    /// Matches `comp(left != right)` or `logic.not(comp(left == right))`.
    #[must_use]
    pub fn match_comp_not_equals(&self) -> Option<(&IlInstruction, &IlInstruction)> {
        self.match_comparison_or_negated(ComparisonKind::Inequality)
    }

    fn match_comparison_or_negated(
        &self,
        kind: ComparisonKind,
    ) -> Option<(&IlInstruction, &IlInstruction)> {
        debug_assert!(kind.is_equality_or_inequality());
        match self {
            Self::LogicNot { argument } => argument.match_compare(kind.negate()),
            _ => self.match_compare(kind),
        }
    }
}
