//! Binary arithmetic and bitwise matchers.

use crate::il::{BinaryNumericOperator, IlInstruction};

impl IlInstruction {
    /// Returns `true` for a `binary` instruction with the given operator.
    #[must_use]
    pub fn is_binary_numeric(&self, operator: BinaryNumericOperator) -> bool {
        matches!(self, Self::BinaryNumeric { operator: op, .. } if *op == operator)
    }

    /// Matches a `binary` instruction with the given operator, extracting `(left, right)`.
    #[must_use]
    pub fn match_binary_numeric_op(
        &self,
        operator: BinaryNumericOperator,
    ) -> Option<(&IlInstruction, &IlInstruction)> {
        match self {
            Self::BinaryNumeric {
                operator: op,
                left,
                right,
                ..
            } if *op == operator => Some((left.as_ref(), right.as_ref())),
            _ => None,
        }
    }

    /// Matches any `binary` instruction, extracting `(operator, left, right)`.
    #[must_use]
    pub fn match_binary_numeric(
        &self,
    ) -> Option<(BinaryNumericOperator, &IlInstruction, &IlInstruction)> {
        match self {
            Self::BinaryNumeric {
                operator,
                left,
                right,
                ..
            } => Some((*operator, left.as_ref(), right.as_ref())),
            _ => None,
        }
    }
}
