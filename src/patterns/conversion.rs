//! Seeing through conversions.

use tracing::trace;

use crate::il::{ConversionKind, IlInstruction};

impl IlInstruction {
    /// If this instruction is a conversion of the given kind, returns its argument;
    /// otherwise returns the instruction itself.
    ///
    /// Only unchecked conversions are peeled: a `conv.ovf` can throw and so is not
    /// transparent. Nested conversions of the same kind are peeled together, so
    /// `conv.nop(conv.nop(x))` unwraps to `x`. Every other instruction is returned
    /// unchanged.
    #[must_use]
    pub fn unwrap_conv(&self, kind: ConversionKind) -> &IlInstruction {
        let mut inst = self;
        while let Self::Conv {
            argument,
            kind: k,
            check_overflow: false,
            ..
        } = inst
        {
            if *k != kind {
                break;
            }
            trace!(%kind, "unwrapping conversion");
            inst = argument.as_ref();
        }
        inst
    }
}
