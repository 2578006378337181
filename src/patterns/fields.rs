//! Field access canonicalization.
//!
//! The IL tree has no dedicated field load or store. A field access is an indirect
//! access through a field address:
//!
//! ```text
//! obj.f        =>  ldobj(ldflda f(obj))
//! obj.f = v    =>  stobj(ldflda f(obj), v)
//! C.s          =>  ldobj(ldsflda s)
//! C.s = v      =>  stobj(ldsflda s, v)
//! ```
//!
//! The matchers in this module recognize the two-level compound and report it as
//! a single field access. An indirect access through any other address (an array
//! element, a local's address, a pointer) is not a field access and never matches.

use tracing::trace;

use crate::il::{FieldRef, IlInstruction};

impl IlInstruction {
    /// Address operand of `ldobj`, or `None` for any other instruction.
    fn indirect_load_address(&self) -> Option<&IlInstruction> {
        match self {
            Self::LoadIndirect { target, .. } => Some(target.as_ref()),
            _ => None,
        }
    }

    /// Address and value operands of `stobj`, or `None` for any other instruction.
    fn indirect_store_operands(&self) -> Option<(&IlInstruction, &IlInstruction)> {
        match self {
            Self::StoreIndirect { target, value, .. } => Some((target.as_ref(), value.as_ref())),
            _ => None,
        }
    }

    /// Matches `ldflda`, extracting the target object and the field.
    #[must_use]
    pub fn match_field_addr(&self) -> Option<(&IlInstruction, FieldRef)> {
        match self {
            Self::LoadFieldAddr { target, field } => Some((target.as_ref(), *field)),
            _ => None,
        }
    }

    /// Matches `ldsflda`, extracting the field.
    #[must_use]
    pub const fn match_static_field_addr(&self) -> Option<FieldRef> {
        match self {
            Self::LoadStaticFieldAddr { field } => Some(*field),
            _ => None,
        }
    }

    /// Returns `true` for `ldobj(ldsflda field)`.
    #[must_use]
    pub fn is_static_field_load(&self, field: FieldRef) -> bool {
        self.match_static_field_load() == Some(field)
    }

    /// Matches `ldobj(ldsflda field)`, extracting the field.
    #[must_use]
    pub fn match_static_field_load(&self) -> Option<FieldRef> {
        let address = self.indirect_load_address()?;
        trace_non_field_address(address);
        address.match_static_field_addr()
    }

    /// Matches `ldobj(ldflda field(target))`, extracting `(target, field)`.
    #[must_use]
    pub fn match_field_load(&self) -> Option<(&IlInstruction, FieldRef)> {
        let address = self.indirect_load_address()?;
        trace_non_field_address(address);
        address.match_field_addr()
    }

    /// Matches `stobj(ldsflda field, value)`, extracting `(field, value)`.
    #[must_use]
    pub fn match_static_field_store(&self) -> Option<(FieldRef, &IlInstruction)> {
        let (address, value) = self.indirect_store_operands()?;
        trace_non_field_address(address);
        let field = address.match_static_field_addr()?;
        Some((field, value))
    }

    /// Matches `stobj(ldflda field(target), value)`, extracting `(target, field, value)`.
    #[must_use]
    pub fn match_field_store(&self) -> Option<(&IlInstruction, FieldRef, &IlInstruction)> {
        let (address, value) = self.indirect_store_operands()?;
        trace_non_field_address(address);
        let (target, field) = address.match_field_addr()?;
        Some((target, field, value))
    }

    /// Returns `true` for `ldflda` and `ldsflda`.
    #[must_use]
    pub const fn is_field_addr(&self) -> bool {
        matches!(
            self,
            Self::LoadFieldAddr { .. } | Self::LoadStaticFieldAddr { .. }
        )
    }
}

/// Logs an indirect access whose address is not a field address. Only the
/// address opcode is recorded, never the operand subtree.
fn trace_non_field_address(address: &IlInstruction) {
    if !address.is_field_addr() {
        trace!(opcode = %address.opcode(), "indirect access is not through a field address");
    }
}
