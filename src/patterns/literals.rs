//! Constant matchers.

use crate::il::IlInstruction;

impl IlInstruction {
    /// Returns `true` for `nop`, the placeholder of an absent child.
    #[must_use]
    pub const fn is_nop(&self) -> bool {
        matches!(self, Self::Nop)
    }

    /// Returns `true` for `ldnull`.
    #[must_use]
    pub const fn is_const_null(&self) -> bool {
        matches!(self, Self::ConstNull)
    }

    /// Returns `true` for `ldc.i4 value`.
    #[must_use]
    pub const fn is_const_i4(&self, value: i32) -> bool {
        matches!(self, Self::ConstI4 { value: v } if *v == value)
    }

    /// Matches `ldc.i4`, extracting its value.
    #[must_use]
    pub const fn match_const_i4(&self) -> Option<i32> {
        match self {
            Self::ConstI4 { value } => Some(*value),
            _ => None,
        }
    }

    /// Matches `ldc.i8`, extracting its value.
    #[must_use]
    pub const fn match_const_i8(&self) -> Option<i64> {
        match self {
            Self::ConstI8 { value } => Some(*value),
            _ => None,
        }
    }

    /// Matches either `ldc.i8` or `ldc.i4`, widening the latter to 64 bits.
    #[must_use]
    pub const fn match_const_int(&self) -> Option<i64> {
        match self {
            Self::ConstI8 { value } => Some(*value),
            Self::ConstI4 { value } => Some(*value as i64),
            _ => None,
        }
    }

    /// Matches `ldstr`, extracting the literal.
    #[must_use]
    pub fn match_const_string(&self) -> Option<&str> {
        match self {
            Self::ConstString { value } => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::il::IlInstruction;

    #[test]
    fn test_const_i4() {
        let inst = IlInstruction::const_i4(42);
        assert!(inst.is_const_i4(42));
        assert!(!inst.is_const_i4(41));
        assert_eq!(inst.match_const_i4(), Some(42));
        assert_eq!(inst.match_const_i8(), None);
    }

    #[test]
    fn test_const_int_widens_i4() {
        assert_eq!(IlInstruction::const_i4(-1).match_const_int(), Some(-1));
        assert_eq!(
            IlInstruction::const_i4(i32::MIN).match_const_int(),
            Some(i64::from(i32::MIN))
        );
        assert_eq!(
            IlInstruction::const_i8(1 << 40).match_const_int(),
            Some(1 << 40)
        );
    }

    #[test]
    fn test_const_int_rejects_other_constants() {
        assert_eq!(IlInstruction::ConstF8 { value: 1.0 }.match_const_int(), None);
        assert_eq!(IlInstruction::ConstNull.match_const_int(), None);
        assert_eq!(IlInstruction::Nop.match_const_int(), None);
    }

    #[test]
    fn test_i8_is_not_i4() {
        let inst = IlInstruction::const_i8(0);
        assert!(!inst.is_const_i4(0));
    }

    #[test]
    fn test_const_string_and_null() {
        let s = IlInstruction::const_string("hello");
        assert_eq!(s.match_const_string(), Some("hello"));
        assert!(!s.is_const_null());
        assert!(IlInstruction::ConstNull.is_const_null());
        assert!(IlInstruction::Nop.is_nop());
        assert!(!IlInstruction::ConstNull.is_nop());
    }
}
