//! Variable access matchers.
//!
//! A reference-typed local is manipulated by value (the reference itself), while a
//! value-typed local is manipulated through its address when used as the target
//! of a field access or a call. [`IlInstruction::is_load_local_ref`] and
//! [`IlInstruction::match_load_local_ref`] pick the expected shape from the
//! variable's type; a variable whose kind is unknown is treated as value-kind.

use crate::il::{IlInstruction, IlVariable, IlVariableRc, StackType};

impl IlInstruction {
    /// Returns `true` for `ldloc variable`.
    #[must_use]
    pub fn is_load_local(&self, variable: &IlVariable) -> bool {
        matches!(self, Self::LoadLocal { variable: v } if **v == *variable)
    }

    /// Returns `true` for `ldloca variable`.
    #[must_use]
    pub fn is_load_local_addr(&self, variable: &IlVariable) -> bool {
        matches!(self, Self::LoadLocalAddr { variable: v } if **v == *variable)
    }

    /// Matches `ldloc`, extracting the variable.
    #[must_use]
    pub const fn match_load_local(&self) -> Option<&IlVariableRc> {
        match self {
            Self::LoadLocal { variable } => Some(variable),
            _ => None,
        }
    }

    /// Matches `ldloca`, extracting the variable.
    #[must_use]
    pub const fn match_load_local_addr(&self) -> Option<&IlVariableRc> {
        match self {
            Self::LoadLocalAddr { variable } => Some(variable),
            _ => None,
        }
    }

    /// Returns `true` for `ldloc variable` if the variable is of reference kind,
    /// or `ldloca variable` otherwise.
    #[must_use]
    pub fn is_load_local_ref(&self, variable: &IlVariable) -> bool {
        if variable.is_reference_type() == Some(true) {
            self.is_load_local(variable)
        } else {
            self.is_load_local_addr(variable)
        }
    }

    /// Matches `ldloc v` of a reference-kind variable or `ldloca v` of any other
    /// variable, extracting `v`.
    ///
    /// A load whose shape disagrees with the variable's kind does not match.
    #[must_use]
    pub fn match_load_local_ref(&self) -> Option<&IlVariableRc> {
        match self {
            Self::LoadLocal { variable } if variable.is_reference_type() == Some(true) => {
                Some(variable)
            }
            Self::LoadLocalAddr { variable } if variable.is_reference_type() != Some(true) => {
                Some(variable)
            }
            _ => None,
        }
    }

    /// Returns `true` for `ldloc this`: a load of the parameter at the receiver index.
    #[must_use]
    pub fn is_load_this(&self) -> bool {
        matches!(self, Self::LoadLocal { variable } if variable.is_this())
    }

    /// Matches `stloc`, extracting the assigned variable.
    #[must_use]
    pub const fn match_store_local(&self) -> Option<&IlVariableRc> {
        match self {
            Self::StoreLocal { variable, .. } => Some(variable),
            _ => None,
        }
    }

    /// Matches `stloc variable(value)` for the given variable, extracting `value`.
    #[must_use]
    pub fn match_store_local_to(&self, variable: &IlVariable) -> Option<&IlInstruction> {
        match self {
            Self::StoreLocal { variable: v, value } if **v == *variable => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Matches `ldlen` producing `result_type`, extracting the array operand.
    ///
    /// The filter is on the instruction's own result type, not on the array's
    /// element type.
    #[must_use]
    pub fn match_array_length(&self, result_type: StackType) -> Option<&IlInstruction> {
        match self {
            Self::ArrayLength {
                result_type: ty,
                array,
            } if *ty == result_type => Some(array.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::il::{IlFunction, IlInstruction, IlType, StackType};

    #[test]
    fn test_load_local_identity() {
        let mut func = IlFunction::new();
        let a = func.new_local(IlType::I32);
        let b = func.new_local(IlType::I32);

        let load = IlInstruction::load_local(&a);
        assert!(load.is_load_local(&a));
        assert!(!load.is_load_local(&b));
        assert!(!load.is_load_local_addr(&a));
        assert_eq!(load.match_load_local(), Some(&a));
        assert_eq!(load.match_load_local_addr(), None);

        let addr = IlInstruction::load_local_addr(&b);
        assert!(addr.is_load_local_addr(&b));
        assert_eq!(addr.match_load_local_addr(), Some(&b));
    }

    #[test]
    fn test_load_local_ref_reference_kind() {
        let mut func = IlFunction::new();
        let s = func.new_local(IlType::String);

        assert!(IlInstruction::load_local(&s).is_load_local_ref(&s));
        assert!(!IlInstruction::load_local_addr(&s).is_load_local_ref(&s));

        assert_eq!(IlInstruction::load_local(&s).match_load_local_ref(), Some(&s));
        assert_eq!(IlInstruction::load_local_addr(&s).match_load_local_ref(), None);
    }

    #[test]
    fn test_load_local_ref_value_and_unknown_kind() {
        let mut func = IlFunction::new();
        let n = func.new_local(IlType::I32);
        let t = func.new_local(IlType::GenericParam(0));

        for v in [&n, &t] {
            assert!(IlInstruction::load_local_addr(v).is_load_local_ref(v));
            assert!(!IlInstruction::load_local(v).is_load_local_ref(v));
            assert_eq!(IlInstruction::load_local_addr(v).match_load_local_ref(), Some(v));
            assert_eq!(IlInstruction::load_local(v).match_load_local_ref(), None);
        }
    }

    #[test]
    fn test_load_this() {
        let mut func = IlFunction::new();
        let this = func.declare_this(IlType::Object).unwrap();
        let arg0 = func.declare_parameter(0, IlType::Object).unwrap();
        let local = func.new_local(IlType::Object);

        assert!(IlInstruction::load_local(&this).is_load_this());
        assert!(!IlInstruction::load_local(&arg0).is_load_this());
        assert!(!IlInstruction::load_local(&local).is_load_this());
        assert!(!IlInstruction::load_local_addr(&this).is_load_this());
    }

    #[test]
    fn test_store_local() {
        let mut func = IlFunction::new();
        let a = func.new_local(IlType::I32);
        let b = func.new_local(IlType::I32);
        let store = IlInstruction::store_local(&a, IlInstruction::const_i4(7));

        assert_eq!(store.match_store_local(), Some(&a));
        assert_eq!(
            store.match_store_local_to(&a),
            Some(&IlInstruction::const_i4(7))
        );
        assert_eq!(store.match_store_local_to(&b), None);
        assert_eq!(IlInstruction::load_local(&a).match_store_local(), None);
    }

    #[test]
    fn test_array_length_filters_on_result_type() {
        let mut func = IlFunction::new();
        let arr = func.new_local(IlType::Array(Box::new(IlType::I64), 1));
        let len = IlInstruction::array_length(StackType::I, IlInstruction::load_local(&arr));

        assert_eq!(
            len.match_array_length(StackType::I),
            Some(&IlInstruction::load_local(&arr))
        );
        assert_eq!(len.match_array_length(StackType::I4), None);
        assert_eq!(IlInstruction::Nop.match_array_length(StackType::I), None);
    }
}
